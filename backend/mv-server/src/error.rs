use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] mv_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] mv_db::DbError),

    #[error("Downstream client error: {0}")]
    Client(#[from] mv_client::FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Metrics error: {message}")]
    Metrics { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
