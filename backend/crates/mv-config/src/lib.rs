mod client_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod retry_config;
mod server_config;
mod stream_config;

#[cfg(test)]
mod tests;

pub use client_config::ClientConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;
pub use stream_config::{ReplayModeSetting, StreamConfig};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_INFO_PORT: u16 = 8080;
const DEFAULT_REVIEW_PORT: u16 = 8081;
const DEFAULT_MOVIES_PORT: u16 = 8082;
const MIN_PORT: u16 = 1024;
const DEFAULT_INFO_DATABASE_FILENAME: &str = "movies_info.db";
const DEFAULT_REVIEW_DATABASE_FILENAME: &str = "reviews.db";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
const CONFIG_DIR_ENV: &str = "MV_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".mv";
