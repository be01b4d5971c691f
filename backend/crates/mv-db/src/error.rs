use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Stored column could not be decoded: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Record error: {source} {location}")]
    Core {
        #[source]
        source: mv_core::CoreError,
        location: ErrorLocation,
    },
}

impl From<mv_core::CoreError> for DbError {
    #[track_caller]
    fn from(source: mv_core::CoreError) -> Self {
        Self::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Decode {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
