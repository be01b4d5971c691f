use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use error_location::ErrorLocation;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT_SECS: u64 = 5;

/// Schema for both record stores
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open (creating if needed) the SQLite file at `path` and bring its schema up to date.
pub async fn create_pool(path: &Path) -> DbErrorResult<SqlitePool> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DbError::Initialization {
                message: format!("Failed to create database directory: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    log::info!("Database ready at {}", path.display());

    Ok(pool)
}
