use crate::{DEFAULT_INFO_DATABASE_FILENAME, DEFAULT_REVIEW_DATABASE_FILENAME};

use serde::Deserialize;

/// SQLite files owned by the record-keeping services, relative to the config dir
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub info_path: String,
    pub review_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            info_path: String::from(DEFAULT_INFO_DATABASE_FILENAME),
            review_path: String::from(DEFAULT_REVIEW_DATABASE_FILENAME),
        }
    }
}
