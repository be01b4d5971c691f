use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_MOVIES_INFO_URL: &str = "http://127.0.0.1:8080/v1/moviesinfo";
pub const DEFAULT_REVIEWS_URL: &str = "http://127.0.0.1:8081/v1/reviews";

pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const MIN_CONNECT_TIMEOUT_SECS: u64 = 1;
pub const MAX_CONNECT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Downstream endpoints used by the movies aggregator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub movies_info_url: String,
    pub reviews_url: String,
    /// Per-request timeout for single-record fetches (not applied to streams)
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            movies_info_url: String::from(DEFAULT_MOVIES_INFO_URL),
            reviews_url: String::from(DEFAULT_REVIEWS_URL),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, url) in [
            ("client.movies_info_url", &self.movies_info_url),
            ("client.reviews_url", &self.reviews_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::client(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::client(format!(
                "client.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        if self.connect_timeout_secs < MIN_CONNECT_TIMEOUT_SECS
            || self.connect_timeout_secs > MAX_CONNECT_TIMEOUT_SECS
        {
            return Err(ConfigError::client(format!(
                "client.connect_timeout_secs must be {}-{}, got {}",
                MIN_CONNECT_TIMEOUT_SECS, MAX_CONNECT_TIMEOUT_SECS, self.connect_timeout_secs
            )));
        }

        Ok(())
    }
}
