use crate::{
    CONFIG_DIR_ENV, ClientConfig, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, LoggingConfig, RetryConfig, ServerConfig, StreamConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub info_server: ServerConfig,
    pub review_server: ServerConfig,
    pub movies_server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub info_stream: StreamConfig,
    pub review_stream: StreamConfig,
    pub retry: RetryConfig,
    pub client: ClientConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            info_server: ServerConfig::info_default(),
            review_server: ServerConfig::review_default(),
            movies_server: ServerConfig::movies_default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            info_stream: StreamConfig::default(),
            review_stream: StreamConfig::latest(1),
            retry: RetryConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Load `.env` from the working directory if present
    /// 2. Check for MV_CONFIG_DIR env var, else use ./.mv/
    /// 3. Auto-create config directory if it doesn't exist
    /// 4. Load config.toml if it exists, else use defaults
    /// 5. Apply MV_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MV_CONFIG_DIR env var > ./.mv/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.info_server.validate("info_server")?;
        self.review_server.validate("review_server")?;
        self.movies_server.validate("movies_server")?;
        self.info_stream.validate("info_stream")?;
        self.review_stream.validate("review_stream")?;
        self.retry.validate()?;
        self.client.validate()?;

        // Database paths must stay inside the config dir
        for path in [&self.database.info_path, &self.database.review_path] {
            if Path::new(path).is_absolute() || path.contains("..") {
                return Err(ConfigError::database(format!(
                    "database paths must be relative and cannot contain '..', got '{}'",
                    path
                )));
            }
        }

        Ok(())
    }

    /// Absolute path of the movie info database file.
    pub fn info_database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.info_path))
    }

    /// Absolute path of the review database file.
    pub fn review_database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.review_path))
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  servers: info={}, review={}, movies={}",
            self.info_server.bind_addr(),
            self.review_server.bind_addr(),
            self.movies_server.bind_addr()
        );
        info!(
            "  database: info={}, review={}",
            self.database.info_path, self.database.review_path
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  info_stream: {:?} (window {}, require_subscriber={})",
            self.info_stream.mode, self.info_stream.window, self.info_stream.require_subscriber
        );
        info!(
            "  review_stream: {:?} (window {}, require_subscriber={})",
            self.review_stream.mode,
            self.review_stream.window,
            self.review_stream.require_subscriber
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x, jitter={}",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier,
            self.retry.jitter
        );
        info!(
            "  client: info={}, reviews={}, timeout={}s, connect={}s",
            self.client.movies_info_url,
            self.client.reviews_url,
            self.client.request_timeout_secs,
            self.client.connect_timeout_secs
        );
    }

    fn apply_env_overrides(&mut self) -> ConfigErrorResult<()> {
        // Servers
        Self::apply_env_string("MV_INFO_SERVER_HOST", &mut self.info_server.host);
        Self::apply_env_parse("MV_INFO_SERVER_PORT", &mut self.info_server.port);
        Self::apply_env_string("MV_REVIEW_SERVER_HOST", &mut self.review_server.host);
        Self::apply_env_parse("MV_REVIEW_SERVER_PORT", &mut self.review_server.port);
        Self::apply_env_string("MV_MOVIES_SERVER_HOST", &mut self.movies_server.host);
        Self::apply_env_parse("MV_MOVIES_SERVER_PORT", &mut self.movies_server.port);

        // Database
        Self::apply_env_string("MV_DATABASE_INFO_PATH", &mut self.database.info_path);
        Self::apply_env_string("MV_DATABASE_REVIEW_PATH", &mut self.database.review_path);

        // Logging
        Self::apply_env_parse("MV_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MV_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MV_LOG_FILE", &mut self.logging.file);

        // Streams (an unknown replay mode is an error, not a silent default)
        if let Ok(mode) = std::env::var("MV_INFO_STREAM_MODE") {
            self.info_stream.mode = mode.parse()?;
        }
        Self::apply_env_parse("MV_INFO_STREAM_WINDOW", &mut self.info_stream.window);
        Self::apply_env_bool(
            "MV_INFO_STREAM_REQUIRE_SUBSCRIBER",
            &mut self.info_stream.require_subscriber,
        );
        if let Ok(mode) = std::env::var("MV_REVIEW_STREAM_MODE") {
            self.review_stream.mode = mode.parse()?;
        }
        Self::apply_env_parse("MV_REVIEW_STREAM_WINDOW", &mut self.review_stream.window);
        Self::apply_env_bool(
            "MV_REVIEW_STREAM_REQUIRE_SUBSCRIBER",
            &mut self.review_stream.require_subscriber,
        );

        // Retry
        Self::apply_env_parse("MV_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "MV_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("MV_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "MV_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("MV_RETRY_JITTER", &mut self.retry.jitter);

        // Client
        Self::apply_env_string("MV_CLIENT_MOVIES_INFO_URL", &mut self.client.movies_info_url);
        Self::apply_env_string("MV_CLIENT_REVIEWS_URL", &mut self.client.reviews_url);
        Self::apply_env_parse(
            "MV_CLIENT_REQUEST_TIMEOUT_SECS",
            &mut self.client.request_timeout_secs,
        );
        Self::apply_env_parse(
            "MV_CLIENT_CONNECT_TIMEOUT_SECS",
            &mut self.client.connect_timeout_secs,
        );

        Ok(())
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
