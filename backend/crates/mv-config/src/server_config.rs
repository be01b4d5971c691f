use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_INFO_PORT, DEFAULT_MOVIES_PORT,
    DEFAULT_REVIEW_PORT, MIN_PORT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_port(DEFAULT_INFO_PORT)
    }
}

impl ServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port,
        }
    }

    pub fn info_default() -> Self {
        Self::with_port(DEFAULT_INFO_PORT)
    }

    pub fn review_default() -> Self {
        Self::with_port(DEFAULT_REVIEW_PORT)
    }

    pub fn movies_default() -> Self {
        Self::with_port(DEFAULT_MOVIES_PORT)
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self, section: &str) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::server(format!(
                "{}.host must not be empty",
                section
            )));
        }

        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "{}.port must be 0 (auto) or >= {}, got {}",
                section, MIN_PORT, self.port
            )));
        }

        Ok(())
    }
}
