use crate::{ConfigError, ConfigErrorResult};

use std::str::FromStr;

use serde::Deserialize;

pub const MIN_REPLAY_WINDOW: usize = 1;
pub const MAX_REPLAY_WINDOW: usize = 100_000;
pub const DEFAULT_REPLAY_WINDOW: usize = 1;

/// How much history a new stream subscriber is sent on join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplayModeSetting {
    /// Every record published since startup
    #[default]
    All,
    /// Only the last `window` records
    Latest,
}

impl FromStr for ReplayModeSetting {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "latest" => Ok(Self::Latest),
            other => Err(ConfigError::stream(format!(
                "replay mode must be 'all' or 'latest', got '{}'",
                other
            ))),
        }
    }
}

/// Settings for one live-update broadcast channel
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub mode: ReplayModeSetting,
    /// Records kept for replay when `mode = "latest"`
    pub window: usize,
    /// Refuse to publish when nobody is listening
    pub require_subscriber: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            mode: ReplayModeSetting::All,
            window: DEFAULT_REPLAY_WINDOW,
            require_subscriber: false,
        }
    }
}

impl StreamConfig {
    pub fn latest(window: usize) -> Self {
        Self {
            mode: ReplayModeSetting::Latest,
            window,
            require_subscriber: false,
        }
    }

    pub fn validate(&self, section: &str) -> ConfigErrorResult<()> {
        if self.mode == ReplayModeSetting::Latest
            && (self.window < MIN_REPLAY_WINDOW || self.window > MAX_REPLAY_WINDOW)
        {
            return Err(ConfigError::stream(format!(
                "{}.window must be {}-{}, got {}",
                section, MIN_REPLAY_WINDOW, MAX_REPLAY_WINDOW, self.window
            )));
        }

        Ok(())
    }
}
