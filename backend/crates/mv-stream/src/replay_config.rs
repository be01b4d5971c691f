use mv_config::{ReplayModeSetting, StreamConfig};

/// How much history a subscriber receives on join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayMode {
    /// Every item since the channel was created; nothing is evicted
    #[default]
    All,
    /// At most the last N items; older items are evicted oldest-first
    Latest(usize),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayConfig {
    pub mode: ReplayMode,
    /// When set, publishing with zero subscribers is refused and not buffered
    pub require_subscriber: bool,
}

impl ReplayConfig {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn latest(window: usize) -> Self {
        Self {
            mode: ReplayMode::Latest(window.max(1)),
            require_subscriber: false,
        }
    }

    pub fn with_require_subscriber(mut self, require_subscriber: bool) -> Self {
        self.require_subscriber = require_subscriber;
        self
    }
}

impl From<&StreamConfig> for ReplayConfig {
    fn from(config: &StreamConfig) -> Self {
        let mode = match config.mode {
            ReplayModeSetting::All => ReplayMode::All,
            ReplayModeSetting::Latest => ReplayMode::Latest(config.window.max(1)),
        };

        Self {
            mode,
            require_subscriber: config.require_subscriber,
        }
    }
}
