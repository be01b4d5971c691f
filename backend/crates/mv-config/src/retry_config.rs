use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Retry constraints
pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const MIN_INITIAL_DELAY_MS: u64 = 10;
pub const MAX_INITIAL_DELAY_MS: u64 = 10000;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

pub const MIN_MAX_DELAY_SECS: u64 = 1;
pub const MAX_MAX_DELAY_SECS: u64 = 60;
pub const DEFAULT_MAX_DELAY_SECS: u64 = 5;

pub const MIN_BACKOFF_MULTIPLIER: f64 = 1.0;
pub const MAX_BACKOFF_MULTIPLIER: f64 = 10.0;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 1.0;

pub const DEFAULT_JITTER: bool = false;

/// Retry configuration for downstream fetches.
///
/// A `backoff_multiplier` of 1.0 keeps the delay constant between attempts;
/// anything larger grows it exponentially up to `max_delay_secs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial attempt)
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds
    pub initial_delay_ms: u64,
    /// Maximum delay between retries in seconds
    pub max_delay_secs: u64,
    /// Multiplier for exponential backoff (e.g., 2.0 = double each time)
    pub backoff_multiplier: f64,
    /// Add random jitter to delays to prevent thundering herd
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "max_attempts",
            self.max_attempts,
            MIN_MAX_ATTEMPTS,
            MAX_MAX_ATTEMPTS,
        )?;
        check_range(
            "initial_delay_ms",
            self.initial_delay_ms,
            MIN_INITIAL_DELAY_MS,
            MAX_INITIAL_DELAY_MS,
        )?;
        check_range(
            "max_delay_secs",
            self.max_delay_secs,
            MIN_MAX_DELAY_SECS,
            MAX_MAX_DELAY_SECS,
        )?;
        check_range(
            "backoff_multiplier",
            self.backoff_multiplier,
            MIN_BACKOFF_MULTIPLIER,
            MAX_BACKOFF_MULTIPLIER,
        )?;

        // The first delay must not already exceed the cap
        if self.initial_delay_ms > self.max_delay_secs * 1000 {
            return Err(ConfigError::retry(format!(
                "retry.initial_delay_ms ({}) exceeds retry.max_delay_secs ({}s)",
                self.initial_delay_ms, self.max_delay_secs
            )));
        }

        Ok(())
    }
}

#[track_caller]
fn check_range<T>(field: &str, value: T, min: T, max: T) -> ConfigErrorResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(ConfigError::retry(format!(
            "retry.{} must be {}-{}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}
