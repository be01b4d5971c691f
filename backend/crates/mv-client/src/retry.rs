use crate::{FetchError, FetchMetrics, FetchResult};

use std::time::Duration;

use mv_config::RetryConfig;
use tokio::time::sleep;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_DELAY_MS: u64 = 1000;

/// Delay schedule between attempts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same delay before every retry
    Fixed(Duration),
    /// `initial * multiplier^(retry - 1)`, never above `max`
    Exponential {
        initial: Duration,
        multiplier: f64,
        max: Duration,
    },
}

impl Backoff {
    /// Delay before retry number `retry` (1-based), without jitter.
    pub fn delay_for(&self, retry: u32) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Exponential {
                initial,
                multiplier,
                max,
            } => {
                let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
                let secs = initial.as_secs_f64() * multiplier.powi(exponent);
                Duration::try_from_secs_f64(secs)
                    .unwrap_or(max)
                    .min(max)
            }
        }
    }

    /// Upper bound any jittered delay is clamped to
    pub fn ceiling(&self) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Exponential { max, .. } => max,
        }
    }
}

/// Bounded retry policy for one logical fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts including the first one
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Scale each delay by a random factor in 0.5..1.5, capped at the ceiling
    pub jitter: bool,
    /// Selects which failures are attempted again
    pub retryable: fn(&FetchError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_MAX_ATTEMPTS, Duration::from_millis(DEFAULT_DELAY_MS))
    }
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::Fixed(delay),
            jitter: false,
            retryable: FetchError::is_retryable,
        }
    }

    pub fn exponential(
        max_attempts: u32,
        initial: Duration,
        multiplier: f64,
        max: Duration,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::Exponential {
                initial,
                multiplier,
                max,
            },
            jitter: false,
            retryable: FetchError::is_retryable,
        }
    }

    /// Single attempt, nothing is retried
    pub fn none() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// A multiplier of 1.0 yields a fixed delay.
    pub fn from_config(config: &RetryConfig) -> Self {
        let initial = Duration::from_millis(config.initial_delay_ms);
        let policy = if config.backoff_multiplier > 1.0 {
            Self::exponential(
                config.max_attempts,
                initial,
                config.backoff_multiplier,
                Duration::from_secs(config.max_delay_secs),
            )
        } else {
            Self::fixed(config.max_attempts, initial)
        };

        policy.with_jitter(config.jitter)
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_retryable(mut self, retryable: fn(&FetchError) -> bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn should_retry(&self, error: &FetchError, attempts: u32) -> bool {
        attempts < self.max_attempts && (self.retryable)(error)
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = self.backoff.delay_for(attempt);
        if !self.jitter {
            return delay;
        }

        let jitter_factor = 0.5 + rand::random::<f64>(); // 0.5 to 1.5
        let ceiling = self.backoff.ceiling();
        Duration::try_from_secs_f64(delay.as_secs_f64() * jitter_factor)
            .unwrap_or(ceiling)
            .min(ceiling)
    }
}

/// Execute an async fetch with the policy's retry loop.
///
/// Terminal failures return immediately; after the last attempt the last
/// classified error is returned unchanged.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    metrics: &FetchMetrics,
    operation_name: &str,
    mut operation: F,
) -> FetchResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FetchResult<T>>,
{
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    log::info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !policy.should_retry(&e, attempts) {
                    log::warn!(
                        "{} failed after {} attempts: {}",
                        operation_name,
                        attempts,
                        e
                    );
                    return Err(e);
                }

                let delay = policy.delay_for(attempts);
                metrics.retry(e.category());

                log::debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempts,
                    e,
                    delay
                );

                sleep(delay).await;
            }
        }
    }
}
