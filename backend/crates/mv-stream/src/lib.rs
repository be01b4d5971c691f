pub mod broadcast_channel;
pub mod error;
pub mod metrics;
pub mod replay_config;
pub mod subscription_handle;

pub use broadcast_channel::BroadcastChannel;
pub use error::{Result, StreamError};
pub use metrics::StreamMetrics;
pub use replay_config::{ReplayConfig, ReplayMode};
pub use subscription_handle::{Canceller, SubscriptionHandle};

#[cfg(test)]
mod tests;
