use metrics::{counter, gauge};

/// Metrics collector for one broadcast channel
#[derive(Debug, Clone)]
pub struct StreamMetrics {
    channel: &'static str,
}

impl StreamMetrics {
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }

    /// Record an item appended to the replay buffer
    pub fn item_published(&self, buffered: usize) {
        counter!("mv_stream.items.published", "channel" => self.channel).increment(1);
        gauge!("mv_stream.buffer.len", "channel" => self.channel).set(buffered as f64);
    }

    /// Record a publish refused because nobody was listening
    pub fn item_rejected(&self) {
        counter!("mv_stream.items.rejected", "channel" => self.channel).increment(1);
    }

    /// Record items evicted from a latest-N window
    pub fn items_evicted(&self, count: usize) {
        counter!("mv_stream.items.evicted", "channel" => self.channel).increment(count as u64);
    }

    /// Record subscription change
    pub fn subscription_changed(&self, action: &'static str, active: usize) {
        counter!("mv_stream.subscriptions", "channel" => self.channel, "action" => action)
            .increment(1);
        gauge!("mv_stream.subscribers.active", "channel" => self.channel).set(active as f64);
    }

    pub fn subscriber_lagged(&self, missed: u64) {
        counter!("mv_stream.items.missed", "channel" => self.channel).increment(missed);
    }
}
