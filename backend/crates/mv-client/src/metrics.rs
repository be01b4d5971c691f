use metrics::counter;

/// Metrics collector for calls to one downstream endpoint
#[derive(Debug, Clone)]
pub struct FetchMetrics {
    endpoint: String,
}

impl FetchMetrics {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    /// Record one outbound HTTP request
    pub fn attempt(&self, operation: &'static str) {
        counter!(
            "mv_client.attempts",
            "endpoint" => self.endpoint.clone(),
            "operation" => operation
        )
        .increment(1);
    }

    /// Record a retry scheduled after a retryable failure
    pub fn retry(&self, category: &'static str) {
        counter!(
            "mv_client.retries",
            "endpoint" => self.endpoint.clone(),
            "category" => category
        )
        .increment(1);
    }

    /// Record the final outcome of a logical fetch
    pub fn outcome(&self, operation: &'static str, outcome: &'static str) {
        counter!(
            "mv_client.outcomes",
            "endpoint" => self.endpoint.clone(),
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
    }

    pub fn stream_item(&self) {
        counter!("mv_client.stream.items", "endpoint" => self.endpoint.clone()).increment(1);
    }

    pub fn stream_reconnect(&self) {
        counter!("mv_client.stream.reconnects", "endpoint" => self.endpoint.clone())
            .increment(1);
    }
}
