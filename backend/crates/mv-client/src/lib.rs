mod endpoint;
mod error;
mod metrics;
mod ndjson;
mod remote_fetcher;
mod retry;


pub use endpoint::Endpoint;
pub use error::{FetchError, Result as FetchResult};
pub use metrics::FetchMetrics;
pub use ndjson::NdjsonDecoder;
pub use remote_fetcher::RemoteFetcher;
pub use retry::{Backoff, RetryPolicy, with_retry};
