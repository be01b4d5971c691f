use crate::{Endpoint, FetchError, FetchMetrics, FetchResult, NdjsonDecoder, RetryPolicy, with_retry};

use std::marker::PhantomData;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use mv_config::{ClientConfig, RetryConfig};
use reqwest::{Client as ReqwestClient, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{Instrument, Span, info_span};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// HTTP reader for one downstream collection of `T` records.
///
/// Failures are classified into [`FetchError`] categories and the retry
/// policy runs independently for every call.
pub struct RemoteFetcher<T> {
    endpoint: Endpoint,
    client: ReqwestClient,
    policy: RetryPolicy,
    /// Applies to single and list fetches; streams stay open indefinitely
    request_timeout: Duration,
    metrics: FetchMetrics,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RemoteFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            client: self.client.clone(),
            policy: self.policy.clone(),
            request_timeout: self.request_timeout,
            metrics: self.metrics.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned + Send + 'static> RemoteFetcher<T> {
    pub fn new(endpoint: Endpoint, policy: RetryPolicy) -> FetchResult<Self> {
        Self::with_timeouts(
            endpoint,
            policy,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeouts(
        endpoint: Endpoint,
        policy: RetryPolicy,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> FetchResult<Self> {
        let client = ReqwestClient::builder()
            .connect_timeout(connect_timeout)
            .build()?;

        log::debug!(
            "Created fetcher for {} at {} (max attempts: {})",
            endpoint.resource(),
            endpoint.base_url(),
            policy.max_attempts
        );

        Ok(Self {
            metrics: FetchMetrics::new(endpoint.resource()),
            endpoint,
            client,
            policy,
            request_timeout,
            _record: PhantomData,
        })
    }

    /// Build from the `[retry]` and `[client]` config sections.
    pub fn from_config(
        resource: &str,
        base_url: &str,
        retry: &RetryConfig,
        client: &ClientConfig,
    ) -> FetchResult<Self> {
        Self::with_timeouts(
            Endpoint::new(resource, base_url)?,
            RetryPolicy::from_config(retry),
            Duration::from_secs(client.request_timeout_secs),
            Duration::from_secs(client.connect_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// `GET {endpoint}/{key}` decoded as one record.
    pub async fn fetch_one(&self, key: &str) -> FetchResult<T> {
        let url = self.endpoint.item_url(key);
        let not_found = format!(
            "There is no {} available for the passed in Id: {}",
            self.endpoint.resource(),
            key
        );
        let operation = format!("Fetch {} {}", self.endpoint.resource(), key);
        let span = info_span!(
            "remote_fetch",
            resource = %self.endpoint.resource(),
            operation = "fetch_one",
            key = %key,
        );

        let result = with_retry(&self.policy, &self.metrics, &operation, || {
            self.get_json(&url, &not_found, "fetch_one")
        })
        .instrument(span)
        .await;

        self.record_outcome("fetch_one", &result);
        result
    }

    /// `GET {endpoint}?{query}` decoded as a JSON array.
    pub async fn fetch_list(&self, query: &[(&str, &str)]) -> FetchResult<Vec<T>> {
        let url = self.endpoint.list_url(query);
        let not_found = format!("There is no {} available at {}", self.endpoint.resource(), url);
        let operation = format!("List {}", self.endpoint.resource());
        let span = info_span!(
            "remote_fetch",
            resource = %self.endpoint.resource(),
            operation = "fetch_list",
            query = ?query,
        );

        let result = with_retry(&self.policy, &self.metrics, &operation, || {
            self.get_json(&url, &not_found, "fetch_list")
        })
        .instrument(span)
        .await;

        self.record_outcome("fetch_list", &result);
        result
    }

    /// `GET {endpoint}/stream` as newline-delimited JSON.
    ///
    /// Nothing is sent until the stream is polled. A failed connect or a
    /// transport error mid-stream reconnects under the retry policy. The
    /// downstream has no resume cursor, so every reconnect is a replay from
    /// the start: whatever the downstream replays is yielded again, and
    /// callers see duplicates when its history survived the drop. The retry
    /// budget resets once an item decodes. Terminal errors and exhausted
    /// retries are yielded once, then the stream ends. Dropping the stream
    /// cancels it, including any pending retry delay.
    pub fn fetch_stream(&self) -> BoxStream<'static, FetchResult<T>> {
        let span = info_span!(
            "remote_fetch",
            resource = %self.endpoint.resource(),
            operation = "fetch_stream",
        );
        let cursor = StreamCursor {
            url: self.endpoint.stream_url(),
            fetcher: self.clone(),
            response: None,
            decoder: NdjsonDecoder::new(),
            upstream_done: false,
            finished: false,
            failures: 0,
            delivered: 0,
            connections: 0,
            span,
        };

        stream::unfold(cursor, |mut cursor| async move {
            let span = cursor.span.clone();
            let next = cursor.next().instrument(span).await;
            next.map(|item| (item, cursor))
        })
        .boxed()
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        url: &Url,
        not_found: &str,
        operation: &'static str,
    ) -> FetchResult<R> {
        self.metrics.attempt(operation);

        let response = self
            .client
            .get(url.clone())
            .timeout(self.request_timeout)
            .send()
            .await?;
        let response = self.classify(response, not_found).await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    async fn open_stream(&self, url: &Url) -> FetchResult<Response> {
        self.metrics.attempt("fetch_stream");

        let response = self.client.get(url.clone()).send().await?;
        let not_found = format!("There is no {} stream available at {}", self.endpoint.resource(), url);
        self.classify(response, &not_found).await
    }

    /// Map a non-success status onto its error category.
    async fn classify(&self, response: Response, not_found: &str) -> FetchResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::not_found(not_found));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!(
                    "Failed to read {} error body (status {}): {}",
                    self.endpoint.resource(),
                    status,
                    e
                );
                String::new()
            }
        };
        if status.is_server_error() {
            Err(FetchError::server(
                status.as_u16(),
                format!(
                    "Server exception in {} Service: {}",
                    self.endpoint.resource(),
                    body
                ),
            ))
        } else {
            Err(FetchError::client(status.as_u16(), body))
        }
    }

    fn record_outcome<R>(&self, operation: &'static str, result: &FetchResult<R>) {
        match result {
            Ok(_) => self.metrics.outcome(operation, "success"),
            Err(e) => self.metrics.outcome(operation, e.category()),
        }
    }
}

/// State carried between polls of a `fetch_stream` stream
struct StreamCursor<T> {
    fetcher: RemoteFetcher<T>,
    url: Url,
    response: Option<Response>,
    decoder: NdjsonDecoder,
    upstream_done: bool,
    finished: bool,
    /// Consecutive failed connects or reads since the last decoded item
    failures: u32,
    /// Items yielded to the caller across all connections
    delivered: u64,
    /// Successful connects, including the first
    connections: u32,
    span: Span,
}

impl<T: DeserializeOwned + Send + 'static> StreamCursor<T> {
    async fn next(&mut self) -> Option<FetchResult<T>> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(line) = self.decoder.next_line() {
                match serde_json::from_slice::<T>(&line) {
                    Ok(item) => {
                        self.failures = 0;
                        self.delivered += 1;
                        self.fetcher.metrics.stream_item();
                        return Some(Ok(item));
                    }
                    Err(e) => return self.fail(FetchError::from_json(e)),
                }
            }

            if self.upstream_done {
                log::info!(
                    "{} stream ended after {} items",
                    self.fetcher.endpoint.resource(),
                    self.delivered
                );
                self.fetcher.metrics.outcome("fetch_stream", "success");
                self.finished = true;
                return None;
            }

            match self.response.as_mut() {
                Some(response) => match response.chunk().await {
                    Ok(Some(chunk)) => self.decoder.push(&chunk),
                    Ok(None) => {
                        self.decoder.finish();
                        self.upstream_done = true;
                    }
                    Err(e) => {
                        self.response = None;
                        self.decoder.clear();
                        if let Some(error) = self.backoff(FetchError::from_reqwest(e)).await {
                            return self.fail(error);
                        }
                    }
                },
                None => match self.fetcher.open_stream(&self.url).await {
                    Ok(response) => {
                        if self.connections > 0 {
                            self.fetcher.metrics.stream_reconnect();
                            log::info!(
                                "Reconnected to {} stream after {} items, replaying from start",
                                self.fetcher.endpoint.resource(),
                                self.delivered
                            );
                        }
                        self.connections += 1;
                        self.response = Some(response);
                    }
                    Err(e) => {
                        if let Some(error) = self.backoff(e).await {
                            return self.fail(error);
                        }
                    }
                },
            }
        }
    }

    /// Wait out the policy delay, or hand the error back when it is terminal.
    async fn backoff(&mut self, error: FetchError) -> Option<FetchError> {
        self.failures += 1;
        let policy = &self.fetcher.policy;

        if !policy.should_retry(&error, self.failures) {
            log::warn!(
                "{} stream failed after {} attempts: {}",
                self.fetcher.endpoint.resource(),
                self.failures,
                error
            );
            return Some(error);
        }

        let delay = policy.delay_for(self.failures);
        self.fetcher.metrics.retry(error.category());
        log::debug!(
            "{} stream attempt {} failed: {}. Retrying in {:?}",
            self.fetcher.endpoint.resource(),
            self.failures,
            error,
            delay
        );

        sleep(delay).await;
        None
    }

    fn fail(&mut self, error: FetchError) -> Option<FetchResult<T>> {
        self.fetcher
            .metrics
            .outcome("fetch_stream", error.category());
        self.finished = true;
        self.response = None;
        Some(Err(error))
    }
}
