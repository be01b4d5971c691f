//! Newline-delimited JSON response bodies for the `/stream` endpoints

use crate::ShutdownSignal;

use std::convert::Infallible;

use axum::{
    body::Body,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Serialize;

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Serialize each item as one JSON line.
///
/// The body stays open until `items` ends or shutdown is signalled; a client
/// disconnect drops the body and with it the underlying subscription.
pub fn ndjson_response<S, T>(items: S, shutdown: ShutdownSignal) -> Response
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let lines = items
        .take_until(shutdown.wait())
        .filter_map(|item| async move { encode_line(&item) })
        .map(Ok::<Bytes, Infallible>);

    (
        [(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)],
        Body::from_stream(lines),
    )
        .into_response()
}

/// One record followed by `\n`; unserializable records are logged and skipped
pub fn encode_line<T: Serialize>(item: &T) -> Option<Bytes> {
    match serde_json::to_vec(item) {
        Ok(mut line) => {
            line.push(b'\n');
            Some(Bytes::from(line))
        }
        Err(e) => {
            log::error!("Failed to serialize stream item: {}", e);
            None
        }
    }
}
