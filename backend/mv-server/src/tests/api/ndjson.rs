use crate::{NDJSON_CONTENT_TYPE, ShutdownCoordinator, ndjson_response};

use axum::http::header;
use http_body_util::BodyExt;
use serde_json::json;

#[tokio::test]
async fn given_finite_items_when_streamed_then_one_json_line_each() {
    // Given
    let shutdown = ShutdownCoordinator::new();
    let items = futures::stream::iter(vec![json!({"name": "A"}), json!({"name": "B"})]);

    // When
    let response = ndjson_response(items, shutdown.signal());

    // Then
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        NDJSON_CONTENT_TYPE
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"{\"name\":\"A\"}\n{\"name\":\"B\"}\n");
}

#[tokio::test]
async fn given_endless_items_when_shutdown_then_body_ends() {
    // Given
    let shutdown = ShutdownCoordinator::new();
    let items = futures::stream::pending::<serde_json::Value>();
    let response = ndjson_response(items, shutdown.signal());

    // When
    shutdown.shutdown();

    // Then
    let body = tokio::time::timeout(
        std::time::Duration::from_secs(2),
        response.into_body().collect(),
    )
    .await
    .expect("body should end after shutdown")
    .unwrap()
    .to_bytes();
    assert!(body.is_empty());
}
