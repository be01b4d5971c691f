use crate::ApiError;

use mv_client::FetchError;

use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_with_json_body() {
    // Given
    let error = ApiError::not_found("Movie info 7 not found");

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Movie info 7 not found");
}

#[tokio::test]
async fn given_bad_request_when_rendered_then_400() {
    let (status, json) = body_json(ApiError::bad_request("movieInfo.name must be present")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn given_downstream_not_found_when_converted_then_404_keeps_message() {
    // Given
    let fetch_error =
        FetchError::not_found("There is no MovieInfo available for the passed in Id: abc");

    // When
    let (status, json) = body_json(ApiError::from(fetch_error)).await;

    // Then
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"]["message"],
        "There is no MovieInfo available for the passed in Id: abc"
    );
}

#[tokio::test]
async fn given_downstream_client_error_when_converted_then_original_status_passes_through() {
    // Given
    let fetch_error = FetchError::client(409, "duplicate");

    // When
    let (status, json) = body_json(ApiError::from(fetch_error)).await;

    // Then
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "DOWNSTREAM_REJECTED");
    assert_eq!(json["error"]["message"], "duplicate");
}

#[tokio::test]
async fn given_downstream_server_error_when_converted_then_502() {
    let fetch_error = FetchError::server(503, "Server exception in MovieInfo Service: down");

    let (status, json) = body_json(ApiError::from(fetch_error)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn given_invalid_endpoint_when_converted_then_500() {
    let fetch_error = FetchError::invalid_endpoint("ftp://x", "scheme must be http or https");

    let (status, json) = body_json(ApiError::from(fetch_error)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}
