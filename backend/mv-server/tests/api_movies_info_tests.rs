//! Integration tests for the movie catalog service
mod common;

use crate::common::{
    batman_begins, body_json, body_lines, create_info_state, dark_knight, empty_request,
    json_request, send,
};

use mv_server::{NDJSON_CONTENT_TYPE, build_info_router};

use std::time::Duration;

use axum::http::{StatusCode, header};
use http_body_util::BodyExt;

#[tokio::test]
async fn given_new_movie_info_when_posted_then_201_with_generated_id() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state.clone(), None);

    // When
    let response = send(&app, json_request("POST", "/v1/moviesinfo", &batman_begins())).await;

    // Then
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["movieInfoId"].as_str().is_some());
    assert_eq!(json["name"], "Batman Begins");
    assert_eq!(json["release_date"], "2005-06-15");
    assert_eq!(state.channel.len(), 1);
}

#[tokio::test]
async fn given_blank_name_when_posted_then_400_and_nothing_published() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state.clone(), None);
    let mut movie_info = batman_begins();
    movie_info.name = "  ".to_string();

    // When
    let response = send(&app, json_request("POST", "/v1/moviesinfo", &movie_info)).await;

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.channel.is_empty());
}

#[tokio::test]
async fn given_two_records_when_listed_by_year_then_only_matching_returned() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state, None);
    send(&app, json_request("POST", "/v1/moviesinfo", &batman_begins())).await;
    send(&app, json_request("POST", "/v1/moviesinfo", &dark_knight())).await;

    // When
    let all = body_json(send(&app, empty_request("GET", "/v1/moviesinfo")).await).await;
    let filtered =
        body_json(send(&app, empty_request("GET", "/v1/moviesinfo?year=2008")).await).await;

    // Then
    assert_eq!(all.as_array().unwrap().len(), 2);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["name"], "The Dark Knight");
}

#[tokio::test]
async fn given_stored_record_when_fetched_by_id_then_200() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state, None);
    let created =
        body_json(send(&app, json_request("POST", "/v1/moviesinfo", &batman_begins())).await).await;
    let id = created["movieInfoId"].as_str().unwrap();

    // When
    let response = send(&app, empty_request("GET", &format!("/v1/moviesinfo/{}", id))).await;

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn given_unknown_id_when_fetched_then_404() {
    let state = create_info_state().await;
    let app = build_info_router(state, None);

    let response = send(&app, empty_request("GET", "/v1/moviesinfo/missing")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn given_stored_record_when_updated_then_fields_replaced_and_id_kept() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state, None);
    let created =
        body_json(send(&app, json_request("POST", "/v1/moviesinfo", &batman_begins())).await).await;
    let id = created["movieInfoId"].as_str().unwrap();

    // When
    let response = send(
        &app,
        json_request("PUT", &format!("/v1/moviesinfo/{}", id), &dark_knight()),
    )
    .await;

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["movieInfoId"], id);
    assert_eq!(json["name"], "The Dark Knight");
    assert_eq!(json["year"], 2008);
}

#[tokio::test]
async fn given_unknown_id_when_updated_then_404() {
    let state = create_info_state().await;
    let app = build_info_router(state, None);

    let response = send(&app, json_request("PUT", "/v1/moviesinfo/missing", &dark_knight())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_stored_record_when_deleted_then_204_and_gone() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state, None);
    let created =
        body_json(send(&app, json_request("POST", "/v1/moviesinfo", &batman_begins())).await).await;
    let uri = format!("/v1/moviesinfo/{}", created["movieInfoId"].as_str().unwrap());

    // When
    let response = send(&app, empty_request("DELETE", &uri)).await;

    // Then
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let after = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(after.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_published_records_when_late_subscriber_streams_then_all_replayed_in_order() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state.clone(), None);
    send(&app, json_request("POST", "/v1/moviesinfo", &batman_begins())).await;
    send(&app, json_request("POST", "/v1/moviesinfo", &dark_knight())).await;

    // When
    let response = send(&app, empty_request("GET", "/v1/moviesinfo/stream")).await;
    state.channel.close();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        NDJSON_CONTENT_TYPE
    );
    let lines = body_lines(response).await;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["name"], "Batman Begins");
    assert_eq!(lines[1]["name"], "The Dark Knight");
}

#[tokio::test]
async fn given_open_stream_when_record_posted_then_it_arrives_live() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state, None);
    let response = send(&app, empty_request("GET", "/v1/moviesinfo/stream")).await;
    let mut body = response.into_body();

    // When
    send(&app, json_request("POST", "/v1/moviesinfo", &batman_begins())).await;

    // Then
    let frame = tokio::time::timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("live item should arrive")
        .unwrap()
        .unwrap();
    let line = frame.into_data().unwrap();
    let json: serde_json::Value = serde_json::from_slice(line.trim_ascii_end()).unwrap();
    assert_eq!(json["name"], "Batman Begins");
}

#[tokio::test]
async fn given_open_stream_when_shutdown_then_body_ends() {
    // Given
    let state = create_info_state().await;
    let app = build_info_router(state.clone(), None);
    let response = send(&app, empty_request("GET", "/v1/moviesinfo/stream")).await;

    // When
    state.shutdown.shutdown();

    // Then
    let lines = tokio::time::timeout(Duration::from_secs(2), body_lines(response))
        .await
        .expect("stream should end on shutdown");
    assert!(lines.is_empty());
}
