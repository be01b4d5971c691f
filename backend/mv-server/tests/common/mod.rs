#![allow(dead_code)]

//! Test infrastructure for mv-server API tests

use mv_client::{Endpoint, RemoteFetcher, RetryPolicy};
use mv_core::{MovieInfo, Review};
use mv_server::{InfoState, MoviesState, ReviewState, ShutdownCoordinator};
use mv_stream::{BroadcastChannel, ReplayConfig};

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    mv_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Catalog service state with a replay-all channel
pub async fn create_info_state() -> InfoState {
    InfoState {
        pool: create_test_pool().await,
        channel: BroadcastChannel::new("movie_info", ReplayConfig::all()),
        shutdown: ShutdownCoordinator::new(),
    }
}

/// Review service state with a latest-1 channel
pub async fn create_review_state() -> ReviewState {
    ReviewState {
        pool: create_test_pool().await,
        channel: BroadcastChannel::new("review", ReplayConfig::latest(1)),
        shutdown: ShutdownCoordinator::new(),
    }
}

/// Aggregator state pointed at two mock downstreams, retrying quickly
pub fn create_movies_state(info_base: &str, reviews_base: &str) -> MoviesState {
    let policy = RetryPolicy::fixed(3, Duration::from_millis(10));

    let movie_info = RemoteFetcher::new(
        Endpoint::new("MovieInfo", &format!("{}/v1/moviesinfo", info_base)).unwrap(),
        policy.clone(),
    )
    .unwrap();
    let reviews = RemoteFetcher::new(
        Endpoint::new("Reviews", &format!("{}/v1/reviews", reviews_base)).unwrap(),
        policy,
    )
    .unwrap();

    MoviesState {
        movie_info,
        reviews,
        shutdown: ShutdownCoordinator::new(),
    }
}

pub fn batman_begins() -> MovieInfo {
    MovieInfo::new(
        "Batman Begins",
        2005,
        vec!["Christian Bale".to_string(), "Michael Cane".to_string()],
        NaiveDate::from_ymd_opt(2005, 6, 15).unwrap(),
    )
}

pub fn dark_knight() -> MovieInfo {
    MovieInfo::new(
        "The Dark Knight",
        2008,
        vec!["Christian Bale".to_string(), "HeathLedger".to_string()],
        NaiveDate::from_ymd_opt(2008, 7, 18).unwrap(),
    )
}

pub fn review(movie_info_id: i64, comment: &str, rating: f64) -> Review {
    Review::new(movie_info_id, comment, rating)
}

pub fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Parse every line of a finished NDJSON body
pub async fn body_lines(response: Response<Body>) -> Vec<serde_json::Value> {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    body.split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_slice(line).unwrap())
        .collect()
}
