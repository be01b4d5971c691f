use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Service status with version and timestamp
pub async fn health_check(service: &'static str) -> Response {
    let health = json!({
        "status": "healthy",
        "service": service,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Kubernetes liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Kubernetes readiness probe; not ready once shutdown has begun
pub async fn readiness_check(shutting_down: bool) -> Response {
    if shutting_down {
        (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response()
    } else {
        (StatusCode::OK, "Ready").into_response()
    }
}
