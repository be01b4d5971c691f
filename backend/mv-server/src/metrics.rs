use crate::error::{Result as ServerErrorResult, ServerError};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the process-wide Prometheus recorder
pub fn install_recorder() -> ServerErrorResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: format!("Failed to install Prometheus recorder: {e}"),
        })
}

/// GET /metrics - Prometheus text exposition
pub fn render(handle: Option<&PrometheusHandle>) -> Response {
    match handle {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics recorder not installed").into_response(),
    }
}
