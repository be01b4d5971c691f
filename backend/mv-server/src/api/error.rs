//! REST API error types
//!
//! These errors produce consistent JSON responses with appropriate HTTP
//! status codes.

use mv_client::FetchError;
use mv_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code and message
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "UPSTREAM_UNAVAILABLE")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// A downstream service rejected the request; its status is passed through
    #[error("Downstream rejected request ({status}): {message} {location}")]
    DownstreamRejected {
        status: StatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// A downstream service failed or sent an unreadable body (502)
    #[error("Bad gateway: {message} {location}")]
    BadGateway {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// A downstream service could not be reached (503)
    #[error("Downstream unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound { .. } | ApiError::BadRequest { .. } => log::debug!("{}", self),
            ApiError::DownstreamRejected { .. } => log::warn!("{}", self),
            _ => log::error!("{}", self),
        }

        let (status, code, message) = match self {
            ApiError::NotFound { message, .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
            ApiError::BadRequest { message, .. } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
            }
            ApiError::DownstreamRejected {
                status, message, ..
            } => (status, "DOWNSTREAM_REJECTED", message),
            ApiError::BadGateway { code, message, .. } => (StatusCode::BAD_GATEWAY, code, message),
            ApiError::Unavailable { message, .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "UPSTREAM_UNAVAILABLE",
                message,
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                message,
            ),
        };

        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);
        ApiError::Internal {
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Map a classified downstream failure onto the aggregator's response.
impl From<FetchError> for ApiError {
    #[track_caller]
    fn from(e: FetchError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            FetchError::NotFound { message, .. } => ApiError::NotFound { message, location },
            FetchError::Client { status, body, .. } => ApiError::DownstreamRejected {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
                message: body,
                location,
            },
            FetchError::Server { message, .. } => ApiError::BadGateway {
                code: "UPSTREAM_ERROR",
                message,
                location,
            },
            FetchError::Decode { message, .. } => ApiError::BadGateway {
                code: "UPSTREAM_DECODE_ERROR",
                message,
                location,
            },
            FetchError::Transport { message, .. } => ApiError::Unavailable { message, location },
            FetchError::InvalidEndpoint { url, message, .. } => ApiError::Internal {
                message: format!("Invalid downstream endpoint {}: {}", url, message),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
