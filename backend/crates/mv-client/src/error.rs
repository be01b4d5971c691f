use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Classified outcome of a failed remote fetch
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Client error ({status}): {body} {location}")]
    Client {
        status: u16,
        body: String,
        location: ErrorLocation,
    },

    #[error("{message} (status: {status}) {location}")]
    Server {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid endpoint {url}: {message} {location}")]
    InvalidEndpoint {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Decode error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn client(status: u16, body: impl Into<String>) -> Self {
        Self::Client {
            status,
            body: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_endpoint(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            url: url.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Server and transport failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Transport { .. })
    }

    /// HTTP status reported by the downstream, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Transport { .. } | Self::InvalidEndpoint { .. } | Self::Decode { .. } => None,
        }
    }

    /// Short category name for logs and metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Client { .. } => "client_error",
            Self::Server { .. } => "server_error",
            Self::Transport { .. } => "transport_error",
            Self::InvalidEndpoint { .. } => "invalid_endpoint",
            Self::Decode { .. } => "decode_error",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        FetchError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for FetchError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        FetchError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
