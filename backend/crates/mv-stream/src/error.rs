use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Subscription cancelled {location}")]
    Cancelled { location: ErrorLocation },

    #[error("Broadcast channel closed {location}")]
    Closed { location: ErrorLocation },

    #[error("Subscriber lagged, missed {missed} items {location}")]
    Lagged { missed: u64, location: ErrorLocation },
}

impl StreamError {
    #[track_caller]
    pub fn cancelled() -> Self {
        Self::Cancelled {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn closed() -> Self {
        Self::Closed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn lagged(missed: u64) -> Self {
        Self::Lagged {
            missed,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The subscription will never yield another item.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::Closed { .. })
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
