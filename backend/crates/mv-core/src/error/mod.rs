use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Record has no identifier: {record} {location}")]
    MissingIdentifier {
        record: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid release date '{value}': {source} {location}")]
    InvalidReleaseDate {
        value: String,
        #[source]
        source: chrono::ParseError,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
