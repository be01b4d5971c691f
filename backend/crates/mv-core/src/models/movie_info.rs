//! Movie catalog entry.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use chrono::NaiveDate;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie catalog record as stored by the info service and sent on the wire.
///
/// Field names follow the wire contract shared with downstream consumers:
/// `movieInfoId`, `name`, `year`, `cast`, `release_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInfo {
    /// Assigned by the store on create when absent
    #[serde(rename = "movieInfoId", default)]
    pub movie_info_id: Option<String>,
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub cast: Vec<String>,
    /// ISO-8601 calendar date (e.g. "2005-06-15")
    pub release_date: NaiveDate,
}

impl MovieInfo {
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cast: Vec<String>,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            movie_info_id: None,
            name: name.into(),
            year,
            cast,
            release_date,
        }
    }

    /// Ensure the record has an identifier, generating one if needed.
    pub fn with_generated_id(mut self) -> Self {
        if self.movie_info_id.is_none() {
            self.movie_info_id = Some(Uuid::new_v4().to_string());
        }
        self
    }

    /// Identifier of a stored record
    #[track_caller]
    pub fn id(&self) -> CoreErrorResult<&str> {
        self.movie_info_id
            .as_deref()
            .ok_or_else(|| CoreError::MissingIdentifier {
                record: "movie_info",
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Copy the mutable fields of `other` onto this record, keeping the identifier.
    pub fn apply_update(&mut self, other: MovieInfo) {
        self.name = other.name;
        self.year = other.year;
        self.cast = other.cast;
        self.release_date = other.release_date;
    }

    /// Parse an ISO-8601 date string as used in the `release_date` column
    #[track_caller]
    pub fn parse_release_date(value: &str) -> CoreErrorResult<NaiveDate> {
        NaiveDate::from_str(value).map_err(|source| CoreError::InvalidReleaseDate {
            value: value.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
