use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user review attached to a movie catalog entry by `movieInfoId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "reviewId", default)]
    pub review_id: Option<String>,
    #[serde(rename = "movieInfoId")]
    pub movie_info_id: i64,
    pub comment: String,
    pub rating: f64,
}

impl Review {
    pub fn new(movie_info_id: i64, comment: impl Into<String>, rating: f64) -> Self {
        Self {
            review_id: None,
            movie_info_id,
            comment: comment.into(),
            rating,
        }
    }

    pub fn with_generated_id(mut self) -> Self {
        if self.review_id.is_none() {
            self.review_id = Some(Uuid::new_v4().to_string());
        }
        self
    }

    #[track_caller]
    pub fn id(&self) -> CoreErrorResult<&str> {
        self.review_id
            .as_deref()
            .ok_or_else(|| CoreError::MissingIdentifier {
                record: "review",
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Reviews only allow the comment and rating to change
    pub fn apply_update(&mut self, other: Review) {
        self.comment = other.comment;
        self.rating = other.rating;
    }
}
