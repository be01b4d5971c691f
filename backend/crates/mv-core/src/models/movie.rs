use crate::{MovieInfo, Review};

use serde::{Deserialize, Serialize};

/// Aggregated view served by the movies service: a catalog entry with its reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_info: MovieInfo,
    pub review_list: Vec<Review>,
}

impl Movie {
    pub fn new(movie_info: MovieInfo, review_list: Vec<Review>) -> Self {
        Self {
            movie_info,
            review_list,
        }
    }
}
