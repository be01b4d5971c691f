use serde::Deserialize;

/// Query parameters for listing reviews
#[derive(Debug, Default, Deserialize)]
pub struct ListReviewsQuery {
    /// Only reviews of this catalog entry
    #[serde(rename = "movieInfoId")]
    pub movie_info_id: Option<i64>,
}
