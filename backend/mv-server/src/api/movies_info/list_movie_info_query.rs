use serde::Deserialize;

/// Query parameters for listing movie catalog entries
#[derive(Debug, Default, Deserialize)]
pub struct ListMovieInfoQuery {
    /// Only entries released in this year
    pub year: Option<i32>,
}
