use chrono::NaiveDate;
use mv_core::{MovieInfo, Review};

/// Creates a test MovieInfo without an identifier
pub fn create_test_movie_info(name: &str, year: i32) -> MovieInfo {
    MovieInfo::new(
        name,
        year,
        vec!["Christian Bale".to_string(), "Michael Cane".to_string()],
        NaiveDate::from_ymd_opt(year, 6, 15).unwrap(),
    )
}

/// Creates a test Review without an identifier
pub fn create_test_review(movie_info_id: i64, comment: &str, rating: f64) -> Review {
    Review::new(movie_info_id, comment, rating)
}
