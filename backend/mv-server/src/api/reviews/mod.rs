pub mod list_reviews_query;
pub mod reviews;
