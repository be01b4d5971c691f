pub mod error;
pub mod movies;
pub mod movies_info;
pub mod ndjson;
pub mod reviews;
