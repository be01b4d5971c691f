pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::movie::Movie;
pub use models::movie_info::MovieInfo;
pub use models::review::Review;
