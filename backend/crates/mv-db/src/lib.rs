pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{MIGRATOR, create_pool};
pub use error::{DbError, Result};
pub use repositories::movie_info_repository::MovieInfoRepository;
pub use repositories::review_repository::ReviewRepository;
