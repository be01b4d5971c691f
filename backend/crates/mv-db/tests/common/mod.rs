#![allow(dead_code)]

pub mod fixtures;
pub mod test_db;

pub use fixtures::{create_test_movie_info, create_test_review};
pub use test_db::create_test_pool;
