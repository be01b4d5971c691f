pub mod movie_info_repository;
pub mod review_repository;
