pub mod movie;
pub mod movie_info;
pub mod review;
