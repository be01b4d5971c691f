pub mod list_movie_info_query;
pub mod movies_info;
