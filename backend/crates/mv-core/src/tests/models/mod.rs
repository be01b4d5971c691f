mod movie;
mod movie_info;
mod review;
