pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    movies::movies::{get_movie, stream_movies},
    movies_info::{
        list_movie_info_query::ListMovieInfoQuery,
        movies_info::{
            create_movie_info, delete_movie_info, get_movie_info, list_movie_infos,
            stream_movie_infos, update_movie_info,
        },
    },
    ndjson::{NDJSON_CONTENT_TYPE, ndjson_response},
    reviews::{
        list_reviews_query::ListReviewsQuery,
        reviews::{create_review, delete_review, list_reviews, stream_reviews, update_review},
    },
};
pub use error::{Result as ServerResult, ServerError};
pub use routes::{build_info_router, build_movies_router, build_review_router};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
pub use state::{InfoState, MoviesState, ReviewState};

pub const INFO_SERVICE: &str = "movies-info-service";
pub const REVIEW_SERVICE: &str = "movies-review-service";
pub const MOVIES_SERVICE: &str = "movies-service";
