//! Aggregator handlers
//!
//! Compose catalog entries and reviews fetched from the downstream services.
//! Failures keep their classification on the way out: see
//! `impl From<FetchError> for ApiError`.

use crate::{ApiResult, MoviesState, ndjson_response};

use mv_client::FetchError;
use mv_core::{Movie, Review};

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use futures::StreamExt;

/// GET /v1/movies/{id}
///
/// The catalog entry must exist; a missing review listing means no reviews.
pub async fn get_movie(
    State(state): State<MoviesState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Movie>> {
    let movie_info = state.movie_info.fetch_one(&id).await?;
    let review_list = fetch_reviews(&state, &id).await?;

    Ok(Json(Movie::new(movie_info, review_list)))
}

/// GET /v1/movies/stream
///
/// Proxies the catalog service's live stream, reconnecting per retry policy
pub async fn stream_movies(State(state): State<MoviesState>) -> Response {
    let items = state.movie_info.fetch_stream().filter_map(|item| async move {
        match item {
            Ok(movie_info) => Some(movie_info),
            Err(e) => {
                log::error!("Movie info stream ended: {}", e);
                None
            }
        }
    });

    ndjson_response(items, state.shutdown.signal())
}

async fn fetch_reviews(state: &MoviesState, movie_info_id: &str) -> ApiResult<Vec<Review>> {
    // Reviews reference catalog entries by numeric id
    if movie_info_id.parse::<i64>().is_err() {
        log::debug!(
            "Movie info id {} is not numeric, no reviews can reference it",
            movie_info_id
        );
        return Ok(Vec::new());
    }

    match state
        .reviews
        .fetch_list(&[("movieInfoId", movie_info_id)])
        .await
    {
        Ok(reviews) => Ok(reviews),
        Err(FetchError::NotFound { .. }) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
