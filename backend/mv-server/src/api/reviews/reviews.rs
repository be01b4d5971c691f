//! Review REST API handlers

use crate::{ApiError, ApiResult, ListReviewsQuery, ReviewState, ndjson_response};

use mv_core::Review;
use mv_db::ReviewRepository;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use futures::StreamExt;

/// POST /v1/reviews
pub async fn create_review(
    State(state): State<ReviewState>,
    Json(review): Json<Review>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    validate_review(&review)?;

    let repo = ReviewRepository::new(state.pool.clone());
    let created = repo.create(review).await?;

    if !state.channel.publish(created.clone()) {
        log::debug!(
            "Review {:?} stored but not published (channel closed or no subscribers)",
            created.review_id
        );
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/reviews?movieInfoId=
pub async fn list_reviews(
    State(state): State<ReviewState>,
    Query(query): Query<ListReviewsQuery>,
) -> ApiResult<Json<Vec<Review>>> {
    let repo = ReviewRepository::new(state.pool.clone());

    let reviews = match query.movie_info_id {
        Some(movie_info_id) => repo.find_by_movie_info_id(movie_info_id).await?,
        None => repo.find_all().await?,
    };

    Ok(Json(reviews))
}

/// PUT /v1/reviews/{id}
///
/// Only the comment and rating change
pub async fn update_review(
    State(state): State<ReviewState>,
    Path(id): Path<String>,
    Json(changes): Json<Review>,
) -> ApiResult<Json<Review>> {
    validate_review(&changes)?;

    let repo = ReviewRepository::new(state.pool.clone());

    repo.update(&id, changes)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Review {} not found", id)))
}

/// DELETE /v1/reviews/{id}
pub async fn delete_review(
    State(state): State<ReviewState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = ReviewRepository::new(state.pool.clone());

    if !repo.delete_by_id(&id).await? {
        log::debug!("Delete of unknown review {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/reviews/stream
pub async fn stream_reviews(State(state): State<ReviewState>) -> Response {
    let subscription = state.channel.subscribe();
    log::debug!("Review stream subscriber {} joined", subscription.id());

    let items = subscription.into_stream().filter_map(|item| async move {
        match item {
            Ok(review) => Some(review),
            Err(e) => {
                log::warn!("Review stream: {}", e);
                None
            }
        }
    });

    ndjson_response(items, state.shutdown.signal())
}

fn validate_review(review: &Review) -> ApiResult<()> {
    if !review.rating.is_finite() || review.rating < 0.0 {
        return Err(ApiError::bad_request(
            "review.rating: please pass a non-negative value",
        ));
    }

    Ok(())
}
