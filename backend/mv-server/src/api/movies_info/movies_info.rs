//! Movie catalog REST API handlers
//!
//! Every created record is also published to the catalog channel so
//! `/v1/moviesinfo/stream` subscribers see it.

use crate::{ApiError, ApiResult, InfoState, ListMovieInfoQuery, ndjson_response};

use mv_core::MovieInfo;
use mv_db::MovieInfoRepository;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use futures::StreamExt;

// =============================================================================
// Handlers
// =============================================================================

/// POST /v1/moviesinfo
///
/// Store a catalog entry and publish it to stream subscribers
pub async fn create_movie_info(
    State(state): State<InfoState>,
    Json(movie_info): Json<MovieInfo>,
) -> ApiResult<(StatusCode, Json<MovieInfo>)> {
    validate_movie_info(&movie_info)?;

    let repo = MovieInfoRepository::new(state.pool.clone());
    let created = repo.create(movie_info).await?;

    if !state.channel.publish(created.clone()) {
        log::debug!(
            "Movie info {:?} stored but not published (channel closed or no subscribers)",
            created.movie_info_id
        );
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/moviesinfo?year=
pub async fn list_movie_infos(
    State(state): State<InfoState>,
    Query(query): Query<ListMovieInfoQuery>,
) -> ApiResult<Json<Vec<MovieInfo>>> {
    let repo = MovieInfoRepository::new(state.pool.clone());

    let movie_infos = match query.year {
        Some(year) => repo.find_by_year(year).await?,
        None => repo.find_all().await?,
    };

    Ok(Json(movie_infos))
}

/// GET /v1/moviesinfo/{id}
pub async fn get_movie_info(
    State(state): State<InfoState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MovieInfo>> {
    let repo = MovieInfoRepository::new(state.pool.clone());

    repo.find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Movie info {} not found", id)))
}

/// PUT /v1/moviesinfo/{id}
///
/// Replaces name, year, cast and release date; the identifier is kept
pub async fn update_movie_info(
    State(state): State<InfoState>,
    Path(id): Path<String>,
    Json(changes): Json<MovieInfo>,
) -> ApiResult<Json<MovieInfo>> {
    validate_movie_info(&changes)?;

    let repo = MovieInfoRepository::new(state.pool.clone());

    repo.update(&id, changes)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Movie info {} not found", id)))
}

/// DELETE /v1/moviesinfo/{id}
pub async fn delete_movie_info(
    State(state): State<InfoState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = MovieInfoRepository::new(state.pool.clone());

    if !repo.delete_by_id(&id).await? {
        log::debug!("Delete of unknown movie info {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/moviesinfo/stream
///
/// Replays the channel per its replay mode, then follows new records
pub async fn stream_movie_infos(State(state): State<InfoState>) -> Response {
    let subscription = state.channel.subscribe();
    log::debug!("Movie info stream subscriber {} joined", subscription.id());

    let items = subscription.into_stream().filter_map(|item| async move {
        match item {
            Ok(movie_info) => Some(movie_info),
            Err(e) => {
                log::warn!("Movie info stream: {}", e);
                None
            }
        }
    });

    ndjson_response(items, state.shutdown.signal())
}

// =============================================================================
// Validation
// =============================================================================

fn validate_movie_info(movie_info: &MovieInfo) -> ApiResult<()> {
    if movie_info.name.trim().is_empty() {
        return Err(ApiError::bad_request("movieInfo.name must be present"));
    }

    if movie_info.year <= 0 {
        return Err(ApiError::bad_request(
            "movieInfo.year must be a positive value",
        ));
    }

    if movie_info.cast.iter().any(|member| member.trim().is_empty()) {
        return Err(ApiError::bad_request("movieInfo.cast must be present"));
    }

    Ok(())
}
