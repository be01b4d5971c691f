use crate::{
    INFO_SERVICE, InfoState, MOVIES_SERVICE, MoviesState, REVIEW_SERVICE, ReviewState,
    ShutdownCoordinator, create_movie_info, create_review, delete_movie_info, delete_review,
    get_movie, get_movie_info, health, list_movie_infos, list_reviews, metrics,
    stream_movie_infos, stream_movies, stream_reviews, update_movie_info, update_review,
};

use axum::{
    Router,
    routing::{get, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};

/// Router of the movie catalog service
pub fn build_info_router(state: InfoState, prometheus: Option<PrometheusHandle>) -> Router {
    let shutdown = state.shutdown.clone();

    Router::new()
        .route(
            "/v1/moviesinfo",
            get(list_movie_infos).post(create_movie_info),
        )
        .route("/v1/moviesinfo/stream", get(stream_movie_infos))
        .route(
            "/v1/moviesinfo/{id}",
            get(get_movie_info)
                .put(update_movie_info)
                .delete(delete_movie_info),
        )
        .with_state(state)
        .merge(operational_routes(INFO_SERVICE, shutdown, prometheus))
        .layer(cors())
}

/// Router of the review service
pub fn build_review_router(state: ReviewState, prometheus: Option<PrometheusHandle>) -> Router {
    let shutdown = state.shutdown.clone();

    Router::new()
        .route("/v1/reviews", get(list_reviews).post(create_review))
        .route("/v1/reviews/stream", get(stream_reviews))
        .route(
            "/v1/reviews/{id}",
            put(update_review).delete(delete_review),
        )
        .with_state(state)
        .merge(operational_routes(REVIEW_SERVICE, shutdown, prometheus))
        .layer(cors())
}

/// Router of the movies aggregator
pub fn build_movies_router(state: MoviesState, prometheus: Option<PrometheusHandle>) -> Router {
    let shutdown = state.shutdown.clone();

    Router::new()
        .route("/v1/movies/stream", get(stream_movies))
        .route("/v1/movies/{id}", get(get_movie))
        .with_state(state)
        .merge(operational_routes(MOVIES_SERVICE, shutdown, prometheus))
        .layer(cors())
}

/// Health probes and the Prometheus scrape endpoint, shared by every service
fn operational_routes(
    service: &'static str,
    shutdown: ShutdownCoordinator,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    Router::new()
        .route("/health", get(move || health::health_check(service)))
        .route("/live", get(health::liveness_check))
        .route(
            "/ready",
            get(move || health::readiness_check(shutdown.is_shutdown())),
        )
        .route(
            "/metrics",
            get(move || {
                let handle = prometheus.clone();
                async move { metrics::render(handle.as_ref()) }
            }),
        )
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
