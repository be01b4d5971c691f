use crate::ShutdownCoordinator;

use mv_client::RemoteFetcher;
use mv_core::{MovieInfo, Review};
use mv_stream::BroadcastChannel;

use sqlx::SqlitePool;

/// Shared state of the movie catalog service
#[derive(Clone)]
pub struct InfoState {
    pub pool: SqlitePool,
    /// Every created record, replayed to `/stream` subscribers
    pub channel: BroadcastChannel<MovieInfo>,
    pub shutdown: ShutdownCoordinator,
}

/// Shared state of the review service
#[derive(Clone)]
pub struct ReviewState {
    pub pool: SqlitePool,
    pub channel: BroadcastChannel<Review>,
    pub shutdown: ShutdownCoordinator,
}

/// Shared state of the aggregator; holds no store of its own
#[derive(Clone)]
pub struct MoviesState {
    pub movie_info: RemoteFetcher<MovieInfo>,
    pub reviews: RemoteFetcher<Review>,
    pub shutdown: ShutdownCoordinator,
}
