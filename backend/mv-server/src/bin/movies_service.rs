use mv_client::RemoteFetcher;
use mv_server::{
    MOVIES_SERVICE, MoviesState, ShutdownCoordinator, build_movies_router, metrics, server,
};

use std::error::Error;

use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = server::bootstrap(MOVIES_SERVICE)?;
    let prometheus = metrics::install_recorder()?;

    let movie_info = RemoteFetcher::from_config(
        "MovieInfo",
        &config.client.movies_info_url,
        &config.retry,
        &config.client,
    )?;
    let reviews = RemoteFetcher::from_config(
        "Reviews",
        &config.client.reviews_url,
        &config.retry,
        &config.client,
    )?;
    info!(
        "Downstream services: movie info={}, reviews={}",
        config.client.movies_info_url, config.client.reviews_url
    );

    let shutdown = ShutdownCoordinator::new();
    let state = MoviesState {
        movie_info,
        reviews,
        shutdown: shutdown.clone(),
    };

    let app = build_movies_router(state, Some(prometheus));
    server::serve(MOVIES_SERVICE, &config.movies_server, app, shutdown).await?;

    Ok(())
}
