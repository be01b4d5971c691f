use mv_server::{
    REVIEW_SERVICE, ReviewState, ShutdownCoordinator, build_review_router, metrics, server,
};

use std::error::Error;

use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = server::bootstrap(REVIEW_SERVICE)?;
    let prometheus = metrics::install_recorder()?;

    let database_path = config.review_database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = mv_db::create_pool(&database_path).await?;

    let shutdown = ShutdownCoordinator::new();
    let channel = server::build_channel("review", &config.review_stream);
    server::close_on_shutdown(channel.clone(), &shutdown);

    let state = ReviewState {
        pool,
        channel,
        shutdown: shutdown.clone(),
    };

    let app = build_review_router(state, Some(prometheus));
    server::serve(REVIEW_SERVICE, &config.review_server, app, shutdown).await?;

    Ok(())
}
