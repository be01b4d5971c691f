use mv_server::{
    INFO_SERVICE, InfoState, ShutdownCoordinator, build_info_router, metrics, server,
};

use std::error::Error;

use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = server::bootstrap(INFO_SERVICE)?;
    let prometheus = metrics::install_recorder()?;

    let database_path = config.info_database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = mv_db::create_pool(&database_path).await?;

    let shutdown = ShutdownCoordinator::new();
    let channel = server::build_channel("movie_info", &config.info_stream);
    server::close_on_shutdown(channel.clone(), &shutdown);

    let state = InfoState {
        pool,
        channel,
        shutdown: shutdown.clone(),
    };

    let app = build_info_router(state, Some(prometheus));
    server::serve(INFO_SERVICE, &config.info_server, app, shutdown).await?;

    Ok(())
}
