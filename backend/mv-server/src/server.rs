//! Process bootstrap shared by the three service binaries

use crate::{ServerResult, ShutdownCoordinator, logger};

use mv_config::{Config, ServerConfig, StreamConfig};
use mv_stream::{BroadcastChannel, ReplayConfig};

use std::path::PathBuf;

use axum::Router;
use log::{error, info};
use tokio::net::TcpListener;

/// Load and validate configuration, then start logging.
///
/// Nothing is logged before this returns.
pub fn bootstrap(service: &'static str) -> ServerResult<Config> {
    let config = Config::load()?;
    config.validate()?;

    let log_file_path: Option<PathBuf> = if let Some(ref filename) = config.logging.file {
        let config_dir = Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting {} v{}", service, env!("CARGO_PKG_VERSION"));
    config.log_summary();

    Ok(config)
}

/// Build a broadcast channel from its config section.
pub fn build_channel<T: Clone>(name: &'static str, config: &StreamConfig) -> BroadcastChannel<T> {
    let replay = ReplayConfig::from(config);
    info!("Channel {} replay: {:?}", name, replay);
    BroadcastChannel::new(name, replay)
}

/// Close `channel` once shutdown is triggered so open streams drain and end.
pub fn close_on_shutdown<T>(channel: BroadcastChannel<T>, shutdown: &ShutdownCoordinator)
where
    T: Clone + Send + 'static,
{
    let signal = shutdown.signal();
    tokio::spawn(async move {
        signal.wait().await;
        channel.close();
    });
}

/// Serve `router` on the configured address until shutdown.
///
/// Ctrl-C triggers `shutdown`; in-flight requests are allowed to finish.
pub async fn serve(
    service: &'static str,
    server: &ServerConfig,
    router: Router,
    shutdown: ShutdownCoordinator,
) -> ServerResult<()> {
    let listener = TcpListener::bind(server.bind_addr()).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("{} listening on {}", service, actual_addr);

    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let signal = shutdown.signal();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            signal.wait().await;
            info!("Graceful shutdown started");
        })
        .await?;

    info!("{} stopped", service);
    Ok(())
}
