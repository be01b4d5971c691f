use tokio::sync::watch;

/// Fans a single shutdown signal out to the HTTP server and open streams.
///
/// Backed by a watch channel so a signal taken after shutdown has already
/// been triggered resolves immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { shutdown_tx }
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        if !self.shutdown_tx.send_replace(true) {
            log::info!("Shutdown signal received, notifying all subsystems");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            shutdown_rx: self.shutdown_tx.subscribe(),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Awaitable view of a [`ShutdownCoordinator`], owned by one task
pub struct ShutdownSignal {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolves once shutdown has been triggered
    pub async fn wait(mut self) {
        let triggered = self.shutdown_rx.wait_for(|stopped| *stopped).await.is_ok();

        // Every coordinator is gone; nothing can trigger shutdown any more
        if !triggered {
            std::future::pending::<()>().await;
        }
    }
}
