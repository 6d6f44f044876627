//! Process shutdown coordination
//!
//! One watch channel carries the "stop" flag. The HTTP server drains on it,
//! then [`ShutdownService::shutdown`] closes the catalog pool.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::constants::SHUTDOWN_TIMEOUT_SECS;
use crate::data::DatabaseService;

#[derive(Clone)]
pub struct ShutdownService {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
    database: Arc<DatabaseService>,
}

impl ShutdownService {
    pub fn new(database: Arc<DatabaseService>) -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
            database,
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Owned future resolving once shutdown is triggered (axum graceful shutdown)
    pub fn wait(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut rx = self.rx.clone();
        async move {
            // Sender lives as long as any clone of the service
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    /// Flag shutdown and close the pool, giving up after the timeout
    pub async fn shutdown(&self) {
        self.trigger();

        let backend = self.database.backend();
        let limit = Duration::from_secs(SHUTDOWN_TIMEOUT_SECS);
        if tokio::time::timeout(limit, self.database.close()).await.is_err() {
            tracing::warn!(%backend, timeout_secs = limit.as_secs(), "Pool did not close in time");
            return;
        }
        tracing::debug!(%backend, "Shutdown complete");
    }

    /// Spawn a task that triggers shutdown on Ctrl+C or SIGTERM
    pub fn install_signal_handlers(&self) {
        let service = self.clone();
        tokio::spawn(async move {
            let signal = wait_for_signal().await;
            tracing::info!(signal, "Shutting down");
            service.trigger();
        });
    }
}

/// Resolve with the name of the first termination signal received
///
/// A handler that fails to install is logged and never fires.
async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}
