//! Graceful shutdown
//!
//! On SIGINT or SIGTERM the server stops accepting connections and lets open
//! ones finish. Draining is bounded: once the configured timeout has elapsed
//! after the signal, the server future is dropped and any connection still
//! open is cut.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::{signal, sync::Notify};
use tracing::{error, info, warn};

/// Wait for SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Run `server` to completion, but no longer than `timeout` after `draining`
/// is notified
///
/// Returns the server's own result when it finishes in time. When the
/// deadline passes first the server future is dropped and `Ok(())` returned.
pub async fn drain_within<F, E>(
    server: F,
    draining: Arc<Notify>,
    timeout: Duration,
) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
{
    let deadline = async {
        draining.notified().await;
        info!("⏳ Waiting up to {:?} for connections to close...", timeout);
        tokio::time::sleep(timeout).await;
    };

    tokio::select! {
        result = server => result,
        () = deadline => {
            warn!(?timeout, "Connections still open after shutdown timeout, closing them");
            Ok(())
        }
    }
}
