//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Trigger `shutdown` when the process receives Ctrl+C (SIGINT).
pub fn trigger_on_ctrl_c(shutdown: Shutdown) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });
}
