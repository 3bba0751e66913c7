//! OS signal handling.
//!
//! Translates an interrupt (Ctrl+C) into the internal shutdown signal. The
//! accept loop observes it at its next poll boundary, so shutdown completes
//! within one poll interval of the signal.

use crate::lifecycle::Shutdown;

/// Spawn the task that waits for an interrupt and triggers shutdown.
pub fn spawn_interrupt_handler(shutdown: Shutdown) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for interrupt signal");
            return;
        }
        tracing::info!("Interrupt received, shutting down");
        shutdown.trigger();
    });
}
