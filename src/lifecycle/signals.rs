//! Shutdown signal handling.
//!
//! # Responsibilities
//! - Wait for Ctrl+C or an internal shutdown trigger
//! - Resolve once either fires, letting the server drain and exit

use tokio::sync::broadcast;

/// Wait for a shutdown signal (Ctrl+C or broadcast trigger).
pub async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
