//! Command handlers for CLI operations
//!
//! Each subcommand has its own handler, separating execution from parsing
//! and validation.

pub mod check;
pub mod demo;
pub mod run;

pub use check::CheckCommandHandler;
pub use demo::DemoCommandHandler;
pub use run::RunCommandHandler;

use tokio::signal;

/// Waits for Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed that signal is never reported.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
