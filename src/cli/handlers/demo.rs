//! Demo command handler
//!
//! Plays the canned notifications against a fresh center and renders every
//! change of the active list until all of them have expired.

use std::future::Future;

use tokio::io::AsyncWrite;

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::notifications::{NotificationCenter, NotificationId, demo};
use crate::view::{ConsoleView, ViewFormat};

pub struct DemoCommandHandler {
    config: Settings,
}

impl DemoCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the demo on stdout, stopping early on Ctrl+C or SIGTERM
    pub async fn execute(&self, format: ViewFormat) -> AppResult<Vec<NotificationId>> {
        let mut stdout = tokio::io::stdout();
        self.execute_until(format, &mut stdout, super::shutdown_signal())
            .await
    }

    /// Run the demo, writing frames to `out`, until it completes or
    /// `shutdown` resolves
    ///
    /// Returns the ids of the notifications that were fired.
    pub async fn execute_until<W, F>(
        &self,
        format: ViewFormat,
        out: &mut W,
        shutdown: F,
    ) -> AppResult<Vec<NotificationId>>
    where
        W: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        let center = NotificationCenter::new(self.config.notifications.expiry());
        let delays = self.config.notifications.demo_delays();

        tracing::info!(
            expiry_ms = self.config.notifications.expiry_ms,
            scheduled = delays.len().min(demo::DEMO_NOTIFICATIONS.len()),
            "Starting demo"
        );

        let view = ConsoleView::new(format).run(center.subscribe(), out);

        let session = async {
            let ids = tokio::select! {
                ids = async {
                    let ids = demo::seed(&center, &delays).await;
                    center.wait_until_empty().await;
                    ids
                } => ids,
                _ = shutdown => {
                    tracing::info!("Demo interrupted");
                    Vec::new()
                }
            };
            // Ends the worker, which closes the snapshot channel and so the view.
            center.shutdown().await?;
            AppResult::Ok(ids)
        };

        let (rendered, ids) = tokio::join!(view, session);
        rendered?;
        let ids = ids?;

        tracing::info!(fired = ids.len(), "Demo finished");
        Ok(ids)
    }
}
