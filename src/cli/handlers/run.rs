//! Run command handler
//!
//! Feeds a command script from stdin into a fresh center.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::notifications::NotificationCenter;
use crate::script::{ScriptRunner, ScriptSummary};
use crate::view::{ConsoleView, ViewFormat};

pub struct RunCommandHandler {
    config: Settings,
}

impl RunCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run a script from stdin, stopping early on Ctrl+C or SIGTERM
    pub async fn execute(&self, format: ViewFormat, no_drain: bool) -> AppResult<ScriptSummary> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut stderr = tokio::io::stderr();

        self.execute_until(
            format,
            no_drain,
            stdin,
            &mut stdout,
            &mut stderr,
            super::shutdown_signal(),
        )
        .await
    }

    /// Run the script read from `input` until end of input or until
    /// `shutdown` resolves
    ///
    /// At end of input the active set is drained unless `no_drain` is set.
    pub async fn execute_until<R, W, E, F>(
        &self,
        format: ViewFormat,
        no_drain: bool,
        input: R,
        out: &mut W,
        errors: &mut E,
        shutdown: F,
    ) -> AppResult<ScriptSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        let center = NotificationCenter::new(self.config.notifications.expiry());
        let runner = ScriptRunner::new(center.clone(), ConsoleView::new(format));

        let session = async {
            let summary = runner.run(input, out, errors).await?;
            if !no_drain {
                tracing::debug!("End of input, waiting for active notifications to expire");
                center.wait_until_empty().await;
            }
            Ok::<_, AppError>(summary)
        };

        let outcome = tokio::select! {
            summary = session => summary,
            _ = shutdown => {
                tracing::info!("Script interrupted");
                Ok(ScriptSummary::default())
            }
        };

        center.shutdown().await?;

        let summary = outcome?;
        tracing::info!(
            executed = summary.executed,
            rejected = summary.rejected,
            "Script finished"
        );
        Ok(summary)
    }
}
