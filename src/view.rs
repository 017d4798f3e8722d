//! Terminal view layer.
//!
//! Renders snapshots from [`NotificationCenter::subscribe`] as text or JSON.
//! It owns no notification state.
//!
//! [`NotificationCenter::subscribe`]: crate::notifications::NotificationCenter::subscribe

use std::str::FromStr;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

use crate::notifications::{Notification, NotificationKind};

/// Output format of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ViewFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ViewFormat::Text),
            "json" => Ok(ViewFormat::Json),
            _ => Err(format!("Invalid view format '{}'. Valid formats are: text, json", s)),
        }
    }
}

/// Icon shown for each kind.
pub fn icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✔",
        NotificationKind::Warning => "⚠",
        NotificationKind::Error => "✖",
        NotificationKind::Info => "ℹ",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleView {
    format: ViewFormat,
}

impl ConsoleView {
    pub fn new(format: ViewFormat) -> Self {
        Self { format }
    }

    /// Renders one snapshot, newline terminated.
    pub fn render(&self, snapshot: &[Notification]) -> String {
        match self.format {
            ViewFormat::Text => render_text(snapshot),
            ViewFormat::Json => render_json(snapshot),
        }
    }

    /// Writes every new snapshot to `out` until the center stops.
    pub async fn run<W>(
        self,
        mut snapshots: watch::Receiver<Vec<Notification>>,
        mut out: W,
    ) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while snapshots.changed().await.is_ok() {
            let frame = self.render(&snapshots.borrow_and_update());
            out.write_all(frame.as_bytes()).await?;
            out.flush().await?;
        }
        Ok(())
    }
}

fn render_text(snapshot: &[Notification]) -> String {
    if snapshot.is_empty() {
        return "-- no active notifications --\n".to_string();
    }

    let mut frame = format!("-- {} active --\n", snapshot.len());
    for notification in snapshot {
        frame.push_str(&format!(
            "{} [{}] {}: {}\n",
            icon(notification.kind),
            notification.id,
            notification.title,
            notification.message
        ));
    }
    frame
}

fn render_json(snapshot: &[Notification]) -> String {
    match serde_json::to_string(snapshot) {
        Ok(json) => format!("{}\n", json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize snapshot");
            "[]\n".to_string()
        }
    }
}
