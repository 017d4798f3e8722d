//! Canned demo notifications.
//!
//! A caller-side fixture that fires three sample notifications at staggered
//! delays. It only uses the public `notify` call and is not part of the
//! center's contract.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use super::center::NotificationCenter;
use super::types::{NotificationId, NotificationKind};

/// One entry of the demo sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoNotification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: &'static str,
}

pub const DEMO_NOTIFICATIONS: [DemoNotification; 3] = [
    DemoNotification {
        kind: NotificationKind::Success,
        title: "Document Verified",
        message: "The document has been successfully verified.",
    },
    DemoNotification {
        kind: NotificationKind::Warning,
        title: "Document Expiring",
        message: "Document #A123 will expire in 7 days.",
    },
    DemoNotification {
        kind: NotificationKind::Info,
        title: "Verification Attempt",
        message: "Someone attempted to verify document #B456.",
    },
];

/// Default offsets from the start of the demo, one per entry.
pub const DEMO_DELAYS_MS: [u64; 3] = [1000, 3000, 5000];

/// Fires the demo notifications at `delays` measured from now.
///
/// Entries beyond the shorter of the two lists are skipped. Returns the ids
/// in firing order once the last one has been sent.
pub async fn seed(center: &NotificationCenter, delays: &[Duration]) -> Vec<NotificationId> {
    let start = Instant::now();
    let mut ids = Vec::with_capacity(DEMO_NOTIFICATIONS.len());

    for (demo, delay) in DEMO_NOTIFICATIONS.iter().zip(delays) {
        sleep_until(start + *delay).await;
        let id = center.notify(demo.kind, demo.title, demo.message);
        tracing::debug!(notification_id = %id, title = demo.title, "Demo notification sent");
        ids.push(id);
    }

    ids
}

/// Runs [`seed`] on its own task.
pub fn spawn_seed(center: NotificationCenter, delays: Vec<Duration>) -> JoinHandle<Vec<NotificationId>> {
    tokio::spawn(async move { seed(&center, &delays).await })
}

/// The default delays as durations.
pub fn default_delays() -> Vec<Duration> {
    DEMO_DELAYS_MS.iter().copied().map(Duration::from_millis).collect()
}
