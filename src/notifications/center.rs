//! Public handle to the notification worker.

use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use tokio::sync::{Mutex, broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::error::NotificationResult;
use super::id::IdGenerator;
use super::types::{Notification, NotificationId, NotificationKind, Removal};
use super::worker::{Command, Worker};

/// How long a notification stays visible unless dismissed first.
pub const DEFAULT_EXPIRY: Duration = Duration::from_millis(5000);

/// Capacity of the removal event channel. Lagging receivers lose the oldest events.
const REMOVAL_CHANNEL_CAPACITY: usize = 256;

/// Owns the active notifications and their expiry timers.
///
/// The handle is cheap to clone; every clone talks to the same worker task.
/// `notify` and `dismiss` never block and never fail. Operations issued from
/// one clone are applied in the order they were issued.
///
/// # Example
/// ```ignore
/// let center = NotificationCenter::new(DEFAULT_EXPIRY);
/// let id = center.notify("success", "Document Verified", "The document has been successfully verified.");
/// assert_eq!(center.list_active().await.len(), 1);
/// center.dismiss(id);
/// ```
#[derive(Clone)]
pub struct NotificationCenter {
    commands: mpsc::UnboundedSender<Command>,
    ids: Arc<IdGenerator>,
    expiry: Duration,
    snapshots: watch::Receiver<Vec<Notification>>,
    removals: broadcast::Sender<Removal>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl NotificationCenter {
    /// Spawns the worker task and returns a handle to it.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn new(expiry: Duration) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(Vec::new());
        let (removals, _) = broadcast::channel(REMOVAL_CHANNEL_CAPACITY);

        let worker = Worker::new(command_rx, snapshot_tx, removals.clone());
        let handle = tokio::spawn(worker.run());

        tracing::debug!(expiry_ms = expiry.as_millis() as u64, "Notification center started");

        Self {
            commands,
            ids: Arc::new(IdGenerator::new()),
            expiry,
            snapshots,
            removals,
            worker: Arc::new(Mutex::new(Some(handle))),
        }
    }

    /// The auto-expiry window applied to every notification.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Creates a notification and schedules its automatic dismissal.
    ///
    /// `kind` accepts a [`NotificationKind`] or a kind name; unrecognized names
    /// become `info`. Returns the id so the caller can dismiss it early.
    pub fn notify(
        &self,
        kind: impl Into<NotificationKind>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> NotificationId {
        let deadline = Instant::now() + self.expiry;
        let created_at = Timestamp::now();
        let id = self.ids.next(created_at);

        let notification = Notification {
            id,
            kind: kind.into(),
            title: title.into(),
            message: message.into(),
            created_at,
            expires_at: created_at.checked_add(self.expiry).unwrap_or(Timestamp::MAX),
        };

        if self
            .commands
            .send(Command::Notify {
                notification,
                deadline,
            })
            .is_err()
        {
            tracing::warn!(notification_id = %id, "Notification center is stopped, notification dropped");
        }

        id
    }

    /// Removes a notification and cancels its expiry timer.
    ///
    /// Unknown or already removed ids are ignored.
    pub fn dismiss(&self, id: NotificationId) {
        if self.commands.send(Command::Dismiss(id)).is_err() {
            tracing::warn!(notification_id = %id, "Notification center is stopped, dismiss ignored");
        }
    }

    /// Snapshot of the active notifications, oldest first.
    ///
    /// Reflects every `notify` and `dismiss` issued before the call. Once the
    /// center is stopped this returns the last published snapshot, which is
    /// empty.
    pub async fn list_active(&self) -> Vec<Notification> {
        let (reply, response) = oneshot::channel();
        if self.commands.send(Command::List(reply)).is_err() {
            return self.snapshots.borrow().clone();
        }

        match response.await {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshots.borrow().clone(),
        }
    }

    /// Receiver that observes the active set after every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.snapshots.clone()
    }

    /// Receiver of removal events, one per notification.
    pub fn removals(&self) -> broadcast::Receiver<Removal> {
        self.removals.subscribe()
    }

    /// Waits until no notification is active, counting everything issued
    /// before the call.
    pub async fn wait_until_empty(&self) {
        if self.list_active().await.is_empty() {
            return;
        }

        let mut snapshots = self.snapshots.clone();
        // An error means the worker stopped, which also leaves the set empty.
        let _ = snapshots.wait_for(|active| active.is_empty()).await;
    }

    /// Stops the worker. Pending timers are cancelled and every active
    /// notification is removed with reason `Shutdown`.
    ///
    /// Calling this more than once is harmless.
    pub async fn shutdown(&self) -> NotificationResult<()> {
        let handle = self.worker.lock().await.take();
        let Some(handle) = handle else {
            return Ok(());
        };

        // A send error means the worker already exited on its own.
        let _ = self.commands.send(Command::Shutdown);
        handle.await?;

        tracing::debug!("Notification center stopped");
        Ok(())
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("expiry", &self.expiry)
            .field("active", &self.snapshots.borrow().len())
            .finish()
    }
}
