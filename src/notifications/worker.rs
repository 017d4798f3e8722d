//! The task that owns the active set.
//!
//! Commands from every [`NotificationCenter`](super::NotificationCenter) clone
//! and expirations from the delay queue are handled one at a time on this
//! task, so mutations of the active set are totally ordered.

use futures::StreamExt;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::Instant;
use tokio_util::time::DelayQueue;

use super::active::{ActiveEntry, ActiveSet};
use super::types::{Notification, NotificationId, Removal, RemovalReason};

/// Requests sent from the handle to the worker.
#[derive(Debug)]
pub(crate) enum Command {
    Notify {
        notification: Notification,
        deadline: Instant,
    },
    Dismiss(NotificationId),
    List(oneshot::Sender<Vec<Notification>>),
    Shutdown,
}

enum Event {
    Command(Command),
    Expired(NotificationId),
    Closed,
}

pub(crate) struct Worker {
    commands: mpsc::UnboundedReceiver<Command>,
    active: ActiveSet,
    expirations: DelayQueue<NotificationId>,
    snapshots: watch::Sender<Vec<Notification>>,
    removals: broadcast::Sender<Removal>,
}

impl Worker {
    pub(crate) fn new(
        commands: mpsc::UnboundedReceiver<Command>,
        snapshots: watch::Sender<Vec<Notification>>,
        removals: broadcast::Sender<Removal>,
    ) -> Self {
        Self {
            commands,
            active: ActiveSet::new(),
            expirations: DelayQueue::new(),
            snapshots,
            removals,
        }
    }

    pub(crate) async fn run(mut self) {
        tracing::debug!("Notification worker started");

        loop {
            // Due expirations go first, so a command handled at time T never
            // sees a notification whose deadline is at or before T.
            let event = tokio::select! {
                biased;
                Some(expired) = self.expirations.next(), if !self.expirations.is_empty() => {
                    Event::Expired(expired.into_inner())
                }
                command = self.commands.recv() => match command {
                    Some(command) => Event::Command(command),
                    None => Event::Closed,
                },
            };

            match event {
                Event::Command(Command::Shutdown) => {
                    tracing::debug!("Notification worker received shutdown");
                    break;
                }
                Event::Closed => {
                    tracing::debug!("All notification handles dropped");
                    break;
                }
                Event::Command(command) => self.handle(command),
                Event::Expired(id) => self.remove(id, RemovalReason::Expired),
            }
        }

        self.clear();
        tracing::debug!("Notification worker stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Notify {
                notification,
                deadline,
            } => self.insert(notification, deadline),
            Command::Dismiss(id) => self.remove(id, RemovalReason::Dismissed),
            Command::List(reply) => {
                // The caller may have given up waiting; nothing to do then.
                let _ = reply.send(self.active.snapshot());
            }
            Command::Shutdown => {}
        }
    }

    fn insert(&mut self, notification: Notification, deadline: Instant) {
        let id = notification.id;
        let kind = notification.kind;
        let expiry_key = self.expirations.insert_at(id, deadline);

        let entry = ActiveEntry {
            notification,
            expiry_key,
        };
        if !self.active.insert(entry) {
            self.expirations.try_remove(&expiry_key);
            tracing::warn!(notification_id = %id, "Duplicate notification id ignored");
            return;
        }

        tracing::info!(
            notification_id = %id,
            kind = %kind,
            active = self.active.len(),
            "Notification created"
        );
        self.publish();
    }

    fn remove(&mut self, id: NotificationId, reason: RemovalReason) {
        let Some(entry) = self.active.remove(id) else {
            tracing::trace!(notification_id = %id, reason = %reason, "Notification already removed");
            return;
        };

        // An expired entry has already left the queue; a dismissed one has not.
        if reason != RemovalReason::Expired {
            self.expirations.try_remove(&entry.expiry_key);
        }

        self.record(id, reason);
        self.publish();
    }

    fn clear(&mut self) {
        if self.active.is_empty() {
            return;
        }

        let removed: Vec<NotificationId> = self
            .active
            .drain()
            .map(|entry| entry.notification.id)
            .collect();
        self.expirations.clear();

        for id in removed {
            self.record(id, RemovalReason::Shutdown);
        }
        self.publish();
    }

    fn record(&self, id: NotificationId, reason: RemovalReason) {
        tracing::info!(
            notification_id = %id,
            reason = %reason,
            active = self.active.len(),
            "Notification removed"
        );
        // No subscribers is fine.
        let _ = self.removals.send(Removal { id, reason });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.active.snapshot());
    }
}
