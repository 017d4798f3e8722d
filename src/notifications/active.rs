//! The ordered set of visible notifications.

use tokio_util::time::delay_queue;

use super::types::{Notification, NotificationId};

/// An active notification together with the key of its pending expiry.
#[derive(Debug)]
pub(crate) struct ActiveEntry {
    pub(crate) notification: Notification,
    pub(crate) expiry_key: delay_queue::Key,
}

/// Active notifications in insertion order, oldest first.
///
/// Only the worker touches this; every method is plain synchronous code.
#[derive(Debug, Default)]
pub(crate) struct ActiveSet {
    entries: Vec<ActiveEntry>,
}

impl ActiveSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Returns false, leaving the set untouched, if the id
    /// is already present.
    pub(crate) fn insert(&mut self, entry: ActiveEntry) -> bool {
        if self.contains(entry.notification.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Removes and returns the entry with `id`, if present.
    pub(crate) fn remove(&mut self, id: NotificationId) -> Option<ActiveEntry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.notification.id == id)?;
        Some(self.entries.remove(position))
    }

    pub(crate) fn contains(&self, id: NotificationId) -> bool {
        self.entries.iter().any(|entry| entry.notification.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry, oldest first.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = ActiveEntry> + '_ {
        self.entries.drain(..)
    }

    /// Cloned notifications in display order.
    pub(crate) fn snapshot(&self) -> Vec<Notification> {
        self.entries
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }
}
