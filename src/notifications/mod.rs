//! In-memory notification center.
//!
//! Toast-style notifications with automatic expiry:
//! - `notify` creates a notification and schedules its expiry
//! - `dismiss` removes one early and cancels its timer
//! - `list_active` / `subscribe` expose the active set to a view layer
//!
//! A single worker task owns the active set and a delay queue keyed by
//! notification id. Handles talk to it over a channel, so expiry and
//! dismissal can never both remove the same notification.

mod active;
mod center;
pub mod demo;
pub mod error;
mod id;
pub mod types;
mod worker;

#[cfg(test)]
mod tests;

pub use center::{DEFAULT_EXPIRY, NotificationCenter};
pub use error::{NotificationError, NotificationResult};
pub use types::{Notification, NotificationId, NotificationKind, Removal, RemovalReason};
