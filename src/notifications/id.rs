//! Notification id generation.

use std::sync::atomic::{AtomicU64, Ordering};

use jiff::Timestamp;

use super::types::NotificationId;

/// Hands out creation-time ids with a sequence tiebreak.
///
/// Each id is `max(created_at_ms, previous + 1)`. Two notifications created in
/// the same millisecond, or after the wall clock stepped back, still get
/// distinct and strictly increasing ids.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next(&self, created_at: Timestamp) -> NotificationId {
        let millis = u64::try_from(created_at.as_millisecond()).unwrap_or(0);
        let bump = |last: u64| millis.max(last.saturating_add(1));

        // The closure never returns None, so both arms carry the previous value.
        let previous = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(bump(last)))
        {
            Ok(previous) | Err(previous) => previous,
        };

        NotificationId::new(bump(previous))
    }
}
