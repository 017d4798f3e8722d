//! Notification data model.
//!
//! A [`Notification`] is a transient, user-facing alert with a kind, a title
//! and a message. It lives in the active set of a
//! [`NotificationCenter`](super::NotificationCenter) until it is dismissed or
//! expires, and is then discarded.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::error::NotificationError;

// ============================================================================
// NotificationKind
// ============================================================================

/// Visual category of a notification.
///
/// The set is closed. Anything that does not parse as one of these variants
/// is coerced to [`NotificationKind::Info`] by [`NotificationKind::parse_lossy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    /// All kinds, in declaration order.
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::Success,
        NotificationKind::Warning,
        NotificationKind::Error,
        NotificationKind::Info,
    ];

    /// Convert the kind to a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }

    /// Parse a kind name, falling back to `Info` for unrecognized values.
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(kind = %value, "Unrecognized notification kind, using info");
            NotificationKind::Info
        })
    }
}

impl FromStr for NotificationKind {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(NotificationKind::Success),
            "warning" | "warn" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            "info" => Ok(NotificationKind::Info),
            _ => Err(NotificationError::InvalidKind(s.to_string())),
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        NotificationKind::parse_lossy(value)
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        NotificationKind::parse_lossy(&value)
    }
}

impl From<Option<&str>> for NotificationKind {
    fn from(value: Option<&str>) -> Self {
        value.map(NotificationKind::parse_lossy).unwrap_or_default()
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// NotificationId
// ============================================================================

/// Identifier of a notification.
///
/// The value is the creation time in Unix milliseconds, bumped forward when
/// needed so that ids handed out by one center are strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NotificationId)
    }
}

// ============================================================================
// Notification
// ============================================================================

/// One user-visible alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Wall-clock creation time.
    pub created_at: Timestamp,
    /// Wall-clock time at which automatic expiry is due.
    pub expires_at: Timestamp,
}

// ============================================================================
// Removal
// ============================================================================

/// Why a notification left the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalReason {
    /// Removed by an explicit `dismiss` call.
    Dismissed,
    /// Removed by its expiry timer.
    Expired,
    /// Removed because the center shut down.
    Shutdown,
}

impl RemovalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalReason::Dismissed => "dismissed",
            RemovalReason::Expired => "expired",
            RemovalReason::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of a single removal from the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub id: NotificationId,
    pub reason: RemovalReason,
}
