//! docseal-notify
//!
//! Toast-style notification center with automatic expiry, plus the terminal
//! view, command script and CLI around it.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod notifications;
pub mod script;
pub mod view;

pub use notifications::{
    Notification, NotificationCenter, NotificationId, NotificationKind, Removal, RemovalReason,
};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
