//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, NotificationSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Upper bound for a notification lifetime (one hour)
pub const MAX_EXPIRY_MS: u64 = 60 * 60 * 1000;

impl NotificationSettings {
    /// Validate notification settings
    ///
    /// # Validation Rules
    /// - Expiry must be greater than 0 and at most one hour
    /// - Demo delays must be non-decreasing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expiry_ms == 0 || self.expiry_ms > MAX_EXPIRY_MS {
            return Err(ConfigError::ValidationError {
                field: "notifications.expiry_ms".to_string(),
                message: format!(
                    "Expiry must be between 1 and {} milliseconds, got {}.",
                    MAX_EXPIRY_MS, self.expiry_ms
                ),
            });
        }

        if let Some(pair) = self.demo_delays_ms.windows(2).find(|w| w[0] > w[1]) {
            return Err(ConfigError::ValidationError {
                field: "notifications.demo_delays_ms".to_string(),
                message: format!(
                    "Demo delays must be non-decreasing, but {} is followed by {}.",
                    pair[0], pair[1]
                ),
            });
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one of console and file output must be enabled
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notifications.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
