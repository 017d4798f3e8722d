//! Configuration settings structures for docseal-notify
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::notifications::demo::DEMO_DELAYS_MS;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "docseal-notify".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_expiry_ms() -> u64 {
    5000
}

fn default_demo_delays_ms() -> Vec<u64> {
    DEMO_DELAYS_MS.to_vec()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/docseal-notify.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Notification Settings
// ============================================================================

/// Notification center settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Lifetime of a notification in milliseconds
    #[serde(default = "default_expiry_ms")]
    pub expiry_ms: u64,

    /// Offsets of the demo notifications from the start of the demo
    #[serde(default = "default_demo_delays_ms")]
    pub demo_delays_ms: Vec<u64>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            expiry_ms: default_expiry_ms(),
            demo_delays_ms: default_demo_delays_ms(),
        }
    }
}

impl NotificationSettings {
    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.expiry_ms)
    }

    pub fn demo_delays(&self) -> Vec<Duration> {
        self.demo_delays_ms
            .iter()
            .copied()
            .map(Duration::from_millis)
            .collect()
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Notification center settings
    #[serde(default)]
    pub notifications: NotificationSettings,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================================================
    // Arbitrary implementations for property-based testing
    // ========================================================================

    fn arb_application_config() -> impl Strategy<Value = ApplicationConfig> {
        ("[a-z][a-z0-9-]{0,20}", "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}")
            .prop_map(|(name, version)| ApplicationConfig { name, version })
    }

    fn arb_notification_settings() -> impl Strategy<Value = NotificationSettings> {
        (1u64..=3_600_000u64, prop::collection::vec(0u64..60_000u64, 0..5)).prop_map(
            |(expiry_ms, mut demo_delays_ms)| {
                demo_delays_ms.sort_unstable();
                NotificationSettings {
                    expiry_ms,
                    demo_delays_ms,
                }
            },
        )
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![
                Just("trace".to_string()),
                Just("debug".to_string()),
                Just("info".to_string()),
                Just("warn".to_string()),
                Just("error".to_string()),
            ],
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            "[a-z]{1,10}/[a-z]{1,10}\\.log",
            any::<bool>(),
            prop_oneof![
                Just("full".to_string()),
                Just("compact".to_string()),
                Just("json".to_string()),
            ],
        )
            .prop_map(
                |(level, console_enabled, colored, file_enabled, path, append, format)| {
                    LoggerSettings {
                        level,
                        console: ConsoleSettings {
                            enabled: console_enabled,
                            colored,
                        },
                        file: FileSettings {
                            enabled: file_enabled,
                            path,
                            append,
                            format,
                        },
                    }
                },
            )
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_application_config(),
            arb_notification_settings(),
            arb_logger_settings(),
        )
            .prop_map(|(application, notifications, logger)| Settings {
                application,
                notifications,
                logger,
            })
    }

    // ========================================================================
    // Property-based tests
    // ========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Serializing any Settings to TOML and back yields the same value.
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");

            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");

            prop_assert_eq!(settings, deserialized);
        }
    }

    // ========================================================================
    // Unit tests
    // ========================================================================

    #[test]
    fn test_application_config_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.name, "docseal-notify");
        assert_eq!(config.version, crate::pkg_version());
    }

    #[test]
    fn test_notification_settings_defaults() {
        let settings = NotificationSettings::default();
        assert_eq!(settings.expiry_ms, 5000);
        assert_eq!(settings.expiry(), Duration::from_millis(5000));
        assert_eq!(
            settings.demo_delays(),
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(3000),
                Duration::from_millis(5000),
            ]
        );
    }

    #[test]
    fn test_logger_settings_defaults() {
        let settings = LoggerSettings::default();
        assert_eq!(settings.level, "info");
        assert!(settings.console.enabled);
        assert!(settings.console.colored);
        assert!(!settings.file.enabled);
        assert_eq!(settings.file.format, "json");
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings = toml::from_str(
            r#"
[notifications]
expiry_ms = 3000
"#,
        )
        .unwrap();

        assert_eq!(settings.notifications.expiry_ms, 3000);
        assert_eq!(settings.notifications.demo_delays_ms, vec![1000, 3000, 5000]);
        assert_eq!(settings.application.name, "docseal-notify");
        assert_eq!(settings.logger, LoggerSettings::default());
    }

    #[test]
    fn test_settings_deserialize_empty() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings {
                enabled: true,
                path: "logs/test.log".to_string(),
                append: false,
                format: "compact".to_string(),
            },
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert!(config.file.enabled);
        assert_eq!(config.file.path, PathBuf::from("logs/test.log"));
        assert!(!config.file.append);
        assert_eq!(config.file.format, LogFormat::Compact);
    }

    #[test]
    fn test_file_settings_invalid_format() {
        let settings = FileSettings {
            format: "yaml".to_string(),
            ..FileSettings::default()
        };
        match settings.into_file_config() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "logger.file.format");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_logger_settings_into_logger_config_both_disabled() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            ..LoggerSettings::default()
        };
        match settings.into_logger_config() {
            Err(ConfigError::ValidationError { field, message }) => {
                assert_eq!(field, "logger");
                assert!(message.contains("At least one output"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
