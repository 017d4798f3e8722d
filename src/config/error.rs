//! Errors raised while loading and validating `Settings`

use thiserror::Error;

use super::environment::Environment;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `default.toml` in an explicit `DOCSEAL_CONFIG_DIR`, or the file named
    /// by `--config` / `DOCSEAL_CONFIG_FILE`, does not exist
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Merged sources did not deserialize into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A setting is out of range, e.g. `notifications.expiry_ms`
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted path of the offending key
        field: String,
        message: String,
    },

    /// `DOCSEAL_APP_ENV` (or `--env`) names no known environment
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `DOCSEAL_CONFIG_DIR` and `DOCSEAL_CONFIG_FILE` were both set
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        ConfigError::ParseError(message.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// Rejects an environment name, listing the accepted ones.
    pub fn unknown_environment(value: &str) -> Self {
        ConfigError::EnvVarError(format!(
            "Invalid environment '{}' in {}. Valid values are: development, test, staging, production",
            value,
            Environment::ENV_VAR
        ))
    }
}
