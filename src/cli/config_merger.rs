//! Configuration merger for CLI arguments and config files
//!
//! Applies command-line overrides on top of file and environment
//! configuration, implementing the precedence rules.

use std::path::Path;

use super::parser::{Cli, Commands, Environment};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Merges CLI argument overrides into loaded settings
///
/// CLI arguments override configuration file values.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration the CLI points at
    ///
    /// With `config_path` only that file is read. Otherwise the layered
    /// loader runs, using `env` instead of `DOCSEAL_APP_ENV` when given.
    ///
    /// # Errors
    /// Returns ConfigError if loading or validation fails
    pub fn from_cli_sources(
        config_path: Option<&Path>,
        env: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(env) = env {
            loader = loader.with_environment(env.into());
        }
        if let Some(path) = config_path {
            loader = loader.with_config_file(path);
        }

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Precedence, highest first:
    /// 1. Subcommand flags (`--expiry-ms`, `--log-level`)
    /// 2. Global flags (`--verbose`, `--quiet`)
    /// 3. Loaded configuration
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            self.apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Demo {
                expiry_ms,
                log_level,
                ..
            }
            | Commands::Run {
                expiry_ms,
                log_level,
                ..
            } => {
                if let Some(millis) = expiry_ms {
                    config.notifications.expiry_ms = *millis;
                }
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Check => {}
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
