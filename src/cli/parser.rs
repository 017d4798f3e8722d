//! CLI argument parsing with clap
//!
//! Defines the command-line interface: global flags, subcommands and their
//! documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::view::ViewFormat;

/// Toast-style notification center with automatic expiry
#[derive(Parser, Debug)]
#[command(name = "docseal-notify")]
#[command(about = "Toast-style notification center with automatic expiry")]
#[command(long_about = "
docseal-notify keeps a list of short-lived notifications (success, warning,
error, info). Each one disappears on its own after a fixed lifetime unless it
is dismissed earlier. Active notifications are rendered to the terminal.

EXAMPLES:
    # Play the three canned document-verification notifications
    docseal-notify demo

    # Same, with a 2 second lifetime and JSON frames
    docseal-notify demo --expiry-ms 2000 --format json

    # Drive the center from a script on stdin
    printf 'notify success Saved | All good\\nlist\\n' | docseal-notify run

    # Validate configuration for production without running anything
    docseal-notify --env production check

    # Use a specific configuration file with verbose logging
    docseal-notify --config ./docseal.toml --verbose run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute (defaults to `demo`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/docseal-notify/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is loaded.
    /// Takes precedence over DOCSEAL_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers log output to error level. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Play the canned demo notifications (default)
    ///
    /// Fires three sample notifications at staggered offsets, renders every
    /// change of the active list, and exits once all of them have expired.
    ///
    /// Examples:
    ///   docseal-notify demo
    ///   docseal-notify demo --expiry-ms 1500
    Demo {
        /// Notification lifetime in milliseconds
        #[arg(long, value_name = "MILLIS", value_parser = super::validation::validate_expiry_ms)]
        expiry_ms: Option<u64>,

        /// Output format of rendered frames
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Log level override for this run
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,
    },

    /// Read commands from stdin
    ///
    /// One command per line:
    ///   notify <kind> <title> | <message>
    ///   dismiss <id>
    ///   list
    ///   wait <millis>
    ///   quit
    /// Blank lines and lines starting with '#' are ignored. Malformed lines
    /// are reported on stderr and skipped.
    Run {
        /// Notification lifetime in milliseconds
        #[arg(long, value_name = "MILLIS", value_parser = super::validation::validate_expiry_ms)]
        expiry_ms: Option<u64>,

        /// Exit at end of input without waiting for active notifications to expire
        #[arg(long)]
        no_drain: bool,

        /// Output format of `list`
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Log level override for this run
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,
    },

    /// Validate configuration and print a summary
    Check,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

/// Rendering format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Cli {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Demo { log_level, .. } | Commands::Run { log_level, .. }) =
            &self.command
            && log_level.is_some()
            && (self.verbose || self.quiet)
        {
            return Err(
                "Cannot combine --log-level with the global --verbose or --quiet flags"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// The subcommand to run, `demo` when none was given
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Demo {
            expiry_ms: None,
            format: OutputFormat::default(),
            log_level: None,
        })
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

impl From<OutputFormat> for ViewFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ViewFormat::Text,
            OutputFormat::Json => ViewFormat::Json,
        }
    }
}
