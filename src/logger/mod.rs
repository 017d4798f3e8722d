//! Logger Module
//!
//! A logging setup based on `tracing-subscriber` with support for:
//! - Console output on stderr with color control
//! - File output in Full, Compact or JSON format
//!
//! Console logs go to stderr so that stdout stays free for rendered
//! notifications and script replies.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};
use writer::LogFileWriter;

/// Initialize the global logger with the given configuration
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // File layer goes before the console layer so ANSI codes from the console
    // formatter never leak into file output.
    // See: https://github.com/tokio-rs/tracing/issues/1817
    let file_output = if config.file.enabled {
        Some(file_layer(&config.file)?)
    } else {
        None
    };

    let console_output = config.console.enabled.then(|| {
        let use_ansi = config.console.colored && std::io::stderr().is_terminal();
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_output)
        .with(console_output)
        .try_init()
        .map_err(LoggerError::from)?;

    Ok(())
}

fn file_layer<S>(config: &FileConfig) -> Result<Box<dyn Layer<S> + Send + Sync>, LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let writer = LogFileWriter::new(config)?;

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };

    Ok(layer)
}
