//! Command executor for dispatching CLI commands
//!
//! Entry point for running a parsed command once configuration is loaded.

use super::handlers::{CheckCommandHandler, DemoCommandHandler, RunCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// No subcommand runs the demo.
///
/// # Errors
/// Returns errors from command handlers or argument validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    match cli.command_or_default() {
        Commands::Demo { format, .. } => {
            DemoCommandHandler::new(settings)
                .execute(format.into())
                .await?;
        }
        Commands::Run {
            format, no_drain, ..
        } => {
            let summary = RunCommandHandler::new(settings)
                .execute(format.into(), no_drain)
                .await?;
            if summary.rejected > 0 {
                tracing::warn!(rejected = summary.rejected, "Some script lines were skipped");
            }
        }
        Commands::Check => CheckCommandHandler::new(settings).execute().await?,
    }

    Ok(())
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::LogLevel;

    #[tokio::test]
    async fn test_execute_check() {
        let cli = Cli {
            command: Some(Commands::Check),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        assert!(execute_command(&cli, Settings::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_conflicting_args() {
        let cli = Cli {
            command: Some(Commands::Run {
                expiry_ms: None,
                no_drain: true,
                format: Default::default(),
                log_level: Some(LogLevel::Debug),
            }),
            config: None,
            env: None,
            verbose: true,
            quiet: false,
        };

        match execute_command(&cli, Settings::default()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
