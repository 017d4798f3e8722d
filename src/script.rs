//! Line-oriented command script driving a notification center.
//!
//! Lets an external caller (a shell pipe, a test harness) invoke the center
//! at arbitrary times:
//!
//! ```text
//! notify success Document Verified | The document has been successfully verified.
//! wait 1000
//! dismiss 1700000000123
//! list
//! quit
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::notifications::{NotificationCenter, NotificationId, NotificationKind};
use crate::view::ConsoleView;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Unknown command '{0}'. Valid commands are: notify, dismiss, list, wait, quit")]
    UnknownCommand(String),

    #[error("Missing argument for '{command}': expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid argument for '{command}': {value}")]
    InvalidArgument { command: &'static str, value: String },

    #[error("Line is not valid UTF-8")]
    InvalidEncoding,
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Notify {
        kind: NotificationKind,
        title: String,
        message: String,
    },
    Dismiss(NotificationId),
    List,
    Wait(Duration),
    Quit,
}

impl FromStr for ScriptCommand {
    type Err = ScriptError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "notify" => parse_notify(rest),
            "dismiss" => {
                if rest.is_empty() {
                    return Err(ScriptError::MissingArgument {
                        command: "dismiss",
                        expected: "<id>",
                    });
                }
                rest.parse()
                    .map(ScriptCommand::Dismiss)
                    .map_err(|_| ScriptError::InvalidArgument {
                        command: "dismiss",
                        value: rest.to_string(),
                    })
            }
            "list" => Ok(ScriptCommand::List),
            "wait" => {
                if rest.is_empty() {
                    return Err(ScriptError::MissingArgument {
                        command: "wait",
                        expected: "<millis>",
                    });
                }
                rest.parse::<u64>()
                    .map(|millis| ScriptCommand::Wait(Duration::from_millis(millis)))
                    .map_err(|_| ScriptError::InvalidArgument {
                        command: "wait",
                        value: rest.to_string(),
                    })
            }
            "quit" | "exit" => Ok(ScriptCommand::Quit),
            _ => Err(ScriptError::UnknownCommand(command.to_string())),
        }
    }
}

/// `notify <kind> <title> | <message>`. A missing `|` leaves the message empty.
fn parse_notify(rest: &str) -> Result<ScriptCommand, ScriptError> {
    let Some((kind, text)) = rest.split_once(char::is_whitespace) else {
        return Err(ScriptError::MissingArgument {
            command: "notify",
            expected: "<kind> <title> | <message>",
        });
    };

    let (title, message) = match text.split_once('|') {
        Some((title, message)) => (title.trim(), message.trim()),
        None => (text.trim(), ""),
    };

    Ok(ScriptCommand::Notify {
        kind: NotificationKind::parse_lossy(kind),
        title: title.to_string(),
        message: message.to_string(),
    })
}

/// Outcome of a finished script session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptSummary {
    pub executed: usize,
    pub rejected: usize,
}

/// Reads commands from `input` and applies them to `center`.
///
/// `notify` echoes the new id and `list` prints the current snapshot to
/// `out`. Malformed lines are reported on `errors` and skipped.
pub struct ScriptRunner {
    center: NotificationCenter,
    view: ConsoleView,
}

impl ScriptRunner {
    pub fn new(center: NotificationCenter, view: ConsoleView) -> Self {
        Self { center, view }
    }

    pub async fn run<R, W, E>(
        &self,
        mut input: R,
        out: &mut W,
        errors: &mut E,
    ) -> std::io::Result<ScriptSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        let mut summary = ScriptSummary::default();
        let mut line_number = 0usize;

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            line_number += 1;

            let parsed = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    trimmed.parse::<ScriptCommand>()
                }
                Err(_) => Err(ScriptError::InvalidEncoding),
            };

            let command = match parsed {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!(line = line_number, error = %e, "Skipping malformed script line");
                    errors
                        .write_all(format!("error (line {}): {}\n", line_number, e).as_bytes())
                        .await?;
                    errors.flush().await?;
                    summary.rejected += 1;
                    continue;
                }
            };

            summary.executed += 1;
            if !self.apply(command, out).await? {
                break;
            }
        }

        out.flush().await?;
        Ok(summary)
    }

    /// Applies one command. Returns false when the session should end.
    async fn apply<W>(&self, command: ScriptCommand, out: &mut W) -> std::io::Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            ScriptCommand::Notify {
                kind,
                title,
                message,
            } => {
                let id = self.center.notify(kind, title, message);
                out.write_all(format!("notified {}\n", id).as_bytes()).await?;
            }
            ScriptCommand::Dismiss(id) => self.center.dismiss(id),
            ScriptCommand::List => {
                let snapshot = self.center.list_active().await;
                out.write_all(self.view.render(&snapshot).as_bytes()).await?;
            }
            ScriptCommand::Wait(duration) => tokio::time::sleep(duration).await,
            ScriptCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}
