//! Check command handler
//!
//! Validates the merged configuration and prints a summary without starting
//! a notification center.

use crate::config::settings::Settings;
use crate::error::AppResult;

pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> AppResult<()> {
        let summary = self.validate_only()?;
        print!("{}", summary);
        Ok(())
    }

    /// Validate the configuration and build the summary text
    pub fn validate_only(&self) -> AppResult<String> {
        self.config.validate()?;
        let logger = self.config.logger.clone().into_logger_config()?;

        let notifications = &self.config.notifications;
        let delays = notifications
            .demo_delays_ms
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let mut summary = String::new();
        summary.push_str("✓ Configuration is valid\n");
        summary.push_str(&format!(
            "✓ Application: {} {}\n",
            self.config.application.name, self.config.application.version
        ));
        summary.push_str(&format!(
            "✓ Notification lifetime: {} ms\n",
            notifications.expiry_ms
        ));
        summary.push_str(&format!("✓ Demo schedule: [{}] ms\n", delays));
        summary.push_str(&format!(
            "✓ Log level: {} (console: {})\n",
            logger.level,
            if logger.console.enabled { "on" } else { "off" }
        ));
        if logger.file.enabled {
            summary.push_str(&format!(
                "✓ Log file: {} ({})\n",
                logger.file.path.display(),
                logger.file.format.as_str()
            ));
        }
        summary.push_str("Check completed successfully\n");

        Ok(summary)
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
