//! Cron runner configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Cron runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronConfig {
    /// SQLite database file path
    pub database_path: String,

    /// Directory job log files are appended under
    pub log_dir: PathBuf,

    /// Look-back window for order reminders, in days
    pub reminder_window_days: i64,
}

impl CronConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = CronConfig {
            database_path: env::var("CRM_DATABASE_PATH")
                .unwrap_or_else(|_| "./crm.db".to_string()),

            log_dir: env::var("CRM_LOG_DIR")
                .unwrap_or_else(|_| "/tmp".to_string())
                .into(),

            reminder_window_days: env::var("CRM_REMINDER_WINDOW_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CRM_REMINDER_WINDOW_DAYS".to_string()))?,
        };

        if config.reminder_window_days < 0 {
            return Err(ConfigError::InvalidValue(
                "CRM_REMINDER_WINDOW_DAYS".to_string(),
            ));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
