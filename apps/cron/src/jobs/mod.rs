//! The four scheduled jobs.
//!
//! Every job follows the same shape: open its log file, do its work
//! through [`CrmService`], and write either result lines or a single
//! `<operation> failed: <reason>` line. A broken store is a logged
//! outcome, not a crash.

pub mod heartbeat;
pub mod low_stock;
pub mod order_reminders;
pub mod weekly_report;

use crate::config::CronConfig;
use crm_api::CrmService;
use crm_db::{Database, DbConfig, DbError};

/// Connects to the store and wraps it in the service surface.
pub(crate) async fn connect_service(config: &CronConfig) -> Result<CrmService, DbError> {
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    Ok(CrmService::new(db))
}
