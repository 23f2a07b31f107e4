//! Low-stock restock job.
//!
//! Runs the restock pass and logs one line per topped-up product plus the
//! pass summary.

use chrono::Local;
use std::io;
use tracing::info;

use crate::config::CronConfig;
use crate::joblog::JobLog;
use crm_api::RestockReport;

pub const LOG_FILE: &str = "low_stock_updates_log.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn run(config: &CronConfig) -> io::Result<()> {
    let mut log = JobLog::open(&config.log_dir.join(LOG_FILE))?;
    let ts = Local::now().format(TIMESTAMP_FORMAT).to_string();

    match restock(config).await {
        Ok(report) => {
            for product in &report.products {
                log.append(&format!(
                    "{} Restocked {}: stock now {}",
                    ts, product.name, product.stock
                ))?;
            }
            log.append(&format!("{} {}", ts, report.message))?;
            info!(count = report.products.len(), "Low-stock job complete");
        }
        Err(reason) => {
            log.append(&format!("{} low stock update failed: {}", ts, reason))?;
        }
    }

    Ok(())
}

async fn restock(config: &CronConfig) -> Result<RestockReport, String> {
    let service = super::connect_service(config)
        .await
        .map_err(|e| e.to_string())?;
    service
        .update_low_stock_products()
        .await
        .map_err(|e| e.to_string())
}
