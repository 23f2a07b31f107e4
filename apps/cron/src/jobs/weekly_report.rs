//! Weekly report job.
//!
//! Logs one summary line with the customer count, order count, and total
//! revenue. Revenue renders as exact decimal cents, so the log never
//! shows float drift.

use chrono::Local;
use std::io;
use tracing::info;

use crate::config::CronConfig;
use crate::joblog::JobLog;
use crm_core::Money;

pub const LOG_FILE: &str = "crm_report_log.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn run(config: &CronConfig) -> io::Result<()> {
    let mut log = JobLog::open(&config.log_dir.join(LOG_FILE))?;
    let ts = Local::now().format(TIMESTAMP_FORMAT).to_string();

    let line = match totals(config).await {
        Ok((customers, orders, revenue)) => {
            info!(customers, orders, %revenue, "Report generated");
            format!(
                "{} - Report: {} customers, {} orders, {} revenue",
                ts, customers, orders, revenue
            )
        }
        Err(reason) => format!("{} - Report generation failed: {}", ts, reason),
    };

    log.append(&line)
}

async fn totals(config: &CronConfig) -> Result<(i64, i64, Money), String> {
    let service = super::connect_service(config)
        .await
        .map_err(|e| e.to_string())?;

    let customers = service.total_customers().await.map_err(|e| e.to_string())?;
    let orders = service.total_orders().await.map_err(|e| e.to_string())?;
    let revenue = service.total_revenue().await.map_err(|e| e.to_string())?;

    Ok((customers, orders, revenue))
}
