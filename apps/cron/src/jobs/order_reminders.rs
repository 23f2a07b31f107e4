//! Order reminder job.
//!
//! Scans orders placed inside the reminder window and logs one reminder
//! line per order, oldest first.

use chrono::{Duration, Local, Utc};
use std::io;
use tracing::info;

use crate::config::CronConfig;
use crate::joblog::JobLog;
use crm_db::repository::order::OrderContact;

pub const LOG_FILE: &str = "order_reminders_log.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn run(config: &CronConfig) -> io::Result<()> {
    let mut log = JobLog::open(&config.log_dir.join(LOG_FILE))?;
    let ts = Local::now().format(TIMESTAMP_FORMAT).to_string();

    match scan(config).await {
        Ok(contacts) => {
            for contact in &contacts {
                log.append(&format!(
                    "{} Reminder -> Order ID: {}, Customer Email: {}",
                    ts, contact.order_id, contact.customer_email
                ))?;
            }
            info!(count = contacts.len(), "Reminder scan complete");
            println!("Order reminders processed!");
        }
        Err(reason) => {
            log.append(&format!("{} order reminders failed: {}", ts, reason))?;
        }
    }

    Ok(())
}

async fn scan(config: &CronConfig) -> Result<Vec<OrderContact>, String> {
    let service = super::connect_service(config)
        .await
        .map_err(|e| e.to_string())?;

    let cutoff = Utc::now() - Duration::days(config.reminder_window_days);
    service
        .orders_since(cutoff)
        .await
        .map_err(|e| e.to_string())
}
