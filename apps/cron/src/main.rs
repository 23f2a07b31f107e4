//! # CRM Cron Runner
//!
//! One-shot runner for the scheduled CRM jobs. An external scheduler
//! (crontab, systemd timers) owns periodicity; each invocation runs one
//! job and exits.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        crm-cron <job>                                   │
//! │                                                                         │
//! │  crontab ───► dispatch ───► job ───► CrmService ───► SQLite           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    append-only log file (one per job)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Codes
//! - `0` - job ran; service failures were logged, not raised
//! - `1` - configuration error or the log file itself was unwritable
//! - `2` - usage error (missing or unknown job name)
//!
//! ## Example Crontab
//! ```text
//! */5 * * * *  crm-cron heartbeat
//! 0 */12 * * * crm-cron low-stock
//! 0 8 * * 1    crm-cron order-reminders
//! 0 6 * * 1    crm-cron weekly-report
//! ```

mod config;
mod joblog;
mod jobs;

use std::env;
use std::process;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::CronConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let args: Vec<String> = env::args().collect();
    let job = match args.get(1).map(String::as_str) {
        Some("--help") | Some("-h") => {
            print_usage();
            return Ok(());
        }
        Some(name) => name.to_string(),
        None => {
            eprintln!("Missing job name.");
            print_usage();
            process::exit(2);
        }
    };

    let config = CronConfig::load()?;
    info!(job = %job, db = %config.database_path, log_dir = %config.log_dir.display(), "Running job");

    match job.as_str() {
        "heartbeat" => jobs::heartbeat::run(&config).await?,
        "low-stock" => jobs::low_stock::run(&config).await?,
        "order-reminders" => jobs::order_reminders::run(&config).await?,
        "weekly-report" => jobs::weekly_report::run(&config).await?,
        other => {
            eprintln!("Unknown job: {}", other);
            print_usage();
            process::exit(2);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("CRM Cron Runner");
    println!();
    println!("Usage: crm-cron <JOB>");
    println!();
    println!("Jobs:");
    println!("  heartbeat          Append a liveness line and probe the store");
    println!("  low-stock          Restock products under the low-stock threshold");
    println!("  order-reminders    Log reminders for orders in the recent window");
    println!("  weekly-report      Log customer, order, and revenue totals");
    println!();
    println!("Environment:");
    println!("  CRM_DATABASE_PATH         SQLite database file (default: ./crm.db)");
    println!("  CRM_LOG_DIR               Directory for job logs (default: /tmp)");
    println!("  CRM_REMINDER_WINDOW_DAYS  Reminder look-back in days (default: 7)");
}
