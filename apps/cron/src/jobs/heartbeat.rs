//! Heartbeat job.
//!
//! Appends a liveness line every run, then probes the store and logs the
//! outcome. The liveness line lands even when the store is down; that is
//! the point of a heartbeat.

use chrono::Local;
use std::io;
use tracing::info;

use crate::config::CronConfig;
use crate::joblog::JobLog;

pub const LOG_FILE: &str = "crm_heartbeat_log.txt";

// Day-first timestamp, kept for continuity with existing log history
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y-%H:%M:%S";

pub async fn run(config: &CronConfig) -> io::Result<()> {
    let mut log = JobLog::open(&config.log_dir.join(LOG_FILE))?;
    let ts = Local::now().format(TIMESTAMP_FORMAT).to_string();

    log.append(&format!("{} CRM is alive", ts))?;

    match probe_store(config).await {
        Ok(()) => log.append(&format!("{} store check ok", ts))?,
        Err(reason) => log.append(&format!("{} store check failed: {}", ts, reason))?,
    }

    info!("Heartbeat logged");
    Ok(())
}

async fn probe_store(config: &CronConfig) -> Result<(), String> {
    let service = super::connect_service(config)
        .await
        .map_err(|e| e.to_string())?;

    if service.health_check().await {
        Ok(())
    } else {
        Err("store unreachable".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> CronConfig {
        CronConfig {
            database_path: dir.join("crm.db").to_string_lossy().into_owned(),
            log_dir: dir.to_path_buf(),
            reminder_window_days: 7,
        }
    }

    #[tokio::test]
    async fn test_heartbeat_logs_alive_and_store_ok() {
        let dir = tempdir().unwrap();
        run(&config_in(dir.path())).await.unwrap();

        let content = fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" CRM is alive"));
        assert!(lines[1].ends_with(" store check ok"));

        // Day-first timestamp: DD/MM/YYYY-HH:MM:SS
        let ts = lines[0].split(' ').next().unwrap();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[2..3], "/");
        assert_eq!(&ts[10..11], "-");
    }

    #[tokio::test]
    async fn test_heartbeat_survives_unreachable_store() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        // Parent directory does not exist, so the store cannot be opened
        config.database_path = dir
            .path()
            .join("missing")
            .join("crm.db")
            .to_string_lossy()
            .into_owned();

        run(&config).await.unwrap();

        let content = fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].ends_with(" CRM is alive"));
        assert!(lines[1].contains(" store check failed: "));
    }

    #[tokio::test]
    async fn test_heartbeat_appends_across_runs() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        run(&config).await.unwrap();
        run(&config).await.unwrap();

        let content = fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        assert_eq!(content.lines().count(), 4);
    }
}
