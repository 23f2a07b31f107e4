//! Append-only job log files.
//!
//! Job log files are a functional output of the jobs, not diagnostics:
//! operators watch them, and their line formats are stable. Diagnostic
//! tracing goes to stderr separately.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// An open append-only log file.
pub struct JobLog {
    file: File,
}

impl JobLog {
    /// Opens `path` for appending, creating the file (and its parent
    /// directory) if missing. Existing content is never truncated.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(JobLog { file })
    }

    /// Appends one line, adding the trailing newline.
    pub fn append(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_accumulates_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.txt");

        let mut log = JobLog::open(&path).unwrap();
        log.append("first").unwrap();
        log.append("second").unwrap();
        drop(log);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_reopen_appends_instead_of_truncating() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.txt");

        JobLog::open(&path).unwrap().append("run one").unwrap();
        JobLog::open(&path).unwrap().append("run two").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "run one\nrun two\n");
    }

    #[test]
    fn test_open_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deeper").join("job.txt");

        JobLog::open(&path).unwrap().append("line").unwrap();
        assert!(path.exists());
    }
}
