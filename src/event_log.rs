use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single audit line: `[<timestamp>] Hook: <hook> Event: <message>`
#[derive(Debug)]
pub struct LogEntry<'a> {
    pub timestamp: DateTime<Utc>,
    pub hook_type: &'a str,
    pub message: &'a str,
}

impl<'a> LogEntry<'a> {
    pub fn now(hook_type: &'a str, message: &'a str) -> Self {
        LogEntry {
            timestamp: Utc::now(),
            hook_type,
            message,
        }
    }
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Hook: {} Event: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.hook_type,
            self.message
        )
    }
}

/// Append an entry to the log file, creating parent directories as needed.
pub fn append(log_path: &Path, entry: &LogEntry) -> Result<()> {
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    // One write per line so concurrent appends don't split it
    let line = format!("{}\n", entry);
    file.write_all(line.as_bytes())
        .with_context(|| format!("failed to write log entry to {}", log_path.display()))?;

    Ok(())
}
