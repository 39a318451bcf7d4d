//! JSONL (JSON Lines) storage for reporter events
//!
//! Runners append one event per line; the reporter binary reads the file back
//! and replays it.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use super::ReporterEvent;

/// Append-only event log
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Open (without creating) the event log at `path`
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append an event to the log
    ///
    /// # Errors
    /// Returns an error if:
    /// - The parent directory or the log file cannot be created
    /// - The event cannot be serialized to JSON
    /// - Writing to the file fails
    pub fn append(&self, event: &ReporterEvent) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open event log: {}", self.path.display()))?;

        let json = serde_json::to_string(event).context("Failed to serialize event to JSON")?;
        writeln!(file, "{json}").context("Failed to write to event log")?;

        Ok(())
    }

    /// Read every event, in order
    ///
    /// A missing file yields no events.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or any line is not a valid event
    pub fn read_all(&self) -> Result<Vec<ReporterEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read event log: {}", self.path.display()))?;
        Self::parse(&content)
    }

    /// Parse JSONL content, skipping blank lines
    pub fn parse(content: &str) -> Result<Vec<ReporterEvent>> {
        let mut events = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event: ReporterEvent = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as an event", line_num + 1))?;
            events.push(event);
        }
        Ok(events)
    }

    /// Path of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
