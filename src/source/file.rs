//! File-based data source.
//!
//! Polls a JSON file for monitoring snapshots.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use pingwatch_types::{RawSnapshot, Snapshot};
use tracing::{debug, warn};

use super::{validate, DataSource};

/// A data source that reads monitoring snapshots from a JSON file.
///
/// The file is expected to hold `endpoints`, `logs`, `alerts` and optionally
/// `stats`, as exported from the monitoring backend.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    rejected: usize,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            rejected: 0,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read, parse and validate the file.
    fn read_file(&mut self) -> Option<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        match serde_json::from_str::<RawSnapshot>(&content) {
            Ok(raw) => {
                let (snapshot, rejected) = validate(raw);
                debug!(
                    endpoints = snapshot.endpoints.len(),
                    logs = snapshot.logs.len(),
                    alerts = snapshot.alerts.len(),
                    rejected,
                    "Loaded snapshot from {}",
                    self.path.display()
                );
                self.rejected = rejected;
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", self.path.display(), e);
                self.last_error = Some(format!("Parse error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Snapshot> {
        let current_modified = self.get_modified_time();

        // Check if file has been modified since last read
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, don't update
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(snapshot) = self.read_file() {
                self.last_modified = current_modified;
                return Some(snapshot);
            }
        }

        None
    }

    fn invalidate(&mut self) {
        self.last_modified = None;
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn rejected(&self) -> usize {
        self.rejected
    }
}
