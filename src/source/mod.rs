//! Data source abstraction for receiving monitoring snapshots.
//!
//! This module provides a trait-based abstraction for receiving endpoint,
//! log and alert data from various sources (files, in-memory channels fed by
//! an HTTP client or a test harness, etc.).

mod channel;
mod file;

pub use channel::ChannelSource;
pub use file::FileSource;

use std::fmt::Debug;

use pingwatch_types::{RawSnapshot, Snapshot};
use tracing::warn;

/// Trait for receiving monitoring data from various sources.
///
/// Implementations provide validated snapshots from different backends:
/// file polling or in-memory channels.
///
/// # Example
///
/// ```
/// use pingwatch::{FileSource, DataSource};
///
/// let mut source = FileSource::new("snapshot.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} endpoints", snapshot.endpoints.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Force the next poll to return data even if nothing changed.
    fn invalidate(&mut self) {}

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    fn error(&self) -> Option<&str>;

    /// Records dropped while validating the last snapshot.
    fn rejected(&self) -> usize {
        0
    }
}

/// Validate a raw snapshot, logging each dropped record.
pub(crate) fn validate(raw: RawSnapshot) -> (Snapshot, usize) {
    let (snapshot, rejections) = Snapshot::from_raw(raw);
    for rejection in &rejections {
        warn!("Dropping malformed record {}", rejection);
    }
    (snapshot, rejections.len())
}
