//! Channel-based data source.
//!
//! Receives snapshots via a tokio watch channel. Useful when an HTTP client
//! or a test harness pushes fresh data rather than writing a file.

use tokio::sync::watch;

use pingwatch_types::Snapshot;

use super::DataSource;

/// A data source that receives already-validated snapshots via a channel.
///
/// # Example
///
/// ```
/// use pingwatch::{ChannelSource, DataSource};
/// use pingwatch_types::Snapshot;
///
/// # tokio_test::block_on(async {
/// let (tx, mut source) = ChannelSource::create("https://monitor.example.com");
///
/// // A fetch task pushes each validated snapshot
/// tokio::spawn(async move {
///     tx.send(Snapshot::default()).ok();
/// });
///
/// assert!(source.poll().is_some());
/// # });
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Snapshot>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where snapshots come from, shown in the status bar
    pub fn new(receiver: watch::Receiver<Snapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            initial_returned: false,
        }
    }

    /// Create a channel pair. The sender pushes snapshots into the returned source.
    pub fn create(source_description: &str) -> (watch::Sender<Snapshot>, Self) {
        let (tx, rx) = watch::channel(Snapshot::default());
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Snapshot> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn invalidate(&mut self) {
        self.receiver.mark_changed();
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
