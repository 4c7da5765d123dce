//! Channel-based data source.
//!
//! Receives history snapshots via a tokio watch channel. This is the
//! embedding mode: a host process that already tracks gateway health can
//! push its history into the TUI without files or sockets.

use tokio::sync::watch;

use crate::data::{HealthSample, HealthUpdate};

use super::DataSource;

/// A data source that receives history snapshots via a channel.
///
/// The producer sends the whole history through the watch channel whenever
/// it changes, and this source hands the latest snapshot to the store.
///
/// # Example
///
/// ```
/// use gatewatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("embedded");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Vec<HealthSample>>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source from the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<Vec<HealthSample>>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for pushing history snapshots to a source.
    ///
    /// Returns (sender, source) where the sender pushes snapshots and the
    /// source plugs into the TUI.
    pub fn create(source_description: &str) -> (watch::Sender<Vec<HealthSample>>, Self) {
        let (tx, rx) = watch::channel(Vec::new());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<HealthUpdate> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            let history = self.receiver.borrow_and_update().clone();
            Some(HealthUpdate::Replace(history))
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        // Connection errors belong to the producer side of the channel
        None
    }
}
