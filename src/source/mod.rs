//! Data source abstraction for feeding the health-history store.
//!
//! This module provides a trait-based abstraction for receiving health
//! samples from various backends - file polling, network streams, in-memory
//! channels, or a synthetic demo generator.

mod channel;
mod demo;
mod file;
mod stream;

pub use channel::ChannelSource;
pub use demo::DemoSource;
pub use file::FileSource;
pub use stream::StreamSource;

use std::fmt::Debug;

use crate::data::HealthUpdate;

/// Trait for receiving health updates from various sources.
///
/// Implementations provide updates for the shared history store from
/// different backends. File-shaped sources emit whole-history replacements;
/// stream-shaped sources emit per-sample appends.
///
/// # Example
///
/// ```
/// use gatewatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("health.json");
/// if let Some(update) = source.poll() {
///     // hand the update to SharedState::apply
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the next update.
    ///
    /// Returns `Some(update)` if new data is available, `None` otherwise.
    /// This method must be non-blocking; it is called from the render loop.
    fn poll(&mut self) -> Option<HealthUpdate>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// The error encountered during the most recent poll, if any.
    fn error(&self) -> Option<String>;
}
