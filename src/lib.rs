//! # gatewatch
//!
//! A diagnostic TUI and library for watching a gateway's health-score trend.
//!
//! The gateway (or any producer) reports health as a time series of
//! `{time, score}` samples; this crate keeps the most recent window of them
//! in a shared store and renders it as a filled area chart with a fixed
//! [0, 100] score axis, a hover cursor and a tooltip.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         Application                           │
//! │  ┌─────────┐    ┌────────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   state    │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (input) │    │ (history)  │    │ (chart) │    │         │ │
//! │  └────┬────┘    └────────────┘    └─────────┘    └─────────┘ │
//! │       │                                                       │
//! │       ▼                                                       │
//! │  ┌─────────┐                                                  │
//! │  │ source  │◀── FileSource | StreamSource | ChannelSource    │
//! │  │ (feed)  │    | DemoSource                                 │
//! │  └─────────┘                                                  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, hover cursor and user interaction logic
//! - **[`state`]**: The shared history store ([`SharedState`]) with its
//!   sliding retention window
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with
//!   file polling, JSON-lines streams, in-process channels and a demo feed
//! - **[`data`]**: The sample model, level classification and summaries
//! - **[`ui`]**: Terminal rendering using ratatui - the trend chart, the
//!   inspect tooltip, chrome and themes
//! - **[`settings`]**: Optional TOML/environment configuration
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a JSON file written by the gateway's health probe
//! gatewatch --file health.json
//!
//! # Follow a live stream of samples over TCP
//! gatewatch --connect localhost:9090
//!
//! # No gateway handy
//! gatewatch --demo
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use gatewatch::ui::Theme;
//! use gatewatch::{App, FileSource, ScoreThresholds, SharedState};
//!
//! let source = Box::new(FileSource::new("health.json"));
//! let app = App::new(
//!     source,
//!     SharedState::new(24),
//!     ScoreThresholds::default(),
//!     Theme::dark(),
//! );
//! ```
//!
//! ### Embedding with a channel source
//!
//! ```
//! use gatewatch::ui::Theme;
//! use gatewatch::{App, ChannelSource, HealthSample, ScoreThresholds, SharedState};
//!
//! let (tx, source) = ChannelSource::create("embedded");
//! tx.send(vec![HealthSample::new("08:00", 92.0)]).unwrap();
//!
//! let mut app = App::new(
//!     Box::new(source),
//!     SharedState::default(),
//!     ScoreThresholds::default(),
//!     Theme::dark(),
//! );
//! app.reload_data().unwrap();
//! assert_eq!(app.state.len(), 1);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod state;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{HealthLevel, HealthSample, HealthUpdate, HistorySummary, ScoreThresholds};
pub use settings::Settings;
pub use source::{ChannelSource, DataSource, DemoSource, FileSource, StreamSource};
pub use state::{SharedState, DEFAULT_RETENTION};
