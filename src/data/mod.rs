//! Data models for the health-history series.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of refresh cadences (e.g., "1s", "500ms")
//! - [`sample`]: Core data model ([`HealthSample`], [`HealthLevel`], [`HistorySummary`])
//!
//! ## Data Flow
//!
//! ```text
//! HealthUpdate (from a DataSource)
//!        │
//!        ▼
//! SharedState::apply()  (ordered history, sliding retention window)
//!        │
//!        └──▶ ui::trend (area chart) / HistorySummary (header, export)
//! ```

pub mod duration;
pub mod sample;

pub use sample::{HealthLevel, HealthSample, HealthUpdate, HistorySummary, ScoreThresholds};
