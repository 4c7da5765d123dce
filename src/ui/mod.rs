//! Terminal rendering using ratatui.
//!
//! - [`trend`]: the health-trend area chart (the main view)
//! - [`inspect`]: tooltip overlay for the hovered sample
//! - [`common`]: header bar, status bar, help overlay
//! - [`theme`]: light/dark palettes with terminal detection

pub mod common;
pub mod inspect;
pub mod theme;
pub mod trend;

pub use theme::Theme;
