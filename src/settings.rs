//! Runtime settings loaded from an optional config file and environment.
//!
//! Layering, lowest to highest precedence: built-in defaults, the settings
//! file (if given), `GATEWATCH_*` environment variables, CLI flags (applied
//! by `main`).

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::ScoreThresholds;
use crate::state::DEFAULT_RETENTION;

/// Tunable settings for a gatewatch session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Samples kept in the sliding history window.
    pub retention: usize,
    /// Poll cadence for the data source (e.g. "1s", "500ms").
    pub refresh: String,
    /// Scores at or above this are healthy.
    pub healthy_at: f64,
    /// Scores at or above this are a warning rather than critical.
    pub warning_at: f64,
    /// Force "dark" or "light" instead of detecting the terminal background.
    pub theme: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            retention: DEFAULT_RETENTION,
            refresh: "1s".to_string(),
            healthy_at: 80.0,
            warning_at: 60.0,
            theme: None,
        }
    }
}

impl Settings {
    /// Load settings, layering `path` (if given) and `GATEWATCH_*` variables
    /// over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("GATEWATCH"))
            .build()
            .context("failed to read settings")?;

        config.try_deserialize().context("invalid settings")
    }

    /// The score thresholds these settings describe.
    pub fn thresholds(&self) -> ScoreThresholds {
        ScoreThresholds {
            healthy_at: self.healthy_at,
            warning_at: self.warning_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.retention, DEFAULT_RETENTION);
        assert_eq!(settings.refresh, "1s");
        assert_eq!(settings.thresholds().healthy_at, 80.0);
        assert!(settings.theme.is_none());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.retention, DEFAULT_RETENTION);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "retention = 48\nrefresh = \"500ms\"\nwarning_at = 50.0\ntheme = \"dark\""
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.retention, 48);
        assert_eq!(settings.refresh, "500ms");
        assert_eq!(settings.warning_at, 50.0);
        // Unset keys keep their defaults
        assert_eq!(settings.healthy_at, 80.0);
        assert_eq!(settings.theme.as_deref(), Some("dark"));
    }
}
