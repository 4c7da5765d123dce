//! Application state and interaction logic.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::Rect;

use crate::data::{HealthLevel, HealthSample, ScoreThresholds};
use crate::source::DataSource;
use crate::state::SharedState;
use crate::ui::{trend, Theme};

/// Bound on queued updates applied per poll tick, so a busy stream cannot
/// stall the render loop.
const MAX_UPDATES_PER_TICK: usize = 32;

/// Main application state.
///
/// Owns the data source and the shared history store. There is exactly one
/// view - the trend chart - so navigation is a cursor over samples rather
/// than a view stack.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    /// Hovered sample index (drives the marker and tooltip), if any.
    pub cursor: Option<usize>,

    // Data
    source: Box<dyn DataSource>,
    pub state: SharedState,
    pub thresholds: ScoreThresholds,
    pub load_error: Option<String>,

    // UI
    pub theme: Theme,
    /// Plot geometry recorded by the renderer, for mouse mapping.
    pub plot_area: Option<Rect>,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given source, store, thresholds and theme.
    pub fn new(
        source: Box<dyn DataSource>,
        state: SharedState,
        thresholds: ScoreThresholds,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            cursor: None,
            source,
            state,
            thresholds,
            load_error: None,
            theme,
            plot_area: None,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and apply any queued updates to the store.
    ///
    /// Returns Ok(true) if the history changed, Ok(false) if no new data.
    pub fn reload_data(&mut self) -> Result<bool> {
        let mut updated = false;

        for _ in 0..MAX_UPDATES_PER_TICK {
            match self.source.poll() {
                Some(update) => {
                    self.state.apply(update);
                    updated = true;
                }
                None => break,
            }
        }

        self.load_error = self.source.error();

        if updated {
            // Keep the cursor on a real sample after the history moved
            if let Some(cursor) = self.cursor {
                if self.state.is_empty() {
                    self.cursor = None;
                } else if cursor >= self.state.len() {
                    self.cursor = Some(self.state.len() - 1);
                }
            }
        }

        Ok(updated)
    }

    /// Move the hover cursor one sample toward the oldest.
    ///
    /// Starting a hover without a cursor lands on the latest sample.
    pub fn hover_prev(&mut self) {
        let n = self.state.len();
        if n == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(i) => i.saturating_sub(1),
            None => n - 1,
        });
    }

    /// Move the hover cursor one sample toward the latest.
    pub fn hover_next(&mut self) {
        let n = self.state.len();
        if n == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(i) => (i + 1).min(n - 1),
            None => n - 1,
        });
    }

    /// Jump the hover cursor to the oldest sample.
    pub fn hover_first(&mut self) {
        if !self.state.is_empty() {
            self.cursor = Some(0);
        }
    }

    /// Jump the hover cursor to the latest sample.
    pub fn hover_last(&mut self) {
        let n = self.state.len();
        if n > 0 {
            self.cursor = Some(n - 1);
        }
    }

    /// Clear the hover cursor (dismisses the tooltip).
    pub fn clear_hover(&mut self) {
        self.cursor = None;
    }

    /// Hover the sample nearest to a terminal position, if it is inside the
    /// plot.
    pub fn hover_at(&mut self, column: u16, row: u16) {
        let Some(plot) = self.plot_area else {
            return;
        };
        let n = self.state.len();
        if n == 0 {
            return;
        }
        if column < plot.x
            || column >= plot.x + plot.width
            || row < plot.y
            || row >= plot.y + plot.height
        {
            return;
        }
        self.cursor = Some(trend::column_sample(column - plot.x, n, plot.width));
    }

    /// The hovered sample and its index, if any.
    pub fn hovered_sample(&self) -> Option<(usize, &HealthSample)> {
        let index = self.cursor?;
        self.state.get(index).map(|sample| (index, sample))
    }

    /// The health level of the latest sample, if any.
    pub fn latest_level(&self) -> Option<HealthLevel> {
        self.state
            .latest()
            .map(|s| HealthLevel::from_score(s.score, &self.thresholds))
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current history and its summary to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        if self.state.is_empty() {
            anyhow::bail!("No data to export");
        }

        let summary = self.state.summary();
        let level = summary
            .latest
            .map(|s| HealthLevel::from_score(s, &self.thresholds));

        let export = serde_json::json!({
            "summary": {
                "samples": summary.samples,
                "latest": summary.latest,
                "min": summary.min,
                "max": summary.max,
                "mean": summary.mean,
                "level": level.map(|l| l.label()),
            },
            "history": self.state.iter().collect::<Vec<_>>(),
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HealthUpdate;
    use crate::source::ChannelSource;
    use tokio::sync::watch;

    fn test_app() -> (watch::Sender<Vec<HealthSample>>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::new(
            Box::new(source),
            SharedState::new(24),
            ScoreThresholds::default(),
            Theme::dark(),
        );
        (tx, app)
    }

    #[test]
    fn reload_applies_channel_updates() {
        let (tx, mut app) = test_app();
        tx.send(vec![
            HealthSample::new("08:00", 90.0),
            HealthSample::new("09:00", 85.0),
        ])
        .unwrap();

        assert!(app.reload_data().unwrap());
        assert_eq!(app.state.len(), 2);
        assert_eq!(app.state.latest().unwrap().time, "09:00");

        // No new data on the next tick
        assert!(!app.reload_data().unwrap());
    }

    #[test]
    fn reload_clamps_cursor_to_history() {
        let (tx, mut app) = test_app();
        tx.send(vec![
            HealthSample::new("08:00", 90.0),
            HealthSample::new("09:00", 85.0),
            HealthSample::new("10:00", 80.0),
        ])
        .unwrap();
        let _ = app.reload_data();
        app.cursor = Some(2);

        tx.send(vec![HealthSample::new("11:00", 75.0)]).unwrap();
        let _ = app.reload_data();

        assert_eq!(app.cursor, Some(0));
    }

    #[test]
    fn hover_starts_at_latest() {
        let (_tx, mut app) = test_app();
        app.state.apply(HealthUpdate::Replace(vec![
            HealthSample::new("08:00", 90.0),
            HealthSample::new("09:00", 85.0),
            HealthSample::new("10:00", 80.0),
        ]));

        app.hover_prev();
        assert_eq!(app.cursor, Some(2));
        app.hover_prev();
        assert_eq!(app.cursor, Some(1));
        app.hover_next();
        assert_eq!(app.cursor, Some(2));
        // Saturates at the ends
        app.hover_next();
        assert_eq!(app.cursor, Some(2));

        app.hover_first();
        assert_eq!(app.cursor, Some(0));
        app.clear_hover();
        assert!(app.cursor.is_none());
    }

    #[test]
    fn hover_ignored_on_empty_history() {
        let (_tx, mut app) = test_app();
        app.hover_prev();
        assert!(app.cursor.is_none());
    }

    #[test]
    fn hover_at_maps_columns_to_samples() {
        let (_tx, mut app) = test_app();
        app.state.apply(HealthUpdate::Replace(vec![
            HealthSample::new("08:00", 90.0),
            HealthSample::new("09:00", 85.0),
        ]));
        app.plot_area = Some(Rect::new(5, 1, 20, 8));

        // Left edge hovers the first sample, right edge the last
        app.hover_at(5, 4);
        assert_eq!(app.cursor, Some(0));
        app.hover_at(24, 4);
        assert_eq!(app.cursor, Some(1));

        // Outside the plot the cursor is untouched
        app.hover_at(0, 0);
        assert_eq!(app.cursor, Some(1));
    }

    #[test]
    fn latest_level_uses_thresholds() {
        let (_tx, mut app) = test_app();
        assert!(app.latest_level().is_none());

        app.state
            .apply(HealthUpdate::Append(HealthSample::new("08:00", 55.0)));
        assert_eq!(app.latest_level(), Some(HealthLevel::Critical));
    }

    #[test]
    fn status_message_roundtrip() {
        let (_tx, mut app) = test_app();
        assert!(app.get_status_message().is_none());
        app.set_status_message("Exported".to_string());
        assert_eq!(app.get_status_message(), Some("Exported"));
    }

    #[test]
    fn export_writes_summary_and_history() {
        let (_tx, mut app) = test_app();
        app.state.apply(HealthUpdate::Replace(vec![
            HealthSample::new("08:00", 60.0),
            HealthSample::new("09:00", 80.0),
        ]));

        let file = tempfile::NamedTempFile::new().unwrap();
        app.export_state(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["summary"]["samples"], 2);
        assert_eq!(value["summary"]["mean"], 70.0);
        assert_eq!(value["summary"]["level"], "Healthy");
        assert_eq!(value["history"][0]["time"], "08:00");
    }

    #[test]
    fn export_refuses_empty_history() {
        let (_tx, app) = test_app();
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(app.export_state(file.path()).is_err());
    }
}
