//! Wire and data model for the health-history series.
//!
//! These types match the JSON format produced by the gateway's health probe.
//! They serve as the common data format between producers and this viewer.

use serde::{Deserialize, Serialize};

/// One point in the health-history series.
///
/// `time` is an opaque display label stamped by the producer (e.g. "14:05");
/// this crate never parses or reformats it. `score` is expected in [0, 100];
/// out-of-range values are a producer defect and pass through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSample {
    /// Display label for when the sample was taken.
    pub time: String,
    /// Health score in [0, 100].
    pub score: f64,
}

impl HealthSample {
    /// Create a sample from a time label and score.
    pub fn new(time: impl Into<String>, score: f64) -> Self {
        Self {
            time: time.into(),
            score,
        }
    }
}

/// An update pushed by a data source into the shared state.
#[derive(Debug, Clone)]
pub enum HealthUpdate {
    /// Replace the whole history (file snapshots, channel pushes).
    Replace(Vec<HealthSample>),
    /// Append one sample to the end of the history (live streams).
    Append(HealthSample),
}

/// Score cutoffs for classifying a health level.
#[derive(Debug, Clone, Copy)]
pub struct ScoreThresholds {
    /// Scores at or above this are healthy.
    pub healthy_at: f64,
    /// Scores at or above this (but below `healthy_at`) are a warning.
    pub warning_at: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            healthy_at: 80.0,
            warning_at: 60.0,
        }
    }
}

/// Health level derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthLevel {
    Healthy,
    Warning,
    Critical,
}

impl HealthLevel {
    /// Classify a score against the given thresholds.
    pub fn from_score(score: f64, thresholds: &ScoreThresholds) -> Self {
        if score >= thresholds.healthy_at {
            HealthLevel::Healthy
        } else if score >= thresholds.warning_at {
            HealthLevel::Warning
        } else {
            HealthLevel::Critical
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthLevel::Healthy => "OK",
            HealthLevel::Warning => "WARN",
            HealthLevel::Critical => "CRIT",
        }
    }

    /// Returns the full label for display.
    pub fn label(&self) -> &'static str {
        match self {
            HealthLevel::Healthy => "Healthy",
            HealthLevel::Warning => "Warning",
            HealthLevel::Critical => "Critical",
        }
    }
}

/// Aggregate statistics over a history, for the header line and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub samples: usize,
    pub latest: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl HistorySummary {
    /// Compute summary statistics over the samples in order.
    pub fn compute<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a HealthSample>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut latest = None;

        for sample in samples {
            count += 1;
            sum += sample.score;
            min = min.min(sample.score);
            max = max.max(sample.score);
            latest = Some(sample.score);
        }

        if count == 0 {
            return Self {
                samples: 0,
                latest: None,
                min: None,
                max: None,
                mean: None,
            };
        }

        Self {
            samples: count,
            latest,
            min: Some(min),
            max: Some(max),
            mean: Some(sum / count as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sample() {
        let json = r#"{ "time": "14:05", "score": 92.5 }"#;
        let sample: HealthSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.time, "14:05");
        assert_eq!(sample.score, 92.5);
    }

    #[test]
    fn test_deserialize_history() {
        let json = r#"[
            { "time": "08:00", "score": 95 },
            { "time": "09:00", "score": 61.2 }
        ]"#;
        let history: Vec<HealthSample> = serde_json::from_str(json).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].time, "08:00");
        assert_eq!(history[1].score, 61.2);
    }

    #[test]
    fn test_level_classification() {
        let t = ScoreThresholds::default();
        assert_eq!(HealthLevel::from_score(92.0, &t), HealthLevel::Healthy);
        assert_eq!(HealthLevel::from_score(80.0, &t), HealthLevel::Healthy);
        assert_eq!(HealthLevel::from_score(79.9, &t), HealthLevel::Warning);
        assert_eq!(HealthLevel::from_score(60.0, &t), HealthLevel::Warning);
        assert_eq!(HealthLevel::from_score(12.0, &t), HealthLevel::Critical);
    }

    #[test]
    fn test_summary_empty() {
        let summary = HistorySummary::compute([]);
        assert_eq!(summary.samples, 0);
        assert!(summary.latest.is_none());
        assert!(summary.mean.is_none());
    }

    #[test]
    fn test_summary_stats() {
        let samples = vec![
            HealthSample::new("08:00", 60.0),
            HealthSample::new("09:00", 100.0),
            HealthSample::new("10:00", 80.0),
        ];
        let summary = HistorySummary::compute(&samples);
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.latest, Some(80.0));
        assert_eq!(summary.min, Some(60.0));
        assert_eq!(summary.max, Some(100.0));
        assert_eq!(summary.mean, Some(80.0));
    }
}
