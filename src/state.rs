//! Shared UI state: the health-history store.
//!
//! [`SharedState`] is the single in-memory store the chart reads from. It is
//! owned by the [`App`](crate::app::App) and handed to renderers as a
//! read-only snapshot, so the chart stays a pure function of the store.
//! Sources never touch it directly; their updates flow through
//! [`SharedState::apply`].

use std::collections::VecDeque;
use std::time::Instant;

use crate::data::{HealthSample, HealthUpdate, HistorySummary};

/// Default number of samples retained in the sliding window.
pub const DEFAULT_RETENTION: usize = 24;

/// Ordered, capped store for the health-history series.
///
/// Samples are kept chronological, oldest first, most-recent-last. The
/// retention window slides: appending beyond the cap evicts from the front,
/// and a wholesale replace is truncated from the front to the cap.
#[derive(Debug, Clone)]
pub struct SharedState {
    history: VecDeque<HealthSample>,
    retention: usize,
    last_updated: Option<Instant>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl SharedState {
    /// Create an empty store retaining at most `retention` samples.
    pub fn new(retention: usize) -> Self {
        Self {
            history: VecDeque::new(),
            retention: retention.max(1),
            last_updated: None,
        }
    }

    /// Apply an update from a data source.
    pub fn apply(&mut self, update: HealthUpdate) {
        match update {
            HealthUpdate::Append(sample) => {
                self.history.push_back(sample);
            }
            HealthUpdate::Replace(samples) => {
                self.history = samples.into();
            }
        }
        while self.history.len() > self.retention {
            self.history.pop_front();
        }
        self.last_updated = Some(Instant::now());
    }

    /// Iterate the samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &HealthSample> {
        self.history.iter()
    }

    /// Get the sample at `index` (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&HealthSample> {
        self.history.get(index)
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<&HealthSample> {
        self.history.back()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The retention cap this store was created with.
    pub fn retention(&self) -> usize {
        self.retention
    }

    /// When the store last accepted an update, if ever.
    pub fn last_updated(&self) -> Option<Instant> {
        self.last_updated
    }

    /// Aggregate statistics over the current history.
    pub fn summary(&self) -> HistorySummary {
        HistorySummary::compute(self.history.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: &str, score: f64) -> HealthSample {
        HealthSample::new(time, score)
    }

    #[test]
    fn new_store_is_empty() {
        let state = SharedState::new(24);
        assert!(state.is_empty());
        assert!(state.latest().is_none());
        assert!(state.last_updated().is_none());
    }

    #[test]
    fn append_preserves_order() {
        let mut state = SharedState::new(24);
        state.apply(HealthUpdate::Append(sample("08:00", 90.0)));
        state.apply(HealthUpdate::Append(sample("09:00", 85.0)));
        state.apply(HealthUpdate::Append(sample("10:00", 88.0)));

        let times: Vec<&str> = state.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["08:00", "09:00", "10:00"]);
        assert_eq!(state.latest().unwrap().score, 88.0);
    }

    #[test]
    fn append_evicts_oldest_beyond_retention() {
        let mut state = SharedState::new(3);
        for i in 0..5 {
            state.apply(HealthUpdate::Append(sample(&format!("{:02}:00", i), i as f64)));
        }

        assert_eq!(state.len(), 3);
        // Oldest two evicted, most recent kept in order
        let times: Vec<&str> = state.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["02:00", "03:00", "04:00"]);
    }

    #[test]
    fn replace_truncates_from_front() {
        let mut state = SharedState::new(2);
        state.apply(HealthUpdate::Replace(vec![
            sample("08:00", 70.0),
            sample("09:00", 75.0),
            sample("10:00", 80.0),
        ]));

        assert_eq!(state.len(), 2);
        assert_eq!(state.get(0).unwrap().time, "09:00");
        assert_eq!(state.latest().unwrap().time, "10:00");
    }

    #[test]
    fn replace_overwrites_previous_history() {
        let mut state = SharedState::new(10);
        state.apply(HealthUpdate::Append(sample("07:00", 50.0)));
        state.apply(HealthUpdate::Replace(vec![sample("08:00", 90.0)]));

        assert_eq!(state.len(), 1);
        assert_eq!(state.latest().unwrap().time, "08:00");
    }

    #[test]
    fn apply_stamps_last_updated() {
        let mut state = SharedState::new(4);
        state.apply(HealthUpdate::Append(sample("08:00", 90.0)));
        assert!(state.last_updated().is_some());
    }

    #[test]
    fn summary_reflects_history() {
        let mut state = SharedState::new(4);
        state.apply(HealthUpdate::Append(sample("08:00", 60.0)));
        state.apply(HealthUpdate::Append(sample("09:00", 80.0)));

        let summary = state.summary();
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.latest, Some(80.0));
        assert_eq!(summary.mean, Some(70.0));
    }

    #[test]
    fn retention_floor_is_one() {
        let state = SharedState::new(0);
        assert_eq!(state.retention(), 1);
    }
}
