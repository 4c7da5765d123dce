//! Synthetic data source for demos and UI work.
//!
//! Generates a deterministic, plausibly fluctuating score series so the
//! chart can be exercised without a gateway. Demo data never leaks into a
//! real session; it only exists behind this source.

use std::time::{Duration, Instant};

use crate::data::{HealthSample, HealthUpdate};

use super::DataSource;

/// Emits a deterministic fluctuating health history.
///
/// The first poll returns a full backlog of `retention` samples; afterwards
/// one new sample is appended per cadence tick.
#[derive(Debug)]
pub struct DemoSource {
    retention: usize,
    cadence: Duration,
    next_index: u64,
    seeded: bool,
    last_emit: Instant,
}

impl DemoSource {
    /// Create a demo source seeding `retention` samples, ticking every 2s.
    pub fn new(retention: usize) -> Self {
        Self::with_cadence(retention, Duration::from_secs(2))
    }

    /// Create a demo source with an explicit tick cadence.
    pub fn with_cadence(retention: usize, cadence: Duration) -> Self {
        Self {
            retention: retention.max(1),
            cadence,
            next_index: 0,
            seeded: false,
            last_emit: Instant::now(),
        }
    }

    /// Deterministic waveform: two blended sines around a healthy baseline,
    /// clamped to [60, 100] like a gateway that degrades but stays up.
    fn sample(index: u64) -> HealthSample {
        let i = index as f64;
        let score = 85.0 + 10.0 * (i * 0.5).sin() + 4.0 * (i * 1.3 + 0.7).sin();
        let score = score.clamp(60.0, 100.0).round();
        let time = format!("{:02}:{:02}", (index / 60) % 24, index % 60);
        HealthSample::new(time, score)
    }
}

impl DataSource for DemoSource {
    fn poll(&mut self) -> Option<HealthUpdate> {
        if !self.seeded {
            self.seeded = true;
            self.last_emit = Instant::now();
            let backlog = (0..self.retention as u64).map(Self::sample).collect();
            self.next_index = self.retention as u64;
            return Some(HealthUpdate::Replace(backlog));
        }

        if self.last_emit.elapsed() >= self.cadence {
            self.last_emit = Instant::now();
            let sample = Self::sample(self.next_index);
            self.next_index += 1;
            return Some(HealthUpdate::Append(sample));
        }

        None
    }

    fn description(&self) -> &str {
        "demo: synthetic health scores"
    }

    fn error(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seeds_full_backlog() {
        let mut source = DemoSource::new(24);

        let Some(HealthUpdate::Replace(backlog)) = source.poll() else {
            panic!("expected the seeded backlog");
        };
        assert_eq!(backlog.len(), 24);
        assert!(backlog.iter().all(|s| (60.0..=100.0).contains(&s.score)));
    }

    #[test]
    fn test_demo_respects_cadence() {
        let mut source = DemoSource::new(4);
        let _ = source.poll();

        // Cadence has not elapsed yet
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_demo_appends_after_cadence() {
        let mut source = DemoSource::with_cadence(4, Duration::ZERO);
        let _ = source.poll();

        let Some(HealthUpdate::Append(first)) = source.poll() else {
            panic!("expected an appended sample");
        };
        let Some(HealthUpdate::Append(second)) = source.poll() else {
            panic!("expected another appended sample");
        };
        // Labels continue where the backlog left off
        assert_eq!(first.time, "00:04");
        assert_eq!(second.time, "00:05");
    }

    #[test]
    fn test_demo_is_deterministic() {
        assert_eq!(DemoSource::sample(7), DemoSource::sample(7));
    }
}
