//! Run Recorder
//!
//! Single-slot store for the latest run. Recording replaces the previous
//! record; there is no history.

use chrono::{DateTime, Utc};

use super::record::RunRecord;
use crate::logic::model::DerivedMetrics;
use crate::logic::scenario::ScenarioInput;

// ============================================================================
// CLOCK
// ============================================================================

/// Source of "now" for run timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant (tests, reproducible exports)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Fixed clock from a unix timestamp in milliseconds
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// RECORDER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RunRecorder {
    latest: Option<RunRecord>,
}

impl RunRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a run into a record, replacing whatever was there
    pub fn record(&mut self, input: ScenarioInput, metrics: DerivedMetrics, clock: &dyn Clock) -> &RunRecord {
        let record = RunRecord::new(clock.now(), input, metrics);
        log::info!(
            "Recorded run {} at {} ({} min {} outage)",
            record.run_id(),
            record.timestamp_iso(),
            record.input().duration_min(),
            record.input().severity()
        );

        if let Some(previous) = self.latest.take() {
            log::debug!("Discarded previous run {}", previous.run_id());
        }
        self.latest.insert(record)
    }

    pub fn latest(&self) -> Option<&RunRecord> {
        self.latest.as_ref()
    }

    /// Forget the latest run (form reset)
    pub fn clear(&mut self) {
        self.latest = None;
    }
}
