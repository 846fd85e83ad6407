//! Run Narration
//!
//! Six timeline messages describing a run, produced lazily. Pacing belongs to
//! whoever consumes the iterator; calling `iter()` again restarts from the top.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::{format_usd, to_fixed};
use crate::logic::run::RunRecord;

/// Timeline stage a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationStep {
    Trigger,
    BlastRadius,
    Degradation,
    Failover,
    Recovery,
    Impact,
}

impl NarrationStep {
    pub const ALL: [NarrationStep; 6] = [
        NarrationStep::Trigger,
        NarrationStep::BlastRadius,
        NarrationStep::Degradation,
        NarrationStep::Failover,
        NarrationStep::Recovery,
        NarrationStep::Impact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrationStep::Trigger => "trigger",
            NarrationStep::BlastRadius => "blast_radius",
            NarrationStep::Degradation => "degradation",
            NarrationStep::Failover => "failover",
            NarrationStep::Recovery => "recovery",
            NarrationStep::Impact => "impact",
        }
    }
}

/// Narration over one recorded run
#[derive(Debug, Clone, Copy)]
pub struct Narration<'a> {
    record: &'a RunRecord,
}

impl<'a> Narration<'a> {
    pub fn new(record: &'a RunRecord) -> Self {
        Self { record }
    }

    /// Fresh iterator from the first step
    pub fn iter(&self) -> NarrationIter<'a> {
        NarrationIter { narration: *self, next: 0 }
    }

    /// Message for one step
    pub fn message(&self, step: NarrationStep) -> String {
        let input = self.record.input();
        let m = self.record.metrics();

        match step {
            NarrationStep::Trigger => format!(
                "Trigger: {} in {} (severity={}).",
                input.preset_id().label(),
                input.region(),
                input.severity()
            ),
            NarrationStep::BlastRadius => format!(
                "Blast radius {}% (deps={}, AZ={}, DR={}).",
                to_fixed(m.blast_radius * 100.0, 1),
                input.dependency_count(),
                input.az_count(),
                input.dr_mode()
            ),
            NarrationStep::Degradation => format!(
                "Degradation for {} min; detect={}m.",
                input.duration_min(),
                m.detect_min
            ),
            NarrationStep::Failover => format!(
                "Failover in ~{} min (readiness {}%).",
                m.failover_min,
                (m.failover_readiness * 100.0) as u32
            ),
            NarrationStep::Recovery => format!(
                "Recovery ~{} min. RTO={}m, RPO={}m.",
                m.recover_min, m.rto_min, m.rpo_min
            ),
            NarrationStep::Impact => format!(
                "Budget burn {}%; backlog {} req; rev loss {}; TCO {}.",
                to_fixed(m.burn_pct, 1),
                m.backlog_requests,
                format_usd(m.revenue_loss),
                format_usd(m.total_cost)
            ),
        }
    }

    /// All messages, eagerly
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(|(_, line)| line).collect()
    }
}

impl<'a> IntoIterator for &Narration<'a> {
    type Item = (NarrationStep, String);
    type IntoIter = NarrationIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct NarrationIter<'a> {
    narration: Narration<'a>,
    next: usize,
}

impl Iterator for NarrationIter<'_> {
    type Item = (NarrationStep, String);

    fn next(&mut self) -> Option<Self::Item> {
        let step = *NarrationStep::ALL.get(self.next)?;
        self.next += 1;
        Some((step, self.narration.message(step)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = NarrationStep::ALL.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NarrationIter<'_> {}

/// Prefix a message the way the activity log prints it:
/// `[2025-01-01 00:00:00.000 UTC] text`
pub fn log_line(at: DateTime<Utc>, text: &str) -> String {
    format!("[{}] {}", at.format("%Y-%m-%d %H:%M:%S%.3f UTC"), text)
}
