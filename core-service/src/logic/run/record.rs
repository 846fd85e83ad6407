//! Run Record
//!
//! One computed run: scenario snapshot, metrics and when it happened.
//! Immutable once created.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::model::DerivedMetrics;
use crate::logic::scenario::ScenarioInput;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    run_id: Uuid,
    timestamp: DateTime<Utc>,
    input: ScenarioInput,
    metrics: DerivedMetrics,
}

impl RunRecord {
    pub(crate) fn new(timestamp: DateTime<Utc>, input: ScenarioInput, metrics: DerivedMetrics) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            timestamp,
            input,
            metrics,
        }
    }

    /// Correlation id for logs and API responses; never feeds the model
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// ISO-8601 UTC with millisecond precision, e.g. `2025-01-31T12:00:00.000Z`
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn input(&self) -> &ScenarioInput {
        &self.input
    }

    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }
}
