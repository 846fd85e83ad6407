//! Simulation Session
//!
//! Owned context for one collaborator: model constants, the clock and the
//! single-slot recorder. Callers hold the session; there is no global state.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::record::RunRecord;
use super::recorder::{Clock, RunRecorder, SystemClock};
use crate::error::{SimError, SimResult};
use crate::logic::model::{self, DerivedMetrics, FactorTable, ModelConstants};
use crate::logic::report;
use crate::logic::scenario::{ScenarioInput, ScenarioParams};

/// Session shared between concurrent callers.
///
/// Writers take the write lock for the whole compute + record step, so
/// readers see either a complete record or none.
pub type SharedSession = Arc<RwLock<Session>>;

pub struct Session {
    constants: ModelConstants,
    clock: Arc<dyn Clock>,
    recorder: RunRecorder,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ModelConstants::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("constants", &self.constants)
            .field("recorder", &self.recorder)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(constants: ModelConstants) -> Self {
        Self::with_clock(constants, Arc::new(SystemClock))
    }

    pub fn with_clock(constants: ModelConstants, clock: Arc<dyn Clock>) -> Self {
        Self {
            constants,
            clock,
            recorder: RunRecorder::new(),
        }
    }

    /// Wrap into a lock for sharing across threads/tasks
    pub fn shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    pub fn factor_table(&self) -> FactorTable {
        FactorTable::new(&self.constants)
    }

    /// Compute without recording
    pub fn compute(&self, input: &ScenarioInput) -> DerivedMetrics {
        model::compute_with(input, &self.constants)
    }

    /// Compute and record a validated input
    pub fn run(&mut self, input: ScenarioInput) -> &RunRecord {
        let metrics = model::compute_with(&input, &self.constants);
        self.recorder.record(input, metrics, self.clock.as_ref())
    }

    /// Validate raw parameters, then compute and record
    pub fn run_params(&mut self, params: ScenarioParams) -> SimResult<&RunRecord> {
        let input = ScenarioInput::new(params)?;
        Ok(self.run(input))
    }

    pub fn latest(&self) -> Option<&RunRecord> {
        self.recorder.latest()
    }

    pub fn reset(&mut self) {
        self.recorder.clear();
    }

    /// CSV for the latest run
    pub fn latest_csv(&self) -> SimResult<String> {
        match self.latest() {
            Some(record) => Ok(report::to_csv(record)),
            None => {
                log::warn!("CSV export requested before any run");
                Err(SimError::NoRecord)
            }
        }
    }

    /// Write the latest run's CSV to `path`
    pub fn export_csv(&self, path: &Path) -> SimResult<()> {
        let record = self.latest().ok_or(SimError::NoRecord)?;
        report::write_csv(record, path)
    }
}
