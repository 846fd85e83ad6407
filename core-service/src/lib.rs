//! Outage Impact Simulator - Core
//!
//! Deterministic what-if model for cloud-service outages: from a handful of
//! scenario knobs to blast radius, recovery timings, SLO burn, backlog and
//! cost, plus the CSV report of the latest run.
//!
//! ```ignore
//! use outage_sim_core::{ScenarioParams, Session};
//!
//! let mut session = Session::default();
//! session.run_params(ScenarioParams::default())?;
//! println!("{}", session.latest_csv()?);
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{SimError, SimResult, ValidationError};
pub use logic::model::{compute, compute_with, DerivedMetrics, FactorTable, ModelConstants};
pub use logic::report::{to_csv, Indicators, Narration};
pub use logic::run::{Clock, RunRecord, Session, SharedSession, SystemClock};
pub use logic::scenario::{ScenarioInput, ScenarioParams};
