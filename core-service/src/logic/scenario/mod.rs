//! Scenario Module
//!
//! What the user asks the simulator: duration, severity, region, failing
//! service, dependencies, redundancy posture and cost rates.
//!
//! ## Structure
//! - `types`: closed vocabularies (Severity, Preset, Dependency, AzCount, DrMode)
//! - `input`: raw `ScenarioParams` and the validated `ScenarioInput`

pub mod types;
pub mod input;


pub use types::{AzCount, Dependency, DrMode, Preset, Severity};
pub use input::{ScenarioInput, ScenarioParams};
