//! Impact Model
//!
//! Maps a validated scenario to blast radius, recovery timings, SLO burn,
//! backlog and cost. Pure and reproducible: the same `ScenarioInput` (and the
//! same `ModelConstants`) always yields bit-identical `DerivedMetrics`.
//!
//! ## Structure
//! - `rules`: lookup tables, floors/clamps, `ModelConstants`, `FactorTable`
//! - `metrics`: `DerivedMetrics` output type
//! - `engine`: the compute function
//!
//! ## Usage
//! ```ignore
//! use outage_sim_core::logic::model;
//! use outage_sim_core::logic::scenario::{ScenarioInput, ScenarioParams};
//!
//! let input = ScenarioInput::new(ScenarioParams::default())?;
//! let metrics = model::compute(&input);
//! assert!(metrics.burn_min <= metrics.allowed_downtime_min);
//! ```

pub mod rules;
pub mod metrics;
pub mod engine;

#[cfg(test)]
mod tests;

pub use rules::{
    az_factor,
    dr_factor,
    service_base_factor,
    service_base_factor_for_id,
    severity_factor,
    FactorTable,
    ModelConstants,
    DEFAULT_SERVICE_BASE,
};

pub use metrics::{DerivedMetrics, ImpactFactors};

pub use engine::{compute, compute_with};
