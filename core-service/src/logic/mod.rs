//! Logic Module - Impact Model & Reporting
//!
//! ## Structure
//! - `scenario/` - scenario vocabulary and validated input
//! - `prng` - deterministic jitter source
//! - `model/` - impact model (rules, metrics, engine)
//! - `run/` - run record, single-slot recorder, session
//! - `report/` - CSV export, narration, indicators

pub mod scenario;
pub mod prng;
pub mod model;
pub mod run;
pub mod report;
