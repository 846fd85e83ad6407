//! HTTP handlers

pub mod health;
pub mod factors;
pub mod simulate;
pub mod runs;
