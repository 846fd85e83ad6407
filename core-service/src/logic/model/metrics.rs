//! Derived Metrics
//!
//! Output of the impact model. Pure data.

use serde::{Deserialize, Serialize};

/// Intermediate factors, kept so a UI can explain the numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactFactors {
    pub severity_factor: f64,
    pub region_factor: f64,
    pub service_base: f64,
    pub dependency_count: u32,
    pub az_factor: f64,
    pub dr_factor: f64,
    /// PRNG draw used for detection jitter
    pub jitter: f64,
}

/// Everything the model derives from one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub factors: ImpactFactors,

    // Impact
    pub blast_radius: f64,
    pub failover_readiness: f64,

    // Timing (minutes)
    pub detect_min: u32,
    pub failover_min: u32,
    pub recover_min: u32,
    pub rto_min: u32,
    pub rpo_min: u32,

    // Availability
    pub estimated_uptime_fraction: f64,
    pub allowed_downtime_min: u32,
    pub burn_min: u32,
    pub burn_pct: f64,
    pub slo_breached: bool,

    // Load
    pub backlog_requests: u64,

    // Costs (whole currency units)
    pub revenue_loss: u64,
    pub fixed_cost: u64,
    pub variable_cost: u64,
    pub penalty_cost: u64,
    pub total_cost: u64,
}

impl DerivedMetrics {
    /// `estimated_uptime_fraction` as a percentage
    pub fn estimated_uptime_pct(&self) -> f64 {
        self.estimated_uptime_fraction * 100.0
    }

    /// Sum of the four cost components
    pub fn cost_components_sum(&self) -> u64 {
        self.revenue_loss
            .saturating_add(self.fixed_cost)
            .saturating_add(self.variable_cost)
            .saturating_add(self.penalty_cost)
    }
}
