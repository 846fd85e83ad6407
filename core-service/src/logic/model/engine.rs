//! Impact Model Engine
//!
//! Logic only: ScenarioInput -> DerivedMetrics.
//! Deterministic: the only randomness is a `JitterRng` seeded from the input.
//! Input is already validated; nothing here re-checks it or fails.

use super::metrics::{DerivedMetrics, ImpactFactors};
use super::rules::{
    self, ModelConstants, MAX_FAILOVER_READINESS, MIN_DETECT_MIN, MIN_FAILOVER_MIN,
    MIN_FAILOVER_READINESS, MIN_RECOVER_MIN, SECONDARY_REGION_FACTOR,
};
use crate::logic::prng::JitterRng;
use crate::logic::scenario::{Dependency, ScenarioInput};

// ============================================================================
// MAIN COMPUTE FUNCTION
// ============================================================================

/// Compute metrics with the default constants
pub fn compute(input: &ScenarioInput) -> DerivedMetrics {
    compute_with(input, &ModelConstants::default())
}

/// Compute metrics with explicit constants
pub fn compute_with(input: &ScenarioInput, constants: &ModelConstants) -> DerivedMetrics {
    let mins = f64::from(input.duration_min());

    // 1-4. Factors
    let sev = rules::severity_factor(input.severity());
    let region_factor = if constants.is_primary_region(input.region()) {
        1.0
    } else {
        SECONDARY_REGION_FACTOR
    };
    let dep_count = input.dependency_count() as u32;
    let deps = f64::from(dep_count);
    let service_base = rules::service_base_factor(input.preset_id());
    let az = rules::az_factor(input.az_count());
    let dr = rules::dr_factor(input.dr_mode());

    // 5. Blast radius
    let blast_radius = (service_base * sev * region_factor * (0.8 + 0.05 * deps)).min(1.0);

    // 6. Failover readiness
    let failover_readiness = ((1.0 - 0.5 * sev)
        * (1.0 - 0.3 * deps)
        * (1.0 - 0.6 * (az - 0.6))
        * (1.0 - 0.7 * (dr - 0.45)))
        .clamp(MIN_FAILOVER_READINESS, MAX_FAILOVER_READINESS);

    // 7. Timing
    let mut rng = JitterRng::for_scenario(input, constants.lcg);
    let jitter = rng.next_f64();

    let detect_min = round_u32(
        ((2.0 + 4.0 * sev) * (1.0 + 0.2 * deps) * (1.0 + 0.2 * (jitter - 0.5))).max(MIN_DETECT_MIN),
    );
    let failover_min = round_u32((mins * (1.0 - failover_readiness) * 0.6).max(MIN_FAILOVER_MIN));
    let recover_min = round_u32((mins * (0.35 + 0.2 * sev) * az * dr).max(MIN_RECOVER_MIN));
    let rto_min = detect_min.saturating_add(failover_min).saturating_add(recover_min);

    // 8. RPO
    let rpo_min = if input.has_dependency(Dependency::Rds) {
        round_u32(mins * 0.05 * az * dr)
    } else {
        round_u32(mins * 0.01 * dr)
    };

    // 9. Uptime over the reference day
    let estimated_uptime_fraction =
        (1.0 - (mins / constants.reference_day_min) * (0.5 + 0.5 * blast_radius)).max(0.0);

    // 10. SLO error budget
    let allowed_downtime_min =
        round_u32(constants.slo_window_min * (1.0 - input.slo_target_pct() / 100.0));
    let burn_min = allowed_downtime_min.min(round_u32(mins * (0.6 + 0.4 * blast_radius)));
    let burn_pct = if allowed_downtime_min == 0 {
        0.0
    } else {
        f64::from(burn_min) / f64::from(allowed_downtime_min) * 100.0
    };
    let slo_breached = input.duration_min() > allowed_downtime_min;

    // 11. Backlog
    let serviceable_fraction = (1.0 - blast_radius).max(0.0);
    let backlog_requests =
        round_u64(constants.arrival_rate_per_min * mins * (1.0 - serviceable_fraction));

    // 12. Costs
    let revenue_loss = round_u64(input.revenue_per_minute() * mins * (0.6 + 0.4 * blast_radius));
    let fixed_cost = round_u64(input.fixed_cost_per_hour() * mins / 60.0);
    let variable_cost = round_u64(revenue_loss as f64 * input.variable_cost_pct() / 100.0);
    let penalty_cost = if slo_breached {
        round_u64(input.penalty_per_hour() * mins / 60.0)
    } else {
        0
    };

    let mut metrics = DerivedMetrics {
        factors: ImpactFactors {
            severity_factor: sev,
            region_factor,
            service_base,
            dependency_count: dep_count,
            az_factor: az,
            dr_factor: dr,
            jitter,
        },
        blast_radius,
        failover_readiness,
        detect_min,
        failover_min,
        recover_min,
        rto_min,
        rpo_min,
        estimated_uptime_fraction,
        allowed_downtime_min,
        burn_min,
        burn_pct,
        slo_breached,
        backlog_requests,
        revenue_loss,
        fixed_cost,
        variable_cost,
        penalty_cost,
        total_cost: 0,
    };
    metrics.total_cost = metrics.cost_components_sum();

    log::debug!(
        "Computed {} {} in {} ({} min): blast={:.3} rto={}m breach={} tco={}",
        input.severity(),
        input.preset_id(),
        input.region(),
        input.duration_min(),
        metrics.blast_radius,
        metrics.rto_min,
        metrics.slo_breached,
        metrics.total_cost
    );

    metrics
}

// ============================================================================
// HELPERS
// ============================================================================

/// Inputs are non-negative, so half-away-from-zero matches half-up
fn round_u32(x: f64) -> u32 {
    x.round() as u32
}

fn round_u64(x: f64) -> u64 {
    x.round() as u64
}
