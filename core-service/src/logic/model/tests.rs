//! Impact model tests: worked examples plus property checks over valid inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::{compute, compute_with, rules, ModelConstants};
use crate::constants::MAX_MONEY_RATE;
use crate::logic::report::{to_csv, CSV_HEADER};
use crate::logic::run::{FixedClock, RunRecorder};
use crate::logic::scenario::{Dependency, DrMode, Preset, ScenarioInput, ScenarioParams, Severity};

const EPS: f64 = 1e-9;

fn input(params: ScenarioParams) -> ScenarioInput {
    ScenarioInput::new(params).unwrap()
}

// ============================================================================
// WORKED EXAMPLES
// ============================================================================

#[test]
fn test_reference_scenario() {
    // 45 min, major, us-east-1, s3-regional, {s3}, 2 AZ, warm, 99.9%
    let m = compute(&input(ScenarioParams::default()));

    assert!((m.blast_radius - 0.2805).abs() < EPS);
    assert!((m.failover_readiness - 0.3678675).abs() < EPS);
    assert_eq!(m.detect_min, 5);
    assert_eq!(m.failover_min, 17);
    assert_eq!(m.recover_min, 11);
    assert_eq!(m.rto_min, 33);
    assert_eq!(m.rpo_min, 0);
    assert!((m.estimated_uptime_fraction - 0.9799921875).abs() < EPS);

    assert_eq!(m.allowed_downtime_min, 43);
    assert!(m.slo_breached);
    assert_eq!(m.burn_min, 32);
    assert!((m.burn_pct - 32.0 / 43.0 * 100.0).abs() < EPS);

    assert_eq!(m.backlog_requests, 10_098);
    assert_eq!(m.total_cost, 0);
}

#[test]
fn test_reference_costs() {
    let m = compute(&input(ScenarioParams {
        revenue_per_minute: 1000.0,
        fixed_cost_per_hour: 600.0,
        penalty_per_hour: 1200.0,
        ..Default::default()
    }));

    assert_eq!(m.revenue_loss, 32_049);
    assert_eq!(m.fixed_cost, 450);
    assert_eq!(m.variable_cost, 8_012);
    assert_eq!(m.penalty_cost, 900);
    assert_eq!(m.total_cost, 41_411);
}

#[test]
fn test_costs_exact_at_rate_ceiling() {
    let m = compute(&input(ScenarioParams {
        duration_min: u32::MAX,
        revenue_per_minute: MAX_MONEY_RATE,
        fixed_cost_per_hour: MAX_MONEY_RATE,
        penalty_per_hour: MAX_MONEY_RATE,
        variable_cost_pct: 100.0,
        ..Default::default()
    }));

    let mins = f64::from(u32::MAX);
    let expected_revenue = (MAX_MONEY_RATE * mins * (0.6 + 0.4 * m.blast_radius)).round();
    assert_eq!(m.revenue_loss as f64, expected_revenue);
    assert_eq!(m.variable_cost, m.revenue_loss);
    assert!(m.slo_breached);
    assert!(m.penalty_cost > 0);

    let exact = u128::from(m.revenue_loss)
        + u128::from(m.fixed_cost)
        + u128::from(m.variable_cost)
        + u128::from(m.penalty_cost);
    assert_eq!(u128::from(m.total_cost), exact);
    assert!(m.total_cost < 1u64 << 53);
}

#[test]
fn test_penalty_only_when_breached() {
    // 99.0% over 30 days allows 432 minutes
    let m = compute(&input(ScenarioParams {
        slo_target_pct: 99.0,
        penalty_per_hour: 1200.0,
        ..Default::default()
    }));
    assert_eq!(m.allowed_downtime_min, 432);
    assert!(!m.slo_breached);
    assert_eq!(m.penalty_cost, 0);
}

#[test]
fn test_secondary_region_factor() {
    let m = compute(&input(ScenarioParams {
        region: "eu-west-1".to_string(),
        ..Default::default()
    }));
    assert_eq!(m.factors.region_factor, rules::SECONDARY_REGION_FACTOR);
    assert!((m.blast_radius - 0.55 * 0.6 * 0.85 * 0.85).abs() < EPS);
}

#[test]
fn test_primary_region_is_configurable() {
    let constants = ModelConstants {
        primary_region: "eu-west-1".to_string(),
        ..Default::default()
    };
    let eu = input(ScenarioParams {
        region: "eu-west-1".to_string(),
        ..Default::default()
    });
    assert_eq!(compute_with(&eu, &constants).factors.region_factor, 1.0);
    assert_eq!(compute(&eu).factors.region_factor, rules::SECONDARY_REGION_FACTOR);
}

#[test]
fn test_rds_dependency_drives_rpo() {
    let mut params = ScenarioParams::for_preset(Preset::RdsFailover);
    params.duration_min = 120;
    params.az_count = 1;
    params.dr_mode = DrMode::None;
    let m = compute(&input(params));
    // round(120 * 0.05 * 1.0 * 1.0)
    assert_eq!(m.rpo_min, 6);
}

#[test]
fn test_readiness_clamped_low_with_all_dependencies() {
    let m = compute(&input(ScenarioParams {
        dependencies: Dependency::ALL.into_iter().collect(),
        severity: Severity::Critical,
        ..Default::default()
    }));
    assert_eq!(m.failover_readiness, rules::MIN_FAILOVER_READINESS);
}

#[test]
fn test_no_dependencies_single_az_no_dr() {
    // Only the severity, AZ and DR terms remain
    for severity in Severity::ALL {
        let m = compute(&input(ScenarioParams {
            severity,
            dependencies: BTreeSet::new(),
            az_count: 1,
            dr_mode: DrMode::None,
            ..Default::default()
        }));
        let sev = rules::severity_factor(severity);
        let expected = ((1.0 - 0.5 * sev) * (1.0 - 0.6 * 0.4) * (1.0 - 0.7 * 0.55))
            .clamp(rules::MIN_FAILOVER_READINESS, rules::MAX_FAILOVER_READINESS);
        assert_eq!(m.factors.dependency_count, 0);
        assert_eq!(m.factors.az_factor, 1.0);
        assert_eq!(m.factors.dr_factor, 1.0);
        assert!((m.failover_readiness - expected).abs() < EPS);
    }
}

#[test]
fn test_best_posture_reaches_severity_ceiling() {
    for severity in Severity::ALL {
        let m = compute(&input(ScenarioParams {
            severity,
            dependencies: BTreeSet::new(),
            az_count: 3,
            dr_mode: DrMode::Hot,
            ..Default::default()
        }));
        let ceiling = 1.0 - 0.5 * rules::severity_factor(severity);
        assert!((m.failover_readiness - ceiling).abs() < EPS);
    }
}

#[test]
fn test_full_slo_allows_no_downtime() {
    let m = compute(&input(ScenarioParams {
        slo_target_pct: 100.0,
        ..Default::default()
    }));
    assert_eq!(m.allowed_downtime_min, 0);
    assert_eq!(m.burn_min, 0);
    assert_eq!(m.burn_pct, 0.0);
    assert!(m.slo_breached);
}

#[test]
fn test_timing_floors_for_short_outage() {
    let m = compute(&input(ScenarioParams {
        duration_min: 1,
        severity: Severity::Minor,
        dependencies: BTreeSet::new(),
        az_count: 3,
        dr_mode: DrMode::Hot,
        ..Default::default()
    }));
    assert!(m.detect_min >= 1);
    assert_eq!(m.failover_min, 3);
    assert_eq!(m.recover_min, 5);
}

#[test]
fn test_custom_arrival_rate() {
    let constants = ModelConstants {
        arrival_rate_per_min: 1600.0,
        ..Default::default()
    };
    let i = input(ScenarioParams::default());
    assert_eq!(compute_with(&i, &constants).backlog_requests, 2 * 10_098);
}

#[test]
fn test_unknown_preset_id_uses_default_base() {
    assert_eq!(rules::service_base_factor_for_id("ec2-fleet"), rules::DEFAULT_SERVICE_BASE);
    assert_eq!(rules::service_base_factor_for_id("route53"), 0.78);
}

#[test]
fn test_factor_table_covers_vocabularies() {
    let table = rules::FactorTable::default();
    assert_eq!(table.severity.len(), 3);
    assert_eq!(table.presets.len(), 5);
    assert_eq!(table.az.len(), 3);
    assert_eq!(table.dr.len(), 3);
    assert_eq!(table.primary_region, "us-east-1");

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["severity"][2]["seedWeight"], 29);
    assert_eq!(json["presets"][0]["presetId"], "iam-global");
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Minor), Just(Severity::Major), Just(Severity::Critical)]
}

fn preset_strategy() -> impl Strategy<Value = Preset> {
    prop::sample::select(Preset::ALL.to_vec())
}

fn dr_strategy() -> impl Strategy<Value = DrMode> {
    prop::sample::select(DrMode::ALL.to_vec())
}

fn deps_strategy() -> impl Strategy<Value = BTreeSet<Dependency>> {
    prop::sample::subsequence(Dependency::ALL.to_vec(), 0..=4)
        .prop_map(|deps| deps.into_iter().collect())
}

fn region_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("us-east-1".to_string()),
        Just("us-west-2".to_string()),
        "[a-z]{2}-[a-z]{4,9}-[1-3]",
    ]
}

prop_compose! {
    fn params_strategy()(
        duration_min in 1u32..=10_000,
        severity in severity_strategy(),
        region in region_strategy(),
        preset_id in preset_strategy(),
        dependencies in deps_strategy(),
        az_count in 1u8..=3,
        dr_mode in dr_strategy(),
        slo_target_pct in 0.001f64..=100.0,
        revenue_per_minute in 0.0f64..=MAX_MONEY_RATE,
        fixed_cost_per_hour in 0.0f64..=MAX_MONEY_RATE,
        penalty_per_hour in 0.0f64..=MAX_MONEY_RATE,
        variable_cost_pct in 0.0f64..=100.0,
    ) -> ScenarioParams {
        ScenarioParams {
            duration_min,
            severity,
            region,
            preset_id,
            dependencies,
            az_count,
            dr_mode,
            slo_target_pct,
            revenue_per_minute,
            fixed_cost_per_hour,
            penalty_per_hour,
            variable_cost_pct,
        }
    }
}

proptest! {
    #[test]
    fn prop_compute_is_deterministic(params in params_strategy()) {
        let i = input(params);
        let a = compute(&i);
        let b = compute(&i);
        prop_assert_eq!(a.blast_radius.to_bits(), b.blast_radius.to_bits());
        prop_assert_eq!(a.burn_pct.to_bits(), b.burn_pct.to_bits());
        prop_assert_eq!(a.factors.jitter.to_bits(), b.factors.jitter.to_bits());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_range_invariants(params in params_strategy()) {
        let m = compute(&input(params));
        prop_assert!((0.0..=1.0).contains(&m.blast_radius));
        prop_assert!((0.15..=0.95).contains(&m.failover_readiness));
        prop_assert!(m.detect_min >= 1);
        prop_assert!(m.failover_min >= 3);
        prop_assert!(m.recover_min >= 5);
        prop_assert_eq!(m.rto_min, m.detect_min + m.failover_min + m.recover_min);
        prop_assert!((0.0..=1.0).contains(&m.estimated_uptime_fraction));
        prop_assert!(m.burn_min <= m.allowed_downtime_min);
        prop_assert_eq!(
            m.total_cost,
            m.revenue_loss + m.fixed_cost + m.variable_cost + m.penalty_cost
        );
    }

    #[test]
    fn prop_breach_consistency(params in params_strategy()) {
        let duration = params.duration_min;
        let m = compute(&input(params));
        prop_assert_eq!(m.slo_breached, duration > m.allowed_downtime_min);
    }

    #[test]
    fn prop_severity_never_shrinks_blast_radius(params in params_strategy()) {
        let radii: Vec<f64> = Severity::ALL
            .into_iter()
            .map(|severity| compute(&input(ScenarioParams { severity, ..params.clone() })).blast_radius)
            .collect();
        prop_assert!(radii[0] <= radii[1]);
        prop_assert!(radii[1] <= radii[2]);
    }

    #[test]
    fn prop_longer_outage_never_shrinks_backlog(params in params_strategy(), extra in 1u32..=1_000) {
        let shorter = compute(&input(params.clone())).backlog_requests;
        let longer = compute(&input(ScenarioParams {
            duration_min: params.duration_min + extra,
            ..params
        }))
        .backlog_requests;
        prop_assert!(shorter <= longer);
    }

    #[test]
    fn prop_zero_rates_zero_cost(params in params_strategy()) {
        let m = compute(&input(ScenarioParams {
            revenue_per_minute: 0.0,
            fixed_cost_per_hour: 0.0,
            penalty_per_hour: 0.0,
            ..params
        }));
        prop_assert_eq!(m.total_cost, 0);
    }

    #[test]
    fn prop_csv_is_two_lines_of_24_fields(params in params_strategy()) {
        let i = input(params);
        let metrics = compute(&i);
        let clock = FixedClock::from_millis(1_735_689_600_000).unwrap();
        let mut recorder = RunRecorder::new();
        let csv = to_csv(recorder.record(i, metrics, &clock));

        let lines: Vec<&str> = csv.lines().collect();
        prop_assert_eq!(lines.len(), 2);
        prop_assert_eq!(lines[0], CSV_HEADER.join(","));
        prop_assert_eq!(lines[1].split(',').count(), CSV_HEADER.len());
        prop_assert!(!csv.ends_with('\n'));
    }
}
