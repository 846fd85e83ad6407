//! Impact Model Rules & Lookup Tables
//!
//! Fixed factors keyed by scenario vocabulary, plus the tunable constants.
//! No model math here - only tables and config.

use serde::{Deserialize, Serialize};

use crate::constants::{
    self, DEFAULT_ARRIVAL_RATE_PER_MIN, DEFAULT_PRIMARY_REGION, DEFAULT_REFERENCE_DAY_MIN,
    DEFAULT_SLO_WINDOW_MIN, ENV_ARRIVAL_RATE, ENV_REFERENCE_DAY_MIN, ENV_SLO_WINDOW_MIN,
};
use crate::logic::prng::{severity_seed_weight, LcgParams};
use crate::logic::scenario::{AzCount, Dependency, DrMode, Preset, Severity};

// ============================================================================
// FACTORS
// ============================================================================

/// Base impact used for unrecognized preset ids
pub const DEFAULT_SERVICE_BASE: f64 = 0.55;

/// Regional factor for any non-primary region
pub const SECONDARY_REGION_FACTOR: f64 = 0.85;

/// Lower clamp for failover readiness
pub const MIN_FAILOVER_READINESS: f64 = 0.15;

/// Upper clamp for failover readiness
pub const MAX_FAILOVER_READINESS: f64 = 0.95;

/// Floors for the timing components (minutes)
pub const MIN_DETECT_MIN: f64 = 1.0;
pub const MIN_FAILOVER_MIN: f64 = 3.0;
pub const MIN_RECOVER_MIN: f64 = 5.0;

pub fn severity_factor(severity: Severity) -> f64 {
    match severity {
        Severity::Minor => 0.35,
        Severity::Major => 0.6,
        Severity::Critical => 0.9,
    }
}

pub fn service_base_factor(preset: Preset) -> f64 {
    match preset {
        Preset::IamGlobal => 0.85,
        Preset::Route53 => 0.78,
        Preset::RdsFailover => 0.65,
        Preset::S3Regional => 0.55,
        Preset::LambdaApi => 0.5,
    }
}

/// Base factor for a raw preset id; unknown ids get [`DEFAULT_SERVICE_BASE`]
pub fn service_base_factor_for_id(preset_id: &str) -> f64 {
    preset_id
        .parse::<Preset>()
        .map(service_base_factor)
        .unwrap_or(DEFAULT_SERVICE_BASE)
}

/// More AZs means less exposure
pub fn az_factor(az: AzCount) -> f64 {
    match az {
        AzCount::One => 1.0,
        AzCount::Two => 0.75,
        AzCount::Three => 0.6,
    }
}

/// Warmer DR means less exposure
pub fn dr_factor(dr: DrMode) -> f64 {
    match dr {
        DrMode::None => 1.0,
        DrMode::Warm => 0.7,
        DrMode::Hot => 0.45,
    }
}

// ============================================================================
// CONFIGURABLE CONSTANTS
// ============================================================================

/// Assumptions about the reference system being modeled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConstants {
    /// Request arrival rate (requests/minute)
    pub arrival_rate_per_min: f64,
    /// Uptime reference window (minutes)
    pub reference_day_min: f64,
    /// SLO error-budget window (minutes)
    pub slo_window_min: f64,
    /// Region with full regional impact
    pub primary_region: String,
    pub lcg: LcgParams,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            arrival_rate_per_min: DEFAULT_ARRIVAL_RATE_PER_MIN,
            reference_day_min: DEFAULT_REFERENCE_DAY_MIN,
            slo_window_min: DEFAULT_SLO_WINDOW_MIN,
            primary_region: DEFAULT_PRIMARY_REGION.to_string(),
            lcg: LcgParams::default(),
        }
    }
}

impl ModelConstants {
    /// Defaults with `OUTAGE_SIM_*` environment overrides applied
    pub fn from_env() -> Self {
        let loaded = Self {
            arrival_rate_per_min: constants::get_positive_f64(ENV_ARRIVAL_RATE, DEFAULT_ARRIVAL_RATE_PER_MIN),
            reference_day_min: constants::get_positive_f64(ENV_REFERENCE_DAY_MIN, DEFAULT_REFERENCE_DAY_MIN),
            slo_window_min: constants::get_positive_f64(ENV_SLO_WINDOW_MIN, DEFAULT_SLO_WINDOW_MIN),
            primary_region: constants::get_primary_region(),
            lcg: LcgParams::default(),
        };

        if loaded != Self::default() {
            log::info!("Model constants overridden from environment: {:?}", loaded);
        }
        loaded
    }

    pub fn is_primary_region(&self, region: &str) -> bool {
        region == self.primary_region
    }
}

// ============================================================================
// FACTOR TABLE (for collaborator display)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityRow {
    pub severity: Severity,
    pub factor: f64,
    pub seed_weight: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRow {
    pub preset_id: Preset,
    pub service: String,
    pub label: String,
    pub base_factor: f64,
    pub default_dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzRow {
    pub az_count: AzCount,
    pub factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrRow {
    pub dr_mode: DrMode,
    pub factor: f64,
}

/// Every fixed lookup table, in one serializable value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorTable {
    pub severity: Vec<SeverityRow>,
    pub presets: Vec<PresetRow>,
    pub default_service_base: f64,
    pub az: Vec<AzRow>,
    pub dr: Vec<DrRow>,
    pub primary_region: String,
    pub secondary_region_factor: f64,
}

impl FactorTable {
    pub fn new(constants: &ModelConstants) -> Self {
        Self {
            severity: Severity::ALL
                .into_iter()
                .map(|severity| SeverityRow {
                    severity,
                    factor: severity_factor(severity),
                    seed_weight: severity_seed_weight(severity),
                })
                .collect(),
            presets: Preset::ALL
                .into_iter()
                .map(|preset| PresetRow {
                    preset_id: preset,
                    service: preset.service().to_string(),
                    label: preset.label().to_string(),
                    base_factor: service_base_factor(preset),
                    default_dependencies: preset.default_dependencies().to_vec(),
                })
                .collect(),
            default_service_base: DEFAULT_SERVICE_BASE,
            az: AzCount::ALL
                .into_iter()
                .map(|az_count| AzRow { az_count, factor: az_factor(az_count) })
                .collect(),
            dr: DrMode::ALL
                .into_iter()
                .map(|dr_mode| DrRow { dr_mode, factor: dr_factor(dr_mode) })
                .collect(),
            primary_region: constants.primary_region.clone(),
            secondary_region_factor: SECONDARY_REGION_FACTOR,
        }
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        Self::new(&ModelConstants::default())
    }
}
