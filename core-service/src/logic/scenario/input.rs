//! Scenario Input
//!
//! `ScenarioParams` is the raw shape collaborators fill in (CLI flags, JSON files,
//! HTTP bodies). `ScenarioInput::new` is the only way to get a `ScenarioInput`,
//! so everything downstream can assume valid, immutable input.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{AzCount, Dependency, DrMode, Preset, Severity};
use crate::constants::MAX_MONEY_RATE;
use crate::error::ValidationError;

/// Region ids are written unquoted into the CSV report
static REGION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("region pattern is valid"));

// ============================================================================
// RAW PARAMETERS
// ============================================================================

/// Unvalidated scenario parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParams {
    pub duration_min: u32,
    pub severity: Severity,
    pub region: String,
    pub preset_id: Preset,
    pub dependencies: BTreeSet<Dependency>,
    pub az_count: u8,
    pub dr_mode: DrMode,
    pub slo_target_pct: f64,
    pub revenue_per_minute: f64,
    pub fixed_cost_per_hour: f64,
    pub penalty_per_hour: f64,
    pub variable_cost_pct: f64,
}

impl Default for ScenarioParams {
    /// The reset state of the simulator form
    fn default() -> Self {
        Self::for_preset(Preset::S3Regional)
    }
}

impl ScenarioParams {
    /// Defaults with the preset's own dependency selection
    pub fn for_preset(preset: Preset) -> Self {
        Self {
            duration_min: 45,
            severity: Severity::Major,
            region: crate::constants::DEFAULT_PRIMARY_REGION.to_string(),
            preset_id: preset,
            dependencies: preset.default_dependencies().iter().copied().collect(),
            az_count: 2,
            dr_mode: DrMode::Warm,
            slo_target_pct: 99.9,
            revenue_per_minute: 0.0,
            fixed_cost_per_hour: 0.0,
            penalty_per_hour: 0.0,
            variable_cost_pct: 25.0,
        }
    }

    /// Switch preset and reset dependencies to the preset's selection
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset_id = preset;
        self.dependencies = preset.default_dependencies().iter().copied().collect();
    }

    /// Validate into an immutable `ScenarioInput`
    pub fn validate(self) -> Result<ScenarioInput, ValidationError> {
        ScenarioInput::new(self)
    }
}

// ============================================================================
// VALIDATED INPUT
// ============================================================================

/// Validated, immutable scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ScenarioParams")]
pub struct ScenarioInput {
    duration_min: u32,
    severity: Severity,
    region: String,
    preset_id: Preset,
    dependencies: BTreeSet<Dependency>,
    az_count: AzCount,
    dr_mode: DrMode,
    slo_target_pct: f64,
    revenue_per_minute: f64,
    fixed_cost_per_hour: f64,
    penalty_per_hour: f64,
    variable_cost_pct: f64,
}

impl ScenarioInput {
    pub fn new(params: ScenarioParams) -> Result<Self, ValidationError> {
        if params.duration_min < 1 {
            return Err(ValidationError::DurationTooShort(params.duration_min));
        }

        if params.region.is_empty() {
            return Err(ValidationError::EmptyRegion);
        }
        if !REGION_RE.is_match(&params.region) {
            return Err(ValidationError::InvalidRegion(params.region));
        }

        let slo = params.slo_target_pct;
        if !slo.is_finite() || slo <= 0.0 || slo > 100.0 {
            return Err(ValidationError::SloTargetOutOfRange(slo));
        }

        non_negative("revenuePerMinute", params.revenue_per_minute)?;
        non_negative("fixedCostPerHour", params.fixed_cost_per_hour)?;
        non_negative("penaltyPerHour", params.penalty_per_hour)?;

        let var = params.variable_cost_pct;
        if !var.is_finite() || !(0.0..=100.0).contains(&var) {
            return Err(ValidationError::VariableCostOutOfRange(var));
        }

        let az_count = AzCount::try_from(params.az_count)?;

        Ok(Self {
            duration_min: params.duration_min,
            severity: params.severity,
            region: params.region,
            preset_id: params.preset_id,
            dependencies: params.dependencies,
            az_count,
            dr_mode: params.dr_mode,
            slo_target_pct: slo,
            revenue_per_minute: params.revenue_per_minute,
            fixed_cost_per_hour: params.fixed_cost_per_hour,
            penalty_per_hour: params.penalty_per_hour,
            variable_cost_pct: var,
        })
    }

    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn preset_id(&self) -> Preset {
        self.preset_id
    }

    pub fn dependencies(&self) -> &BTreeSet<Dependency> {
        &self.dependencies
    }

    pub fn has_dependency(&self, dep: Dependency) -> bool {
        self.dependencies.contains(&dep)
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn az_count(&self) -> AzCount {
        self.az_count
    }

    pub fn dr_mode(&self) -> DrMode {
        self.dr_mode
    }

    pub fn slo_target_pct(&self) -> f64 {
        self.slo_target_pct
    }

    pub fn revenue_per_minute(&self) -> f64 {
        self.revenue_per_minute
    }

    pub fn fixed_cost_per_hour(&self) -> f64 {
        self.fixed_cost_per_hour
    }

    pub fn penalty_per_hour(&self) -> f64 {
        self.penalty_per_hour
    }

    pub fn variable_cost_pct(&self) -> f64 {
        self.variable_cost_pct
    }

    /// Back to raw parameters (e.g. to tweak one knob and re-validate)
    pub fn to_params(&self) -> ScenarioParams {
        ScenarioParams {
            duration_min: self.duration_min,
            severity: self.severity,
            region: self.region.clone(),
            preset_id: self.preset_id,
            dependencies: self.dependencies.clone(),
            az_count: self.az_count.get(),
            dr_mode: self.dr_mode,
            slo_target_pct: self.slo_target_pct,
            revenue_per_minute: self.revenue_per_minute,
            fixed_cost_per_hour: self.fixed_cost_per_hour,
            penalty_per_hour: self.penalty_per_hour,
            variable_cost_pct: self.variable_cost_pct,
        }
    }
}

impl TryFrom<ScenarioParams> for ScenarioInput {
    type Error = ValidationError;

    fn try_from(params: ScenarioParams) -> Result<Self, Self::Error> {
        ScenarioInput::new(params)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ValidationError::NegativeRate { field, value });
    }
    if value > MAX_MONEY_RATE {
        return Err(ValidationError::RateTooLarge {
            field,
            value,
            max: MAX_MONEY_RATE,
        });
    }
    Ok(())
}
