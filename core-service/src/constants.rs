//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Model constants can be overridden from the environment; see
//! [`crate::logic::model::ModelConstants::from_env`].

use std::path::PathBuf;

/// App name
pub const APP_NAME: &str = "Outage Impact Simulator";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// MODEL DEFAULTS
// ============================================

/// Illustrative request arrival rate during the outage (requests/minute)
pub const DEFAULT_ARRIVAL_RATE_PER_MIN: f64 = 800.0;

/// Reference window for the uptime estimate (24 hours, in minutes)
pub const DEFAULT_REFERENCE_DAY_MIN: f64 = 24.0 * 60.0;

/// SLO error-budget window (30 days, in minutes)
pub const DEFAULT_SLO_WINDOW_MIN: f64 = 30.0 * 24.0 * 60.0;

/// Region treated as "primary" (full regional impact)
pub const DEFAULT_PRIMARY_REGION: &str = "us-east-1";

/// Upper bound for every money rate (per minute or per hour).
///
/// At this rate even a `u32::MAX`-minute outage keeps each cost and their
/// sum below 2^53, so rounded costs are exact whole numbers.
pub const MAX_MONEY_RATE: f64 = 1_000_000.0;

/// LCG multiplier
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;

/// LCG increment
pub const LCG_INCREMENT: u64 = 12_345;

/// LCG modulus (2^31 - 1)
pub const LCG_MODULUS: u64 = (1 << 31) - 1;

// ============================================
// REPORT EXPORT
// ============================================

/// File name of the exported CSV report
pub const REPORT_FILE_NAME: &str = "outage_report.csv";

/// Directory name under the local data dir
const DATA_DIR_NAME: &str = "outage-sim";

// ============================================
// Environment variable names
// ============================================

pub const ENV_ARRIVAL_RATE: &str = "OUTAGE_SIM_ARRIVAL_RATE";
pub const ENV_REFERENCE_DAY_MIN: &str = "OUTAGE_SIM_REFERENCE_DAY_MIN";
pub const ENV_SLO_WINDOW_MIN: &str = "OUTAGE_SIM_SLO_WINDOW_MIN";
pub const ENV_PRIMARY_REGION: &str = "OUTAGE_SIM_PRIMARY_REGION";
pub const ENV_REPORT_DIR: &str = "OUTAGE_SIM_REPORT_DIR";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Read a strictly positive, finite number from the environment.
///
/// Missing variables fall back silently; unusable values fall back with a warning.
pub fn get_positive_f64(var: &str, default: f64) -> f64 {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                log::warn!("Ignoring {}={:?}: expected a positive number, using {}", var, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// Get primary region from environment or use default
pub fn get_primary_region() -> String {
    std::env::var(ENV_PRIMARY_REGION)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_PRIMARY_REGION.to_string())
}

/// Get report directory from environment or use the local data dir
pub fn get_report_dir() -> PathBuf {
    std::env::var(ENV_REPORT_DIR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DATA_DIR_NAME)
                .join("reports")
        })
}

/// Default full path of the exported CSV report
pub fn default_report_path() -> PathBuf {
    get_report_dir().join(REPORT_FILE_NAME)
}
