//! Error types

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// A scenario field violates its constraint.
///
/// Raised while building a [`ScenarioInput`](crate::logic::scenario::ScenarioInput),
/// never by the model itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("durationMin must be at least 1 minute, got {0}")]
    DurationTooShort(u32),

    #[error("region must not be empty")]
    EmptyRegion,

    #[error("region {0:?} is not a valid region identifier")]
    InvalidRegion(String),

    #[error("sloTargetPct must be in (0, 100], got {0}")]
    SloTargetOutOfRange(f64),

    #[error("{field} must be a finite number >= 0, got {value}")]
    NegativeRate { field: &'static str, value: f64 },

    #[error("{field} must be at most {max}, got {value}")]
    RateTooLarge { field: &'static str, value: f64, max: f64 },

    #[error("variableCostPct must be in [0, 100], got {0}")]
    VariableCostOutOfRange(f64),

    #[error("azCount must be 1, 2 or 3, got {0}")]
    InvalidAzCount(String),

    #[error("unknown severity {0:?} (expected minor, major or critical)")]
    UnknownSeverity(String),

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error("unknown DR mode {0:?} (expected none, warm or hot)")]
    UnknownDrMode(String),

    #[error("unknown dependency {0:?} (expected s3, rds, iam or dns)")]
    UnknownDependency(String),
}

/// Errors surfaced by the session and report layers.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no simulation run recorded yet; run the model first")]
    NoRecord,

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
