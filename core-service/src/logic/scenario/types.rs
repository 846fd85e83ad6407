//! Scenario Types
//!
//! Closed vocabularies for scenario knobs.
//! No model math here - only ids, parsing and display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ============================================================================
// SEVERITY
// ============================================================================

/// Outage severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Major, Severity::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            "critical" => Ok(Severity::Critical),
            _ => Err(ValidationError::UnknownSeverity(s.to_string())),
        }
    }
}

// ============================================================================
// DEPENDENCY
// ============================================================================

/// Shared service the workload depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    S3,
    Rds,
    Iam,
    Dns,
}

impl Dependency {
    pub const ALL: [Dependency; 4] = [Dependency::S3, Dependency::Rds, Dependency::Iam, Dependency::Dns];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dependency::S3 => "s3",
            Dependency::Rds => "rds",
            Dependency::Iam => "iam",
            Dependency::Dns => "dns",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dependency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Dependency::S3),
            "rds" => Ok(Dependency::Rds),
            "iam" => Ok(Dependency::Iam),
            "dns" => Ok(Dependency::Dns),
            _ => Err(ValidationError::UnknownDependency(s.to_string())),
        }
    }
}

// ============================================================================
// PRESET
// ============================================================================

/// Scenario preset (which managed service is failing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    IamGlobal,
    S3Regional,
    RdsFailover,
    Route53,
    LambdaApi,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::IamGlobal,
        Preset::S3Regional,
        Preset::RdsFailover,
        Preset::Route53,
        Preset::LambdaApi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::IamGlobal => "iam-global",
            Preset::S3Regional => "s3-regional",
            Preset::RdsFailover => "rds-failover",
            Preset::Route53 => "route53",
            Preset::LambdaApi => "lambda-api",
        }
    }

    /// Name of the failing service
    pub fn service(&self) -> &'static str {
        match self {
            Preset::IamGlobal => "IAM",
            Preset::S3Regional => "S3",
            Preset::RdsFailover => "RDS",
            Preset::Route53 => "Route53",
            Preset::LambdaApi => "Lambda",
        }
    }

    /// Human-readable label used in narration
    pub fn label(&self) -> &'static str {
        match self {
            Preset::IamGlobal => "IAM global control-plane outage",
            Preset::S3Regional => "S3 regional degradation",
            Preset::RdsFailover => "RDS primary failover",
            Preset::Route53 => "Route53 DNS resolution failure",
            Preset::LambdaApi => "Lambda API throttling",
        }
    }

    /// Dependencies a collaborator pre-selects when the preset is chosen
    pub fn default_dependencies(&self) -> &'static [Dependency] {
        match self {
            Preset::IamGlobal => &[Dependency::Iam, Dependency::Dns],
            Preset::S3Regional => &[Dependency::S3],
            Preset::RdsFailover => &[Dependency::Rds],
            Preset::Route53 => &[Dependency::Dns],
            Preset::LambdaApi => &[Dependency::S3],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == id)
            .ok_or_else(|| ValidationError::UnknownPreset(s.to_string()))
    }
}

// ============================================================================
// AVAILABILITY ZONES
// ============================================================================

/// Number of availability zones the workload spans
///
/// Serialized as the plain integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AzCount {
    One,
    Two,
    Three,
}

impl AzCount {
    pub const ALL: [AzCount; 3] = [AzCount::One, AzCount::Two, AzCount::Three];

    pub fn get(&self) -> u8 {
        match self {
            AzCount::One => 1,
            AzCount::Two => 2,
            AzCount::Three => 3,
        }
    }
}

impl TryFrom<u8> for AzCount {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AzCount::One),
            2 => Ok(AzCount::Two),
            3 => Ok(AzCount::Three),
            other => Err(ValidationError::InvalidAzCount(other.to_string())),
        }
    }
}

impl From<AzCount> for u8 {
    fn from(az: AzCount) -> Self {
        az.get()
    }
}

impl fmt::Display for AzCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for AzCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|n| AzCount::try_from(n).ok())
            .ok_or_else(|| ValidationError::InvalidAzCount(s.to_string()))
    }
}

// ============================================================================
// DISASTER RECOVERY
// ============================================================================

/// Cross-region disaster-recovery posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrMode {
    None,
    Warm,
    Hot,
}

impl DrMode {
    pub const ALL: [DrMode; 3] = [DrMode::None, DrMode::Warm, DrMode::Hot];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrMode::None => "none",
            DrMode::Warm => "warm",
            DrMode::Hot => "hot",
        }
    }
}

impl fmt::Display for DrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(DrMode::None),
            "warm" => Ok(DrMode::Warm),
            "hot" => Ok(DrMode::Hot),
            _ => Err(ValidationError::UnknownDrMode(s.to_string())),
        }
    }
}
