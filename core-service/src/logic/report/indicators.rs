//! Status Indicators
//!
//! Traffic-light classification of a run for dashboards.

use serde::{Deserialize, Serialize};

use super::money::to_fixed;
use crate::logic::run::RunRecord;
use crate::logic::scenario::Severity;

/// Budget burn below this is ok (percent)
pub const BUDGET_WARN_PCT: f64 = 60.0;

/// Budget burn at or above this is bad (percent)
pub const BUDGET_BAD_PCT: f64 = 100.0;

/// Backlog below this is ok (requests)
pub const BACKLOG_WARN: u64 = 20_000;

/// Backlog at or above this is bad (requests)
pub const BACKLOG_BAD: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Ok,
    Warn,
    Bad,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Ok => "ok",
            Level::Warn => "warn",
            Level::Bad => "bad",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub level: Level,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub status: Indicator,
    pub budget: Indicator,
    pub backlog: Indicator,
    pub breach: Indicator,
}

pub fn budget_level(burn_pct: f64) -> Level {
    if burn_pct < BUDGET_WARN_PCT {
        Level::Ok
    } else if burn_pct < BUDGET_BAD_PCT {
        Level::Warn
    } else {
        Level::Bad
    }
}

pub fn backlog_level(backlog: u64) -> Level {
    if backlog < BACKLOG_WARN {
        Level::Ok
    } else if backlog < BACKLOG_BAD {
        Level::Warn
    } else {
        Level::Bad
    }
}

pub fn severity_level(severity: Severity) -> Level {
    match severity {
        Severity::Minor => Level::Ok,
        Severity::Major => Level::Warn,
        Severity::Critical => Level::Bad,
    }
}

impl Indicators {
    pub fn for_run(record: &RunRecord) -> Self {
        let m = record.metrics();
        let severity = record.input().severity();

        Self {
            status: Indicator {
                level: severity_level(severity),
                label: format!("Complete ({})", severity),
            },
            budget: Indicator {
                level: budget_level(m.burn_pct),
                label: format!("Budget burn: {}%", to_fixed(m.burn_pct, 1)),
            },
            backlog: Indicator {
                level: backlog_level(m.backlog_requests),
                label: format!("Backlog: {} req", m.backlog_requests),
            },
            breach: Indicator {
                level: if m.slo_breached { Level::Bad } else { Level::Ok },
                label: format!("SLO breach: {}", if m.slo_breached { "yes" } else { "no" }),
            },
        }
    }
}
