//! CSV Report
//!
//! Fixed-schema, two-line export of one run: header, then the data row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::money::to_fixed;
use crate::error::SimResult;
use crate::logic::run::RunRecord;

/// Column order of the exported report
pub const CSV_HEADER: [&str; 24] = [
    "timestamp",
    "region",
    "severity",
    "AZ",
    "DR",
    "SLO",
    "mins",
    "blastRadius",
    "failoverReadiness",
    "detectMin",
    "failoverMin",
    "recoverMin",
    "RTO",
    "RPO",
    "estUptime",
    "burnMin",
    "burnPct",
    "breach",
    "backlog",
    "revLoss",
    "fixedCost",
    "variable",
    "penalties",
    "incidentTCO",
];

/// Data row fields, in [`CSV_HEADER`] order
pub fn csv_row(record: &RunRecord) -> [String; 24] {
    let input = record.input();
    let m = record.metrics();

    [
        record.timestamp_iso(),
        input.region().to_string(),
        input.severity().to_string(),
        input.az_count().to_string(),
        input.dr_mode().to_string(),
        input.slo_target_pct().to_string(),
        input.duration_min().to_string(),
        to_fixed(m.blast_radius, 3),
        to_fixed(m.failover_readiness, 3),
        m.detect_min.to_string(),
        m.failover_min.to_string(),
        m.recover_min.to_string(),
        m.rto_min.to_string(),
        m.rpo_min.to_string(),
        to_fixed(m.estimated_uptime_pct(), 3),
        m.burn_min.to_string(),
        to_fixed(m.burn_pct, 2),
        m.slo_breached.to_string(),
        m.backlog_requests.to_string(),
        m.revenue_loss.to_string(),
        m.fixed_cost.to_string(),
        m.variable_cost.to_string(),
        m.penalty_cost.to_string(),
        m.total_cost.to_string(),
    ]
}

/// Render header + data row, separated by a single `\n`
pub fn to_csv(record: &RunRecord) -> String {
    format!("{}\n{}", CSV_HEADER.join(","), csv_row(record).join(","))
}

/// Write the report to `path`, creating parent directories
pub fn write_csv(record: &RunRecord, path: &Path) -> SimResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(to_csv(record).as_bytes())?;
    file.flush()?;

    log::info!("Exported run {} to {:?}", record.run_id(), path);
    Ok(())
}
