//! Outage Impact Simulator - CLI Entry Point

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use outage_sim_core::constants::{self, APP_NAME, APP_VERSION};
use outage_sim_core::logic::report::{self, format_usd, log_line, to_fixed, Indicators, Narration};
use outage_sim_core::logic::scenario::{Dependency, DrMode, Preset, Severity};
use outage_sim_core::{FactorTable, ModelConstants, RunRecord, ScenarioParams, Session};

#[derive(Debug, Parser)]
#[command(name = "outage-sim", version, about = "Estimate the impact of a simulated cloud-service outage")]
struct Cli {
    /// Scenario JSON file; when given, the scenario flags below are ignored
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Outage duration in minutes
    #[arg(long, default_value_t = 45)]
    duration: u32,

    /// minor | major | critical
    #[arg(long, default_value = "major")]
    severity: Severity,

    #[arg(long, default_value = constants::DEFAULT_PRIMARY_REGION)]
    region: String,

    /// iam-global | s3-regional | rds-failover | route53 | lambda-api
    #[arg(long, default_value = "s3-regional")]
    preset: Preset,

    /// Comma-separated subset of s3,rds,iam,dns (defaults to the preset's); bare `--deps` for none
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    deps: Option<Vec<Dependency>>,

    /// Availability zones (1-3)
    #[arg(long, default_value_t = 2)]
    az: u8,

    /// none | warm | hot
    #[arg(long, default_value = "warm")]
    dr: DrMode,

    /// SLO target in percent
    #[arg(long, default_value_t = 99.9)]
    slo: f64,

    /// Revenue per minute
    #[arg(long, default_value_t = 0.0)]
    revenue: f64,

    /// Fixed incident cost per hour
    #[arg(long, default_value_t = 0.0)]
    fixed_cost: f64,

    /// SLA penalty per hour (only charged on SLO breach)
    #[arg(long, default_value_t = 0.0)]
    penalty: f64,

    /// Variable cost as a percentage of revenue loss
    #[arg(long, default_value_t = 25.0)]
    variable_pct: f64,

    /// Print the run record as JSON instead of the narration
    #[arg(long)]
    json: bool,

    /// Write the CSV report (default location when no path is given)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    csv: Option<Option<PathBuf>>,

    /// Print the factor lookup tables as JSON and exit
    #[arg(long)]
    factors: bool,

    /// Delay between narration lines, in milliseconds
    #[arg(long, default_value_t = 0)]
    reveal_delay_ms: u64,
}

impl Cli {
    fn scenario_params(&self) -> Result<ScenarioParams> {
        if let Some(path) = &self.scenario {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario file {:?}", path))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse scenario file {:?}", path));
        }

        let mut params = ScenarioParams::for_preset(self.preset);
        params.duration_min = self.duration;
        params.severity = self.severity;
        params.region = self.region.clone();
        if let Some(deps) = &self.deps {
            params.dependencies = deps.iter().copied().collect();
        }
        params.az_count = self.az;
        params.dr_mode = self.dr;
        params.slo_target_pct = self.slo;
        params.revenue_per_minute = self.revenue;
        params.fixed_cost_per_hour = self.fixed_cost;
        params.penalty_per_hour = self.penalty;
        params.variable_cost_pct = self.variable_pct;
        Ok(params)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let model_constants = ModelConstants::from_env();

    if cli.factors {
        let table = FactorTable::new(&model_constants);
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let params = cli.scenario_params()?;
    let mut session = Session::new(model_constants);
    let record = session
        .run_params(params)
        .context("invalid scenario")?
        .clone();

    if cli.json {
        let output = serde_json::json!({
            "record": &record,
            "indicators": Indicators::for_run(&record),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        narrate(&record, Duration::from_millis(cli.reveal_delay_ms));
        print_summary(&record);
    }

    if let Some(target) = &cli.csv {
        let path = target.clone().unwrap_or_else(constants::default_report_path);
        report::write_csv(&record, &path)
            .with_context(|| format!("failed to export report to {:?}", path))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn narrate(record: &RunRecord, delay: Duration) {
    for (_, line) in &Narration::new(record) {
        println!("{}", log_line(Utc::now(), &line));
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

fn print_summary(record: &RunRecord) {
    let m = record.metrics();
    let indicators = Indicators::for_run(record);

    println!();
    println!("Est. uptime (24h)   {}%", to_fixed(m.estimated_uptime_pct(), 3));
    println!("Revenue loss        {}", format_usd(m.revenue_loss));
    println!("RTO / RPO           {} min / {} min", m.rto_min, m.rpo_min);
    println!(
        "Detect / failover / recover  {} / {} / {} min",
        m.detect_min, m.failover_min, m.recover_min
    );
    println!("Incident TCO        {}", format_usd(m.total_cost));
    println!();
    for indicator in [&indicators.status, &indicators.budget, &indicators.backlog, &indicators.breach] {
        println!("[{:>4}] {}", indicator.level.as_str(), indicator.label);
    }
}
