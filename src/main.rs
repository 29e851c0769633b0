//! blockplace - replays block placement scenarios against the vanilla rules
//!
//! Each scenario seeds a grid, places and breaks blocks, drains the neighbor
//! update queue and checks the resulting states.

mod config;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use config::{PlacementConfig, DEFAULT_CONFIG_PATH};
use scenario::{Scenario, ScenarioReport, ScenarioRunner};
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay block placement scenarios", long_about = None)]
struct Args {
    /// Scenario files (JSON)
    #[arg(required = true)]
    scenarios: Vec<PathBuf>,
    /// Placement config (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Block pack overriding the configured one
    #[arg(long)]
    blocks: Option<PathBuf>,
    /// Step limit for each settle, overriding the config
    #[arg(long)]
    max_settle_ticks: Option<u64>,
    /// Write the reports as pretty JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn placement_config(&self) -> PlacementConfig {
        let mut config = PlacementConfig::load_from_path(&self.config);
        if let Some(path) = &self.blocks {
            config.blocks_path = path.clone();
        }
        if let Some(ticks) = self.max_settle_ticks {
            config.max_settle_ticks = ticks;
        }
        config
    }
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    info!("Starting blockplace v{}", env!("CARGO_PKG_VERSION"));

    let runner = ScenarioRunner::from_config(args.placement_config())?;
    let mut reports = Vec::with_capacity(args.scenarios.len());
    for path in &args.scenarios {
        let scenario = Scenario::from_path(path)?;
        let report = runner.run(&scenario);
        print_summary(&report);
        reports.push(report);
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&reports)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    let failed = reports.iter().filter(|report| !report.passed()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} scenarios failed", reports.len());
    }
    Ok(())
}

fn print_summary(report: &ScenarioReport) {
    let status = if report.passed() { "ok" } else { "FAILED" };
    println!(
        "{status:6} {} ({} placed, {} refused, {} ticks)",
        report.name, report.placed, report.refused, report.ticks.0
    );
    for failure in &report.failures {
        println!(
            "       step {} at {}: expected {}, found {}",
            failure.step, failure.pos, failure.expected, failure.actual
        );
    }
    if report.unsettled > 0 {
        println!("       {} settle(s) hit the step limit", report.unsettled);
    }
}
