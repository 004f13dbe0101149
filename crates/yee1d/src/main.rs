//! yee1d-run: run a 1D FDTD scenario and write the report as JSON

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use yee1d::{Boundary, ScenarioConfig};

#[derive(Parser, Debug)]
#[command(name = "yee1d-run")]
#[command(about = "Run a one-dimensional Yee FDTD scenario")]
#[command(version)]
struct Args {
    /// Scenario JSON file (built-in pulse-in-cavity scenario when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON report
    #[arg(short, long, default_value = "report.json")]
    output: PathBuf,

    /// Override the final simulated time
    #[arg(long)]
    final_time: Option<f64>,

    /// Override the time step with a Courant number
    #[arg(long)]
    courant: Option<f64>,

    /// Override the left boundary (pec, pmc, mur, periodic)
    #[arg(long)]
    left: Option<Boundary>,

    /// Override the right boundary (pec, pmc, mur, periodic)
    #[arg(long)]
    right: Option<Boundary>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    /// Print the report to stdout instead of a file
    #[arg(long)]
    stdout: bool,
}

fn load_config(args: &Args) -> Result<ScenarioConfig> {
    let mut config = match &args.config {
        Some(path) => ScenarioConfig::from_path(path)
            .with_context(|| format!("Failed to load scenario: {:?}", path))?,
        None => ScenarioConfig::default(),
    };

    if let Some(final_time) = args.final_time {
        config.time.final_time = final_time;
    }
    if let Some(courant) = args.courant {
        config.time.courant = Some(courant);
        config.time.dt = None;
    }
    if let Some(left) = args.left {
        config.boundaries.left = left;
    }
    if let Some(right) = args.right {
        config.boundaries.right = right;
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Logs go to stderr so --stdout output stays clean JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let scenario = config.build().context("Invalid scenario")?;
    let report = scenario.run().context("Simulation failed")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    if args.stdout {
        println!("{}", json);
    } else {
        fs::write(&args.output, &json)
            .with_context(|| format!("Failed to write report: {:?}", args.output))?;
        info!(
            steps = report.steps,
            time = report.time,
            path = ?args.output,
            "wrote report"
        );
    }

    Ok(())
}
