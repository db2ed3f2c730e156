//! Run forecasts for one or more parameter files
//!
//! Writes monthly, yearly and expense-breakdown CSVs per scenario and prints
//! a yearly summary table.

use anyhow::{bail, Context, Result};
use clap::Parser;
use financial_forecast::{
    output::write_forecast,
    params::{load_overrides, load_parameters},
    projection::run_batch,
    ForecastParameters, ForecastResult,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_forecast", about = "Project 72 months of revenue, expenses and headcount")]
struct Args {
    /// Parameter file (JSON), repeatable; the reference scenario runs when none is given
    #[arg(short, long = "params", value_name = "FILE")]
    params: Vec<PathBuf>,

    /// Partial parameter update (JSON) applied to every scenario
    #[arg(long, value_name = "FILE")]
    overrides: Option<PathBuf>,

    /// Directory for CSV output
    #[arg(short, long, default_value = "forecast_output")]
    out_dir: PathBuf,

    /// Print the yearly table without writing CSV files
    #[arg(long)]
    summary_only: bool,
}

fn load_scenarios(args: &Args) -> Result<Vec<(String, ForecastParameters)>> {
    let mut scenarios = Vec::new();
    if args.params.is_empty() {
        scenarios.push(("reference".to_string(), ForecastParameters::reference()));
    }
    for path in &args.params {
        let params = load_parameters(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scenario".to_string());
        scenarios.push((name, params));
    }

    if let Some(path) = &args.overrides {
        let overrides = load_overrides(path)
            .with_context(|| format!("Failed to load overrides from {}", path.display()))?;
        for (name, params) in scenarios.iter_mut() {
            *params = overrides
                .apply_to(params)
                .with_context(|| format!("Overrides are invalid for scenario '{}'", name))?;
        }
    }
    Ok(scenarios)
}

fn print_summary(name: &str, result: &ForecastResult) {
    println!("\nScenario: {}", name);
    println!(
        "{:<6} {:>14} {:>14} {:>14} {:>10} {:>10} {:>6}",
        "Year", "Income", "Expenses", "EBITDA", "Clients", "Paying", "Staff"
    );
    for y in &result.yearly {
        println!(
            "{:<6} {:>14.2} {:>14.2} {:>14.2} {:>10.0} {:>10.0} {:>6}",
            y.year, y.income, y.expenses, y.ebitda, y.client_count, y.paying_clients, y.total_staff
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let scenarios = load_scenarios(&args)?;
    println!("Running {} scenario(s)...", scenarios.len());

    let outcomes = run_batch(&scenarios);

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => {
                print_summary(&outcome.name, result);
                if !args.summary_only {
                    write_forecast(&args.out_dir, &outcome.name, result).with_context(|| {
                        format!("Failed to write output for scenario '{}'", outcome.name)
                    })?;
                }
            }
            Err(e) => {
                eprintln!("Scenario '{}' failed: {}", outcome.name, e);
                failed += 1;
            }
        }
    }

    if !args.summary_only {
        println!("\nOutput written to {}", args.out_dir.display());
    }
    println!("Total time: {:?}", start.elapsed());

    if failed > 0 {
        bail!("{} of {} scenarios failed", failed, outcomes.len());
    }
    Ok(())
}
