//! # capm-cli
//!
//! Command-line interface for CAPM estimation over CSV price histories.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use capm::{
    BetaMethod, CapmAnalysis, CapmConfig, CapmEstimate, CapmEstimator, CapmReport, DateRange,
    Frequency,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod source;

use error::{CliError, CliResult};
use source::CsvPriceSource;

#[derive(Parser)]
#[command(name = "capm")]
#[command(about = "CAPM beta and expected return estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate beta, alpha and expected return for an asset
    Estimate(EstimateArgs),
}

#[derive(Args, Debug, Default)]
struct EstimateArgs {
    /// Wide CSV of closing prices: a date column, then one column per ticker
    #[arg(short, long)]
    prices: PathBuf,

    /// Asset ticker (column name)
    #[arg(short, long)]
    asset: String,

    /// Benchmark ticker (column name)
    #[arg(short, long, default_value = "^GSPC")]
    benchmark: String,

    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Annual risk-free rate as a decimal fraction
    #[arg(long, env = "CAPM_RISK_FREE_RATE")]
    risk_free_rate: Option<f64>,

    /// Periods per year used to annualize the market return
    #[arg(long)]
    annualization_factor: Option<f64>,

    /// Return frequency (weekly, monthly, quarterly)
    #[arg(short, long)]
    frequency: Option<Frequency>,

    /// Beta method (regression, covariance)
    #[arg(short, long)]
    method: Option<BetaMethod>,

    /// JSON configuration file, overridden by environment and flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the result as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include the per-period dataset table
    #[arg(long)]
    dataset: bool,
}

#[derive(Serialize)]
struct EstimateOutput<'a> {
    config: &'a CapmConfig,
    estimate: &'a CapmEstimate,
    report: &'a CapmReport,
}

fn load_config(path: &Path) -> CliResult<CapmConfig> {
    let file = File::open(path).map_err(|e| CliError::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Layer configuration: file, then environment, then flags.
fn resolve_config(args: &EstimateArgs) -> CliResult<CapmConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CapmConfig::default(),
    };

    if let Some(frequency) = args.frequency {
        config.frequency = frequency;
        config.annualization_factor = frequency.periods_per_year();
    }
    if let Some(factor) = args.annualization_factor {
        config.annualization_factor = factor;
    }
    if let Some(rate) = args.risk_free_rate {
        config.risk_free_rate = rate;
    }
    if let Some(method) = args.method {
        config.beta_method = method;
    }

    config.validate()?;
    Ok(config)
}

fn run_estimate(args: EstimateArgs) -> CliResult<()> {
    let config = resolve_config(&args)?;
    let range = DateRange::new(args.start, args.end)?;
    let source = CsvPriceSource::open(&args.prices)?;

    tracing::info!(
        asset = %args.asset,
        benchmark = %args.benchmark,
        rows = source.rows(),
        frequency = %config.frequency,
        "estimating CAPM"
    );

    let analysis = CapmEstimator::new(config)?.analyze_from_source(
        &source,
        &args.asset,
        &args.benchmark,
        &range,
    )?;
    let report = CapmReport::from_analysis(&analysis);

    print_summary(&analysis, &report);
    if args.dataset && args.output.is_none() {
        print_dataset(&report);
    }

    if let Some(path) = &args.output {
        let report = if args.dataset { report } else { report.without_rows() };
        write_json(path, &config, &analysis.estimate, &report)?;
        println!("\nResults written to {:?}", path);
    }

    Ok(())
}

fn print_summary(analysis: &CapmAnalysis, report: &CapmReport) {
    println!("{} vs {}", report.asset, report.benchmark);
    let dates = analysis.returns.dates();
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        println!("Period: {} to {}", first, last);
    }
    println!("{}", report.summary);
}

fn print_dataset(report: &CapmReport) {
    println!("\n{:<12} {:>10} {:>10} {:>10}", "date", "asset%", "market%", "capm%");
    for row in &report.rows {
        println!(
            "{:<12} {:>10.4} {:>10.4} {:>10.4}",
            row.date.to_string(),
            row.asset_return_pct,
            row.benchmark_return_pct,
            row.capm_line_pct
        );
    }
}

fn write_json(
    path: &Path,
    config: &CapmConfig,
    estimate: &CapmEstimate,
    report: &CapmReport,
) -> CliResult<()> {
    let file = File::create(path).map_err(|e| CliError::io(path, e))?;
    let output = EstimateOutput {
        config,
        estimate,
        report,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &output)?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "capm_cli=info,capm_core=info".into()),
        )
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Estimate(args) => run_estimate(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
