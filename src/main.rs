use analyzer::Analyzer;
use analyzer::error::AnalyzerError;
use anyhow::Context;
use api_client::TradierClient;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::{BenchmarkPreset, Config, exclude_symbol, select_benchmarks};
use core_types::Interval;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod progress;
mod report;

use progress::ProgressProvider;

/// The main entry point for the benchmark comparison tool.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load TRADIER_API_TOKEN and friends from a .env file if there is one.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, cli.config).await,
        Commands::Benchmarks => {
            let config = load_config(cli.config)?;
            handle_benchmarks(&config);
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Alpha and beta of a stock against a basket of benchmarks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute alpha and beta of a symbol against a benchmark set.
    Analyze(AnalyzeArgs),
    /// List the available benchmark sets.
    Benchmarks,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The symbol to analyze (e.g., "AAPL").
    #[arg(long)]
    symbol: String,

    /// Index of the benchmark set; unknown indices use the common set.
    #[arg(long, default_value_t = BenchmarkPreset::FALLBACK.index())]
    set: usize,

    /// Overrides the configured start date (format: YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Overrides the configured risk-free rate, in decimal form.
    #[arg(long)]
    rfr: Option<f64>,

    /// Overrides the configured interval (daily, weekly, monthly).
    #[arg(long)]
    interval: Option<Interval>,

    /// Also write the chart data (labels, betas, alphas, colors, extrema) as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    analytics::parse_start_date(raw).map_err(|e| e.to_string())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => configuration::load_config_from(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => configuration::load_config().context("Failed to load configuration")?,
    };
    Ok(config)
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_benchmarks(config: &Config) {
    println!("Available benchmarks for comparison: ");
    for preset in BenchmarkPreset::ALL {
        println!("{}", preset);
        for (label, ticker) in preset.benchmarks(&config.benchmarks.custom) {
            println!("    {:<14} {}", label, ticker);
        }
    }
}

/// Handles the orchestration of one comparison session.
async fn handle_analyze(args: AnalyzeArgs, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(start) = args.start {
        config.analysis.start_date = start;
    }
    if let Some(rfr) = args.rfr {
        config.analysis.risk_free_rate = rfr;
    }
    if let Some(interval) = args.interval {
        config.analysis.interval = interval;
    }
    config.validate()?;

    let symbol = args.symbol.trim().to_uppercase();
    let (preset, benchmarks) = select_benchmarks(args.set, &config.benchmarks.custom);
    let benchmarks = exclude_symbol(benchmarks, &symbol);
    tracing::info!(preset = preset.description(), count = benchmarks.len(), "Benchmark set selected.");

    let years = analytics::years_since(config.analysis.start_date);
    tracing::info!(start = %config.analysis.start_date, years, "Annualization window computed.");

    let token = config.api.resolve_token()?;
    let client = TradierClient::new(&config.api, &token)?;
    let analyzer = Analyzer::new(&config.analysis, years);

    let instrument = analyzer.load_instrument(&client, &symbol).await?;
    report::print_summary(&instrument.summary());

    let progress = ProgressProvider::new(&client, benchmarks.len() as u64)?;
    let comparison = match analyzer.compare(&progress, &instrument, &benchmarks).await {
        Ok(comparison) => comparison,
        Err(AnalyzerError::EmptyInput) => {
            progress.finish();
            println!("No benchmark data could be analyzed for {}. No chart produced.", symbol);
            return Err(AnalyzerError::EmptyInput.into());
        }
        Err(e) => return Err(e.into()),
    };
    progress.finish();

    report::print_dropped(&comparison);
    println!("Benchmark Correlations for {}", symbol);
    println!("{}", report::comparison_table(&comparison));

    if let Some(path) = args.json {
        let chart = report::ChartData::new(&symbol, &comparison);
        report::write_json(&path, &chart)
            .with_context(|| format!("Failed to write chart data to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Chart data written.");
    }

    Ok(())
}
