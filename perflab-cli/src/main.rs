//! PerfLab CLI: performance analysis of backtest result files.
//!
//! Commands:
//! - `analyze`: compute return, risk, ratio and trade metrics for one or more results
//! - `weights`: print the allocation weights history of a result
//!
//! Logs go to stderr (filter with `RUST_LOG`, default `perflab=info`); reports
//! go to stdout.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use perflab_core::{extract_weights_history, WeightsPoint};
use perflab_runner::reporting::report_file_name;
use perflab_runner::{
    load_result, write_report_json, AnalysisConfig, AnalysisRun, Analyzer, TextReport,
};

#[derive(Parser)]
#[command(
    name = "perflab",
    version,
    about = "PerfLab CLI: backtest performance analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute performance metrics for backtest result files.
    Analyze {
        /// Result JSON files to analyze (processed in parallel).
        #[arg(required = true)]
        results: Vec<PathBuf>,

        /// Path to a TOML analysis config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Annual risk-free rate (overrides the config file).
        #[arg(long)]
        risk_free_rate: Option<f64>,

        /// Output format on stdout.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write `<stem>.metrics.json` for each result into this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the allocation weights history of a result file.
    Weights {
        /// Result JSON file.
        result: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            results,
            config,
            risk_free_rate,
            format,
            output_dir,
        } => run_analyze(&results, config.as_deref(), risk_free_rate, format, output_dir.as_deref()),
        Commands::Weights { result } => run_weights(&result),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perflab=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_analyze(
    results: &[PathBuf],
    config_path: Option<&Path>,
    risk_free_rate: Option<f64>,
    format: OutputFormat,
    output_dir: Option<&Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    }
    .with_risk_free_rate(risk_free_rate)?;

    let analyzer = Analyzer::new(config.engine());
    info!(
        files = results.len(),
        risk_free_rate = analyzer.engine().risk_free_rate(),
        "analyzing results"
    );

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for outcome in analyzer.analyze_files(results) {
        match outcome {
            Ok(run) => reports.push(run),
            Err(err) => {
                failures += 1;
                warn!("{err}");
                eprintln!("Error: {err}");
            }
        }
    }

    match format {
        OutputFormat::Text => {
            for run in &reports {
                let header = TextReport::with_source(&run.path.display().to_string(), &run.source_hash);
                print!("{}", header.render(&run.report));
            }
        }
        OutputFormat::Json => println!("{}", render_json(&reports)?),
    }

    if let Some(dir) = output_dir {
        for run in &reports {
            let path = dir.join(report_file_name(&run.path));
            write_report_json(&path, &run.report)?;
            info!(path = %path.display(), "report written");
        }
    }

    if failures > 0 {
        bail!("{failures} of {} result files could not be analyzed", results.len());
    }
    Ok(())
}

/// One file prints its flat report; several print an object keyed by path.
fn render_json(reports: &[AnalysisRun]) -> Result<String> {
    let json = if let [single] = reports {
        serde_json::to_string_pretty(&single.report)
    } else {
        let by_path: serde_json::Map<String, serde_json::Value> = reports
            .iter()
            .map(|run| {
                serde_json::to_value(&run.report).map(|v| (run.path.display().to_string(), v))
            })
            .collect::<Result<_, _>>()?;
        serde_json::to_string_pretty(&by_path)
    };
    json.context("Failed to serialize metric reports")
}

fn run_weights(path: &Path) -> Result<()> {
    let loaded = load_result(path)?;
    let history = extract_weights_history(&loaded.raw);
    if history.is_empty() {
        println!("No weights recorded in {}", path.display());
        return Ok(());
    }
    print_weights(&history);
    Ok(())
}

fn print_weights(history: &[WeightsPoint]) {
    let symbols: BTreeSet<&str> = history
        .iter()
        .flat_map(|p| p.weights.keys().map(String::as_str))
        .collect();

    print!("{:<20}", "Timestamp");
    for sym in &symbols {
        print!("{sym:>10}");
    }
    println!();

    for point in history {
        print!("{:<20}", point.timestamp.format("%Y-%m-%d %H:%M:%S"));
        for sym in &symbols {
            match point.weights.get(*sym) {
                Some(w) => print!("{:>9.2}%", w * 100.0),
                None => print!("{:>10}", "-"),
            }
        }
        println!();
    }
}
