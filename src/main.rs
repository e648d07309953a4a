//! Salescope - Sales CSV Summary & Exploratory Charts
//!
//! Command-line entry point.

use anyhow::{Context, Result};
use clap::Parser;
use salescope::config::{DEFAULT_BINS, DEFAULT_HEAD_ROWS, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR};
use salescope::AnalysisConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Summarise a sales CSV and render exploratory charts",
    long_about = "Loads a sales CSV with Date, Region, Quantity and Total_Sales columns, \
                  fills missing numbers with column means, prints descriptive statistics \
                  and average sales per region, then writes four PNG charts.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG    Overrides --log-level (e.g. RUST_LOG=salescope=debug)"
)]
struct Args {
    /// Path to the sales CSV file
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory the chart images are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Number of histogram bins
    #[arg(long, default_value_t = DEFAULT_BINS as u64, value_parser = clap::value_parser!(u64).range(1..))]
    bins: u64,

    /// Rows shown in the preview
    #[arg(long, default_value_t = DEFAULT_HEAD_ROWS)]
    head: usize,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Open each chart with the system image viewer after writing it
    #[arg(long)]
    show: bool,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber. Logs go to stderr so the report on
/// stdout stays readable.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "error" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    let config = AnalysisConfig::new(args.input)
        .with_output_dir(args.output_dir)
        .with_histogram_bins(args.bins as usize)
        .with_head_rows(args.head)
        .with_charts(!args.no_charts)
        .with_show_charts(args.show)
        .with_summary_path(args.summary);

    match salescope::run(&config) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is_not_found() => {
            eprintln!("Error: {err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).with_context(|| format!("analysis of {} failed", config.input.display())),
    }
}
