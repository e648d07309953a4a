//! Analysis Pipeline
//! load → inspect → clean → describe → group → report → parse dates → charts
//!
//! The table is moved through each stage that changes it and borrowed by the
//! stages that only read it.

use crate::charts::{ChartOptions, ChartRenderer};
use crate::config::AnalysisConfig;
use crate::data::{CleaningReport, DataLoader, DataProcessor};
use crate::error::AnalysisError;
use crate::report::{Inspector, Reporter};
use crate::stats::{ColumnSummary, RegionAggregate, RegionMean, StatsCalculator};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Missing cells in one column as loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Everything a run computed, also written as JSON with `--summary`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub source: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub missing_before_cleaning: Vec<MissingCount>,
    pub cleaning: CleaningReport,
    pub descriptive: Vec<ColumnSummary>,
    pub region_means: Vec<RegionMean>,
    pub top_region: Option<RegionMean>,
    pub charts: Vec<PathBuf>,
}

/// Run the full analysis, printing the report to stdout.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisSummary, AnalysisError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

/// Run the full analysis, printing the report to `out`.
pub fn run_with_output<W: Write>(
    config: &AnalysisConfig,
    out: &mut W,
) -> Result<AnalysisSummary, AnalysisError> {
    let table = DataLoader::load_csv(&config.input)?;
    writeln!(out, "Dataset loaded successfully!")?;
    writeln!(out)?;

    Inspector::write_preview(out, &table, config.head_rows)?;
    writeln!(out)?;
    Inspector::write_info(out, &table)?;
    writeln!(out)?;
    let missing = table.get_null_counts();
    Inspector::write_missing(out, &missing)?;
    writeln!(out)?;

    let (table, cleaning) = DataProcessor::fill_numeric_means(table)?;

    let descriptive = StatsCalculator::describe(&table)?;
    Inspector::write_describe(out, &descriptive)?;
    writeln!(out)?;

    let aggregate = RegionAggregate::from_table(&table)?;
    info!(regions = aggregate.len(), "grouped by region");
    Reporter::write_region_means(out, &aggregate)?;
    writeln!(out)?;
    Reporter::write_insight(out, &aggregate)?;

    let table = DataProcessor::parse_dates(table)?;

    let charts = if config.render_charts {
        let options = ChartOptions {
            output_dir: config.output_dir.clone(),
            bins: config.histogram_bins,
            show: config.show_charts,
        };
        let written = ChartRenderer::render_all(&table, &aggregate, &options)?;
        writeln!(out)?;
        writeln!(out, "Charts written:")?;
        for path in &written {
            writeln!(out, "  {}", path.display())?;
        }
        written
    } else {
        info!("chart rendering disabled");
        Vec::new()
    };

    let summary = AnalysisSummary {
        source: table.source().to_path_buf(),
        rows: table.get_row_count(),
        columns: table.get_columns(),
        missing_before_cleaning: missing
            .into_iter()
            .map(|(column, missing)| MissingCount { column, missing })
            .collect(),
        cleaning,
        descriptive,
        region_means: aggregate.entries().to_vec(),
        top_region: aggregate.top_region().cloned(),
        charts,
    };

    if let Some(path) = &config.summary_path {
        write_summary(&summary, path)?;
        info!(path = %path.display(), "summary written");
    }

    Ok(summary)
}

fn write_summary(summary: &AnalysisSummary, path: &Path) -> Result<(), AnalysisError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush()?;
    Ok(())
}
