//! Analysis settings.

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "sales_data.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "charts";
pub const DEFAULT_BINS: usize = 15;
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Everything one analysis run needs to know.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub histogram_bins: usize,
    pub head_rows: usize,
    pub render_charts: bool,
    pub show_charts: bool,
    /// Write a JSON summary here when set.
    pub summary_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            histogram_bins: DEFAULT_BINS,
            head_rows: DEFAULT_HEAD_ROWS,
            render_charts: true,
            show_charts: false,
            summary_path: None,
        }
    }
}

impl AnalysisConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    pub fn with_head_rows(mut self, rows: usize) -> Self {
        self.head_rows = rows;
        self
    }

    pub fn with_charts(mut self, render: bool) -> Self {
        self.render_charts = render;
        self
    }

    pub fn with_show_charts(mut self, show: bool) -> Self {
        self.show_charts = show;
        self
    }

    pub fn with_summary_path(mut self, path: Option<PathBuf>) -> Self {
        self.summary_path = path;
        self
    }
}
