//! Salescope - Sales CSV summary and exploratory charts
//!
//! Loads a sales table, imputes missing numbers, prints descriptive
//! statistics and the average sales per region, and renders four charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use pipeline::{run, run_with_output, AnalysisSummary, MissingCount};
