//! Top-level error for an analysis run.

use crate::charts::ChartError;
use crate::data::{LoaderError, ProcessorError, TableError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Data error: {0}")]
    Table(#[from] TableError),
    #[error("Cleaning failed: {0}")]
    Process(#[from] ProcessorError),
    #[error("Chart rendering failed: {0}")]
    Chart(#[from] ChartError),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write summary: {0}")]
    Summary(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Whether this is the one expected failure: the input file is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AnalysisError::Load(LoaderError::NotFound(_)))
    }
}
