//! Data Processor Module
//! Handles data cleaning (mean imputation) and date parsing.

use crate::data::table::{date_to_days, SalesTable, TableError, DATE};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Date-only layouts tried in order.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Date-time layouts tried after the date-only ones; the time part is dropped.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("Row {row}: cannot parse '{value}' as a date")]
    InvalidDate { row: usize, value: String },
}

/// One numeric column whose missing cells were filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputedColumn {
    pub column: String,
    pub filled: usize,
    pub mean: f64,
}

/// What the cleaning pass changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub imputed: Vec<ImputedColumn>,
    /// Numeric columns left as-is because they had no values to average.
    pub skipped: Vec<String>,
}

impl CleaningReport {
    pub fn total_filled(&self) -> usize {
        self.imputed.iter().map(|c| c.filled).sum()
    }
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Fill missing values in every numeric column with that column's mean.
    ///
    /// Both nulls and `NaN` cells count as missing.
    /// Non-numeric columns are left untouched, including their nulls. Integer
    /// columns that needed filling come back as `Float64`.
    pub fn fill_numeric_means(
        mut table: SalesTable,
    ) -> Result<(SalesTable, CleaningReport), ProcessorError> {
        let mut report = CleaningReport::default();

        for name in table.get_numeric_columns() {
            let values = table.f64_values(&name)?;
            let missing = values.iter().filter(|v| is_missing(**v)).count();
            if missing == 0 {
                continue;
            }

            let present: Vec<f64> = values
                .iter()
                .flatten()
                .copied()
                .filter(|v| !v.is_nan())
                .collect();
            if present.is_empty() {
                warn!(column = %name, "numeric column has no values to average, leaving nulls");
                report.skipped.push(name);
                continue;
            }

            let mean = present.iter().mean();
            let filled: Vec<f64> = values
                .iter()
                .map(|v| match v {
                    Some(x) if !x.is_nan() => *x,
                    _ => mean,
                })
                .collect();
            table.replace_column(Column::new(name.as_str().into(), filled))?;

            debug!(column = %name, missing, mean, "imputed column mean");
            report.imputed.push(ImputedColumn {
                column: name,
                filled: missing,
                mean,
            });
        }

        info!(filled = report.total_filled(), "numeric cleaning complete");
        Ok((table, report))
    }

    /// Convert the `Date` column to a Polars `Date` column.
    ///
    /// Nulls and blank cells become null; any other value that matches no known layout is an error.
    pub fn parse_dates(mut table: SalesTable) -> Result<SalesTable, ProcessorError> {
        if table.dtype(DATE)? == DataType::Date {
            return Ok(table);
        }

        let raw = table.str_values(DATE)?;
        let mut days: Vec<Option<i32>> = Vec::with_capacity(raw.len());
        for (row, value) in raw.into_iter().enumerate() {
            match value {
                None => days.push(None),
                Some(text) if text.trim().is_empty() => days.push(None),
                Some(text) => {
                    let date = parse_date(&text)
                        .ok_or(ProcessorError::InvalidDate { row, value: text })?;
                    days.push(Some(date_to_days(date)));
                }
            }
        }

        let parsed = Column::new(DATE.into(), days).cast(&DataType::Date)?;
        table.replace_column(parsed)?;
        debug!("date column parsed");
        Ok(table)
    }
}

fn is_missing(value: Option<f64>) -> bool {
    value.map_or(true, f64::is_nan)
}

/// Parse one date cell, trying each supported layout.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
