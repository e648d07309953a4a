//! Sales Table Module
//! Wraps the Polars DataFrame holding the loaded sales rows.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATE: &str = "Date";
pub const REGION: &str = "Region";
pub const QUANTITY: &str = "Quantity";
pub const TOTAL_SALES: &str = "Total_Sales";

/// Columns every sales file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE, REGION, QUANTITY, TOTAL_SALES];

/// Required columns that must hold numbers.
pub const NUMERIC_COLUMNS: [&str; 2] = [QUANTITY, TOTAL_SALES];

/// Days between 0001-01-01 (day 1) and the Unix epoch, as used by Polars `Date`.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{column}' has type {dtype}, expected a parsed date")]
    NotADate { column: String, dtype: String },
}

/// In-memory sales dataset, threaded by value through the analysis stages.
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
    source: PathBuf,
}

impl SalesTable {
    pub fn new(df: DataFrame, source: impl Into<PathBuf>) -> Self {
        Self {
            df,
            source: source.into(),
        }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Path the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn get_row_count(&self) -> usize {
        self.df.height()
    }

    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get list of numeric column names, in table order.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|col| is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Column name and dtype, in table order.
    pub fn get_schema(&self) -> Vec<(String, String)> {
        self.df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.dtype().to_string()))
            .collect()
    }

    /// Missing-value count per column, in table order.
    pub fn get_null_counts(&self) -> Vec<(String, usize)> {
        self.df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }

    pub fn null_count(&self, column: &str) -> Result<usize, TableError> {
        Ok(self.df.column(column)?.null_count())
    }

    pub fn dtype(&self, column: &str) -> Result<DataType, TableError> {
        Ok(self.df.column(column)?.dtype().clone())
    }

    /// Column values as `f64`, with nulls preserved.
    pub fn f64_values(&self, column: &str) -> Result<Vec<Option<f64>>, TableError> {
        let as_f64 = self.df.column(column)?.cast(&DataType::Float64)?;
        let values = as_f64.f64()?.into_iter().collect();
        Ok(values)
    }

    /// Column values rendered as strings, with nulls preserved.
    pub fn str_values(&self, column: &str) -> Result<Vec<Option<String>>, TableError> {
        let as_str = self.df.column(column)?.cast(&DataType::String)?;
        let values = as_str
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }

    /// Values of a column that has already been parsed to `Date`.
    pub fn date_values(&self, column: &str) -> Result<Vec<Option<NaiveDate>>, TableError> {
        let col = self.df.column(column)?;
        if col.dtype() != &DataType::Date {
            return Err(TableError::NotADate {
                column: column.to_string(),
                dtype: col.dtype().to_string(),
            });
        }

        let days = col.cast(&DataType::Int32)?;
        let values = days
            .i32()?
            .into_iter()
            .map(|d| d.and_then(days_to_date))
            .collect();
        Ok(values)
    }

    /// Replace (or append) a column, keeping its position when it already exists.
    pub(crate) fn replace_column(&mut self, column: Column) -> Result<(), TableError> {
        self.df.with_column(column)?;
        Ok(())
    }

    /// Preview of the first `n` rows.
    pub fn head(&self, n: usize) -> DataFrame {
        self.df.head(Some(n))
    }
}

/// Whether a dtype counts as numeric for inspection and imputation.
pub fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

pub(crate) fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

pub(crate) fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}
