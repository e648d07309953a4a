//! Statistics Calculator Module
//! Descriptive statistics for the numeric columns of a sales table.

use crate::data::{SalesTable, TableError};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Descriptive statistics for a single numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl ColumnSummary {
    /// Row labels and values in `describe()` order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.median),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Sample standard deviation; NaN for a single value.
        let std = if n > 1 { values.iter().std_dev() } else { f64::NAN };

        ColumnSummary {
            column: String::new(),
            count: n,
            mean: values.iter().mean(),
            std,
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Summarise every numeric column in parallel, returned in table order.
    ///
    /// Missing cells are excluded from each column's statistics.
    pub fn describe(table: &SalesTable) -> Result<Vec<ColumnSummary>, TableError> {
        let columns = table.get_numeric_columns();

        columns
            .par_iter()
            .map(|name| -> Result<ColumnSummary, TableError> {
                let values: Vec<f64> = table.f64_values(name)?.into_iter().flatten().collect();
                let mut summary = Self::compute_descriptive_stats(&values);
                summary.column = name.clone();
                Ok(summary)
            })
            .collect()
    }
}
