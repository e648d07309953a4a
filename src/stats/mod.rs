//! Stats module - Descriptive statistics and grouped aggregates

mod aggregate;
mod calculator;

pub use aggregate::{RegionAggregate, RegionMean};
pub use calculator::{ColumnSummary, StatsCalculator};
