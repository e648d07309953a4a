//! Console Report Module
//! Human-readable output for the inspection and aggregation stages.

use crate::data::{SalesTable, REGION};
use crate::stats::{ColumnSummary, RegionAggregate, RegionMean};
use std::io::{self, Write};

/// Prints what the loaded table looks like. Never mutates it.
pub struct Inspector;

impl Inspector {
    pub fn write_preview<W: Write>(out: &mut W, table: &SalesTable, rows: usize) -> io::Result<()> {
        writeln!(out, "First {} rows of the dataset:", rows)?;
        writeln!(out, "{}", table.head(rows))
    }

    /// Entry count plus per-column non-null count and dtype.
    pub fn write_info<W: Write>(out: &mut W, table: &SalesTable) -> io::Result<()> {
        let rows = table.get_row_count();
        let schema = table.get_schema();
        let nulls = table.get_null_counts();
        let width = name_width(schema.iter().map(|(name, _)| name.as_str()));

        writeln!(out, "Dataset Info:")?;
        writeln!(out, "{} entries, {} columns", rows, schema.len())?;
        writeln!(out, " #  {:<width$}  {:>14}  Dtype", "Column", "Non-Null Count")?;
        for (i, ((name, dtype), (_, missing))) in schema.iter().zip(&nulls).enumerate() {
            let non_null = format!("{} non-null", rows - missing);
            writeln!(out, "{:>2}  {:<width$}  {:>14}  {}", i, name, non_null, dtype)?;
        }
        Ok(())
    }

    pub fn write_missing<W: Write>(out: &mut W, counts: &[(String, usize)]) -> io::Result<()> {
        let width = name_width(counts.iter().map(|(name, _)| name.as_str()));
        writeln!(out, "Missing Values:")?;
        for (name, count) in counts {
            writeln!(out, "{:<width$}  {:>6}", name, count)?;
        }
        Ok(())
    }

    /// Statistics laid out with one column per numeric field, one row per statistic.
    pub fn write_describe<W: Write>(out: &mut W, summaries: &[ColumnSummary]) -> io::Result<()> {
        writeln!(out, "Descriptive Statistics:")?;
        if summaries.is_empty() {
            return writeln!(out, "(no numeric columns)");
        }

        let widths: Vec<usize> = summaries.iter().map(|s| s.column.len().max(12)).collect();

        write!(out, "{:<6}", "")?;
        for (s, w) in summaries.iter().zip(&widths) {
            write!(out, "  {:>w$}", s.column, w = *w)?;
        }
        writeln!(out)?;

        let rows: Vec<_> = summaries.iter().map(ColumnSummary::rows).collect();
        for r in 0..rows[0].len() {
            write!(out, "{:<6}", rows[0][r].0)?;
            for (row, w) in rows.iter().zip(&widths) {
                write!(out, "  {:>w$.6}", row[r].1, w = *w)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Prints the grouped aggregate and the headline insight.
pub struct Reporter;

impl Reporter {
    pub fn write_region_means<W: Write>(out: &mut W, aggregate: &RegionAggregate) -> io::Result<()> {
        writeln!(out, "Average Total Sales by Region:")?;
        let width = name_width(aggregate.regions().into_iter().chain([REGION]));
        writeln!(out, "{:<width$}", REGION)?;
        for entry in aggregate.entries() {
            writeln!(out, "{:<width$}  {:>14.6}", entry.region, entry.mean)?;
        }
        Ok(())
    }

    pub fn write_insight<W: Write>(out: &mut W, aggregate: &RegionAggregate) -> io::Result<()> {
        writeln!(out, "Insight: Highest average sales region:")?;
        match aggregate.top_region() {
            Some(top) => writeln!(out, "{}", Self::insight_line(top)),
            None => writeln!(out, "No region has any sales values."),
        }
    }

    pub fn insight_line(top: &RegionMean) -> String {
        format!("{} with average sales of {:.2}", top.region, top.mean)
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0).max(6)
}
