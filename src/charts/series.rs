//! Chart Series Module
//! Turns the cleaned sales table into the point sets each chart draws.

use crate::data::{SalesTable, TableError, DATE, QUANTITY, REGION, TOTAL_SALES};
use crate::stats::RegionAggregate;
use chrono::NaiveDate;
use std::collections::HashMap;

/// One fixed-width histogram bin. `end` is exclusive except for the last bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Scatter points for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPoints {
    pub region: String,
    /// Index of the region in the aggregate, used for colour.
    pub index: usize,
    pub points: Vec<(f64, f64)>,
}

/// `(date, total)` pairs sorted ascending by date.
///
/// Rows without a date or total are skipped; rows sharing a date keep file order.
pub fn sales_over_time(table: &SalesTable) -> Result<Vec<(NaiveDate, f64)>, TableError> {
    let dates = table.date_values(DATE)?;
    let totals = table.f64_values(TOTAL_SALES)?;

    let mut series: Vec<(NaiveDate, f64)> = dates
        .into_iter()
        .zip(totals)
        .filter_map(|(d, v)| Some((d?, v?)))
        .collect();
    series.sort_by_key(|(d, _)| *d);
    Ok(series)
}

/// Split `values` into `bins` equal-width bins spanning their range.
///
/// A constant sample is widened to `[v - 0.5, v + 0.5]`; an empty one spans
/// `[0, 1]`. Non-finite values are ignored. Returns `None` when `bins == 0`.
pub fn histogram_bins(values: &[f64], bins: usize) -> Option<Vec<HistogramBin>> {
    if bins == 0 {
        return None;
    }

    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let (mut lo, mut hi) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if finite.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == bins { hi } else { lo + (i + 1) as f64 * width },
                count,
            })
            .collect(),
    )
}

/// `(quantity, total)` points grouped by region, in aggregate order.
///
/// Rows missing a region, quantity or total are skipped, as are regions the
/// aggregate does not know.
pub fn quantity_vs_sales(
    table: &SalesTable,
    aggregate: &RegionAggregate,
) -> Result<Vec<RegionPoints>, TableError> {
    let regions = table.str_values(REGION)?;
    let quantities = table.f64_values(QUANTITY)?;
    let totals = table.f64_values(TOTAL_SALES)?;

    let mut by_region: HashMap<String, Vec<(f64, f64)>> = HashMap::new();
    for ((region, q), t) in regions.into_iter().zip(quantities).zip(totals) {
        if let (Some(region), Some(q), Some(t)) = (region, q, t) {
            by_region.entry(region).or_default().push((q, t));
        }
    }

    let groups = aggregate
        .regions()
        .into_iter()
        .enumerate()
        .filter_map(|(index, region)| {
            by_region.remove(region).map(|points| RegionPoints {
                region: region.to_string(),
                index,
                points,
            })
        })
        .collect();
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn parsed_table() -> SalesTable {
        let df = df!(
            DATE => [Some("2024-01-03"), Some("2024-01-01"), None, Some("2024-01-02")],
            REGION => [Some("East"), Some("West"), Some("East"), None],
            QUANTITY => [1.0, 3.0, 2.0, 5.0],
            TOTAL_SALES => [50.0, 150.0, 100.0, 70.0]
        )
        .unwrap();
        DataProcessor::parse_dates(SalesTable::new(df, "memory.csv")).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn time_series_is_sorted_and_skips_missing_dates() {
        let series = sales_over_time(&parsed_table()).unwrap();
        assert_eq!(
            series,
            vec![
                (ymd(2024, 1, 1), 150.0),
                (ymd(2024, 1, 2), 70.0),
                (ymd(2024, 1, 3), 50.0),
            ]
        );
    }

    #[test]
    fn histogram_uses_fixed_width_bins() {
        let values: Vec<f64> = (0..=30).map(f64::from).collect();
        let bins = histogram_bins(&values, 15).unwrap();

        assert_eq!(bins.len(), 15);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[14].end, 30.0);
        assert!(bins.iter().all(|b| (b.end - b.start - 2.0).abs() < 1e-9));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // The maximum lands in the last, right-closed bin.
        assert_eq!(bins[14].count, 3);
    }

    #[test]
    fn histogram_of_constant_sample_is_centred() {
        let bins = histogram_bins(&[5.0, 5.0], 2).unwrap();
        assert_eq!(bins[0].start, 4.5);
        assert_eq!(bins[1].end, 5.5);
        assert_eq!(bins[1].count, 2);
    }

    #[test]
    fn histogram_of_nothing_is_empty_unit_range() {
        let bins = histogram_bins(&[], 4).unwrap();
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[3].end, 1.0);
        assert!(bins.iter().all(|b| b.count == 0));
        assert!(histogram_bins(&[1.0], 0).is_none());
    }

    #[test]
    fn scatter_groups_follow_aggregate_order() {
        let table = parsed_table();
        let aggregate = RegionAggregate::from_table(&table).unwrap();
        let groups = quantity_vs_sales(&table, &aggregate).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].region, "East");
        assert_eq!(groups[0].index, 0);
        assert_eq!(groups[0].points, vec![(1.0, 50.0), (2.0, 100.0)]);
        assert_eq!(groups[1].region, "West");
        assert_eq!(groups[1].points, vec![(3.0, 150.0)]);
    }
}
