//! Region Aggregate Module
//! Mean total sales per region and the best-performing region.

use crate::data::{SalesTable, TableError, REGION, TOTAL_SALES};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean `Total_Sales` for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMean {
    pub region: String,
    pub mean: f64,
    /// Rows that contributed a value to the mean.
    pub count: usize,
}

/// Grouped aggregate, ordered by region name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionAggregate {
    entries: Vec<RegionMean>,
}

impl RegionAggregate {
    /// Group the table by `Region` and average `Total_Sales`.
    pub fn from_table(table: &SalesTable) -> Result<Self, TableError> {
        let regions = table.str_values(REGION)?;
        let totals = table.f64_values(TOTAL_SALES)?;
        Ok(Self::from_rows(regions.into_iter().zip(totals)))
    }

    /// Build the aggregate from `(region, total)` pairs.
    ///
    /// Rows without a region are dropped. A region whose totals are all missing
    /// still gets an entry, with a `NaN` mean.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, Option<f64>)>,
    {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for (region, total) in rows {
            let Some(region) = region else {
                continue;
            };
            let entry = sums.entry(region).or_insert((0.0, 0));
            if let Some(v) = total {
                entry.0 += v;
                entry.1 += 1;
            }
        }

        let entries = sums
            .into_iter()
            .map(|(region, (sum, count))| RegionMean {
                region,
                mean: if count == 0 { f64::NAN } else { sum / count as f64 },
                count,
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[RegionMean] {
        &self.entries
    }

    pub fn regions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.region.as_str()).collect()
    }

    pub fn get(&self, region: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.region == region)
            .map(|e| e.mean)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Region with the highest mean; ties go to the first in aggregate order.
    pub fn top_region(&self) -> Option<&RegionMean> {
        self.entries
            .iter()
            .filter(|e| !e.mean.is_nan())
            .fold(None, |best: Option<&RegionMean>, e| match best {
                Some(b) if b.mean >= e.mean => Some(b),
                _ => Some(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(region: Option<&str>, total: Option<f64>) -> (Option<String>, Option<f64>) {
        (region.map(str::to_string), total)
    }

    #[test]
    fn means_per_region_in_key_order() {
        let agg = RegionAggregate::from_rows([
            row(Some("West"), Some(150.0)),
            row(Some("East"), Some(100.0)),
            row(Some("East"), Some(50.0)),
        ]);
        assert_eq!(agg.regions(), vec!["East", "West"]);
        assert_eq!(agg.get("East"), Some(75.0));
        assert_eq!(agg.get("West"), Some(150.0));
        assert_eq!(agg.entries()[0].count, 2);
    }

    #[test]
    fn top_region_is_arg_max() {
        let agg = RegionAggregate::from_rows([
            row(Some("East"), Some(100.0)),
            row(Some("West"), Some(150.0)),
            row(Some("East"), Some(50.0)),
        ]);
        let top = agg.top_region().unwrap();
        assert_eq!(top.region, "West");
        assert_eq!(format!("{:.2}", top.mean), "150.00");
    }

    #[test]
    fn ties_resolve_to_first_key() {
        let agg = RegionAggregate::from_rows([
            row(Some("North"), Some(10.0)),
            row(Some("Central"), Some(10.0)),
            row(Some("South"), Some(5.0)),
        ]);
        assert_eq!(agg.top_region().unwrap().region, "Central");
    }

    #[test]
    fn rows_without_region_are_dropped() {
        let agg = RegionAggregate::from_rows([row(None, Some(999.0)), row(Some("East"), Some(1.0))]);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.top_region().unwrap().region, "East");
    }

    #[test]
    fn region_without_values_is_nan_and_never_top() {
        let agg = RegionAggregate::from_rows([row(Some("Ghost"), None), row(Some("East"), Some(-5.0))]);
        assert!(agg.get("Ghost").unwrap().is_nan());
        assert_eq!(agg.top_region().unwrap().region, "East");
    }

    #[test]
    fn empty_aggregate_has_no_top() {
        let agg = RegionAggregate::from_rows(Vec::<(Option<String>, Option<f64>)>::new());
        assert!(agg.is_empty());
        assert!(agg.top_region().is_none());
    }
}
