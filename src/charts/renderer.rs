//! Static Chart Renderer
//! Writes the four exploratory charts as PNG files with plotters.
//!
//! Charts, in render order:
//! 1. Total sales over time (line + markers)
//! 2. Average sales by region (bars)
//! 3. Distribution of total sales (histogram)
//! 4. Quantity vs. total sales, coloured by region (scatter)

use crate::charts::palette::{self, SERIES_BLUE, SKY_BLUE};
use crate::charts::series::{self, HistogramBin};
use crate::data::{date_to_days, days_to_date, SalesTable, TableError, TOTAL_SALES};
use crate::stats::RegionAggregate;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const CAPTION_FONT: (&str, u32) = ("sans-serif", 26);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Histogram needs at least one bin")]
    NoBins,
    #[error("Failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Table(#[from] TableError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(err.to_string())
    }
}

/// The four charts, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SalesOverTime,
    SalesByRegion,
    SalesDistribution,
    QuantityVsSales,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::SalesOverTime,
        ChartKind::SalesByRegion,
        ChartKind::SalesDistribution,
        ChartKind::QuantityVsSales,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::SalesOverTime => "01_sales_over_time.png",
            ChartKind::SalesByRegion => "02_sales_by_region.png",
            ChartKind::SalesDistribution => "03_sales_distribution.png",
            ChartKind::QuantityVsSales => "04_quantity_vs_sales.png",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::SalesOverTime => "Total Sales Over Time",
            ChartKind::SalesByRegion => "Average Sales by Region",
            ChartKind::SalesDistribution => "Distribution of Total Sales",
            ChartKind::QuantityVsSales => "Quantity vs. Total Sales",
        }
    }

    /// Image size in pixels.
    pub fn size(self) -> (u32, u32) {
        match self {
            ChartKind::SalesOverTime => (1000, 500),
            _ => (800, 500),
        }
    }
}

/// Where and how charts are written.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub output_dir: PathBuf,
    pub bins: usize,
    /// Hand each file to the system image viewer once written.
    pub show: bool,
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render every chart in order, returning the written paths.
    ///
    /// The table's `Date` column must already be parsed.
    pub fn render_all(
        table: &SalesTable,
        aggregate: &RegionAggregate,
        options: &ChartOptions,
    ) -> Result<Vec<PathBuf>, ChartError> {
        if options.bins == 0 {
            return Err(ChartError::NoBins);
        }
        fs::create_dir_all(&options.output_dir)?;

        let mut written = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            let path = options.output_dir.join(kind.file_name());
            match kind {
                ChartKind::SalesOverTime => Self::draw_sales_over_time(table, &path)?,
                ChartKind::SalesByRegion => Self::draw_sales_by_region(aggregate, &path)?,
                ChartKind::SalesDistribution => {
                    Self::draw_sales_distribution(table, options.bins, &path)?
                }
                ChartKind::QuantityVsSales => {
                    Self::draw_quantity_vs_sales(table, aggregate, &path)?
                }
            }
            info!(chart = kind.title(), path = %path.display(), "chart written");

            if options.show {
                open::that(&path).map_err(|source| ChartError::Open {
                    path: path.clone(),
                    source,
                })?;
            }
            written.push(path);
        }

        Ok(written)
    }

    fn draw_sales_over_time(table: &SalesTable, path: &Path) -> Result<(), ChartError> {
        let kind = ChartKind::SalesOverTime;
        let points: Vec<(f64, f64)> = series::sales_over_time(table)?
            .into_iter()
            .map(|(d, v)| (f64::from(date_to_days(d)), v))
            .collect();
        debug!(points = points.len(), "drawing time series");

        let (x_min, x_max) = padded_range(points.iter().map(|p| p.0));
        let (y_min, y_max) = padded_range(points.iter().map(|p| p.1));

        let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(kind.title(), CAPTION_FONT)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Total Sales")
            .x_labels(8)
            .x_label_formatter(&|x| format_day(*x))
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().copied(), &SERIES_BLUE))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, SERIES_BLUE.filled())),
        )?;

        root.present()?;
        Ok(())
    }

    fn draw_sales_by_region(aggregate: &RegionAggregate, path: &Path) -> Result<(), ChartError> {
        let kind = ChartKind::SalesByRegion;
        let entries = aggregate.entries();
        let names: Vec<String> = entries.iter().map(|e| e.region.clone()).collect();
        let means = entries.iter().map(|e| e.mean).filter(|m| m.is_finite());
        let top = means.clone().fold(0.0f64, f64::max);
        let bottom = means.fold(0.0f64, f64::min);
        let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };
        let y_min = if bottom < 0.0 { bottom * 1.1 } else { 0.0 };

        let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(kind.title(), CAPTION_FONT)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d((0..names.len().max(1)).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Region")
            .y_desc("Average Total Sales")
            .x_labels(names.len().max(1))
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        let count = entries.len();
        chart.draw_series(
            entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.mean.is_finite())
                .map(|(i, e)| {
                    let mut bar = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), e.mean)],
                        palette::viridis(i, count).filled(),
                    );
                    bar.set_margin(0, 0, 12, 12);
                    bar
                }),
        )?;

        root.present()?;
        Ok(())
    }

    fn draw_sales_distribution(
        table: &SalesTable,
        bins: usize,
        path: &Path,
    ) -> Result<(), ChartError> {
        let kind = ChartKind::SalesDistribution;
        let values: Vec<f64> = table.f64_values(TOTAL_SALES)?.into_iter().flatten().collect();
        let bins: Vec<HistogramBin> =
            series::histogram_bins(&values, bins).ok_or(ChartError::NoBins)?;

        let x_min = bins.first().map_or(0.0, |b| b.start);
        let x_max = bins.last().map_or(1.0, |b| b.end);
        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64 * 1.1 + 1.0;

        let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(kind.title(), CAPTION_FONT)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Total Sales")
            .y_desc("Frequency")
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], SKY_BLUE.filled())
        }))?;
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(1))
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_quantity_vs_sales(
        table: &SalesTable,
        aggregate: &RegionAggregate,
        path: &Path,
    ) -> Result<(), ChartError> {
        let kind = ChartKind::QuantityVsSales;
        let groups = series::quantity_vs_sales(table, aggregate)?;

        let all = groups.iter().flat_map(|g| g.points.iter());
        let (x_min, x_max) = padded_range(all.clone().map(|p| p.0));
        let (y_min, y_max) = padded_range(all.map(|p| p.1));

        let root = BitMapBackend::new(path, kind.size()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(kind.title(), CAPTION_FONT)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Quantity")
            .y_desc("Total Sales")
            .draw()?;

        for group in &groups {
            let color = palette::region_color(group.index);
            chart
                .draw_series(
                    group
                        .points
                        .iter()
                        .map(move |&(x, y)| Circle::new((x, y), 4, color.filled())),
                )?
                .label(group.region.clone())
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }

        if !groups.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

/// Axis range covering `values` with 5% padding; degenerate ranges are widened.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Axis label for a day offset from the Unix epoch.
fn format_day(days: f64) -> String {
    days_to_date(days.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_widens_degenerate_input() {
        assert_eq!(padded_range([3.0].into_iter()), (2.0, 4.0));
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = padded_range([f64::NAN, 0.0, 100.0].into_iter());
        assert!((lo + 5.0).abs() < 1e-9 && (hi - 105.0).abs() < 1e-9);
    }

    #[test]
    fn day_labels_are_iso_dates() {
        assert_eq!(format_day(19_723.0), "2024-01-01");
        assert_eq!(format_day(0.2), "1970-01-01");
    }

    #[test]
    fn chart_files_are_numbered_in_render_order() {
        let names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn zero_bins_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let table = SalesTable::new(polars::prelude::DataFrame::empty(), "memory.csv");
        let options = ChartOptions {
            output_dir: dir.path().join("charts"),
            bins: 0,
            show: false,
        };
        let err = ChartRenderer::render_all(&table, &RegionAggregate::default(), &options)
            .unwrap_err();
        assert!(matches!(err, ChartError::NoBins));
        assert!(!options.output_dir.exists());
    }
}
