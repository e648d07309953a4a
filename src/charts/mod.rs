//! Charts module - Chart data preparation and rendering

mod palette;
mod renderer;
mod series;

pub use renderer::{ChartError, ChartKind, ChartOptions, ChartRenderer};
pub use series::{histogram_bins, quantity_vs_sales, sales_over_time, HistogramBin, RegionPoints};
