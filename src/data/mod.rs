//! Data module - CSV loading, cleaning and date parsing

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use processor::{parse_date, CleaningReport, DataProcessor, ImputedColumn, ProcessorError};
pub(crate) use table::{date_to_days, days_to_date};
pub use table::{
    is_numeric, SalesTable, TableError, DATE, NUMERIC_COLUMNS, QUANTITY, REGION,
    REQUIRED_COLUMNS, TOTAL_SALES,
};
