//! CSV Data Loader Module
//! Reads the sales CSV with Polars and checks the columns the analysis needs.

use crate::data::table::{is_numeric, SalesTable, TableError, NUMERIC_COLUMNS, REQUIRED_COLUMNS};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Cell contents read as missing, in addition to empty cells.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file '{}' was not found. Please check the path.", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
    #[error("Column '{column}' must be numeric but was read as {dtype}")]
    NonNumericColumn { column: String, dtype: String },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a sales CSV into a [`SalesTable`].
    pub fn load_csv(path: &Path) -> Result<SalesTable, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        info!(path = %path.display(), "loading sales data");

        let null_values = NullValues::AllColumns(NA_TOKENS.iter().map(|t| (*t).into()).collect());

        // Types are inferred over the whole file so a stray value late in a
        // numeric column is caught by validation rather than parsed away.
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(None)
            .with_null_values(Some(null_values))
            .finish()?
            .collect()?;

        let mut table = SalesTable::new(df, path);
        Self::validate(&mut table)?;

        let (rows, cols) = table.dataframe().shape();
        info!(rows, cols, "sales data loaded");
        Ok(table)
    }

    /// Check required columns exist and numeric ones were inferred as numbers.
    ///
    /// A numeric column with no values at all is read by Polars as text; it is
    /// cast to `Float64` so it behaves like any other fully-missing column.
    fn validate(table: &mut SalesTable) -> Result<(), LoaderError> {
        let columns = table.get_columns();
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        for name in NUMERIC_COLUMNS {
            let dtype = table.dtype(name)?;
            if is_numeric(&dtype) {
                continue;
            }

            let all_null = table.null_count(name)? == table.get_row_count();
            if all_null {
                debug!(column = name, "numeric column has no values, casting to Float64");
                let empty = table
                    .dataframe()
                    .column(name)?
                    .cast(&DataType::Float64)?;
                table.replace_column(empty)?;
            } else {
                return Err(LoaderError::NonNumericColumn {
                    column: name.to_string(),
                    dtype: dtype.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{QUANTITY, TOTAL_SALES};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn row_count_matches_data_lines() {
        let file = write_csv(
            "Date,Region,Quantity,Total_Sales\n\
             2024-01-01,East,2,100\n\
             2024-01-02,West,3,150\n\
             2024-01-03,East,1,50\n",
        );
        let table = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(table.get_row_count(), 3);
        assert_eq!(table.dataframe().width(), 4);
    }

    #[test]
    fn extra_columns_are_tolerated() {
        let file = write_csv(
            "Date,Region,Product,Quantity,Total_Sales\n\
             2024-01-01,East,Widget,2,100\n",
        );
        let table = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(table.get_columns().len(), 5);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales_data.csv");
        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(p) if p == path));
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let file = write_csv("Date,Region,Quantity\n2024-01-01,East,2\n");
        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(c) if c == TOTAL_SALES));
    }

    #[test]
    fn text_in_numeric_column_is_rejected() {
        let file = write_csv(
            "Date,Region,Quantity,Total_Sales\n\
             2024-01-01,East,two,100\n\
             2024-01-02,West,three,150\n",
        );
        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::NonNumericColumn { column, .. } if column == QUANTITY));
    }

    #[test]
    fn malformed_number_after_many_rows_is_rejected() {
        let mut contents = String::from("Date,Region,Quantity,Total_Sales\n");
        for day in 0..10_050 {
            contents.push_str(&format!("2024-01-01,East,{},100\n", day % 7));
        }
        contents.push_str("2024-01-02,West,abc,150\n");

        let file = write_csv(&contents);
        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::NonNumericColumn { column, .. } if column == QUANTITY));
    }

    #[test]
    fn missing_value_tokens_load_as_nulls() {
        let file = write_csv(
            "Date,Region,Quantity,Total_Sales\n\
             2024-01-01,East,2,100\n\
             2024-01-02,West,NA,NaN\n\
             2024-01-03,East,N/A,null\n\
             2024-01-04,West,4,200\n",
        );
        let table = DataLoader::load_csv(file.path()).unwrap();
        assert!(is_numeric(&table.dtype(QUANTITY).unwrap()));
        assert!(is_numeric(&table.dtype(TOTAL_SALES).unwrap()));
        assert_eq!(table.null_count(QUANTITY).unwrap(), 2);
        assert_eq!(table.null_count(TOTAL_SALES).unwrap(), 2);
    }

    #[test]
    fn empty_cells_load_as_nulls() {
        let file = write_csv(
            "Date,Region,Quantity,Total_Sales\n\
             2024-01-01,East,2,\n\
             2024-01-02,,3,150\n",
        );
        let table = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(table.null_count(TOTAL_SALES).unwrap(), 1);
        assert_eq!(table.null_count("Region").unwrap(), 1);
    }
}
