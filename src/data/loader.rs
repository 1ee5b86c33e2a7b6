//! CSV Data Loader Module
//! Reads the raw observation file with Polars, keeping every cell as text.

use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loads the source CSV without any validation.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file as a table of string columns.
    ///
    /// Schema inference is disabled so sentinel cells such as `12*` or `---`
    /// reach the processor exactly as written.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );
        debug!("Columns: {:?}", Self::get_columns(&df));
        Ok(df)
    }

    /// Column names of a loaded table, in file order.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
