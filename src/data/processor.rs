//! Data Processor Module
//! Cleans the raw observation table: year filter, renames, date key, sentinel
//! stripping and numeric coercion.

use crate::data::table::{
    WeatherTable, AIR_FROST, MONTH, RAINFALL, SUNSHINE_DURATION, T_MAX, T_MIN, YEAR, YEAR_MONTH,
};
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;
use thiserror::Error;

pub const SOURCE_YEAR: &str = "yyyy";
pub const SOURCE_MONTH: &str = "mm";
pub const SOURCE_T_MAX: &str = "tmax_degC";
pub const SOURCE_T_MIN: &str = "tmin_degC";
pub const SOURCE_AIR_FROST: &str = "af days";
pub const SOURCE_RAINFALL: &str = "rain mm";
pub const SOURCE_SUNSHINE: &str = "sun hours";

/// Source header to canonical column name.
pub const COLUMN_RENAMES: [(&str, &str); 7] = [
    (SOURCE_YEAR, YEAR),
    (SOURCE_MONTH, MONTH),
    (SOURCE_T_MAX, T_MAX),
    (SOURCE_T_MIN, T_MIN),
    (SOURCE_AIR_FROST, AIR_FROST),
    (SOURCE_RAINFALL, RAINFALL),
    (SOURCE_SUNSHINE, SUNSHINE_DURATION),
];

/// Suffix flagging an estimated value.
const PROVISIONAL_MARKER: char = '*';
/// Whole-cell token for a missing value.
const MISSING_MARKER: &str = "---";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column '{0}' not found")]
    MissingColumn(String),
    #[error("Row {row}: year '{value}' is not a number")]
    InvalidYear { row: usize, value: String },
    #[error("Row {row}: month '{value}' is not a number")]
    InvalidMonth { row: usize, value: String },
    #[error("Row {row}: {year}-{month} is not a calendar month")]
    InvalidDate { row: usize, year: i32, month: i32 },
}

/// Handles the cleaning of raw observation tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Turn the raw string table into a typed [`WeatherTable`].
    ///
    /// Steps run in a fixed order. Markers are stripped before the missing
    /// token is matched, and both happen before numeric coercion, so a cell
    /// like `---*` ends up missing rather than unparseable text.
    pub fn manipulate(raw: &DataFrame, start_year: i32) -> Result<WeatherTable, ProcessorError> {
        // Year filter
        let year_cells = Self::text_cells(raw, SOURCE_YEAR)?;
        let mut keep = Vec::with_capacity(year_cells.len());
        let mut kept_rows = Vec::new();
        let mut years = Vec::new();
        for (row, cell) in year_cells.iter().enumerate() {
            let year = Self::parse_key(cell.as_deref()).ok_or_else(|| ProcessorError::InvalidYear {
                row,
                value: cell.clone().unwrap_or_default(),
            })?;
            let in_range = year >= start_year;
            keep.push(in_range);
            if in_range {
                kept_rows.push(row);
                years.push(year);
            }
        }

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let filtered = raw.filter(&mask)?;
        info!(
            "Kept {} of {} rows from {} onwards",
            filtered.height(),
            raw.height(),
            start_year
        );

        // Month and first-of-month date key
        let month_cells = Self::text_cells(&filtered, SOURCE_MONTH)?;
        let mut months = Vec::with_capacity(month_cells.len());
        let mut dates = Vec::with_capacity(month_cells.len());
        for ((cell, &year), &row) in month_cells.iter().zip(&years).zip(&kept_rows) {
            let month = Self::parse_key(cell.as_deref()).ok_or_else(|| ProcessorError::InvalidMonth {
                row,
                value: cell.clone().unwrap_or_default(),
            })?;
            let date = u32::try_from(month)
                .ok()
                .and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
                .ok_or(ProcessorError::InvalidDate { row, year, month })?;
            months.push(month);
            dates.push(date);
        }

        // Marker stripping, missing token, then coercion
        let air_frost: Vec<i32> = Self::measurement_cells(&filtered, SOURCE_AIR_FROST)?
            .iter()
            .map(|cell| Self::parse_frost_days(cell))
            .collect();
        let t_max = Self::float_column(&filtered, SOURCE_T_MAX)?;
        let t_min = Self::float_column(&filtered, SOURCE_T_MIN)?;
        let rainfall = Self::float_column(&filtered, SOURCE_RAINFALL)?;
        let sunshine = Self::float_column(&filtered, SOURCE_SUNSHINE)?;

        let extras: Vec<Column> = filtered
            .get_columns()
            .iter()
            .filter(|column| {
                !COLUMN_RENAMES
                    .iter()
                    .any(|(source, _)| column.name().as_str() == *source)
            })
            .cloned()
            .collect();

        let mut columns = vec![
            Column::new(YEAR.into(), years),
            Column::new(MONTH.into(), months),
            Column::new(YEAR_MONTH.into(), dates),
            Column::new(T_MAX.into(), t_max),
            Column::new(T_MIN.into(), t_min),
            Column::new(AIR_FROST.into(), air_frost),
            Column::new(RAINFALL.into(), rainfall),
            Column::new(SUNSHINE_DURATION.into(), sunshine),
        ];
        columns.extend(extras);

        Ok(WeatherTable::new(DataFrame::new(columns)?))
    }

    /// Strip `*` markers, then blank out the `---` missing token.
    pub fn clean_cell(cell: Option<&str>) -> String {
        let stripped = cell.unwrap_or_default().replace(PROVISIONAL_MARKER, "");
        let trimmed = stripped.trim();
        if trimmed == MISSING_MARKER {
            String::new()
        } else {
            trimmed.to_string()
        }
    }

    /// Frost day count; anything unusable counts as no frost.
    pub fn parse_frost_days(text: &str) -> i32 {
        if let Ok(days) = text.parse::<i32>() {
            return days.max(0);
        }
        match text.parse::<f64>() {
            Ok(days) if days.is_finite() && days >= 0.0 => days.trunc() as i32,
            _ => 0,
        }
    }

    /// Float measurement; unparseable or non-finite text is missing, not zero.
    pub fn parse_measurement(text: &str) -> Option<f64> {
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn float_column(df: &DataFrame, source: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        let values: Vec<Option<f64>> = Self::measurement_cells(df, source)?
            .iter()
            .map(|cell| Self::parse_measurement(cell))
            .collect();

        let missing = values.iter().filter(|v| v.is_none()).count();
        if missing > 0 {
            debug!("'{}': {} of {} values missing", source, missing, values.len());
        }
        Ok(values)
    }

    fn measurement_cells(df: &DataFrame, source: &str) -> Result<Vec<String>, ProcessorError> {
        Ok(Self::text_cells(df, source)?
            .iter()
            .map(|cell| Self::clean_cell(cell.as_deref()))
            .collect())
    }

    fn text_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let column = df
            .column(name)
            .map_err(|_| ProcessorError::MissingColumn(name.to_string()))?;
        let text = column.cast(&DataType::String)?;
        Ok(text
            .str()?
            .into_iter()
            .map(|cell| cell.map(str::to_owned))
            .collect())
    }

    fn parse_key(cell: Option<&str>) -> Option<i32> {
        cell?.trim().parse::<i32>().ok()
    }
}
