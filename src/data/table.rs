//! Cleaned weather table and its row type.

use chrono::NaiveDate;
use polars::prelude::*;

pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const YEAR_MONTH: &str = "year_month";
pub const T_MAX: &str = "t_max";
pub const T_MIN: &str = "t_min";
pub const AIR_FROST: &str = "air_frost";
pub const RAINFALL: &str = "rainfall";
pub const SUNSHINE_DURATION: &str = "sunshine_duration";

/// One month of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub year: i32,
    pub month: i32,
    /// First day of `month`.
    pub year_month: NaiveDate,
    pub t_max: Option<f64>,
    pub t_min: Option<f64>,
    /// Never missing; unknown counts are 0.
    pub air_frost: i32,
    pub rainfall: Option<f64>,
    pub sunshine_duration: Option<f64>,
}

/// Read-only output of the transform step.
///
/// Canonical columns come first in the order of [`WeatherRecord`]'s fields,
/// followed by any extra source columns untouched.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    frame: DataFrame,
}

impl WeatherTable {
    pub(crate) fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Materialise the canonical columns as rows, in stored order.
    pub fn records(&self) -> Result<Vec<WeatherRecord>, PolarsError> {
        let df = &self.frame;
        let years = df.column(YEAR)?.i32()?;
        let months = df.column(MONTH)?.i32()?;
        let dates: Vec<Option<NaiveDate>> = df.column(YEAR_MONTH)?.date()?.as_date_iter().collect();
        let t_max = df.column(T_MAX)?.f64()?;
        let t_min = df.column(T_MIN)?.f64()?;
        let air_frost = df.column(AIR_FROST)?.i32()?;
        let rainfall = df.column(RAINFALL)?.f64()?;
        let sunshine = df.column(SUNSHINE_DURATION)?.f64()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(year), Some(month), Some(year_month)) =
                (years.get(i), months.get(i), dates[i])
            else {
                return Err(PolarsError::ComputeError(
                    format!("row {} has no year/month key", i).into(),
                ));
            };

            records.push(WeatherRecord {
                year,
                month,
                year_month,
                t_max: t_max.get(i),
                t_min: t_min.get(i),
                air_frost: air_frost.get(i).unwrap_or(0),
                rainfall: rainfall.get(i),
                sunshine_duration: sunshine.get(i),
            });
        }
        Ok(records)
    }

    /// Total air frost days per year, ascending by year.
    pub fn frost_days_per_year(&self) -> Result<Vec<(i32, i64)>, PolarsError> {
        let totals = self
            .frame
            .clone()
            .lazy()
            .group_by([col(YEAR)])
            .agg([col(AIR_FROST).cast(DataType::Int64).sum()])
            .sort([YEAR], SortMultipleOptions::default())
            .collect()?;

        let years = totals.column(YEAR)?.i32()?;
        let sums = totals.column(AIR_FROST)?.i64()?;

        Ok(years
            .into_iter()
            .zip(sums.into_iter())
            .filter_map(|(year, total)| Some((year?, total.unwrap_or(0))))
            .collect())
    }
}
