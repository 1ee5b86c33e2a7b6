//! Chart Series Module
//! Plain chart inputs derived from the cleaned table, shared by every renderer.

use crate::data::{WeatherRecord, WeatherTable};
use chrono::NaiveDate;
use polars::prelude::PolarsError;
use thiserror::Error;

pub const MONTHS_PER_YEAR: usize = 12;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No rows left to chart")]
    EmptyTable,
}

/// Monthly max/min temperatures along the `year_month` axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub dates: Vec<NaiveDate>,
    pub t_max: Vec<Option<f64>>,
    pub t_min: Vec<Option<f64>>,
}

impl TrendSeries {
    pub fn from_records(records: &[WeatherRecord]) -> Self {
        Self {
            dates: records.iter().map(|r| r.year_month).collect(),
            t_max: records.iter().map(|r| r.t_max).collect(),
            t_min: records.iter().map(|r| r.t_min).collect(),
        }
    }

    pub fn max_segments(&self) -> Vec<Vec<(NaiveDate, f64)>> {
        Self::segments(&self.dates, &self.t_max)
    }

    pub fn min_segments(&self) -> Vec<Vec<(NaiveDate, f64)>> {
        Self::segments(&self.dates, &self.t_min)
    }

    /// Split a series into connected runs; a missing value breaks the line.
    pub fn segments(dates: &[NaiveDate], values: &[Option<f64>]) -> Vec<Vec<(NaiveDate, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (&date, value) in dates.iter().zip(values) {
            match value {
                Some(v) => current.push((date, *v)),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Earliest and latest date, in stored order.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = *self.dates.iter().min()?;
        let last = *self.dates.iter().max()?;
        Some((first, last))
    }

    /// Lowest and highest temperature over both series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.t_max
            .iter()
            .chain(&self.t_min)
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}

/// Air frost days summed per year.
#[derive(Debug, Clone, PartialEq)]
pub struct FrostTotals {
    /// `(year, total days)`, ascending by year.
    pub totals: Vec<(i32, i64)>,
}

impl FrostTotals {
    pub fn from_table(table: &WeatherTable) -> Result<Self, ChartError> {
        Ok(Self {
            totals: table.frost_days_per_year()?,
        })
    }

    pub fn max_total(&self) -> i64 {
        self.totals.iter().map(|&(_, t)| t).max().unwrap_or(0)
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((self.totals.first()?.0, self.totals.last()?.0))
    }
}

/// Sunshine hours binned on a year × month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SunshineGrid {
    pub first_year: i32,
    pub last_year: i32,
    /// Row-major by year, twelve cells per year.
    cells: Vec<f64>,
}

impl SunshineGrid {
    /// One bin per year in `[min(year), max(year)]` and per month in `[1, 12]`.
    ///
    /// Each bin sums the sunshine of the rows falling in it; missing sunshine
    /// weighs nothing.
    pub fn from_records(records: &[WeatherRecord]) -> Result<Self, ChartError> {
        let first_year = records.iter().map(|r| r.year).min().ok_or(ChartError::EmptyTable)?;
        let last_year = records.iter().map(|r| r.year).max().ok_or(ChartError::EmptyTable)?;

        let years = (last_year - first_year + 1) as usize;
        let mut cells = vec![0.0; years * MONTHS_PER_YEAR];
        for record in records {
            let (Some(hours), Ok(month)) = (record.sunshine_duration, usize::try_from(record.month))
            else {
                continue;
            };
            if !(1..=MONTHS_PER_YEAR).contains(&month) {
                continue;
            }
            let year_idx = (record.year - first_year) as usize;
            cells[year_idx * MONTHS_PER_YEAR + month - 1] += hours;
        }

        Ok(Self {
            first_year,
            last_year,
            cells,
        })
    }

    pub fn year_count(&self) -> usize {
        (self.last_year - self.first_year + 1) as usize
    }

    /// Weight of a bin; 0 outside the grid.
    #[cfg(test)]
    pub fn get(&self, year: i32, month: u32) -> f64 {
        if year < self.first_year || year > self.last_year || !(1..=12).contains(&month) {
            return 0.0;
        }
        let idx = (year - self.first_year) as usize * MONTHS_PER_YEAR + month as usize - 1;
        self.cells[idx]
    }

    /// Every bin as `(year, month, hours)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, u32, f64)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &hours)| {
            let year = self.first_year + (i / MONTHS_PER_YEAR) as i32;
            let month = (i % MONTHS_PER_YEAR) as u32 + 1;
            (year, month, hours)
        })
    }

    pub fn max_value(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }
}

/// Inputs for all three charts, built before anything is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub trend: TrendSeries,
    pub frost: FrostTotals,
    pub sunshine: SunshineGrid,
}

impl ChartSet {
    pub fn build(table: &WeatherTable) -> Result<Self, ChartError> {
        if table.is_empty() {
            return Err(ChartError::EmptyTable);
        }
        let records = table.records()?;

        Ok(Self {
            trend: TrendSeries::from_records(&records),
            frost: FrostTotals::from_table(table)?,
            sunshine: SunshineGrid::from_records(&records)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use polars::prelude::*;

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    fn record(year: i32, month: i32, sunshine: Option<f64>) -> WeatherRecord {
        WeatherRecord {
            year,
            month,
            year_month: date(year, month as u32),
            t_max: Some(10.0),
            t_min: Some(2.0),
            air_frost: 0,
            rainfall: None,
            sunshine_duration: sunshine,
        }
    }

    #[test]
    fn segments_break_on_missing_values() {
        let dates: Vec<NaiveDate> = (1..=6).map(|m| date(2013, m)).collect();
        let values = vec![Some(1.0), Some(2.0), None, None, Some(5.0), Some(6.0)];

        let runs = TrendSeries::segments(&dates, &values);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(date(2013, 1), 1.0), (date(2013, 2), 2.0)]);
        assert_eq!(runs[1], vec![(date(2013, 5), 5.0), (date(2013, 6), 6.0)]);
    }

    #[test]
    fn value_range_spans_both_series() {
        let trend = TrendSeries {
            dates: vec![date(2013, 1), date(2013, 2)],
            t_max: vec![Some(9.5), None],
            t_min: vec![Some(-4.0), Some(1.0)],
        };

        assert_eq!(trend.value_range(), Some((-4.0, 9.5)));
        assert_eq!(trend.date_range(), Some((date(2013, 1), date(2013, 2))));
    }

    #[test]
    fn value_range_of_all_missing_is_none() {
        let trend = TrendSeries {
            dates: vec![date(2013, 1)],
            t_max: vec![None],
            t_min: vec![None],
        };
        assert_eq!(trend.value_range(), None);
    }

    #[test]
    fn sunshine_grid_sums_weights_per_bin() -> Result<(), Box<dyn std::error::Error>> {
        let records = vec![
            record(2013, 1, Some(40.0)),
            record(2013, 1, Some(2.5)),
            record(2015, 12, Some(30.0)),
            record(2014, 6, None),
        ];

        let grid = SunshineGrid::from_records(&records)?;

        assert_eq!((grid.first_year, grid.last_year), (2013, 2015));
        assert_eq!(grid.year_count(), 3);
        assert_eq!(grid.cells().count(), 36);
        assert_eq!(grid.get(2013, 1), 42.5);
        assert_eq!(grid.get(2015, 12), 30.0);
        assert_eq!(grid.get(2014, 6), 0.0);
        assert_eq!(grid.get(2016, 1), 0.0);
        assert_eq!(grid.max_value(), 42.5);
        Ok(())
    }

    #[test]
    fn sunshine_grid_needs_rows() {
        assert!(matches!(
            SunshineGrid::from_records(&[]),
            Err(ChartError::EmptyTable)
        ));
    }

    #[test]
    fn chart_set_from_cleaned_table() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "yyyy" => ["2012", "2013", "2013", "2014"],
            "mm" => ["12", "1", "2", "1"],
            "tmax_degC" => ["5", "6.2*", "---", "7.0"],
            "tmin_degC" => ["0", "0.5", "-1.0", "1.1"],
            "af days" => ["20", "10", "12*", "4"],
            "rain mm" => ["1", "2", "3", "4"],
            "sun hours" => ["9", "50", "---*", "61.5"]
        )?;
        let table = DataProcessor::manipulate(&raw, 2013)?;

        let charts = ChartSet::build(&table)?;

        assert_eq!(charts.trend.dates, vec![date(2013, 1), date(2013, 2), date(2014, 1)]);
        assert_eq!(charts.trend.max_segments().len(), 2);
        assert_eq!(charts.frost.totals, vec![(2013, 22), (2014, 4)]);
        assert_eq!(charts.frost.year_range(), Some((2013, 2014)));
        assert_eq!(charts.frost.max_total(), 22);
        assert_eq!(charts.sunshine.get(2013, 1), 50.0);
        assert_eq!(charts.sunshine.get(2013, 2), 0.0);
        assert_eq!(charts.sunshine.get(2014, 1), 61.5);
        Ok(())
    }

    #[test]
    fn chart_set_rejects_empty_table() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "yyyy" => ["2001"],
            "mm" => ["1"],
            "tmax_degC" => ["1"],
            "tmin_degC" => ["1"],
            "af days" => ["1"],
            "rain mm" => ["1"],
            "sun hours" => ["1"]
        )?;
        let table = DataProcessor::manipulate(&raw, 2013)?;

        assert!(matches!(ChartSet::build(&table), Err(ChartError::EmptyTable)));
        Ok(())
    }
}
