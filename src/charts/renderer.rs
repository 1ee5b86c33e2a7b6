//! Static Chart Renderer
//! Draws the three charts with plotters into RGB buffers and saves them as PNG.
//!
//! Figure sizes mirror the matplotlib originals at 100 dpi:
//! 1. Temperature trend: 10 x 5 in
//! 2. Air frost bars: 10 x 6 in
//! 3. Sunshine histogram: 10 x 8 in, with a colour bar on the right

use crate::charts::colormap::yl_or_br;
use crate::charts::{
    trend_title, ChartRenderer, FrostTotals, RenderError, SunshineGrid, TrendSeries, FROST_TITLE,
    SUNSHINE_TITLE,
};
use crate::config::AppConfig;
use chrono::{Months, NaiveDate};
use image::RgbImage;
use log::{info, warn};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const TREND_SIZE: (u32, u32) = (1000, 500);
const FROST_SIZE: (u32, u32) = (1000, 600);
const SUNSHINE_SIZE: (u32, u32) = (1000, 800);
const COLORBAR_WIDTH: i32 = 150;

pub const TREND_FILE: &str = "temperature_trend.png";
pub const FROST_FILE: &str = "air_frost_per_year.png";
pub const SUNSHINE_FILE: &str = "sunshine_histogram.png";

const FONT: &str = "sans-serif";
const MAX_COLOR: RGBColor = RGBColor(214, 39, 40); // Red
const MIN_COLOR: RGBColor = RGBColor(31, 119, 180); // Blue
const FROST_COLOR: RGBColor = RGBColor(31, 119, 180);

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

fn blank_buffer((width, height): (u32, u32)) -> Vec<u8> {
    vec![255u8; (width * height * 3) as usize]
}

/// Writes each chart to `output_dir` and optionally opens it in the system viewer.
pub struct StaticChartRenderer {
    output_dir: PathBuf,
    trend_title: String,
    open_images: bool,
}

impl StaticChartRenderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            trend_title: trend_title(&config.location, config.start_year),
            open_images: config.open_images,
        }
    }

    fn save_png(
        &self,
        buffer: Vec<u8>,
        (width, height): (u32, u32),
        file_name: &str,
    ) -> Result<PathBuf, RenderError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);

        let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer)?;
        img.save(&path)?;
        info!("Saved chart {}", path.display());

        if self.open_images {
            Self::show(&path);
        }
        Ok(path)
    }

    fn show(path: &Path) {
        if let Err(e) = open::that(path) {
            warn!("Could not open {} in an image viewer: {}", path.display(), e);
        }
    }

    fn draw_trend(&self, trend: &TrendSeries, buffer: &mut [u8]) -> Result<(), RenderError> {
        let root = BitMapBackend::with_buffer(buffer, TREND_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let (first, last) = trend
            .date_range()
            .ok_or(RenderError::NoData("temperature trend"))?;
        let last = if last > first {
            last
        } else {
            first.checked_add_months(Months::new(1)).unwrap_or(last)
        };
        let (lo, hi) = trend.value_range().unwrap_or((0.0, 10.0));
        let pad = ((hi - lo) * 0.05).max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.trend_title, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(first..last, (lo - pad)..(hi + pad))
            .map_err(drawing)?;

        chart
            .configure_mesh()
            .x_labels(12)
            .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m").to_string())
            .y_label_formatter(&|v: &f64| format!("{:.0}", v))
            .x_desc("Year-Month")
            .y_desc("Temperature (°C)")
            .draw()
            .map_err(drawing)?;

        let lines = [
            (trend.max_segments(), MAX_COLOR, "Max Temperature (°C)"),
            (trend.min_segments(), MIN_COLOR, "Min Temperature (°C)"),
        ];
        for (runs, color, label) in lines {
            for (i, run) in runs.into_iter().enumerate() {
                let series = chart
                    .draw_series(LineSeries::new(run, color.stroke_width(2)))
                    .map_err(drawing)?;
                if i == 0 {
                    series.label(label).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
        Ok(())
    }

    fn draw_frost(&self, frost: &FrostTotals, buffer: &mut [u8]) -> Result<(), RenderError> {
        let root = BitMapBackend::with_buffer(buffer, FROST_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let (first, last) = frost
            .year_range()
            .ok_or(RenderError::NoData("air frost"))?;
        let top = frost.max_total() + frost.max_total() / 10 + 1;

        let mut chart = ChartBuilder::on(&root)
            .caption(FROST_TITLE, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d((first..last).into_segmented(), 0i64..top)
            .map_err(drawing)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(frost.totals.len() + 1)
            .x_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(year) | SegmentValue::Exact(year) => year.to_string(),
                SegmentValue::Last => String::new(),
            })
            .x_desc("Year")
            .y_desc("Total Air Frost Days")
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(FROST_COLOR.filled())
                    .margin(10)
                    .data(frost.totals.iter().copied()),
            )
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
        Ok(())
    }

    fn draw_sunshine(&self, grid: &SunshineGrid, buffer: &mut [u8]) -> Result<(), RenderError> {
        let root = BitMapBackend::with_buffer(buffer, SUNSHINE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let (plot_area, bar_area) =
            root.split_horizontally(SUNSHINE_SIZE.0 as i32 - COLORBAR_WIDTH);
        let max = grid.max_value();

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(SUNSHINE_TITLE, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(grid.first_year..grid.last_year + 1, 1i32..13i32)
            .map_err(drawing)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(grid.year_count() + 1)
            .y_labels(13)
            .x_desc("Year")
            .y_desc("Month")
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(grid.cells().map(|(year, month, hours)| {
                let month = month as i32;
                Rectangle::new(
                    [(year, month), (year + 1, month + 1)],
                    yl_or_br(hours, max).filled(),
                )
            }))
            .map_err(drawing)?;

        // Colour bar
        let top = if max > 0.0 { max } else { 1.0 };
        let steps = 100;
        let mut bar = ChartBuilder::on(&bar_area)
            .margin_top(60)
            .margin_bottom(60)
            .margin_right(20)
            .y_label_area_size(80)
            .build_cartesian_2d(0i32..1i32, 0f64..top)
            .map_err(drawing)?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_label_formatter(&|v: &f64| format!("{:.0}", v))
            .y_desc("Sunshine Hours")
            .draw()
            .map_err(drawing)?;

        bar.draw_series((0..steps).map(|i| {
            let lo = top * i as f64 / steps as f64;
            let hi = top * (i + 1) as f64 / steps as f64;
            Rectangle::new([(0, lo), (1, hi)], yl_or_br(lo, top).filled())
        }))
        .map_err(drawing)?;

        root.present().map_err(drawing)?;
        Ok(())
    }
}

impl ChartRenderer for StaticChartRenderer {
    fn render_trend(&mut self, trend: &TrendSeries) -> Result<(), RenderError> {
        let mut buffer = blank_buffer(TREND_SIZE);
        self.draw_trend(trend, &mut buffer)?;
        self.save_png(buffer, TREND_SIZE, TREND_FILE)?;
        Ok(())
    }

    fn render_frost(&mut self, frost: &FrostTotals) -> Result<(), RenderError> {
        let mut buffer = blank_buffer(FROST_SIZE);
        self.draw_frost(frost, &mut buffer)?;
        self.save_png(buffer, FROST_SIZE, FROST_FILE)?;
        Ok(())
    }

    fn render_sunshine(&mut self, grid: &SunshineGrid) -> Result<(), RenderError> {
        let mut buffer = blank_buffer(SUNSHINE_SIZE);
        self.draw_sunshine(grid, &mut buffer)?;
        self.save_png(buffer, SUNSHINE_SIZE, SUNSHINE_FILE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartSet;
    use crate::data::DataProcessor;

    fn renderer_in(dir: &Path) -> StaticChartRenderer {
        let config = AppConfig {
            output_dir: dir.join("charts"),
            open_images: false,
            ..AppConfig::default()
        };
        StaticChartRenderer::new(&config)
    }

    #[test]
    fn save_png_writes_decodable_image() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let renderer = renderer_in(dir.path());

        let path = renderer.save_png(blank_buffer((40, 20)), (40, 20), TREND_FILE)?;

        assert_eq!(path, dir.path().join("charts").join(TREND_FILE));
        let img = image::open(&path)?;
        assert_eq!((img.width(), img.height()), (40, 20));
        Ok(())
    }

    #[test]
    fn save_png_rejects_short_buffer() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let renderer = renderer_in(dir.path());

        let result = renderer.save_png(vec![0u8; 10], (40, 20), FROST_FILE);

        assert!(matches!(result, Err(RenderError::Buffer)));
        assert!(!dir.path().join("charts").join(FROST_FILE).exists());
        Ok(())
    }

    #[test]
    fn trend_title_uses_location() {
        let dir = std::env::temp_dir();
        let renderer = renderer_in(&dir);
        assert_eq!(
            renderer.trend_title,
            "Temperature Trends in Bradford (Data since 2013)"
        );
    }

    /// Render all three charts and return the decoded size of each file.
    fn render_charts(
        raw: &polars::prelude::DataFrame,
    ) -> Result<Vec<(u32, u32)>, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut renderer = renderer_in(dir.path());
        let charts = ChartSet::build(&DataProcessor::manipulate(raw, 2013)?)?;

        renderer.render_trend(&charts.trend)?;
        renderer.render_frost(&charts.frost)?;
        renderer.render_sunshine(&charts.sunshine)?;

        let mut sizes = Vec::new();
        for file in [TREND_FILE, FROST_FILE, SUNSHINE_FILE] {
            let img = image::open(dir.path().join("charts").join(file))?;
            sizes.push((img.width(), img.height()));
        }
        Ok(sizes)
    }

    const FIGURE_SIZES: [(u32, u32); 3] = [TREND_SIZE, FROST_SIZE, SUNSHINE_SIZE];

    #[test]
    fn renders_multi_year_charts() -> Result<(), Box<dyn std::error::Error>> {
        let raw = polars::df!(
            "yyyy" => ["2012", "2013", "2013", "2014", "2015", "2015"],
            "mm" => ["12", "1", "2", "7", "1", "2"],
            "tmax_degC" => ["5", "6.2*", "---", "21.4", "7.0", "inf"],
            "tmin_degC" => ["0", "0.5", "-1.0", "11.9", "1.1", "-2.3"],
            "af days" => ["20", "10", "12*", "0", "4", "9"],
            "rain mm" => ["1", "2", "3", "4", "5", "6"],
            "sun hours" => ["9", "50", "---*", "201.3", "61.5", "inf"]
        )?;

        assert_eq!(render_charts(&raw)?, FIGURE_SIZES.to_vec());
        Ok(())
    }

    #[test]
    fn renders_single_year_charts() -> Result<(), Box<dyn std::error::Error>> {
        let raw = polars::df!(
            "yyyy" => ["2013", "2013", "2013"],
            "mm" => ["1", "6", "12"],
            "tmax_degC" => ["6.0", "19.5", "7.2"],
            "tmin_degC" => ["0.3", "10.1", "1.4"],
            "af days" => ["11", "0", "8"],
            "rain mm" => ["80.2", "44.0", "120.9"],
            "sun hours" => ["40.1", "180.0", "---"]
        )?;

        assert_eq!(render_charts(&raw)?, FIGURE_SIZES.to_vec());
        Ok(())
    }

    #[test]
    fn renders_single_row_charts() -> Result<(), Box<dyn std::error::Error>> {
        let raw = polars::df!(
            "yyyy" => ["2016"],
            "mm" => ["3"],
            "tmax_degC" => ["10.5"],
            "tmin_degC" => ["---"],
            "af days" => ["2"],
            "rain mm" => ["61.0"],
            "sun hours" => ["0"]
        )?;

        assert_eq!(render_charts(&raw)?, FIGURE_SIZES.to_vec());
        Ok(())
    }
}
