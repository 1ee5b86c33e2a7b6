//! Charts module - chart data and rendering backends

mod colormap;
mod plotter;
mod renderer;
mod series;

pub use colormap::yl_or_br;
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use series::{ChartSet, FrostTotals, SunshineGrid, TrendSeries};

use thiserror::Error;

pub const FROST_TITLE: &str = "Total Air Frost Days per Year";
pub const SUNSHINE_TITLE: &str = "Distribution of Sunshine Hours by Year and Month";

pub fn trend_title(location: &str, start_year: i32) -> String {
    format!("Temperature Trends in {} (Data since {})", location, start_year)
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Nothing to draw for the {0} chart")]
    NoData(&'static str),
    #[error("Pixel buffer does not match the image size")]
    Buffer,
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chart window failed: {0}")]
    Window(String),
}

/// Display capability for the three charts.
///
/// Called once per chart in a fixed order: trend, frost, sunshine, then
/// `finish`. Implementations must not assume anything about the table beyond
/// the chart inputs they receive.
pub trait ChartRenderer {
    fn render_trend(&mut self, trend: &TrendSeries) -> Result<(), RenderError>;
    fn render_frost(&mut self, frost: &FrostTotals) -> Result<(), RenderError>;
    fn render_sunshine(&mut self, grid: &SunshineGrid) -> Result<(), RenderError>;

    /// Called after the last chart; backends that batch output show it here.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
