//! GUI module - interactive chart window

mod app;
mod chart_viewer;

pub use app::{ChartPage, ChartWindowApp};
pub use chart_viewer::ChartViewer;
