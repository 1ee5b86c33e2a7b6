//! Chart Viewer
//! Collects the rendered charts and opens them in one native window.

use crate::charts::{ChartRenderer, FrostTotals, RenderError, SunshineGrid, TrendSeries};
use crate::gui::{ChartPage, ChartWindowApp};
use eframe::egui;
use log::info;

const WINDOW_TITLE: &str = "Weather Charts";

/// [`ChartRenderer`] backed by an eframe window.
///
/// Charts are queued as they arrive and shown when `finish` is called; the
/// call blocks until the window is closed.
pub struct ChartViewer {
    trend_title: String,
    pages: Vec<ChartPage>,
}

impl ChartViewer {
    pub fn new(trend_title: String) -> Self {
        Self {
            trend_title,
            pages: Vec::new(),
        }
    }
}

impl ChartRenderer for ChartViewer {
    fn render_trend(&mut self, trend: &TrendSeries) -> Result<(), RenderError> {
        self.pages.push(ChartPage::Trend(trend.clone()));
        Ok(())
    }

    fn render_frost(&mut self, frost: &FrostTotals) -> Result<(), RenderError> {
        self.pages.push(ChartPage::Frost(frost.clone()));
        Ok(())
    }

    fn render_sunshine(&mut self, grid: &SunshineGrid) -> Result<(), RenderError> {
        self.pages.push(ChartPage::Sunshine(grid.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        let app = ChartWindowApp::new(std::mem::take(&mut self.pages), self.trend_title.clone());
        info!("Opening chart window");

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 750.0])
                .with_min_inner_size([700.0, 450.0])
                .with_title(WINDOW_TITLE),
            ..Default::default()
        };

        eframe::run_native(
            WINDOW_TITLE,
            options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| RenderError::Window(e.to_string()))
    }
}
