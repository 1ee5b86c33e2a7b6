//! Chart Window Application
//! Native window that shows the three charts one after another.

use crate::charts::{ChartPlotter, FrostTotals, SunshineGrid, TrendSeries, FROST_TITLE, SUNSHINE_TITLE};
use egui::{Align, Button, Layout, RichText, TopBottomPanel};

/// One chart shown by the window.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPage {
    Trend(TrendSeries),
    Frost(FrostTotals),
    Sunshine(SunshineGrid),
}

impl ChartPage {
    fn tab_label(&self) -> &'static str {
        match self {
            ChartPage::Trend(_) => "Temperature",
            ChartPage::Frost(_) => "Air Frost",
            ChartPage::Sunshine(_) => "Sunshine",
        }
    }
}

/// Main application window.
pub struct ChartWindowApp {
    pages: Vec<ChartPage>,
    current: usize,
    trend_title: String,
}

impl ChartWindowApp {
    pub fn new(pages: Vec<ChartPage>, trend_title: String) -> Self {
        Self {
            pages,
            current: 0,
            trend_title,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.pages.len()
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    fn page_title(&self, page: &ChartPage) -> String {
        match page {
            ChartPage::Trend(_) => self.trend_title.clone(),
            ChartPage::Frost(_) => FROST_TITLE.to_string(),
            ChartPage::Sunshine(_) => SUNSHINE_TITLE.to_string(),
        }
    }

    fn show_navigation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut selected = None;
            for (i, page) in self.pages.iter().enumerate() {
                if ui
                    .selectable_label(self.current == i, page.tab_label())
                    .clicked()
                {
                    selected = Some(i);
                }
            }
            if let Some(i) = selected {
                self.current = i;
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.add_enabled(self.has_next(), Button::new("Next ▶")).clicked() {
                    self.next();
                }
                if ui
                    .add_enabled(self.current > 0, Button::new("◀ Previous"))
                    .clicked()
                {
                    self.previous();
                }
            });
        });
    }
}

impl eframe::App for ChartWindowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("chart_tabs").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_navigation(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(page) = self.pages.get(self.current) else {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            };

            ui.vertical_centered(|ui| {
                ui.label(RichText::new(self.page_title(page)).size(18.0).strong());
            });
            ui.add_space(8.0);

            match page {
                ChartPage::Trend(trend) => ChartPlotter::draw_trend_chart(ui, trend),
                ChartPage::Frost(frost) => ChartPlotter::draw_frost_chart(ui, frost),
                ChartPage::Sunshine(grid) => ChartPlotter::draw_sunshine_chart(ui, grid),
            }
        });
    }
}
