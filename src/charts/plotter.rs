//! Chart Plotter Module
//! Interactive versions of the three charts using egui_plot.

use crate::charts::{yl_or_br, FrostTotals, SunshineGrid, TrendSeries};
use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Corner, Legend, Line, Plot, PlotPoints, Polygon};
use plotters::style::RGBColor;

pub const MAX_COLOR: Color32 = Color32::from_rgb(214, 39, 40); // Red
pub const MIN_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Blue
pub const FROST_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Blue

const COLORBAR_STEPS: usize = 60;

/// Draws the three charts inside an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Months since year 0, used as the trend x coordinate.
    pub fn month_index(date: NaiveDate) -> f64 {
        date.year() as f64 * 12.0 + date.month0() as f64
    }

    /// `YYYY-MM` label for a trend x coordinate.
    pub fn month_label(value: f64) -> String {
        let idx = value.round() as i64;
        format!("{}-{:02}", idx.div_euclid(12), idx.rem_euclid(12) + 1)
    }

    /// Max/min temperature lines; missing months leave gaps.
    pub fn draw_trend_chart(ui: &mut egui::Ui, trend: &TrendSeries) {
        let lines = [
            (trend.max_segments(), MAX_COLOR, "Max Temperature (°C)"),
            (trend.min_segments(), MIN_COLOR, "Min Temperature (°C)"),
        ];

        Plot::new("temperature_trend")
            .legend(Legend::default().position(Corner::LeftBottom))
            .x_axis_label("Year-Month")
            .y_axis_label("Temperature (°C)")
            .x_axis_formatter(|mark, _range| Self::month_label(mark.value))
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (runs, color, name) in lines {
                    for run in runs {
                        let points: PlotPoints = run
                            .iter()
                            .map(|&(date, value)| [Self::month_index(date), value])
                            .collect();
                        plot_ui.line(Line::new(points).color(color).width(2.0).name(name));
                    }
                }
            });
    }

    /// One bar per year.
    pub fn draw_frost_chart(ui: &mut egui::Ui, frost: &FrostTotals) {
        let bars: Vec<Bar> = frost
            .totals
            .iter()
            .map(|&(year, total)| {
                Bar::new(year as f64, total as f64)
                    .width(0.8)
                    .name(year)
            })
            .collect();

        Plot::new("air_frost_per_year")
            .x_axis_label("Year")
            .y_axis_label("Total Air Frost Days")
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(FROST_COLOR).name("Air frost days"));
            });
    }

    /// Year × month grid coloured by summed sunshine, colour bar on top.
    pub fn draw_sunshine_chart(ui: &mut egui::Ui, grid: &SunshineGrid) {
        let max = grid.max_value();
        Self::draw_colorbar(ui, max);
        ui.add_space(6.0);

        Plot::new("sunshine_histogram")
            .x_axis_label("Year")
            .y_axis_label("Month")
            .include_x(grid.first_year as f64)
            .include_x((grid.last_year + 1) as f64)
            .include_y(1.0)
            .include_y(13.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (year, month, hours) in grid.cells() {
                    let (x0, y0) = (year as f64, month as f64);
                    let cell = PlotPoints::from(vec![
                        [x0, y0],
                        [x0 + 1.0, y0],
                        [x0 + 1.0, y0 + 1.0],
                        [x0, y0 + 1.0],
                    ]);
                    let fill = Self::ramp_color(hours, max);
                    plot_ui.polygon(
                        Polygon::new(cell)
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, fill)),
                    );
                }
            });
    }

    pub fn ramp_color(value: f64, max: f64) -> Color32 {
        let RGBColor(r, g, b) = yl_or_br(value, max);
        Color32::from_rgb(r, g, b)
    }

    fn draw_colorbar(ui: &mut egui::Ui, max: f64) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Sunshine Hours").strong());
            ui.label("0");

            let (rect, _) = ui.allocate_exact_size(egui::vec2(320.0, 16.0), egui::Sense::hover());
            let step_w = rect.width() / COLORBAR_STEPS as f32;
            for i in 0..COLORBAR_STEPS {
                let left = rect.left() + step_w * i as f32;
                let cell = egui::Rect::from_min_max(
                    egui::pos2(left, rect.top()),
                    egui::pos2(left + step_w, rect.bottom()),
                );
                let value = max * i as f64 / COLORBAR_STEPS as f64;
                ui.painter().rect_filled(cell, 0.0, Self::ramp_color(value, max));
            }

            ui.label(format!("{:.0}", max));
        });
    }
}
