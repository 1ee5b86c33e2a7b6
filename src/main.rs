//! Weather Charts - Monthly Weather CSV Cleaning & Chart Viewer
//!
//! Loads a station's monthly observations, cleans them and shows the
//! temperature trend, yearly air frost days and sunshine distribution.

mod charts;
mod config;
mod data;
mod gui;
mod pipeline;

use anyhow::Result;
use charts::{trend_title, ChartRenderer, StaticChartRenderer};
use config::{AppConfig, DisplayMode};
use gui::ChartViewer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Started!!!");

    let config = AppConfig::load()?;
    let mut renderer: Box<dyn ChartRenderer> = match config.display {
        DisplayMode::Window => Box::new(ChartViewer::new(trend_title(
            &config.location,
            config.start_year,
        ))),
        DisplayMode::Png => Box::new(StaticChartRenderer::new(&config)),
    };

    pipeline::run(&config, renderer.as_mut())?;

    println!("Ended!!!");
    Ok(())
}
