//! Batch pipeline: load, clean, build chart inputs, render.

use crate::charts::{ChartRenderer, ChartSet};
use crate::config::AppConfig;
use crate::data::{DataLoader, DataProcessor};
use anyhow::{Context, Result};
use log::{debug, info};

/// Row counts of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_kept: usize,
}

/// Run every stage in order.
///
/// All chart inputs are built before the first render call, so a bad table
/// aborts the run without showing anything.
pub fn run(config: &AppConfig, renderer: &mut dyn ChartRenderer) -> Result<RunSummary> {
    let raw = DataLoader::load_csv(&config.csv_path)
        .with_context(|| format!("loading {}", config.csv_path.display()))?;
    let table = DataProcessor::manipulate(&raw, config.start_year)
        .context("cleaning weather observations")?;
    debug!("Cleaned table preview:\n{}", table.frame().head(Some(5)));
    let charts = ChartSet::build(&table).context("preparing chart data")?;

    render_all(&charts, renderer)?;

    let summary = RunSummary {
        rows_loaded: raw.height(),
        rows_kept: table.height(),
    };
    info!(
        "Rendered 3 charts from {} of {} rows",
        summary.rows_kept, summary.rows_loaded
    );
    Ok(summary)
}

/// Trend, frost, sunshine, in that order.
pub fn render_all(charts: &ChartSet, renderer: &mut dyn ChartRenderer) -> Result<()> {
    renderer
        .render_trend(&charts.trend)
        .context("rendering temperature trend chart")?;
    renderer
        .render_frost(&charts.frost)
        .context("rendering air frost chart")?;
    renderer
        .render_sunshine(&charts.sunshine)
        .context("rendering sunshine histogram")?;
    renderer.finish().context("showing charts")?;
    Ok(())
}
