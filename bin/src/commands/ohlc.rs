//! OHLC command implementation.

use crate::display::{OutputArgs, write_bars};
use anyhow::{Context, Result};
use std::path::Path;
use tickdb_lib::{ChartConfig, Database, Period, StoreConfig, chart_series};
use tracing::info;

/// Print the chart bars of an instrument.
///
/// Like a chart, this prints an empty series rather than failing when the
/// ticks cannot be read or aggregated.
pub(crate) fn ohlc(
    config: StoreConfig,
    instrument: &str,
    period: &str,
    start: Option<&str>,
    columns: Option<&Path>,
    output: &OutputArgs,
) -> Result<()> {
    let period: Period = period
        .parse()
        .with_context(|| format!("Invalid period: {period}"))?;
    let chart_config = match columns {
        Some(path) => ChartConfig::from_path(path)?,
        None => ChartConfig::default(),
    };

    let db = Database::connect(config)?;
    let bars = chart_series(&db, instrument, period, start.unwrap_or_default(), &chart_config);
    info!(instrument, %period, bars = bars.len(), "Built chart series");

    write_bars(&bars, output)
}
