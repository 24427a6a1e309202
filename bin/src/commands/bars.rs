//! Bars command implementation.
//!
//! Loads and cleans a tick directory, then resamples it into bars for a
//! single interval and time range.

use super::parse_session;
use crate::display::{Format, prepare_ticks, print_bar_summary, write_bars_file};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tickbar_lib::prelude::*;

/// Context attached to any [`ContractViolation`] from the aggregator.
const CONTRACT_CONTEXT: &str = "Tick stream violated the aggregator contract";

/// Default output path for a bar series: `bars_<interval>.<ext>`.
fn default_output(interval: Interval, format: Format) -> PathBuf {
    PathBuf::from(format!("bars_{interval}.{}", format.extension()))
}

/// Aggregate a tick directory into bars.
#[allow(clippy::too_many_arguments)]
pub(crate) fn bars(
    data_dir: &Path,
    interval_str: &str,
    start_str: &str,
    end_str: &str,
    output: Option<PathBuf>,
    format: Format,
    session: Option<&str>,
    quiet: bool,
) -> Result<()> {
    // Validate parameters before touching the data directory
    let interval: Interval = interval_str
        .parse()
        .with_context(|| format!("Invalid interval: {interval_str}"))?;
    let range = TimeRange::parse(start_str, end_str).context("Invalid time range")?;
    let session = parse_session(session)?;

    let output = output.unwrap_or_else(|| default_output(interval, format));

    let prepared = prepare_ticks(data_dir, session, quiet)?;
    let bars = aggregate(&prepared.ticks, interval, range)
        .context(CONTRACT_CONTEXT)?;

    write_bars_file(&bars, &output, format.into())?;

    if !quiet {
        print_bar_summary(&bars, interval, &output);
    }

    Ok(())
}
