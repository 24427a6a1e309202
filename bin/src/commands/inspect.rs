//! Inspect command implementation.

use crate::display::{prepare_ticks, print_reports};
use anyhow::Result;
use std::path::Path;
use tickbar_lib::TickSummary;

/// Show what a data directory contains after cleaning.
pub(crate) fn inspect(data_dir: &Path, quiet: bool) -> Result<()> {
    let prepared = prepare_ticks(data_dir, None, quiet)?;

    print_reports(&prepared);
    println!();

    let Some(summary) = TickSummary::from_ticks(&prepared.ticks) else {
        println!("No valid ticks found in {}", data_dir.display());
        return Ok(());
    };

    println!("Ticks:");
    println!("  Count:        {}", summary.count);
    println!("  First:        {}", summary.first);
    println!("  Last:         {}", summary.last);
    println!("  Price range:  {} - {}", summary.min_price, summary.max_price);
    println!("  Total volume: {}", summary.total_volume);

    Ok(())
}
