//! Clean command implementation.

use super::parse_session;
use crate::display::{Format, prepare_ticks, print_reports, write_ticks_file};
use anyhow::Result;
use std::path::Path;

/// Write the cleaned, deduplicated and sorted tick set.
pub(crate) fn clean(
    data_dir: &Path,
    output: &Path,
    format: Format,
    session: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let session = parse_session(session)?;
    let prepared = prepare_ticks(data_dir, session, quiet)?;

    write_ticks_file(&prepared.ticks, output, format.into())?;

    if !quiet {
        print_reports(&prepared);
        println!();
        println!("Output written to: {}", output.display());
    }

    Ok(())
}
