//! CLI command implementations.

pub(crate) mod bars;
pub(crate) mod batch;
pub(crate) mod clean;
pub(crate) mod inspect;

use anyhow::{Context, Result};
use tickbar_lib::TradingSession;

/// Parses the optional `--session` argument.
pub(crate) fn parse_session(session: Option<&str>) -> Result<Option<TradingSession>> {
    session
        .map(|s| {
            s.parse::<TradingSession>()
                .with_context(|| format!("Invalid session: {s}"))
        })
        .transpose()
}
