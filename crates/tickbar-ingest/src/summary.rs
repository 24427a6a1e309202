//! Descriptive statistics over a tick set.

use chrono::NaiveDateTime;
use tickbar_types::Tick;

/// Overview of a cleaned tick set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    /// Number of ticks.
    pub count: usize,
    /// Earliest timestamp.
    pub first: NaiveDateTime,
    /// Latest timestamp.
    pub last: NaiveDateTime,
    /// Lowest price.
    pub min_price: f64,
    /// Highest price.
    pub max_price: f64,
    /// Sum of sizes.
    pub total_volume: u64,
}

impl TickSummary {
    /// Summarizes the ticks, or returns `None` when there are none.
    #[must_use]
    pub fn from_ticks(ticks: &[Tick]) -> Option<Self> {
        let head = ticks.first()?;
        let init = Self {
            count: 0,
            first: head.timestamp,
            last: head.timestamp,
            min_price: head.price,
            max_price: head.price,
            total_volume: 0,
        };

        Some(ticks.iter().fold(init, |s, t| Self {
            count: s.count + 1,
            first: s.first.min(t.timestamp),
            last: s.last.max(t.timestamp),
            min_price: s.min_price.min(t.price),
            max_price: s.max_price.max(t.price),
            total_volume: s.total_volume.saturating_add(t.size),
        }))
    }
}
