//! Tick data representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single trade print.
///
/// Timestamps are naive local instants; tickbar does not interpret time zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Time of the trade.
    pub timestamp: NaiveDateTime,
    /// Trade price.
    pub price: f64,
    /// Number of units traded.
    pub size: u64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, price: f64, size: u64) -> Self {
        Self {
            timestamp,
            price,
            size,
        }
    }

    /// Returns true if the price is finite and non-negative.
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}
