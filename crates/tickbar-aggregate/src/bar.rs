//! OHLCV bar record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One finalized OHLCV bar.
///
/// Field order matches the tabular output columns:
/// `timestamp, open, high, low, close, volume`.
///
/// `low` comes from the outlier-filtered prices of the window, so it can sit
/// above the smallest traded price when that price was an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Window start (inclusive).
    pub timestamp: NaiveDateTime,
    /// First price folded into the window.
    pub open: f64,
    /// Highest price folded into the window.
    pub high: f64,
    /// Lowest price after outlier filtering.
    pub low: f64,
    /// Last price folded into the window.
    pub close: f64,
    /// Sum of trade sizes.
    pub volume: u64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns the typical price ((high + low + close) / 3).
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 16)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn create_test_bar() -> Bar {
        Bar::new(start(), 100.0, 105.0, 98.0, 102.0, 1_000)
    }

    #[test]
    fn test_range() {
        assert_relative_eq!(create_test_bar().range(), 7.0);
    }

    #[test]
    fn test_body() {
        assert_relative_eq!(create_test_bar().body(), 2.0);
    }

    #[test]
    fn test_direction() {
        let bar = create_test_bar();
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());

        let bar = Bar::new(start(), 102.0, 105.0, 98.0, 100.0, 1_000);
        assert!(!bar.is_bullish());
        assert!(bar.is_bearish());

        let doji = Bar::new(start(), 100.0, 101.0, 99.0, 100.0, 10);
        assert!(!doji.is_bullish() && !doji.is_bearish());
    }

    #[test]
    fn test_typical_price() {
        assert_relative_eq!(create_test_bar().typical_price(), 305.0 / 3.0);
    }
}
