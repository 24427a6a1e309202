//! Trading-hours filter.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use tickbar_types::Tick;

use crate::IngestError;

/// Daily time-of-day window used to keep only regular-hours prints.
///
/// Both ends are inclusive and compared against each tick's time of day,
/// whatever the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingSession {
    /// Session open.
    pub open: NaiveTime,
    /// Session close.
    pub close: NaiveTime,
}

impl Default for TradingSession {
    /// Regular US equity hours, 09:30 to 16:00.
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 30, 0).expect("valid time"),
            close: NaiveTime::from_hms_opt(16, 0, 0).expect("valid time"),
        }
    }
}

impl TradingSession {
    /// Creates a session, or `None` if `open` is after `close`.
    #[must_use]
    pub fn new(open: NaiveTime, close: NaiveTime) -> Option<Self> {
        (open <= close).then_some(Self { open, close })
    }

    /// Returns true if the tick's time of day is inside the session.
    #[must_use]
    pub fn contains(&self, tick: &Tick) -> bool {
        let time = tick.timestamp.time();
        time >= self.open && time <= self.close
    }

    /// Keeps the ticks inside the session, preserving order.
    #[must_use]
    pub fn filter(&self, ticks: &[Tick]) -> Vec<Tick> {
        ticks.iter().filter(|t| self.contains(t)).copied().collect()
    }
}

impl std::fmt::Display for TradingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.open.format("%H:%M:%S"), self.close.format("%H:%M:%S"))
    }
}

impl FromStr for TradingSession {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IngestError::Session(s.to_string());
        let parse_time = |text: &str| {
            let text = text.trim();
            NaiveTime::parse_from_str(text, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
                .map_err(|_| invalid())
        };

        let (open, close) = s.split_once('-').ok_or_else(invalid)?;
        Self::new(parse_time(open)?, parse_time(close)?).ok_or_else(invalid)
    }
}

impl<'de> Deserialize<'de> for TradingSession {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
