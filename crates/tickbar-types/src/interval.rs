//! Bar interval parsing.

use chrono::TimeDelta;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::InvalidIntervalError;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Width of an OHLCV bar, normalized to whole seconds.
///
/// Parsed from expressions made of `<integer><unit>` tokens where the unit
/// is one of `d`, `h`, `m`, `s`. Tokens may appear in any order and repeat:
///
/// ```
/// use tickbar_types::Interval;
///
/// assert_eq!("1h30m".parse::<Interval>().unwrap().seconds(), 5400);
/// assert_eq!("30m1h".parse::<Interval>().unwrap().seconds(), 5400);
/// assert_eq!("1m1m".parse::<Interval>().unwrap().seconds(), 120);
/// ```
///
/// Anything that is not part of a token is ignored, so `"1x2m"` is two
/// minutes. An expression with no tokens, or one that sums to zero, is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    seconds: u64,
}

impl Interval {
    /// Largest interval accepted; keeps every window boundary representable.
    pub const MAX_SECONDS: u64 = i64::MAX as u64 / 1_000_000;

    /// Creates an interval from a number of seconds.
    ///
    /// Returns `None` for zero or for values above [`Self::MAX_SECONDS`].
    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Option<Self> {
        if seconds == 0 || seconds > Self::MAX_SECONDS {
            None
        } else {
            Some(Self { seconds })
        }
    }

    /// Parses an interval expression.
    ///
    /// # Errors
    ///
    /// Returns an error if no token matches, the total is zero, or the total
    /// overflows.
    pub fn parse(expr: &str) -> Result<Self, InvalidIntervalError> {
        let overflow = || InvalidIntervalError::Overflow(expr.to_string());

        let mut total: u64 = 0;
        let mut matched = false;

        for cap in token_regex().captures_iter(expr) {
            let (Some(count), Some(unit)) = (cap.get(1), cap.get(2)) else {
                continue;
            };
            let Some(unit) = unit.as_str().chars().next().and_then(unit_seconds) else {
                continue;
            };
            let seconds = count
                .as_str()
                .parse::<u64>()
                .ok()
                .and_then(|count| count.checked_mul(unit))
                .ok_or_else(overflow)?;
            total = total.checked_add(seconds).ok_or_else(overflow)?;
            matched = true;
        }

        if !matched {
            return Err(InvalidIntervalError::NoUnits(expr.to_string()));
        }
        if total == 0 {
            return Err(InvalidIntervalError::Zero(expr.to_string()));
        }
        Self::from_seconds(total).ok_or_else(overflow)
    }

    /// Returns the interval length in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Returns the interval as a chrono duration.
    #[must_use]
    pub fn as_time_delta(&self) -> TimeDelta {
        // MAX_SECONDS guarantees this fits.
        TimeDelta::seconds(self.seconds as i64)
    }
}

/// `<digits><unit>` token; text outside a token is never looked at.
fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| Regex::new(r"([0-9]+)([dhms])").expect("interval regex is valid"))
}

/// Seconds represented by one unit suffix.
const fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        'd' => Some(SECONDS_PER_DAY),
        'h' => Some(SECONDS_PER_HOUR),
        'm' => Some(SECONDS_PER_MINUTE),
        's' => Some(1),
        _ => None,
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rest = self.seconds;
        for (suffix, unit) in [
            ('d', SECONDS_PER_DAY),
            ('h', SECONDS_PER_HOUR),
            ('m', SECONDS_PER_MINUTE),
            ('s', 1),
        ] {
            let count = rest / unit;
            if count > 0 {
                write!(f, "{count}{suffix}")?;
            }
            rest %= unit;
        }
        Ok(())
    }
}

impl FromStr for Interval {
    type Err = InvalidIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Interval> for TimeDelta {
    fn from(interval: Interval) -> Self {
        interval.as_time_delta()
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expr = String::deserialize(deserializer)?;
        Self::parse(&expr).map_err(serde::de::Error::custom)
    }
}
