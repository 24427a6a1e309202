//! Inclusive time range for a bar request.

use chrono::{NaiveDateTime, TimeDelta};

use crate::{MalformedTimestampError, TimeRangeError};

/// Format accepted for start/end parameters.
pub const PARAM_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a start/end parameter in `YYYY-MM-DD HH:MM:SS` form.
///
/// Surrounding whitespace is ignored; fractional seconds are not accepted.
///
/// # Errors
///
/// Returns an error if the input does not match [`PARAM_TIMESTAMP_FORMAT`].
pub fn parse_param_timestamp(input: &str) -> Result<NaiveDateTime, MalformedTimestampError> {
    NaiveDateTime::parse_from_str(input.trim(), PARAM_TIMESTAMP_FORMAT).map_err(|source| {
        MalformedTimestampError {
            input: input.to_string(),
            source,
        }
    })
}

/// A range of instants for bar generation.
///
/// Both ends are inclusive: a tick stamped exactly at `end` is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Start instant (inclusive). Also the first window boundary.
    pub start: NaiveDateTime,
    /// End instant (inclusive).
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a new time range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeRangeError> {
        if start > end {
            return Err(TimeRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses both ends from `YYYY-MM-DD HH:MM:SS` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either string is malformed or start > end.
    pub fn parse(start: &str, end: &str) -> crate::Result<Self> {
        let start = parse_param_timestamp(start)?;
        let end = parse_param_timestamp(end)?;
        Ok(Self::new(start, end)?)
    }

    /// Returns true if the instant lies within the range (both ends inclusive).
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Returns the span between start and end.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(PARAM_TIMESTAMP_FORMAT),
            self.end.format(PARAM_TIMESTAMP_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TickbarError;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse() {
        let range = TimeRange::parse("2024-09-16 09:30:00", " 2024-09-16 16:00:00 ").unwrap();
        assert_eq!(range.start, at(9, 30, 0));
        assert_eq!(range.end, at(16, 0, 0));
        assert_eq!(range.duration(), TimeDelta::minutes(390));
    }

    #[test]
    fn test_malformed() {
        let err = TimeRange::parse("2024-09-16", "2024-09-16 16:00:00").unwrap_err();
        assert!(matches!(err, TickbarError::MalformedTimestamp(ref e) if e.input == "2024-09-16"));

        assert!(parse_param_timestamp("2024-09-16 09:30:00.500").is_err());
        assert!(parse_param_timestamp("16/09/2024 09:30:00").is_err());
    }

    #[test]
    fn test_inverted() {
        let err = TimeRange::new(at(16, 0, 0), at(9, 30, 0)).unwrap_err();
        assert_eq!(
            err,
            TimeRangeError::Inverted {
                start: at(16, 0, 0),
                end: at(9, 30, 0)
            }
        );
        assert!(TimeRange::new(at(9, 30, 0), at(9, 30, 0)).is_ok());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = TimeRange::new(at(9, 30, 0), at(16, 0, 0)).unwrap();
        assert!(range.contains(at(9, 30, 0)));
        assert!(range.contains(at(16, 0, 0)));
        assert!(!range.contains(at(9, 29, 59)));
        assert!(!range.contains(at(16, 0, 1)));
    }

    #[test]
    fn test_display() {
        let range = TimeRange::new(at(9, 30, 0), at(16, 0, 0)).unwrap();
        assert_eq!(range.to_string(), "2024-09-16 09:30:00 to 2024-09-16 16:00:00");
    }
}
