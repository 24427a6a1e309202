//! Error types for tickbar.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type alias for tickbar operations.
pub type Result<T> = std::result::Result<T, TickbarError>;

/// Errors that can occur while turning ticks into bars.
#[derive(Error, Debug)]
pub enum TickbarError {
    /// Interval expression could not be resolved.
    #[error(transparent)]
    InvalidInterval(#[from] InvalidIntervalError),

    /// Start or end parameter did not match the expected format.
    #[error(transparent)]
    MalformedTimestamp(#[from] MalformedTimestampError),

    /// Invalid time range.
    #[error(transparent)]
    TimeRange(#[from] TimeRangeError),

    /// Tick input broke the aggregator's precondition.
    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),
}

/// Error returned when parsing an interval expression fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidIntervalError {
    /// No `<digits><unit>` token was found.
    #[error("invalid interval '{0}': expected tokens like 1d, 2h, 30m, 15s")]
    NoUnits(String),

    /// Tokens were found but they add up to zero seconds.
    #[error("invalid interval '{0}': total duration is zero")]
    Zero(String),

    /// The total does not fit in a duration.
    #[error("invalid interval '{0}': duration overflows")]
    Overflow(String),
}

/// Error returned when a start/end parameter cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed timestamp '{input}', expected YYYY-MM-DD HH:MM:SS")]
pub struct MalformedTimestampError {
    /// The rejected input.
    pub input: String,
    /// Underlying chrono parse error.
    #[source]
    pub source: chrono::ParseError,
}

/// Error for invalid time ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// Start instant is after end instant.
    #[error("Invalid time range: {start} > {end}")]
    Inverted {
        /// The start instant.
        start: NaiveDateTime,
        /// The end instant.
        end: NaiveDateTime,
    },
}

/// A tick stream that does not satisfy the aggregator's input contract.
///
/// The cleaning stage is responsible for sorting and validating ticks, so
/// any of these indicates a bug upstream rather than bad market data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractViolation {
    /// A tick arrived with a timestamp earlier than its predecessor.
    #[error("tick at {current} arrived after tick at {previous}; input must be sorted")]
    OutOfOrder {
        /// Timestamp of the preceding tick.
        previous: NaiveDateTime,
        /// Timestamp of the offending tick.
        current: NaiveDateTime,
    },

    /// A tick carried a negative or non-finite price.
    #[error("tick at {timestamp} has invalid price {price}")]
    InvalidPrice {
        /// Timestamp of the offending tick.
        timestamp: NaiveDateTime,
        /// The rejected price.
        price: f64,
    },
}
