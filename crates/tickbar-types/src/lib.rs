//! Core types for the tickbar OHLCV resampler.
//!
//! This crate provides the fundamental data structures used throughout tickbar:
//!
//! - [`Tick`] - A single trade with timestamp, price, and size
//! - [`Interval`] - Bar width parsed from expressions like `1h30m`
//! - [`TimeRange`] - Inclusive start/end instants for a bar request
//! - [`TickbarError`] - Error taxonomy shared across the workspace

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod interval;
mod tick;
mod time_range;

pub use error::{
    ContractViolation, InvalidIntervalError, MalformedTimestampError, Result, TickbarError,
    TimeRangeError,
};
pub use interval::Interval;
pub use tick::Tick;
pub use time_range::{PARAM_TIMESTAMP_FORMAT, TimeRange, parse_param_timestamp};
