//! CSV tick loading and cleaning for tickbar.
//!
//! This crate prepares the input the aggregator expects:
//!
//! - [`load_dir`] - Read raw rows from every CSV file in a directory
//! - [`clean`] - Validate, deduplicate, and sort rows into [`Tick`]s
//! - [`TradingSession`] - Optional time-of-day filter
//! - [`TickSummary`] - Quick statistics over a tick set
//!
//! [`Tick`]: tickbar_types::Tick

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cleaner;
mod error;
mod loader;
mod session;
mod summary;

pub use cleaner::{CleanReport, TICK_TIMESTAMP_FORMAT, clean, parse_tick_timestamp};
pub use error::IngestError;
pub use loader::{LoadReport, LoadedRows, LoaderConfig, RawRecord, load_dir, load_file};
pub use session::TradingSession;
pub use summary::TickSummary;
