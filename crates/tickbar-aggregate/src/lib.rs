//! Tick-to-OHLCV aggregation for tickbar.
//!
//! This crate provides the bar-building core:
//!
//! - [`Bar`] - OHLCV bar record
//! - [`BarAggregator`] - Push-style sweep aggregator
//! - [`aggregate`] - Batch aggregation over a tick slice
//! - [`outlier`] - Index-based IQR outlier filter used for each bar's low

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;
pub mod outlier;

pub use aggregator::{BarAggregator, aggregate};
pub use bar::Bar;
pub use outlier::{IqrBounds, filter_outliers, filtered_min};
