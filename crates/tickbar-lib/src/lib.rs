//! Resample tick-level trades into fixed-interval OHLCV bars.
//!
//! This is a facade crate that re-exports functionality from the tickbar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickbar_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loaded = load_dir("data", &LoaderConfig::default())?;
//!     let (ticks, _report) = clean(loaded.records);
//!
//!     let interval: Interval = "1h".parse()?;
//!     let range = TimeRange::parse("2024-09-16 09:30:00", "2024-09-17 16:00:00")?;
//!     let bars = aggregate(&ticks, interval, range)?;
//!
//!     let file = std::fs::File::create("Hour.csv")?;
//!     CsvFormatter::new().write_bars(&bars, std::io::BufWriter::new(file))?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbar_types::*;

// Re-export aggregation
pub use tickbar_aggregate::{
    Bar, BarAggregator, IqrBounds, aggregate, filter_outliers, filtered_min, outlier,
};

// Re-export ingest
#[cfg(feature = "ingest")]
pub use tickbar_ingest::{
    CleanReport, IngestError, LoadReport, LoadedRows, LoaderConfig, RawRecord, TickSummary,
    TradingSession, clean, load_dir, load_file,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickbar_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, write_bars,
    write_ticks,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use tickbar_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use tickbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbar_types::{
        ContractViolation, Interval, InvalidIntervalError, MalformedTimestampError, Result,
        Tick, TickbarError, TimeRange,
    };

    pub use tickbar_aggregate::{Bar, BarAggregator, aggregate};

    #[cfg(feature = "ingest")]
    pub use tickbar_ingest::{
        CleanReport, LoadReport, LoaderConfig, TickSummary, TradingSession, clean, load_dir,
    };

    #[cfg(feature = "format")]
    pub use tickbar_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use tickbar_format::ParquetFormatter;
}
