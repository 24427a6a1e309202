//! Ingest error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading tick files.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The data directory could not be listed.
    #[error("cannot read data directory {path}: {source}")]
    Directory {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV file could not be opened or parsed.
    #[error("cannot read {path}: {source}")]
    Csv {
        /// File that failed.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Invalid trading session specification.
    #[error("invalid session '{0}', expected HH:MM-HH:MM or HH:MM:SS-HH:MM:SS")]
    Session(String),
}
