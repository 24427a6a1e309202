//! Raw CSV loading from a data directory.

use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::IngestError;

/// Configuration for the tick loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// File extension to pick up (without the dot).
    pub extension: String,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extension: "csv".to_string(),
            delimiter: b',',
        }
    }
}

impl LoaderConfig {
    /// Sets the file extension to load.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// One CSV row before any validation.
///
/// Every field is optional text; typing happens in [`crate::clean`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// `Timestamp` column.
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<String>,
    /// `Price` column.
    #[serde(rename = "Price")]
    pub price: Option<String>,
    /// `Size` column.
    #[serde(rename = "Size")]
    pub size: Option<String>,
}

impl RawRecord {
    /// Creates a record from column text.
    #[must_use]
    pub fn new(timestamp: &str, price: &str, size: &str) -> Self {
        Self {
            timestamp: Some(timestamp.to_string()),
            price: Some(price.to_string()),
            size: Some(size.to_string()),
        }
    }
}

/// Counters for a directory load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Files read successfully.
    pub files_read: usize,
    /// Files skipped because they could not be read.
    pub files_failed: usize,
    /// Rows collected from the readable files.
    pub rows: usize,
}

/// Rows collected from a data directory.
#[derive(Debug, Clone, Default)]
pub struct LoadedRows {
    /// All rows, file by file in file-name order.
    pub records: Vec<RawRecord>,
    /// Load counters.
    pub report: LoadReport,
}

/// Loads every matching file in `dir`.
///
/// Files are read in file-name order so repeated runs see rows in the same
/// order. A file that cannot be read is logged and skipped; rows read from
/// it before the failure are discarded.
///
/// # Errors
///
/// Returns an error if the directory itself cannot be listed.
pub fn load_dir(dir: impl AsRef<Path>, config: &LoaderConfig) -> Result<LoadedRows, IngestError> {
    let dir = dir.as_ref();
    let directory_error = |source| IngestError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(directory_error)? {
        let path = entry.map_err(directory_error)?.path();
        let matches = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == config.extension.as_str());
        if matches {
            paths.push(path);
        }
    }
    paths.sort();

    let mut loaded = LoadedRows::default();
    for path in &paths {
        match load_file(path, config) {
            Ok(records) => {
                debug!(path = %path.display(), rows = records.len(), "loaded file");
                loaded.report.files_read += 1;
                loaded.records.extend(records);
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable file");
                loaded.report.files_failed += 1;
            }
        }
    }
    loaded.report.rows = loaded.records.len();

    info!(
        dir = %dir.display(),
        files = loaded.report.files_read,
        failed = loaded.report.files_failed,
        rows = loaded.report.rows,
        "loaded tick files"
    );
    Ok(loaded)
}

/// Loads all rows from a single CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid CSV.
pub fn load_file(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Vec<RawRecord>, IngestError> {
    let path = path.as_ref();
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    reader
        .deserialize()
        .collect::<Result<Vec<RawRecord>, _>>()
        .map_err(csv_error)
}
