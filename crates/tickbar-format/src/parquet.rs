//! Apache Parquet output format.

use arrow::array::{Float64Array, TimestampMicrosecondArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;
use tickbar_aggregate::Bar;
use tickbar_types::Tick;

use crate::{FormatError, Formatter};

/// Parquet formatter.
///
/// Timestamps are stored without a time zone, matching the naive instants
/// used everywhere else.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

fn parquet_error(e: impl std::fmt::Display) -> FormatError {
    FormatError::Parquet(e.to_string())
}

fn micros(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_micros()
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    fn timestamp_field(name: &str) -> Field {
        Field::new(name, DataType::Timestamp(TimeUnit::Microsecond, None), false)
    }

    /// Creates the Arrow schema for tick data.
    fn tick_schema() -> Schema {
        Schema::new(vec![
            Self::timestamp_field("timestamp"),
            Field::new("price", DataType::Float64, false),
            Field::new("size", DataType::UInt64, false),
        ])
    }

    /// Creates the Arrow schema for bars.
    fn bar_schema() -> Schema {
        Schema::new(vec![
            Self::timestamp_field("timestamp"),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::UInt64, false),
        ])
    }

    fn ticks_to_batch(schema: &Arc<Schema>, ticks: &[Tick]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = ticks.iter().map(|t| micros(t.timestamp)).collect();
        let prices: Vec<_> = ticks.iter().map(|t| t.price).collect();
        let sizes: Vec<_> = ticks.iter().map(|t| t.size).collect();

        RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps)),
                Arc::new(Float64Array::from(prices)),
                Arc::new(UInt64Array::from(sizes)),
            ],
        )
        .map_err(parquet_error)
    }

    fn bars_to_batch(schema: &Arc<Schema>, bars: &[Bar]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = bars.iter().map(|b| micros(b.timestamp)).collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();

        RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps)),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(UInt64Array::from(volumes)),
            ],
        )
        .map_err(parquet_error)
    }

    /// Streams rows in row-group sized chunks through an Arrow writer.
    fn write_chunked<T, W, F>(
        &self,
        schema: Schema,
        rows: &[T],
        writer: W,
        to_batch: F,
    ) -> Result<(), FormatError>
    where
        W: Write + Send,
        F: Fn(&Arc<Schema>, &[T]) -> Result<RecordBatch, FormatError>,
    {
        let schema = Arc::new(schema);
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer =
            ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props)).map_err(parquet_error)?;

        for chunk in rows.chunks(self.row_group_size.max(1)) {
            let batch = to_batch(&schema, chunk)?;
            arrow_writer.write(&batch).map_err(parquet_error)?;
        }

        arrow_writer.close().map_err(parquet_error)?;
        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        self.write_chunked(Self::tick_schema(), ticks, writer, Self::ticks_to_batch)
    }

    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        self.write_chunked(Self::bar_schema(), bars, writer, Self::bars_to_batch)
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
