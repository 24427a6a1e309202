//! Display utilities and file I/O for the tickbar CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;
use tickbar_lib::prelude::*;
use tickbar_lib::{write_bars, write_ticks};

/// Output format for bars and cleaned ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Cleaned ticks together with everything that happened on the way in.
pub(crate) struct PreparedTicks {
    pub(crate) ticks: Vec<Tick>,
    pub(crate) load: LoadReport,
    pub(crate) clean: CleanReport,
    /// Ticks removed by the session filter, if one was applied.
    pub(crate) outside_session: usize,
}

/// Spinner shown while a long step runs, hidden in quiet mode.
pub(crate) fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Loads every tick file under `data_dir`, cleans the rows and applies the
/// optional session filter.
pub(crate) fn prepare_ticks(
    data_dir: &Path,
    session: Option<TradingSession>,
    quiet: bool,
) -> Result<PreparedTicks> {
    let progress = spinner(format!("Loading ticks from {}", data_dir.display()), quiet);

    let loaded = load_dir(data_dir, &LoaderConfig::default())
        .with_context(|| format!("Failed to load tick data from {}", data_dir.display()))?;
    let (ticks, clean) = clean(loaded.records);

    let (ticks, outside_session) = match session {
        Some(session) => {
            let kept = session.filter(&ticks);
            let removed = ticks.len() - kept.len();
            tracing::info!(%session, kept = kept.len(), removed, "applied session filter");
            (kept, removed)
        }
        None => (ticks, 0),
    };

    progress.finish_with_message(format!(
        "Loaded {} ticks from {} files",
        ticks.len(),
        loaded.report.files_read
    ));

    Ok(PreparedTicks {
        ticks,
        load: loaded.report,
        clean,
        outside_session,
    })
}

/// Write bars to a file in the specified format.
pub(crate) fn write_bars_file(bars: &[Bar], output: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_bars(format, bars, BufWriter::new(file))
        .with_context(|| format!("Failed to write bars to {}", output.display()))
}

/// Write ticks to a file in the specified format.
pub(crate) fn write_ticks_file(ticks: &[Tick], output: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_ticks(format, ticks, BufWriter::new(file))
        .with_context(|| format!("Failed to write ticks to {}", output.display()))
}

/// Prints the load and clean counters.
pub(crate) fn print_reports(prepared: &PreparedTicks) {
    let load = &prepared.load;
    let clean = &prepared.clean;

    println!("Files:");
    println!("  Read:            {}", load.files_read);
    println!("  Failed:          {}", load.files_failed);
    println!("  Rows:            {}", load.rows);
    println!();
    println!("Cleaning:");
    println!("  Total rows:      {}", clean.total);
    println!("  Kept:            {}", clean.kept);
    println!("  Missing fields:  {}", clean.missing_fields);
    println!("  Malformed:       {}", clean.malformed);
    println!("  Negative:        {}", clean.negative);
    println!("  Duplicates:      {}", clean.duplicates);
    if prepared.outside_session > 0 {
        println!("  Outside session: {}", prepared.outside_session);
    }
}

/// Aggregate figures over a bar series.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct BarStats {
    pub(crate) bullish: usize,
    pub(crate) bearish: usize,
    pub(crate) mean_range: f64,
    pub(crate) mean_body: f64,
    pub(crate) last_typical: Option<f64>,
    pub(crate) volume: u64,
}

impl BarStats {
    pub(crate) fn from_bars(bars: &[Bar]) -> Self {
        if bars.is_empty() {
            return Self::default();
        }
        let n = bars.len() as f64;
        Self {
            bullish: bars.iter().filter(|b| b.is_bullish()).count(),
            bearish: bars.iter().filter(|b| b.is_bearish()).count(),
            mean_range: bars.iter().map(Bar::range).sum::<f64>() / n,
            mean_body: bars.iter().map(Bar::body).sum::<f64>() / n,
            last_typical: bars.last().map(Bar::typical_price),
            volume: bars.iter().map(|b| b.volume).fold(0, u64::saturating_add),
        }
    }
}

/// Prints a one-block overview of a bar series.
pub(crate) fn print_bar_summary(bars: &[Bar], interval: Interval, output: &Path) {
    let stats = BarStats::from_bars(bars);

    println!("Bars ({interval}):");
    println!("  Count:      {}", bars.len());
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        println!("  First:      {}", first.timestamp);
        println!("  Last:       {}", last.timestamp);
    }
    println!("  Up/Down:    {}/{}", stats.bullish, stats.bearish);
    println!("  Mean range: {:.4}", stats.mean_range);
    println!("  Mean body:  {:.4}", stats.mean_body);
    if let Some(typical) = stats.last_typical {
        println!("  Last typ.:  {typical:.4}");
    }
    println!("  Volume:     {}", stats.volume);
    println!("Output written to: {}", output.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    #[test]
    fn test_format_mapping() {
        assert_eq!(OutputFormat::from(Format::Csv), OutputFormat::Csv);
        assert_eq!(OutputFormat::from(Format::Ndjson), OutputFormat::Ndjson);
        assert_eq!(Format::Parquet.extension(), "parquet");
        assert_eq!(Format::Json.to_string(), "json");
    }

    #[test]
    fn test_bar_stats() {
        let ts = TimeRange::parse("2024-09-16 09:30:00", "2024-09-16 09:30:00")
            .unwrap()
            .start;
        let bars = [
            Bar::new(ts, 100.0, 104.0, 99.0, 103.0, 10),
            Bar::new(ts, 103.0, 103.0, 100.0, 101.0, u64::MAX),
        ];
        let stats = BarStats::from_bars(&bars);

        assert_eq!(stats.bullish, 1);
        assert_eq!(stats.bearish, 1);
        assert_eq!(stats.mean_range, 4.0);
        assert_eq!(stats.mean_body, 2.5);
        assert_eq!(stats.last_typical, Some(304.0 / 3.0));
        assert_eq!(stats.volume, u64::MAX);
        assert_eq!(BarStats::from_bars(&[]), BarStats::default());
    }

    #[test]
    fn test_prepare_ticks_with_session() {
        let dir = TempDir::new().unwrap();
        let mut file = File::create(dir.path().join("day.csv")).unwrap();
        writeln!(file, "Timestamp,Price,Size").unwrap();
        writeln!(file, "2024-09-16 09:00:00.000,99.0,5").unwrap();
        writeln!(file, "2024-09-16 09:30:00.000,100.0,10").unwrap();
        writeln!(file, "2024-09-16 09:30:00.000,100.0,10").unwrap();
        writeln!(file, "2024-09-16 10:00:00.000,bad,1").unwrap();
        drop(file);

        let prepared =
            prepare_ticks(dir.path(), Some(TradingSession::default()), true).unwrap();

        assert_eq!(prepared.load.files_read, 1);
        assert_eq!(prepared.clean.duplicates, 1);
        assert_eq!(prepared.clean.malformed, 1);
        assert_eq!(prepared.outside_session, 1);
        assert_eq!(prepared.ticks.len(), 1);
        assert_eq!(prepared.ticks[0].size, 10);
    }

    #[test]
    fn test_write_bars_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bars.csv");
        let range = TimeRange::parse("2024-09-16 09:30:00", "2024-09-16 09:31:00").unwrap();
        let tick = Tick::new(range.start, 100.0, 3);
        let bars = aggregate(&[tick], "1m".parse().unwrap(), range).unwrap();

        write_bars_file(&bars, &path, OutputFormat::Csv).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "timestamp,open,high,low,close,volume\n2024-09-16 09:30:00,100,100,100,100,3\n"
        );
    }
}
