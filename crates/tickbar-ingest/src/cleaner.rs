//! Row validation, deduplication, and ordering.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use tickbar_types::Tick;
use tracing::info;

use crate::RawRecord;

/// Format accepted for tick timestamps; the fractional part is optional.
pub const TICK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Counters describing what the cleaner kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Rows examined.
    pub total: usize,
    /// Rows that became ticks.
    pub kept: usize,
    /// Rows with an empty or absent field.
    pub missing_fields: usize,
    /// Rows whose fields did not parse.
    pub malformed: usize,
    /// Rows with a negative price or size.
    pub negative: usize,
    /// Rows repeating an earlier `(timestamp, price)` pair.
    pub duplicates: usize,
}

impl CleanReport {
    /// Returns the number of dropped rows.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.total - self.kept
    }
}

/// Why a single row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Missing,
    Malformed,
    Negative,
}

/// Validates, deduplicates, and sorts raw rows into ticks.
///
/// Fields are trimmed before parsing. Duplicates are detected on the trimmed
/// timestamp and price text, so `100.5` and `100.50` at the same instant
/// are both kept. The first occurrence of a duplicate wins, and the sort is
/// stable, so ticks sharing a timestamp stay in file order.
#[must_use]
pub fn clean(records: impl IntoIterator<Item = RawRecord>) -> (Vec<Tick>, CleanReport) {
    let mut report = CleanReport::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut ticks = Vec::new();

    for record in records {
        report.total += 1;

        let (tick, key) = match parse_record(&record) {
            Ok(parsed) => parsed,
            Err(Rejection::Missing) => {
                report.missing_fields += 1;
                continue;
            }
            Err(Rejection::Malformed) => {
                report.malformed += 1;
                continue;
            }
            Err(Rejection::Negative) => {
                report.negative += 1;
                continue;
            }
        };

        if !seen.insert(key) {
            report.duplicates += 1;
            continue;
        }
        ticks.push(tick);
    }

    ticks.sort_by_key(|t| t.timestamp);
    report.kept = ticks.len();

    info!(
        total = report.total,
        kept = report.kept,
        missing = report.missing_fields,
        malformed = report.malformed,
        negative = report.negative,
        duplicates = report.duplicates,
        "cleaned ticks"
    );
    (ticks, report)
}

/// Parses a tick timestamp in `YYYY-MM-DD HH:MM:SS[.ffffff]` form.
#[must_use]
pub fn parse_tick_timestamp(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), TICK_TIMESTAMP_FORMAT).ok()
}

fn parse_record(record: &RawRecord) -> Result<(Tick, (String, String)), Rejection> {
    let field = |value: &Option<String>| -> Result<String, Rejection> {
        match value.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(Rejection::Missing),
        }
    };

    let timestamp_text = field(&record.timestamp)?;
    let price_text = field(&record.price)?;
    let size_text = field(&record.size)?;

    let price: f64 = price_text.parse().map_err(|_| Rejection::Malformed)?;
    if !price.is_finite() {
        return Err(Rejection::Malformed);
    }
    let size: i64 = size_text.parse().map_err(|_| Rejection::Malformed)?;
    let timestamp = parse_tick_timestamp(&timestamp_text).ok_or(Rejection::Malformed)?;

    if price < 0.0 || size < 0 {
        return Err(Rejection::Negative);
    }
    let size = u64::try_from(size).map_err(|_| Rejection::Negative)?;

    Ok((
        Tick::new(timestamp, price, size),
        (timestamp_text, price_text),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn row(ts: &str, price: &str, size: &str) -> RawRecord {
        RawRecord::new(ts, price, size)
    }

    #[test]
    fn test_parse_tick_timestamp() {
        assert_eq!(
            parse_tick_timestamp("2024-09-16 09:30:00.250"),
            Some(at(9, 30, 0) + TimeDelta::milliseconds(250))
        );
        assert_eq!(
            parse_tick_timestamp("2024-09-16 09:30:00.000001"),
            Some(at(9, 30, 0) + TimeDelta::microseconds(1))
        );
        assert_eq!(parse_tick_timestamp("2024-09-16 09:30:00"), Some(at(9, 30, 0)));
        assert_eq!(parse_tick_timestamp("2024-09-16T09:30:00"), None);
        assert_eq!(parse_tick_timestamp("yesterday"), None);
    }

    #[test]
    fn test_clean_sorts_and_types() {
        let (ticks, report) = clean(vec![
            row("2024-09-16 09:30:02.000", "101.0", "5"),
            row(" 2024-09-16 09:30:01.000 ", " 100.5 ", " 10 "),
        ]);

        assert_eq!(report.total, 2);
        assert_eq!(report.kept, 2);
        assert_eq!(ticks[0], Tick::new(at(9, 30, 1), 100.5, 10));
        assert_eq!(ticks[1], Tick::new(at(9, 30, 2), 101.0, 5));
    }

    #[test]
    fn test_clean_rejections() {
        let (ticks, report) = clean(vec![
            row("2024-09-16 09:30:00.000", "", "1"),
            RawRecord {
                timestamp: Some("2024-09-16 09:30:00.000".into()),
                price: Some("1".into()),
                size: None,
            },
            row("2024-09-16 09:30:00.000", "abc", "1"),
            row("2024-09-16 09:30:00.000", "1.0", "1.5"),
            row("2024-09-16 09:30:00.000", "nan", "1"),
            row("2024-09-16 09:30:00.000", "inf", "1"),
            row("16/09/2024 09:30:00", "1.0", "1"),
            row("2024-09-16 09:30:00.000", "-1.0", "1"),
            row("2024-09-16 09:30:00.000", "1.0", "-1"),
            row("2024-09-16 09:30:00.000", "1.0", "0"),
        ]);

        assert_eq!(report.missing_fields, 2);
        assert_eq!(report.malformed, 5);
        assert_eq!(report.negative, 2);
        assert_eq!(report.kept, 1);
        assert_eq!(report.dropped(), 9);
        assert_eq!(ticks, vec![Tick::new(at(9, 30, 0), 1.0, 0)]);
    }

    #[test]
    fn test_clean_deduplicates_on_text_key() {
        let (ticks, report) = clean(vec![
            row("2024-09-16 09:30:00.000", "100.5", "10"),
            row("2024-09-16 09:30:00.000", "100.5", "99"),
            row("2024-09-16 09:30:00.000", "100.50", "7"),
            row("2024-09-16 09:30:00.000", "100.6", "1"),
        ]);

        assert_eq!(report.duplicates, 1);
        assert_eq!(ticks.len(), 3);
        // First occurrence wins and file order survives the stable sort.
        assert_eq!(ticks[0].size, 10);
        assert_eq!(ticks[1].size, 7);
        assert_eq!(ticks[2].size, 1);
    }
}
