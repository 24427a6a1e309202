//! Benchmark utilities for tickbar.
//!
//! Generates deterministic synthetic tick streams.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickbar_lib::{RawRecord, Tick, TimeRange};

/// Shape of a synthetic tick stream.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Number of ticks to generate.
    pub ticks: usize,
    /// First tick timestamp.
    pub start: NaiveDateTime,
    /// Largest gap between consecutive ticks, in milliseconds.
    pub max_gap_ms: u64,
    /// Starting price.
    pub base_price: f64,
    /// Generator seed.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            ticks: 100_000,
            start: NaiveDate::from_ymd_opt(2024, 9, 16)
                .and_then(|d| d.and_hms_opt(9, 30, 0))
                .unwrap_or_default(),
            max_gap_ms: 400,
            base_price: 100.0,
            seed: 0x9e37_79b9_7f4a_7c15,
        }
    }
}

/// Generates an ordered random walk of ticks.
///
/// Roughly one tick in a thousand is a bad print far from the walk, so the
/// outlier filter has work to do.
pub fn synthetic_ticks(config: &SyntheticConfig) -> Vec<Tick> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut timestamp = config.start;
    let mut price = config.base_price;

    (0..config.ticks)
        .map(|_| {
            let gap = rng.gen_range(0..=config.max_gap_ms);
            timestamp += TimeDelta::milliseconds(gap as i64);

            let step: i32 = rng.gen_range(-10..=10);
            price = (price + f64::from(step) * 0.01).max(0.01);

            let print = if rng.gen_bool(0.001) { price * 0.5 } else { price };
            let size = rng.gen_range(1..=500);
            Tick::new(timestamp, print, size)
        })
        .collect()
}

/// Renders ticks back into raw loader rows, with every tenth row repeated.
pub fn synthetic_records(ticks: &[Tick]) -> Vec<RawRecord> {
    ticks
        .iter()
        .enumerate()
        .flat_map(|(i, tick)| {
            let record = RawRecord::new(
                &tick.timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
                &tick.price.to_string(),
                &tick.size.to_string(),
            );
            let copies = if i % 10 == 0 { 2 } else { 1 };
            std::iter::repeat_n(record, copies)
        })
        .collect()
}

/// The range spanning every generated tick.
pub fn covering_range(ticks: &[Tick]) -> Option<TimeRange> {
    let first = ticks.first()?.timestamp;
    let last = ticks.last()?.timestamp;
    TimeRange::new(first, last).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_ticks_are_ordered_and_deterministic() {
        let config = SyntheticConfig {
            ticks: 1_000,
            ..Default::default()
        };
        let a = synthetic_ticks(&config);
        let b = synthetic_ticks(&config);

        assert_eq!(a.len(), 1_000);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(a.iter().all(|t| t.price > 0.0 && t.size > 0));
    }

    #[test]
    fn test_synthetic_records_repeat() {
        let config = SyntheticConfig {
            ticks: 20,
            ..Default::default()
        };
        let ticks = synthetic_ticks(&config);
        assert_eq!(synthetic_records(&ticks).len(), 22);
        assert!(covering_range(&ticks).is_some());
        assert!(covering_range(&[]).is_none());
    }
}
