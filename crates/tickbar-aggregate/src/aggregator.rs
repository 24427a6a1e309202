//! Sweep aggregation of ordered ticks into fixed-width bars.

use chrono::{NaiveDateTime, TimeDelta};
use tickbar_types::{ContractViolation, Interval, Tick, TimeRange};
use tracing::debug;

use crate::{Bar, outlier};

/// Push-style sweep aggregator.
///
/// Windows are laid out from `range.start` in steps of `interval`, each one
/// half-open `[start, start + interval)`. Ticks outside `range` (both ends
/// inclusive) are ignored. A window that receives no ticks produces no bar.
///
/// Ticks must arrive in non-decreasing timestamp order with finite,
/// non-negative prices; anything else is a [`ContractViolation`].
#[derive(Debug)]
pub struct BarAggregator {
    interval: Interval,
    step: TimeDelta,
    range: TimeRange,
    window: Window,
    last_seen: Option<NaiveDateTime>,
}

impl BarAggregator {
    /// Creates an aggregator whose first window starts at `range.start`.
    #[must_use]
    pub fn new(interval: Interval, range: TimeRange) -> Self {
        let step = interval.as_time_delta();
        Self {
            interval,
            step,
            range,
            window: Window::starting_at(range.start, step),
            last_seen: None,
        }
    }

    /// Returns the bar interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the requested time range.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }

    /// Processes a tick, potentially emitting a completed bar.
    ///
    /// Returns `Some(bar)` when this tick moves the sweep past a window that
    /// held ticks. At most one bar can complete per tick since every window
    /// skipped on the way is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick is older than the previous one or has an
    /// invalid price.
    pub fn process(&mut self, tick: &Tick) -> Result<Option<Bar>, ContractViolation> {
        self.check_contract(tick)?;

        if !self.range.contains(tick.timestamp) {
            return Ok(None);
        }

        let completed = if tick.timestamp >= self.window.end {
            self.advance_to(tick.timestamp)
        } else {
            None
        };

        self.window.fold(tick);
        Ok(completed)
    }

    /// Finishes aggregation, returning the trailing window if it holds ticks.
    ///
    /// The trailing window does not need to have reached its end.
    #[must_use]
    pub fn finish(self) -> Option<Bar> {
        self.window.finish()
    }

    fn check_contract(&mut self, tick: &Tick) -> Result<(), ContractViolation> {
        if let Some(previous) = self.last_seen
            && tick.timestamp < previous
        {
            return Err(ContractViolation::OutOfOrder {
                previous,
                current: tick.timestamp,
            });
        }
        if !tick.has_valid_price() {
            return Err(ContractViolation::InvalidPrice {
                timestamp: tick.timestamp,
                price: tick.price,
            });
        }
        self.last_seen = Some(tick.timestamp);
        Ok(())
    }

    /// Closes the current window and moves to the one containing `timestamp`.
    fn advance_to(&mut self, timestamp: NaiveDateTime) -> Option<Bar> {
        let start = self.window.start;

        // Every window strictly between the old one and the target is empty,
        // so jump in one step instead of walking them.
        let interval = self.step.num_seconds();
        let steps = (timestamp - start).num_seconds() / interval;
        let next = Window::starting_at(start + TimeDelta::seconds(steps * interval), self.step);

        std::mem::replace(&mut self.window, next).finish()
    }
}

/// Aggregates a slice of ordered ticks into bars.
///
/// Threads a [`BarAggregator`] through a fold over the ticks and appends the
/// trailing window at the end.
///
/// # Errors
///
/// Returns an error if the ticks violate the ordering or price contract.
pub fn aggregate(
    ticks: &[Tick],
    interval: Interval,
    range: TimeRange,
) -> Result<Vec<Bar>, ContractViolation> {
    let (aggregator, mut bars) = ticks.iter().try_fold(
        (BarAggregator::new(interval, range), Vec::new()),
        |(mut aggregator, mut bars), tick| {
            bars.extend(aggregator.process(tick)?);
            Ok::<_, ContractViolation>((aggregator, bars))
        },
    )?;
    bars.extend(aggregator.finish());

    debug!(
        %interval,
        %range,
        ticks = ticks.len(),
        bars = bars.len(),
        "aggregated ticks into bars"
    );
    Ok(bars)
}

/// One half-open window and what has been folded into it so far.
#[derive(Debug)]
struct Window {
    start: NaiveDateTime,
    end: NaiveDateTime,
    acc: Option<Accumulator>,
}

impl Window {
    fn starting_at(start: NaiveDateTime, step: TimeDelta) -> Self {
        Self {
            start,
            end: start
                .checked_add_signed(step)
                .unwrap_or(NaiveDateTime::MAX),
            acc: None,
        }
    }

    fn fold(&mut self, tick: &Tick) {
        match &mut self.acc {
            Some(acc) => acc.update(tick),
            None => self.acc = Some(Accumulator::new(tick)),
        }
    }

    fn finish(self) -> Option<Bar> {
        let start = self.start;
        self.acc.map(|acc| acc.finish(start))
    }
}

/// Running OHLCV state for a non-empty window.
///
/// The low is not tracked here; it is computed from `prices` at finish.
#[derive(Debug)]
struct Accumulator {
    open: f64,
    high: f64,
    close: f64,
    volume: u64,
    prices: Vec<f64>,
}

impl Accumulator {
    fn new(tick: &Tick) -> Self {
        Self {
            open: tick.price,
            high: tick.price,
            close: tick.price,
            volume: tick.size,
            prices: vec![tick.price],
        }
    }

    fn update(&mut self, tick: &Tick) {
        self.high = self.high.max(tick.price);
        self.close = tick.price;
        self.volume = self.volume.saturating_add(tick.size);
        self.prices.push(tick.price);
    }

    fn finish(self, timestamp: NaiveDateTime) -> Bar {
        // Falls back to the high if filtering leaves nothing.
        let low = outlier::filtered_min(&self.prices).unwrap_or(self.high);
        Bar::new(timestamp, self.open, self.high, low, self.close, self.volume)
    }
}
