//! Index-based IQR outlier filter.
//!
//! Quartiles are read straight out of the sorted prices at floor indices
//! `len / 4` and `3 * len / 4`. This is not an interpolated quantile, and
//! the two disagree for most inputs, so the indexing must stay exactly as is.

/// Multiplier applied to the IQR to build the fences.
pub const IQR_FENCE: f64 = 1.5;

/// Inclusive fences derived from the quartiles of a price set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    /// First quartile, `sorted[len / 4]`.
    pub q1: f64,
    /// Third quartile, `sorted[3 * len / 4]`.
    pub q3: f64,
    /// `q1 - 1.5 * iqr`.
    pub lower: f64,
    /// `q3 + 1.5 * iqr`.
    pub upper: f64,
}

impl IqrBounds {
    /// Computes the fences for a price set, or `None` if it is empty.
    #[must_use]
    pub fn from_prices(prices: &[f64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }

        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        let q1 = sorted[len / 4];
        let q3 = sorted[3 * len / 4];
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            lower: q1 - IQR_FENCE * iqr,
            upper: q3 + IQR_FENCE * iqr,
        })
    }

    /// Returns the interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Returns true if the price lies within the fences (inclusive).
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.lower <= price && price <= self.upper
    }
}

/// Returns the prices that fall inside the IQR fences.
///
/// Input order is preserved. An empty input yields an empty output.
#[must_use]
pub fn filter_outliers(prices: &[f64]) -> Vec<f64> {
    match IqrBounds::from_prices(prices) {
        Some(bounds) => prices
            .iter()
            .copied()
            .filter(|&p| bounds.contains(p))
            .collect(),
        None => Vec::new(),
    }
}

/// Returns the smallest price that survives outlier filtering.
#[must_use]
pub fn filtered_min(prices: &[f64]) -> Option<f64> {
    filter_outliers(prices).into_iter().reduce(f64::min)
}
