//! Quartile outlier classification (Tukey's fences).
//!
//! Quartiles use the rank `ceil(p/100 * n) - 1` into the sorted sample, with no
//! interpolation. Prices within `[Q1 - k*IQR, Q3 + k*IQR]` are normal, the rest
//! are outliers.

use listing_core::{Error, OutlierReport, Price, Result, TukeyFences};
use tracing::debug;

/// Default IQR multiplier.
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 1.5;

/// Zero-based index of percentile `p` in a sorted sample of `n` values.
///
/// Requires `n >= 1` and `1 <= p <= 100`.
pub fn percentile_rank(p: u32, n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::invalid_input("percentile of an empty sample"));
    }
    if !(1..=100).contains(&p) {
        return Err(Error::invalid_input(format!(
            "percentile must be in 1..=100, got {p}"
        )));
    }
    // ceil(p * n / 100) in integers
    Ok((p as usize * n).div_ceil(100) - 1)
}

/// Tukey outlier classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierClassifier {
    multiplier: f64,
}

impl Default for OutlierClassifier {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_FENCE_MULTIPLIER,
        }
    }
}

impl OutlierClassifier {
    /// Create a classifier with a custom IQR multiplier.
    pub fn new(multiplier: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(Error::config(format!(
                "fence multiplier must be finite and non-negative, got {multiplier}"
            )));
        }
        Ok(Self { multiplier })
    }

    /// IQR multiplier in use.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Compute the fences of an ascending sample.
    pub(crate) fn fences(&self, sorted: &[Price]) -> Result<TukeyFences> {
        let n = sorted.len();
        let q1 = sorted[percentile_rank(25, n)?];
        let q3 = sorted[percentile_rank(75, n)?];
        let iqr = q3 - q1;
        let spread = self.multiplier * iqr as f64;

        Ok(TukeyFences {
            q1,
            q3,
            iqr,
            lower: q1 as f64 - spread,
            upper: q3 as f64 + spread,
        })
    }

    /// Classify an ascending sample without re-sorting it.
    pub(crate) fn classify_sorted(&self, sorted: &[Price]) -> Result<OutlierReport> {
        debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]), "input must be sorted");

        let fences = self.fences(sorted)?;

        // Sorted input: normal prices form one contiguous run
        let start = sorted.partition_point(|&p| (p as f64) < fences.lower);
        let end = sorted.partition_point(|&p| (p as f64) <= fences.upper);
        let normal_count = end - start;
        let outlier_count = sorted.len() - normal_count;

        debug!(
            q1 = fences.q1,
            q3 = fences.q3,
            lower = fences.lower,
            upper = fences.upper,
            normal_count,
            outlier_count,
            "classified prices"
        );

        Ok(OutlierReport {
            normal_count,
            outlier_count,
            fences,
        })
    }

    /// Classify prices in any order.
    pub fn classify(&self, prices: &[Price]) -> Result<OutlierReport> {
        if prices.is_empty() {
            return Err(Error::invalid_input("cannot classify an empty price sample"));
        }
        let mut sorted = prices.to_vec();
        sorted.sort_unstable();
        self.classify_sorted(&sorted)
    }
}

/// Classify prices with the standard 1.5 multiplier.
pub fn classify(prices: &[Price]) -> Result<OutlierReport> {
    OutlierClassifier::default().classify(prices)
}
