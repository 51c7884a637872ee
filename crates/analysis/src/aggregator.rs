//! Single-pass price statistics.
//!
//! Keeps count, sum, sum of squares, min and max as exact integers. Mean and
//! population standard deviation are derived at the end, so the result does
//! not depend on input order or on how the input was partitioned.

use listing_core::{Listing, Price, StatisticsReport};

/// Running price statistics.
///
/// Partial accumulators built over disjoint chunks can be combined with
/// [`merge`](PriceAccumulator::merge) in any order and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceAccumulator {
    count: u64,
    sum: u128,
    sum_sq: u128,
    min: Price,
    max: Price,
}

impl Default for PriceAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0,
            sum_sq: 0,
            min: Price::MAX,
            max: Price::MIN,
        }
    }

    /// Add a price observation.
    #[inline]
    pub fn push(&mut self, price: Price) {
        let p = price as u128;
        self.count += 1;
        self.sum += p;
        self.sum_sq += p * p;
        self.min = self.min.min(price);
        self.max = self.max.max(price);
    }

    /// Combine with another partial accumulator.
    pub fn merge(mut self, other: Self) -> Self {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self
    }

    /// Number of prices seen.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Build the report. An empty accumulator yields [`StatisticsReport::empty`].
    pub fn finish(&self) -> StatisticsReport {
        if self.count == 0 {
            return StatisticsReport::empty();
        }

        let n = self.count as u128;
        let mean = self.sum as f64 / self.count as f64;

        // n * sum((p - mean)^2) == n * sum_sq - sum^2, exact and never negative
        let scaled = n * self.sum_sq - self.sum * self.sum;
        let variance = scaled as f64 / (n * n) as f64;

        StatisticsReport {
            count: self.count as usize,
            min: self.min,
            max: self.max,
            mean,
            stddev: variance.sqrt(),
        }
    }
}

impl Extend<Price> for PriceAccumulator {
    fn extend<T: IntoIterator<Item = Price>>(&mut self, iter: T) {
        for price in iter {
            self.push(price);
        }
    }
}

impl FromIterator<Price> for PriceAccumulator {
    fn from_iter<T: IntoIterator<Item = Price>>(iter: T) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Compute price statistics. Empty input gives a zero-filled report.
pub fn aggregate<I>(prices: I) -> StatisticsReport
where
    I: IntoIterator<Item = Price>,
{
    prices.into_iter().collect::<PriceAccumulator>().finish()
}

/// Compute price statistics over listings.
pub fn aggregate_listings(listings: &[Listing]) -> StatisticsReport {
    aggregate(listings.iter().map(|l| l.price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::statistics::Statistics;

    #[test]
    fn test_known_values() {
        let report = aggregate([100, 200, 300]);

        assert_eq!(report.count, 3);
        assert_eq!(report.min, 100);
        assert_eq!(report.max, 300);
        assert!((report.mean - 200.0).abs() < 1e-10);
        // sqrt((100^2 + 0 + 100^2) / 3) = sqrt(6666.67)
        assert_relative_eq!(report.stddev, (20_000.0_f64 / 3.0).sqrt(), max_relative = 1e-12);
        assert!((report.stddev - 81.65).abs() < 0.01);
    }

    #[test]
    fn test_empty_input() {
        let report = aggregate(Vec::<Price>::new());
        assert_eq!(report, StatisticsReport::empty());
        assert_eq!(report.min, 0);
        assert_eq!(report.max, 0);
        assert_eq!(report.mean, 0.0);
        assert_eq!(report.stddev, 0.0);
    }

    #[test]
    fn test_single_value() {
        let report = aggregate([750_000]);
        assert_eq!(report.min, 750_000);
        assert_eq!(report.max, 750_000);
        assert_eq!(report.mean, 750_000.0);
        assert_eq!(report.stddev, 0.0);
    }

    #[test]
    fn test_duplicates() {
        let report = aggregate([5, 5, 5, 5]);
        assert_eq!(report.mean, 5.0);
        assert_eq!(report.stddev, 0.0);
    }

    #[test]
    fn test_population_not_sample() {
        let prices = [2, 4, 4, 4, 5, 5, 7, 9];
        let report = aggregate(prices);

        // Classic example: population stddev is exactly 2
        assert_relative_eq!(report.stddev, 2.0, max_relative = 1e-12);

        let as_f64: Vec<f64> = prices.iter().map(|&p| p as f64).collect();
        assert_relative_eq!(
            report.stddev,
            as_f64.iter().population_std_dev(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_large_prices_match_two_pass() {
        let prices: Vec<Price> = (0..500).map(|i| 500_000 + (i * 3_989) % 2_000_000).collect();
        let report = aggregate(prices.iter().copied());

        let as_f64: Vec<f64> = prices.iter().map(|&p| p as f64).collect();
        assert_relative_eq!(report.mean, as_f64.iter().mean(), max_relative = 1e-12);
        assert_relative_eq!(
            report.stddev,
            as_f64.iter().population_std_dev(),
            max_relative = 1e-9
        );
        assert!(report.min as f64 <= report.mean && report.mean <= report.max as f64);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let prices: Vec<Price> = vec![910, 15, 300, 300, 42, 7_000, 1, 88];
        let whole: PriceAccumulator = prices.iter().copied().collect();
        assert_eq!(whole.count(), 8);

        let left: PriceAccumulator = prices[..3].iter().copied().collect();
        let right: PriceAccumulator = prices[3..].iter().copied().collect();

        assert_eq!(left.merge(right), whole);
        assert_eq!(right.merge(left), whole);
        assert_eq!(left.merge(right).finish(), whole.finish());
    }

    #[test]
    fn test_merge_with_empty() {
        let acc: PriceAccumulator = [10, 20].into_iter().collect();
        assert_eq!(acc.merge(PriceAccumulator::new()), acc);
        assert_eq!(PriceAccumulator::new().merge(acc).finish(), acc.finish());
    }

    #[test]
    fn test_aggregate_listings() {
        use chrono::NaiveDate;
        use listing_core::Listing;

        let date = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
        let listings = vec![
            Listing::new("Audi", "A4", "Business", date, 100),
            Listing::new("BMW", "X7", "Sport", date, 300),
        ];

        let report = aggregate_listings(&listings);
        assert_eq!(report.count, 2);
        assert_eq!(report.mean, 200.0);
        assert_eq!(report.stddev, 100.0);
    }

    #[test]
    fn test_order_independent() {
        let forward = aggregate([3, 1_000_000, 17, 250_000, 9]);
        let backward = aggregate([9, 250_000, 17, 1_000_000, 3]);
        assert_eq!(forward.mean.to_bits(), backward.mean.to_bits());
        assert_eq!(forward.stddev.to_bits(), backward.stddev.to_bits());
    }
}
