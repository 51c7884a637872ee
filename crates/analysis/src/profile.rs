//! Sorted price sample shared by the statistics and outlier reports.

use crate::aggregator::aggregate;
use crate::outliers::OutlierClassifier;
use listing_core::{Error, Listing, OutlierReport, Price, Result, StatisticsReport};

/// Prices sorted once, ready for both reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceProfile {
    sorted: Vec<Price>,
}

impl PriceProfile {
    /// Build a profile from prices in any order.
    pub fn new(mut prices: Vec<Price>) -> Self {
        prices.sort_unstable();
        Self { sorted: prices }
    }

    /// Build a profile from listing prices.
    pub fn from_listings(listings: &[Listing]) -> Self {
        Self::new(listings.iter().map(|l| l.price).collect())
    }

    /// Prices in ascending order.
    pub fn sorted(&self) -> &[Price] {
        &self.sorted
    }

    /// Number of prices.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether the profile holds no prices.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Price statistics; zero-filled when empty.
    pub fn statistics(&self) -> StatisticsReport {
        aggregate(self.sorted.iter().copied())
    }

    /// Outlier counts. Fails with `InvalidInput` when empty.
    pub fn outliers(&self, classifier: &OutlierClassifier) -> Result<OutlierReport> {
        if self.sorted.is_empty() {
            return Err(Error::invalid_input("cannot classify an empty price sample"));
        }
        classifier.classify_sorted(&self.sorted)
    }
}
