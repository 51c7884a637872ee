//! Core data types for the listing-stats system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Listing price in whole currency units.
pub type Price = u32;

/// Listings grouped by the value of a [`ListingKey`], in key order.
pub type CategoryGroups = BTreeMap<String, Vec<Listing>>;

/// A single vehicle listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Manufacturer brand (e.g., "Audi").
    pub brand: String,
    /// Model name.
    pub model: String,
    /// Vehicle class (e.g., "Economy", "Sport").
    pub category: String,
    /// Date the vehicle was manufactured.
    pub manufactured: NaiveDate,
    /// Asking price.
    pub price: Price,
}

impl Listing {
    /// Create a new listing.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        category: impl Into<String>,
        manufactured: NaiveDate,
        price: Price,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            category: category.into(),
            manufactured,
            price,
        }
    }

    /// Read the string field selected by `key`.
    #[inline]
    pub fn key(&self, key: ListingKey) -> &str {
        match key {
            ListingKey::Brand => &self.brand,
            ListingKey::Model => &self.model,
            ListingKey::Category => &self.category,
        }
    }
}

/// String field of a [`Listing`] that filters and groupings match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKey {
    Brand,
    Model,
    Category,
}

/// Price statistics over a batch of listings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    /// Number of prices aggregated.
    pub count: usize,
    /// Lowest price (0 for an empty batch).
    pub min: Price,
    /// Highest price (0 for an empty batch).
    pub max: Price,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (divides by N).
    pub stddev: f64,
}

impl StatisticsReport {
    /// The zero-filled report returned for an empty batch.
    pub fn empty() -> Self {
        Self {
            count: 0,
            min: 0,
            max: 0,
            mean: 0.0,
            stddev: 0.0,
        }
    }

    /// Whether the report was computed from no prices at all.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Quartiles and fences derived with Tukey's method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TukeyFences {
    /// First quartile (25th percentile).
    pub q1: Price,
    /// Third quartile (75th percentile).
    pub q3: Price,
    /// Interquartile range, `q3 - q1`.
    pub iqr: u32,
    /// Lowest price still considered normal.
    pub lower: f64,
    /// Highest price still considered normal.
    pub upper: f64,
}

impl TukeyFences {
    /// Is `price` inside the fences (inclusive at both ends)?
    #[inline]
    pub fn contains(&self, price: Price) -> bool {
        let p = price as f64;
        p >= self.lower && p <= self.upper
    }
}

/// Normal vs outlier counts for a batch of prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Prices inside the fences.
    pub normal_count: usize,
    /// Prices outside the fences.
    pub outlier_count: usize,
    /// Fences used for the classification.
    pub fences: TukeyFences,
}

impl OutlierReport {
    /// Total number of prices classified.
    pub fn total(&self) -> usize {
        self.normal_count + self.outlier_count
    }
}

/// Output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Number of listings that survived the skip rule and limit.
    pub listings: usize,
    /// Size of each recent-listing group.
    pub groups: BTreeMap<String, usize>,
    /// Price statistics.
    pub statistics: StatisticsReport,
    /// Outlier counts; absent when no listings were analysed.
    pub outliers: Option<OutlierReport>,
}
