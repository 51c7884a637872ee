//! Price analysis for the listing-stats system.
//!
//! This crate handles:
//! - Single-pass price statistics (min, max, mean, population stddev)
//! - Tukey IQR outlier classification
//! - Grouping recent listings by a key
//! - The analysis engine that ties ingestion and analysis together

pub mod aggregator;
pub mod outliers;
pub mod profile;
pub mod grouping;
pub mod engine;

pub use aggregator::{aggregate, aggregate_listings, PriceAccumulator};
pub use outliers::{classify, percentile_rank, OutlierClassifier};
pub use profile::PriceProfile;
pub use grouping::group_recent;
pub use engine::AnalysisEngine;
