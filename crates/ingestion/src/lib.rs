//! Listing ingestion for the listing-stats system.
//!
//! This crate handles:
//! - Synthetic listing generation (an unbounded source)
//! - Stateful "skip the first K matching listings" filtering

pub mod generator;
pub mod skip_filter;

pub use generator::ListingGenerator;
pub use skip_filter::{SkipMatching, SkipMatchingExt, SkipRule};
