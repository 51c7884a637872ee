//! Core types and configuration for the listing-stats system.
//!
//! This crate provides shared types used across all other crates:
//! - Listing records and the keys rules can match on
//! - Statistics and outlier reports
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
