//! Configuration structures for the listing-stats system.

use crate::error::{Error, Result};
use crate::types::{ListingKey, Price};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for an analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Synthetic listing source configuration.
    pub source: SourceConfig,
    /// Skip rule configuration.
    pub filter: FilterConfig,
    /// Recent-listing grouping configuration.
    pub grouping: GroupingConfig,
    /// Price analysis configuration.
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing sections take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.source.max_price <= self.source.min_price {
            return Err(Error::config(format!(
                "max_price ({}) must exceed min_price ({})",
                self.source.max_price, self.source.min_price
            )));
        }
        if self.filter.limit == 0 {
            return Err(Error::config("filter.limit must be at least 1"));
        }
        Ok(())
    }
}

/// Synthetic listing source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Brands to draw from.
    pub brands: Vec<String>,
    /// Models to draw from.
    pub models: Vec<String>,
    /// Vehicle classes to draw from.
    pub categories: Vec<String>,
    /// Oldest listing age in months (exclusive).
    pub max_age_months: u32,
    /// Lowest generated price (inclusive).
    pub min_price: Price,
    /// Highest generated price (exclusive).
    pub max_price: Price,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            brands: ["Mazda", "Hundai", "Audi", "BMW", "Mersedes"]
                .map(String::from)
                .to_vec(),
            models: ["6", "X7", "Sonata", "Benz", "A4"].map(String::from).to_vec(),
            categories: ["Economy", "Comfort", "Sport", "Business"]
                .map(String::from)
                .to_vec(),
            max_age_months: 120,
            min_price: 500_000,
            max_price: 2_500_000,
        }
    }
}

/// Skip rule and batch size configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of matching listings to drop. Negative values are rejected.
    pub skip_count: i64,
    /// Field the rule matches on.
    pub key: ListingKey,
    /// Value the field must equal.
    pub value: String,
    /// Number of surviving listings to analyse.
    pub limit: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            skip_count: 10,
            key: ListingKey::Brand,
            value: "Mazda".to_string(),
            limit: 500,
        }
    }
}

/// Grouping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Field to group by.
    pub key: ListingKey,
    /// Only listings newer than this many months are grouped.
    pub max_age_months: u32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            key: ListingKey::Category,
            max_age_months: 60,
        }
    }
}

/// Price analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// IQR multiplier for the Tukey fences.
    pub fence_multiplier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: 1.5,
        }
    }
}
