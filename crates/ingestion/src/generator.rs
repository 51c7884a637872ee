//! Synthetic listing source.
//!
//! Produces an endless stream of random listings drawn from the configured
//! brands, models and categories.

use chrono::{Months, NaiveDate};
use listing_core::config::SourceConfig;
use listing_core::{Error, Listing, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Unbounded random listing generator.
pub struct ListingGenerator<R> {
    config: SourceConfig,
    /// Reference date; listings are manufactured up to `max_age_months` before it.
    as_of: NaiveDate,
    rng: R,
}

impl ListingGenerator<StdRng> {
    /// Generator with a reproducible stream for `seed`.
    pub fn seeded(config: SourceConfig, as_of: NaiveDate, seed: u64) -> Result<Self> {
        Self::new(config, as_of, StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy(config: SourceConfig, as_of: NaiveDate) -> Result<Self> {
        Self::new(config, as_of, StdRng::from_entropy())
    }
}

impl<R: Rng> ListingGenerator<R> {
    /// Create a generator drawing randomness from `rng`.
    pub fn new(config: SourceConfig, as_of: NaiveDate, rng: R) -> Result<Self> {
        if config.brands.is_empty() || config.models.is_empty() || config.categories.is_empty() {
            return Err(Error::config(
                "brands, models and categories must each have at least one entry",
            ));
        }
        if config.max_age_months == 0 {
            return Err(Error::config("max_age_months must be at least 1"));
        }
        if config.max_price <= config.min_price {
            return Err(Error::config(format!(
                "max_price ({}) must exceed min_price ({})",
                config.max_price, config.min_price
            )));
        }

        debug!(
            brands = config.brands.len(),
            models = config.models.len(),
            categories = config.categories.len(),
            %as_of,
            "listing generator ready"
        );

        Ok(Self { config, as_of, rng })
    }

    fn pick(rng: &mut R, values: &[String]) -> String {
        values[rng.gen_range(0..values.len())].clone()
    }
}

impl<R: Rng> Iterator for ListingGenerator<R> {
    type Item = Listing;

    fn next(&mut self) -> Option<Listing> {
        let brand = Self::pick(&mut self.rng, &self.config.brands);
        let model = Self::pick(&mut self.rng, &self.config.models);
        let category = Self::pick(&mut self.rng, &self.config.categories);

        let age = self.rng.gen_range(0..self.config.max_age_months);
        let manufactured = self
            .as_of
            .checked_sub_months(Months::new(age))
            .unwrap_or(NaiveDate::MIN);

        let price = self
            .rng
            .gen_range(self.config.min_price..self.config.max_price);

        Some(Listing {
            brand,
            model,
            category,
            manufactured,
            price,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
