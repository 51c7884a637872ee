//! Analysis engine.
//!
//! Combines the skip rule, batch limit, grouping and price reports into a
//! single run over a listing source.

use crate::{grouping::group_recent, outliers::OutlierClassifier, profile::PriceProfile};
use chrono::NaiveDate;
use listing_core::config::GroupingConfig;
use listing_core::{Config, Listing, Report, Result};
use listing_ingestion::SkipRule;
use tracing::{debug, info};

/// Analysis engine built from configuration.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    /// Rule applied to the source before the limit.
    skip_rule: SkipRule,
    /// Number of listings analysed per run.
    limit: usize,
    grouping: GroupingConfig,
    classifier: OutlierClassifier,
}

impl AnalysisEngine {
    /// Create a new engine from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let filter = &config.filter;

        Ok(Self {
            skip_rule: SkipRule::new(filter.skip_count, filter.key, filter.value.clone())?,
            limit: filter.limit,
            grouping: config.grouping.clone(),
            classifier: OutlierClassifier::new(config.analysis.fence_multiplier)?,
        })
    }

    /// The skip rule in use.
    pub fn skip_rule(&self) -> &SkipRule {
        &self.skip_rule
    }

    /// Apply the skip rule to `source` and take up to `limit` listings.
    ///
    /// `source` may be unbounded; only as much of it as needed is consumed.
    pub fn collect<I>(&self, source: I) -> Vec<Listing>
    where
        I: IntoIterator<Item = Listing>,
    {
        let listings: Vec<Listing> = self
            .skip_rule
            .apply(source.into_iter())
            .take(self.limit)
            .collect();
        debug!(count = listings.len(), limit = self.limit, "collected listings");
        listings
    }

    /// Group and analyse an already collected batch.
    pub fn analyse(&self, listings: &[Listing], as_of: NaiveDate) -> Result<Report> {
        let groups = group_recent(
            listings,
            self.grouping.key,
            as_of,
            self.grouping.max_age_months,
        );

        let profile = PriceProfile::from_listings(listings);
        let statistics = profile.statistics();
        let outliers = if profile.is_empty() {
            None
        } else {
            Some(profile.outliers(&self.classifier)?)
        };

        info!(
            listings = listings.len(),
            groups = groups.len(),
            mean = statistics.mean,
            outliers = outliers.map(|o| o.outlier_count),
            "analysis complete"
        );

        Ok(Report {
            listings: listings.len(),
            groups: groups
                .into_iter()
                .map(|(key, members)| (key, members.len()))
                .collect(),
            statistics,
            outliers,
        })
    }

    /// Collect from `source` and analyse the batch.
    pub fn run<I>(&self, source: I, as_of: NaiveDate) -> Result<Report>
    where
        I: IntoIterator<Item = Listing>,
    {
        let listings = self.collect(source);
        self.analyse(&listings, as_of)
    }
}
