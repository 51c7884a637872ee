//! Plain-text rendering of listings and reports.

use listing_core::{Listing, Report};
use std::fmt;

/// One line describing a listing.
pub fn listing_line(listing: &Listing) -> String {
    format!(
        "{:<10} {:<8} {:<9} {} {:>10}",
        listing.brand, listing.model, listing.category, listing.manufactured, listing.price
    )
}

/// Multi-line summary of a report.
pub struct ReportText<'a>(pub &'a Report);

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let stats = &report.statistics;

        writeln!(f, "Listings analysed: {}", report.listings)?;
        writeln!(f, "Recent listings by group:")?;
        for (key, count) in &report.groups {
            writeln!(f, "  {key}: {count}")?;
        }
        writeln!(f, "Price statistics:")?;
        writeln!(f, "  min:    {}", stats.min)?;
        writeln!(f, "  max:    {}", stats.max)?;
        writeln!(f, "  mean:   {:.2}", stats.mean)?;
        writeln!(f, "  stddev: {:.2}", stats.stddev)?;
        match &report.outliers {
            Some(outliers) => writeln!(
                f,
                "Outliers (fences {:.1}..={:.1}): {} normal, {} outliers",
                outliers.fences.lower,
                outliers.fences.upper,
                outliers.normal_count,
                outliers.outlier_count
            ),
            None => writeln!(f, "Outliers: no prices to classify"),
        }
    }
}
