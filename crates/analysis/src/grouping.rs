//! Grouping of recent listings.

use chrono::{Months, NaiveDate};
use listing_core::{CategoryGroups, Listing, ListingKey};

/// Group listings manufactured within the last `max_age_months` by `key`.
///
/// A listing is recent when its manufacture date is strictly after
/// `as_of - max_age_months`. Listing order is preserved inside each group.
pub fn group_recent(
    listings: &[Listing],
    key: ListingKey,
    as_of: NaiveDate,
    max_age_months: u32,
) -> CategoryGroups {
    let cutoff = as_of
        .checked_sub_months(Months::new(max_age_months))
        .unwrap_or(NaiveDate::MIN);

    let mut groups = CategoryGroups::new();
    for listing in listings.iter().filter(|l| l.manufactured > cutoff) {
        groups
            .entry(listing.key(key).to_string())
            .or_default()
            .push(listing.clone());
    }
    groups
}
