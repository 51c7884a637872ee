//! Stateful skip filter.
//!
//! Drops the first K items that match a predicate and passes everything else
//! through in arrival order. Non-matching items are never counted, so this is
//! not the same as skipping the first K items overall.

use listing_core::{Error, Listing, ListingKey, Result};
use tracing::{debug, trace};

/// Iterator adapter that suppresses the first `remaining` items matching a predicate.
///
/// Created by [`SkipMatchingExt::skip_matching`] or [`SkipRule::apply`]. The
/// counter lives inside the adapter, so every pass gets its own.
#[derive(Debug, Clone)]
#[must_use = "iterator adapters are lazy and do nothing unless consumed"]
pub struct SkipMatching<I, P> {
    iter: I,
    predicate: P,
    remaining: usize,
}

impl<I, P> SkipMatching<I, P> {
    fn new(iter: I, count: usize, predicate: P) -> Self {
        Self {
            iter,
            predicate,
            remaining: count,
        }
    }

    /// Matching items still to be suppressed.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<I, P> Iterator for SkipMatching<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.iter.next()?;
            if self.remaining > 0 && (self.predicate)(&item) {
                self.remaining -= 1;
                trace!(remaining = self.remaining, "suppressed matching item");
                if self.remaining == 0 {
                    debug!("skip quota exhausted, passing all items through");
                }
                continue;
            }
            return Some(item);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        (lower.saturating_sub(self.remaining), upper)
    }
}

/// Adds [`skip_matching`](SkipMatchingExt::skip_matching) to every iterator.
pub trait SkipMatchingExt: Iterator + Sized {
    /// Drop the first `count` items for which `predicate` returns true.
    fn skip_matching<P>(self, count: usize, predicate: P) -> SkipMatching<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        SkipMatching::new(self, count, predicate)
    }
}

impl<I: Iterator> SkipMatchingExt for I {}

/// Rule that drops the first `count` listings whose `key` field equals `value`.
///
/// The rule holds no pass state; each [`apply`](SkipRule::apply) starts a fresh counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRule {
    count: usize,
    key: ListingKey,
    value: String,
}

impl SkipRule {
    /// Create a skip rule. Fails with [`Error::InvalidInput`] on a negative count.
    pub fn new(count: i64, key: ListingKey, value: impl Into<String>) -> Result<Self> {
        let count = usize::try_from(count).map_err(|_| {
            Error::invalid_input(format!("skip count must be non-negative, got {count}"))
        })?;
        Ok(Self {
            count,
            key,
            value: value.into(),
        })
    }

    /// Rule matching on the listing category.
    pub fn category(count: i64, category: impl Into<String>) -> Result<Self> {
        Self::new(count, ListingKey::Category, category)
    }

    /// Number of matching listings dropped per pass.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Field the rule matches on.
    pub fn key(&self) -> ListingKey {
        self.key
    }

    /// Value the field must equal.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Does `listing` match this rule?
    #[inline]
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.key(self.key) == self.value
    }

    /// Start a new filtering pass over `listings`.
    pub fn apply<'a, I>(&'a self, listings: I) -> SkipMatching<I, impl FnMut(&Listing) -> bool + 'a>
    where
        I: Iterator<Item = Listing>,
    {
        debug!(
            count = self.count,
            key = ?self.key,
            value = %self.value,
            "starting skip pass"
        );
        listings.skip_matching(self.count, move |listing: &Listing| self.matches(listing))
    }
}
