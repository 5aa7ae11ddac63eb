//! Expiry-proximity bucketing.
//!
//! Two markets are only ever compared if they land in the same bucket, which
//! requires their expiries to fall within the tolerance window of the
//! bucket's first member.

use chrono::Duration;

use crate::domain::Market;

/// Partition markets into expiry buckets.
///
/// Markets are stable-sorted by expiry ascending and walked in order; a
/// market joins the current bucket if its expiry is within `tolerance` of
/// the bucket's *first* member. Anchoring to the first member rather than
/// the most recent one bounds drift: a chain of barely-adjacent expiries
/// cannot stretch a bucket indefinitely.
#[must_use]
pub fn bucket_by_expiry(markets: &[Market], tolerance: Duration) -> Vec<Vec<Market>> {
    let mut sorted: Vec<Market> = markets.to_vec();
    sorted.sort_by_key(Market::expiry);

    let mut buckets: Vec<Vec<Market>> = Vec::new();
    let mut current: Vec<Market> = Vec::new();

    for market in sorted {
        match current.first() {
            Some(anchor) if market.expiry() - anchor.expiry() > tolerance => {
                buckets.push(std::mem::replace(&mut current, vec![market]));
            }
            _ => current.push(market),
        }
    }
    if !current.is_empty() {
        buckets.push(current);
    }

    buckets
}
