//! The grouping engine: expiry bucketing, pairwise similarity scoring,
//! union-find clustering, and group synthesis.
//!
//! The whole pipeline is a synchronous, CPU-bound pure computation over an
//! in-memory snapshot. It performs no I/O, holds no shared state, and is
//! deterministic for a fixed input order (all internal sorts are stable).

mod bucket;
mod group;
mod pairs;
mod sanitize;
mod union_find;

use std::collections::{HashMap, HashSet};

use chrono::Duration;

use crate::domain::{Market, MarketId, MatchResult, Venue};

pub use bucket::bucket_by_expiry;
pub use group::synthesize_group;
pub use pairs::{find_cross_venue_pairs, CandidatePair};
pub use sanitize::sanitize_title;
pub use union_find::DisjointSet;

/// Two markets can only describe the same event if their expiries fall
/// within this window of a bucket's anchor.
pub const EXPIRY_TOLERANCE_HOURS: i64 = 24;

/// Minimum Jaro-Winkler score (inclusive) for a cross-venue pair to be
/// retained.
pub const SIMILARITY_THRESHOLD: f64 = 0.88;

fn distinct_venues(markets: &[Market]) -> usize {
    markets
        .iter()
        .map(Market::venue)
        .collect::<HashSet<Venue>>()
        .len()
}

/// Partition markets into cross-venue matched groups and unmatched
/// singletons.
///
/// Every input market ID appears exactly once across the output: inside
/// exactly one group's members, or in `unmatched`. Clusters that resolve to
/// fewer than two members, or whose members come from fewer than two
/// distinct venues, are discarded and their markets flow to `unmatched`;
/// same-venue duplicates are never merged here.
///
/// Inputs are expected to satisfy the [`Market`] invariants; construction
/// through [`Market::try_new`] or the normalizer guarantees that.
#[must_use]
pub fn match_markets(markets: &[Market]) -> MatchResult {
    let by_id: HashMap<&MarketId, &Market> = markets.iter().map(|m| (m.id(), m)).collect();

    let mut matched = Vec::new();
    let mut matched_ids: HashSet<MarketId> = HashSet::new();
    let mut pair_log = Vec::new();

    for bucket in bucket_by_expiry(markets, Duration::hours(EXPIRY_TOLERANCE_HOURS)) {
        if bucket.len() < 2 || distinct_venues(&bucket) < 2 {
            continue;
        }

        let pairs = find_cross_venue_pairs(&bucket, SIMILARITY_THRESHOLD);
        if pairs.is_empty() {
            continue;
        }

        let mut set = DisjointSet::new();
        for pair in &pairs {
            set.union(&pair.a, &pair.b);
        }
        pair_log.extend(pairs.into_iter().map(|p| p.record));

        for member_ids in set.clusters() {
            if member_ids.len() < 2 {
                continue;
            }

            let members: Vec<Market> = member_ids
                .iter()
                .filter_map(|id| by_id.get(id).copied().cloned())
                .collect();

            if distinct_venues(&members) < 2 {
                continue;
            }

            // Cannot fail: the cluster has >= 2 members by the check above.
            if let Ok(group) = synthesize_group(members) {
                matched_ids.extend(member_ids);
                matched.push(group);
            }
        }
    }

    let unmatched = markets
        .iter()
        .filter(|m| !matched_ids.contains(m.id()))
        .cloned()
        .collect();

    MatchResult {
        matched,
        unmatched,
        pair_log,
    }
}
