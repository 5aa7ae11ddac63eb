//! Aggregated views produced by the matching engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::market::Market;
use super::venue::Venue;

/// One venue's offer on one side of a matched group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub venue: Venue,
    pub price: Decimal,
}

/// A cluster of markets from at least two venues judged to represent the
/// same real-world event, reduced to a single aggregated view.
///
/// Invariant: `members` holds two or more markets, each from a distinct
/// venue. Weighted prices are liquidity-weighted means rounded to 4 decimal
/// places; `best_yes`/`best_no` carry the numerically lowest price on each
/// side (cheapest entry, not best probability).
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedGroup {
    pub canonical_title: String,
    pub members: Vec<Market>,
    pub total_liquidity: Decimal,
    pub weighted_yes: Decimal,
    pub weighted_no: Decimal,
    pub expiry: DateTime<Utc>,
    pub best_yes: Quote,
    pub best_no: Quote,
}

/// One retained candidate pair, kept for threshold tuning and auditing.
///
/// Carries both the display titles and the sanitized strings the score was
/// actually computed over. Purely diagnostic; correctness never depends on
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    pub title_a: String,
    pub title_b: String,
    pub sanitized_a: String,
    pub sanitized_b: String,
    pub venue_a: Venue,
    pub venue_b: Venue,
    pub score: f64,
}

/// The output of one matching run: a partition of the input markets into
/// matched groups and unmatched singletons, plus the diagnostic pair log.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub matched: Vec<MatchedGroup>,
    pub unmatched: Vec<Market>,
    pub pair_log: Vec<PairRecord>,
}

impl MatchResult {
    /// Number of markets inside matched groups.
    #[must_use]
    pub fn matched_market_count(&self) -> usize {
        self.matched.iter().map(|g| g.members.len()).sum()
    }
}
