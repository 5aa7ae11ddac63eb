//! Cross-venue pairwise similarity scoring within one expiry bucket.

use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::domain::{Market, MarketId, PairRecord};

use super::sanitize::sanitize_title;

/// A pair of markets from different venues whose sanitized titles scored at
/// or above the similarity threshold.
#[derive(Debug, Clone)]
pub struct CandidatePair {
    pub a: MarketId,
    pub b: MarketId,
    pub record: PairRecord,
}

/// Score every unordered cross-venue pair in one bucket and retain pairs
/// with `score >= threshold` (inclusive).
///
/// Same-venue pairs are never compared; a venue's own listings are assumed
/// pre-deduplicated upstream. Sanitization is computed once per market and
/// cached for the bucket's O(n²) comparison loop.
#[must_use]
pub fn find_cross_venue_pairs(bucket: &[Market], threshold: f64) -> Vec<CandidatePair> {
    let sanitized: HashMap<&MarketId, String> = bucket
        .iter()
        .map(|m| (m.id(), sanitize_title(m.title())))
        .collect();

    let mut pairs = Vec::new();
    for (i, a) in bucket.iter().enumerate() {
        for b in &bucket[i + 1..] {
            if a.venue() == b.venue() {
                continue;
            }

            let score = jaro_winkler(&sanitized[a.id()], &sanitized[b.id()]);
            if score >= threshold {
                pairs.push(CandidatePair {
                    a: a.id().clone(),
                    b: b.id().clone(),
                    record: PairRecord {
                        title_a: a.title().to_string(),
                        title_b: b.title().to_string(),
                        sanitized_a: sanitized[a.id()].clone(),
                        sanitized_b: sanitized[b.id()].clone(),
                        venue_a: a.venue(),
                        venue_b: b.venue(),
                        score,
                    },
                });
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;

    use crate::domain::Venue;
    use crate::matching::SIMILARITY_THRESHOLD;

    fn market(id: &str, title: &str, venue: Venue) -> Market {
        Market::new(
            MarketId::new(id),
            title,
            venue,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        )
    }

    #[test]
    fn identical_sanitized_titles_pair_with_full_score() {
        let bucket = vec![
            market("a", "Will BTC reach 90k by June 2026?", Venue::Probable),
            market("b", "Bitcoin to hit $90,000 by June 2026", Venue::Xo),
        ];
        let pairs = find_cross_venue_pairs(&bucket, SIMILARITY_THRESHOLD);
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].record.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn same_venue_pairs_are_never_compared() {
        let bucket = vec![
            market("a", "Will BTC reach 90k by June 2026?", Venue::Probable),
            market("b", "Will BTC reach 90k by June 2026?", Venue::Probable),
        ];
        assert!(find_cross_venue_pairs(&bucket, SIMILARITY_THRESHOLD).is_empty());
    }

    #[test]
    fn unrelated_titles_fall_below_threshold() {
        let bucket = vec![
            market("a", "Will BTC reach 90k by June 2026?", Venue::Probable),
            market("b", "Will SOL reach 500 by June 2026?", Venue::Xo),
        ];
        assert!(find_cross_venue_pairs(&bucket, SIMILARITY_THRESHOLD).is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        let bucket = vec![
            market("a", "any", Venue::Probable),
            market("b", "any", Venue::Xo),
        ];
        // Identical strings score exactly 1.0; a threshold of 1.0 must retain them.
        assert_eq!(find_cross_venue_pairs(&bucket, 1.0).len(), 1);
    }

    #[test]
    fn pair_record_carries_audit_fields() {
        let bucket = vec![
            market("a", "Will ETH reach 5k by September 2026?", Venue::Probable),
            market("b", "Ethereum to hit $5,000 by September 2026", Venue::Xo),
        ];
        let pairs = find_cross_venue_pairs(&bucket, SIMILARITY_THRESHOLD);
        let record = &pairs[0].record;
        assert_eq!(record.venue_a, Venue::Probable);
        assert_eq!(record.venue_b, Venue::Xo);
        assert_eq!(record.title_a, "Will ETH reach 5k by September 2026?");
        assert_eq!(record.sanitized_a, "ethereum 5000 september 2026");
        assert_eq!(record.sanitized_b, "ethereum 5000 september 2026");
        assert!(record.score >= SIMILARITY_THRESHOLD);
    }
}
