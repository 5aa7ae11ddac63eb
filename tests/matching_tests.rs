mod support;

use rust_decimal_macros::dec;

use quorum::domain::Venue;
use quorum::matching::{match_markets, sanitize_title, SIMILARITY_THRESHOLD};
use support::make_market;

fn crypto_snapshot() -> Vec<quorum::domain::Market> {
    vec![
        make_market(
            "probable-m1",
            "Will BTC reach 90k by June 2026?",
            Venue::Probable,
            dec!(0.6),
            dec!(0.4),
            dec!(5000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "xo-m1",
            "Bitcoin to hit $90,000 by June 2026",
            Venue::Xo,
            dec!(0.55),
            dec!(0.45),
            dec!(8000),
            "2026-06-15T12:00:00Z",
        ),
        make_market(
            "predict-m1",
            "Will BTC reach 90k by June 2026?",
            Venue::Predict,
            dec!(0.58),
            dec!(0.42),
            dec!(12000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "probable-m2",
            "Will ETH reach 5k by September 2026?",
            Venue::Probable,
            dec!(0.35),
            dec!(0.65),
            dec!(3000),
            "2026-09-01T00:00:00Z",
        ),
        make_market(
            "xo-m2",
            "Ethereum to hit $5,000 by September 2026",
            Venue::Xo,
            dec!(0.3),
            dec!(0.7),
            dec!(6000),
            "2026-09-01T00:00:00Z",
        ),
        make_market(
            "probable-m3",
            "Will SOL reach 500 by June 2026?",
            Venue::Probable,
            dec!(0.2),
            dec!(0.8),
            dec!(2000),
            "2026-06-15T00:00:00Z",
        ),
    ]
}

#[test]
fn crypto_snapshot_produces_expected_groups() {
    let result = match_markets(&crypto_snapshot());

    assert_eq!(result.matched.len(), 2);

    let btc = &result.matched[0];
    assert_eq!(btc.members.len(), 3);
    assert_eq!(btc.canonical_title, "Bitcoin to hit $90,000 by June 2026");
    assert_eq!(btc.total_liquidity, dec!(25000));
    assert_eq!(btc.weighted_yes, dec!(0.5744));
    assert_eq!(btc.best_yes.venue, Venue::Xo);
    assert_eq!(btc.best_yes.price, dec!(0.55));

    let eth = &result.matched[1];
    assert_eq!(eth.members.len(), 2);
    assert_eq!(eth.canonical_title, "Ethereum to hit $5,000 by September 2026");

    assert_eq!(result.unmatched.len(), 1);
    assert_eq!(result.unmatched[0].id().as_str(), "probable-m3");
}

#[test]
fn every_input_market_appears_exactly_once() {
    let markets = crypto_snapshot();
    let result = match_markets(&markets);

    let mut seen: Vec<String> = result
        .matched
        .iter()
        .flat_map(|g| g.members.iter().map(|m| m.id().to_string()))
        .chain(result.unmatched.iter().map(|m| m.id().to_string()))
        .collect();
    seen.sort();

    let mut expected: Vec<String> = markets.iter().map(|m| m.id().to_string()).collect();
    expected.sort();

    assert_eq!(seen, expected);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let markets = crypto_snapshot();
    let first = format!("{:?}", match_markets(&markets));
    let second = format!("{:?}", match_markets(&markets));
    assert_eq!(first, second);
}

#[test]
fn groups_always_span_at_least_two_venues() {
    // Same venue listing the same question twice must not self-merge.
    let markets = vec![
        make_market(
            "probable-a",
            "Will BTC reach 90k by June 2026?",
            Venue::Probable,
            dec!(0.6),
            dec!(0.4),
            dec!(5000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "probable-b",
            "Bitcoin to hit $90,000 by June 2026",
            Venue::Probable,
            dec!(0.55),
            dec!(0.45),
            dec!(8000),
            "2026-06-15T00:00:00Z",
        ),
    ];
    let result = match_markets(&markets);
    assert!(result.matched.is_empty());
    assert_eq!(result.unmatched.len(), 2);
}

#[test]
fn expiry_gap_beyond_tolerance_prevents_matching() {
    let markets = vec![
        make_market(
            "probable-1",
            "Will BTC reach 90k by June 2026?",
            Venue::Probable,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "xo-1",
            "Will BTC reach 90k by June 2026?",
            Venue::Xo,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-17T00:00:00Z",
        ),
    ];
    let result = match_markets(&markets);
    assert!(result.matched.is_empty());
}

#[test]
fn expiry_gap_within_tolerance_matches() {
    let markets = vec![
        make_market(
            "probable-1",
            "Will BTC reach 90k by June 2026?",
            Venue::Probable,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "xo-1",
            "Will BTC reach 90k by June 2026?",
            Venue::Xo,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T23:00:00Z",
        ),
    ];
    let result = match_markets(&markets);
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].members.len(), 2);
}

#[test]
fn dissimilar_titles_in_one_bucket_stay_apart() {
    let markets = vec![
        make_market(
            "probable-1",
            "Will BTC reach 90k by June 2026?",
            Venue::Probable,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "xo-1",
            "Will SOL reach 500 by June 2026?",
            Venue::Xo,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
    ];
    let result = match_markets(&markets);
    assert!(result.matched.is_empty());
    assert_eq!(result.unmatched.len(), 2);
}

#[test]
fn equivalent_phrasings_sanitize_to_the_same_key() {
    let a = sanitize_title("Will BTC reach 90k by June 2026?");
    let b = sanitize_title("Bitcoin to hit $90,000 by June 2026");
    assert_eq!(a, b);
    assert_eq!(a, "bitcoin 90000 june 2026");
    assert!(strsim::jaro_winkler(&a, &b) >= SIMILARITY_THRESHOLD);
}

#[test]
fn pair_log_records_retained_scores_and_comparison_inputs() {
    let result = match_markets(&crypto_snapshot());
    assert!(!result.pair_log.is_empty());
    for record in &result.pair_log {
        assert!(record.score >= SIMILARITY_THRESHOLD);
        assert_ne!(record.venue_a, record.venue_b);
        assert_eq!(record.sanitized_a, sanitize_title(&record.title_a));
        assert_eq!(record.sanitized_b, sanitize_title(&record.title_b));
    }
}

#[test]
fn score_just_above_threshold_is_retained() {
    // Sanitized keys "solaratronic" / "polaretronic" differ at two of
    // twelve positions with no common prefix: Jaro-Winkler 0.8889.
    let markets = vec![
        make_market(
            "probable-1",
            "Solaratronic",
            Venue::Probable,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "xo-1",
            "Polaretronic",
            Venue::Xo,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
    ];
    let result = match_markets(&markets);
    assert_eq!(result.matched.len(), 1);
    let score = result.pair_log[0].score;
    assert!(score >= SIMILARITY_THRESHOLD && score < 0.90, "score {score}");
}

#[test]
fn score_just_below_threshold_is_dropped() {
    // "solartronic" / "polartronik" differ at two of eleven positions with
    // no common prefix: Jaro-Winkler 0.8788, under the line by ~0.001.
    let markets = vec![
        make_market(
            "probable-1",
            "Solartronic",
            Venue::Probable,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
        make_market(
            "xo-1",
            "Polartronik",
            Venue::Xo,
            dec!(0.5),
            dec!(0.5),
            dec!(1000),
            "2026-06-15T00:00:00Z",
        ),
    ];
    let result = match_markets(&markets);
    assert!(result.matched.is_empty());
    assert!(result.pair_log.is_empty());
    assert_eq!(result.unmatched.len(), 2);
}

#[test]
fn transitive_bridge_merges_markets_that_would_not_pair_directly() {
    // A-B and B-C both score 0.8889; A-C alone scores 0.8333, under the
    // threshold. The cluster must still merge all three through B.
    let a = make_market(
        "probable-1",
        "Solaratronic",
        Venue::Probable,
        dec!(0.6),
        dec!(0.4),
        dec!(5000),
        "2026-06-15T00:00:00Z",
    );
    let b = make_market(
        "xo-1",
        "Polaretronic",
        Venue::Xo,
        dec!(0.55),
        dec!(0.45),
        dec!(8000),
        "2026-06-15T00:00:00Z",
    );
    let c = make_market(
        "predict-1",
        "Molaretronik",
        Venue::Predict,
        dec!(0.58),
        dec!(0.42),
        dec!(12000),
        "2026-06-15T00:00:00Z",
    );

    // The endpoints never pair on their own.
    let direct = match_markets(&[a.clone(), c.clone()]);
    assert!(direct.matched.is_empty());

    let result = match_markets(&[a, b, c]);
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].members.len(), 3);
    // Only the two bridged pairs cleared the threshold.
    assert_eq!(result.pair_log.len(), 2);
}
