//! Built-in sample snapshot for `quorum match --mock`.
//!
//! Exercises the full engine without network access: two clusters that
//! should merge across venues and one market that should stay unmatched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Market, MarketId, Venue};

fn market(
    id: &str,
    title: &str,
    venue: Venue,
    yes: Decimal,
    no: Decimal,
    liquidity: Decimal,
    expiry: &str,
) -> Market {
    let expiry: DateTime<Utc> = expiry.parse().expect("mock expiry is valid RFC 3339");
    Market::new(MarketId::new(id), title, venue, yes, no, liquidity, expiry)
}

/// Six markets across three venues. Expected output: a three-member BTC
/// group, a two-member ETH group, and one unmatched SOL market.
#[must_use]
pub fn sample_snapshot() -> Vec<Market> {
    vec![
        market(
            "probable-m1",
            "Will BTC reach 90k by June 2026?",
            Venue::Probable,
            dec!(0.6),
            dec!(0.4),
            dec!(5000),
            "2026-06-15T00:00:00Z",
        ),
        market(
            "xo-m1",
            "Bitcoin to hit $90,000 by June 2026",
            Venue::Xo,
            dec!(0.55),
            dec!(0.45),
            dec!(8000),
            "2026-06-15T12:00:00Z",
        ),
        market(
            "predict-m1",
            "Will BTC reach 90k by June 2026?",
            Venue::Predict,
            dec!(0.58),
            dec!(0.42),
            dec!(12000),
            "2026-06-15T00:00:00Z",
        ),
        market(
            "probable-m2",
            "Will ETH reach 5k by September 2026?",
            Venue::Probable,
            dec!(0.35),
            dec!(0.65),
            dec!(3000),
            "2026-09-01T00:00:00Z",
        ),
        market(
            "xo-m2",
            "Ethereum to hit $5,000 by September 2026",
            Venue::Xo,
            dec!(0.3),
            dec!(0.7),
            dec!(6000),
            "2026-09-01T00:00:00Z",
        ),
        market(
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
