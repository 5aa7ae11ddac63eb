#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use quorum::domain::{Market, MarketId, Venue};

pub fn make_market(
    id: &str,
    title: &str,
    venue: Venue,
    yes: Decimal,
    no: Decimal,
    liquidity: Decimal,
    expiry: &str,
) -> Market {
    let expiry: DateTime<Utc> = expiry.parse().expect("valid RFC 3339 expiry");
    Market::new(MarketId::new(id), title, venue, yes, no, liquidity, expiry)
}
