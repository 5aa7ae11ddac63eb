//! Normalization of raw venue records into qualified [`Market`]s.
//!
//! Malformed or incomplete records are excluded, never raised: a record with
//! a missing side, missing or sub-floor liquidity, or a missing or past
//! expiry is simply absent from the market stream. Drop counts are reported
//! as a diagnostic, not a failure.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Market, RawMarket};

/// Normalize one raw record, or drop it.
///
/// Returns `None` when any qualification rule fails: both prices present,
/// liquidity present and at least the floor, expiry present and strictly
/// after `now`.
#[must_use]
pub fn normalize(raw: &RawMarket, now: DateTime<Utc>) -> Option<Market> {
    let yes_price = raw.yes_price?;
    let no_price = raw.no_price?;
    let liquidity = raw.liquidity_usd?;
    let expiry = raw.expiry?;

    Market::try_new(
        raw.venue,
        &raw.native_id,
        raw.title.clone(),
        yes_price,
        no_price,
        liquidity,
        expiry,
        now,
    )
    .ok()
}

/// Normalize a batch of raw records, returning the surviving markets and
/// the number of dropped records.
#[must_use]
pub fn normalize_all(raws: &[RawMarket], now: DateTime<Utc>) -> (Vec<Market>, usize) {
    let markets: Vec<Market> = raws.iter().filter_map(|raw| normalize(raw, now)).collect();
    let dropped = raws.len() - markets.len();
    if dropped > 0 {
        debug!(dropped, kept = markets.len(), "normalization dropped records");
    }
    (markets, dropped)
}
