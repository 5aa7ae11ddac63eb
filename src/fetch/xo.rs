//! XO fetcher.
//!
//! Walks the paginated markets endpoint ordered by liquidity. Outcome prices
//! arrive as wei strings and scale down by 1e18. Binary markets take their
//! two outcomes sorted by index; multi-outcome markets collapse to the
//! highest-priced outcome and its complement.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{RawMarket, Venue};
use crate::error::Result;

const PAGE_SIZE: usize = 50;
const EXCLUDED_STATUSES: &str = "PENDING,UPDATE_REQUIRED,CANCELLED,RESOLVED";

#[derive(Debug, Deserialize)]
struct XoOutcome {
    #[serde(rename = "currentPrice")]
    current_price: String,
    index: u32,
}

#[derive(Debug, Deserialize)]
struct XoMarket {
    id: u64,
    title: String,
    status: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "expiresAt")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(rename = "totalVolumeInUSD")]
    total_volume_usd: Option<String>,
    #[serde(default)]
    outcomes: Vec<XoOutcome>,
}

#[derive(Debug, Deserialize)]
struct XoPageMeta {
    #[serde(rename = "hasNextPage")]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct XoMarketsPage {
    data: Vec<XoMarket>,
    meta: XoPageMeta,
}

/// Prices are 18-decimal fixed point on the wire.
fn wei_to_price(wei: &str) -> Option<Decimal> {
    let value: Decimal = wei.parse().ok()?;
    let scaled = value / Decimal::from(1_000_000_000_000_000_000u64);
    Some(scaled.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero))
}

fn outcome_prices(market: &XoMarket) -> (Option<Decimal>, Option<Decimal>) {
    if market.kind == "BINARY" && market.outcomes.len() >= 2 {
        let mut sorted: Vec<&XoOutcome> = market.outcomes.iter().collect();
        sorted.sort_by_key(|o| o.index);
        (
            wei_to_price(&sorted[0].current_price),
            wei_to_price(&sorted[1].current_price),
        )
    } else if !market.outcomes.is_empty() {
        let yes = market
            .outcomes
            .iter()
            .filter_map(|o| wei_to_price(&o.current_price))
            .max();
        let no = yes.map(|y| Decimal::ONE - y);
        (yes, no)
    } else {
        (None, None)
    }
}

fn to_raw(market: XoMarket) -> RawMarket {
    let (yes_price, no_price) = outcome_prices(&market);
    RawMarket {
        venue: Venue::Xo,
        native_id: market.id.to_string(),
        title: market.title,
        yes_price,
        no_price,
        liquidity_usd: market
            .total_volume_usd
            .as_deref()
            .and_then(|v| v.parse().ok()),
        expiry: market.expires_at,
        status: market.status,
    }
}

pub struct XoClient {
    client: reqwest::Client,
    base_url: String,
}

impl XoClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<RawMarket>> {
        info!(venue = %Venue::Xo, "fetching markets");

        let mut all = Vec::new();
        let mut page = 1u32;
        loop {
            let response: XoMarketsPage = self
                .client
                .get(format!("{}/markets", self.base_url))
                .query(&[
                    ("page", page.to_string().as_str()),
                    ("take", PAGE_SIZE.to_string().as_str()),
                    ("sortBy", "liquidity"),
                    ("sortOrder", "DESC"),
                    ("excludedStatuses", EXCLUDED_STATUSES),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            debug!(venue = %Venue::Xo, page, count = response.data.len(), "fetched page");
            all.extend(response.data);

            if !response.meta.has_next_page {
                break;
            }
            page += 1;
        }

        let markets: Vec<RawMarket> = all
            .into_iter()
            .filter(|m| m.status == "ACTIVE" && m.expires_at.is_none_or(|end| end > now))
            .map(to_raw)
            .collect();

        info!(venue = %Venue::Xo, count = markets.len(), "fetch complete");
        Ok(markets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn binary_market(json_outcomes: &str) -> XoMarket {
        let json = format!(
            r#"{{
                "id": 12,
                "title": "Bitcoin to hit $90,000 by June 2026",
                "status": "ACTIVE",
                "type": "BINARY",
                "expiresAt": "2026-06-15T12:00:00Z",
                "totalVolumeInUSD": "8000",
                "outcomes": {json_outcomes}
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn wei_strings_scale_to_unit_prices() {
        assert_eq!(wei_to_price("550000000000000000"), Some(dec!(0.5500)));
        assert_eq!(wei_to_price("not a number"), None);
    }

    #[test]
    fn binary_outcomes_sort_by_index() {
        // No outcome listed first on the wire; index order still wins.
        let market = binary_market(
            r#"[
                {"currentPrice": "450000000000000000", "index": 1},
                {"currentPrice": "550000000000000000", "index": 0}
            ]"#,
        );
        let raw = to_raw(market);
        assert_eq!(raw.yes_price, Some(dec!(0.5500)));
        assert_eq!(raw.no_price, Some(dec!(0.4500)));
        assert_eq!(raw.native_id, "12");
    }

    #[test]
    fn multi_outcome_market_takes_highest_price_and_complement() {
        let mut market = binary_market(
            r#"[
                {"currentPrice": "200000000000000000", "index": 0},
                {"currentPrice": "700000000000000000", "index": 1},
                {"currentPrice": "100000000000000000", "index": 2}
            ]"#,
        );
        market.kind = "MULTIPLE".into();
        let raw = to_raw(market);
        assert_eq!(raw.yes_price, Some(dec!(0.7000)));
        assert_eq!(raw.no_price, Some(dec!(0.3000)));
    }

    #[test]
    fn market_without_outcomes_has_no_prices() {
        let market = binary_market("[]");
        let raw = to_raw(market);
        assert!(raw.yes_price.is_none());
        assert!(raw.no_price.is_none());
    }
}
