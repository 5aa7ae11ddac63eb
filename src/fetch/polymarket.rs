//! Polymarket fetcher.
//!
//! Reads the events endpoint ordered by liquidity, descending, and caps the
//! walk at 500 events to keep the snapshot to the deep end of the book.
//! `outcomePrices` is a JSON array serialized inside a JSON string.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{RawMarket, Venue};
use crate::error::Result;

const PAGE_SIZE: usize = 100;
const MAX_EVENTS: usize = 500;

#[derive(Debug, Deserialize)]
struct PolyMarket {
    id: String,
    question: String,
    #[serde(rename = "conditionId")]
    condition_id: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDateIso")]
    end_date_iso: Option<DateTime<Utc>>,
    #[serde(rename = "outcomePrices", default)]
    outcome_prices: Option<String>,
    liquidity: Option<Decimal>,
    #[serde(rename = "liquidityNum")]
    liquidity_num: Option<Decimal>,
    active: bool,
    closed: bool,
}

#[derive(Debug, Deserialize)]
struct PolyEvent {
    liquidity: Option<Decimal>,
    #[serde(default)]
    markets: Vec<PolyMarket>,
}

/// The first two entries are the Yes and No prices.
fn parse_outcome_prices(raw: &str) -> Option<(Decimal, Decimal)> {
    let prices: Vec<String> = serde_json::from_str(raw).ok()?;
    if prices.len() < 2 {
        return None;
    }
    let yes: Decimal = prices[0].parse().ok()?;
    let no: Decimal = prices[1].parse().ok()?;
    Some((round4(yes), round4(no)))
}

fn round4(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

fn to_raw(market: PolyMarket, event_liquidity: Option<Decimal>) -> RawMarket {
    let prices = market
        .outcome_prices
        .as_deref()
        .and_then(parse_outcome_prices);

    RawMarket {
        venue: Venue::Polymarket,
        native_id: market.condition_id.unwrap_or(market.id),
        title: market.question,
        yes_price: prices.map(|(yes, _)| yes),
        no_price: prices.map(|(_, no)| no),
        liquidity_usd: market
            .liquidity
            .or(market.liquidity_num)
            .or(event_liquidity),
        expiry: market.end_date_iso.or(market.end_date),
        status: "ACTIVE".into(),
    }
}

pub struct PolymarketClient {
    client: reqwest::Client,
    base_url: String,
}

impl PolymarketClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<RawMarket>> {
        info!(venue = %Venue::Polymarket, "fetching events");

        let mut raws = Vec::new();
        let mut offset = 0usize;
        loop {
            let events: Vec<PolyEvent> = self
                .client
                .get(format!("{}/events", self.base_url))
                .query(&[
                    ("active", "true"),
                    ("closed", "false"),
                    ("limit", PAGE_SIZE.to_string().as_str()),
                    ("offset", offset.to_string().as_str()),
                    ("order", "liquidity"),
                    ("ascending", "false"),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if events.is_empty() {
                break;
            }
            let page_len = events.len();

            for event in events {
                let event_liquidity = event.liquidity;
                raws.extend(
                    event
                        .markets
                        .into_iter()
                        .filter(|m| m.active && !m.closed)
                        .map(|m| to_raw(m, event_liquidity)),
                );
            }

            debug!(
                venue = %Venue::Polymarket,
                offset,
                total = raws.len(),
                "fetched page"
            );

            if page_len < PAGE_SIZE || offset + PAGE_SIZE >= MAX_EVENTS {
                break;
            }
            offset += PAGE_SIZE;
        }

        let markets: Vec<RawMarket> = raws
            .into_iter()
            .filter(|m| m.expiry.is_none_or(|end| end > now))
            .collect();

        info!(venue = %Venue::Polymarket, count = markets.len(), "fetch complete");
        Ok(markets)
    }
}
