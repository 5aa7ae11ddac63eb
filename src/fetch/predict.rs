//! Predict fetcher.
//!
//! The markets endpoint carries no expiry; it lives on the market's category.
//! Each run resolves every distinct category slug once through a per-run
//! cache, then derives Yes/No prices from the orderbook's best bid and ask.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{RawMarket, Venue};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct PredictStats {
    #[serde(rename = "totalLiquidityUsd")]
    total_liquidity_usd: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct PredictMarket {
    id: u64,
    question: String,
    #[serde(rename = "tradingStatus")]
    trading_status: String,
    status: String,
    #[serde(rename = "categorySlug")]
    category_slug: String,
    stats: Option<PredictStats>,
}

#[derive(Debug, Deserialize)]
struct MarketsResponse {
    success: bool,
    data: Vec<PredictMarket>,
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    data: CategoryData,
}

#[derive(Debug, Deserialize)]
struct CategoryData {
    #[serde(rename = "endsAt")]
    ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct OrderbookResponse {
    data: OrderbookData,
}

#[derive(Debug, Deserialize)]
struct OrderbookData {
    bids: Vec<(Decimal, Decimal)>,
    asks: Vec<(Decimal, Decimal)>,
}

impl OrderbookData {
    /// Midpoint of best bid and ask, falling back to whichever side exists.
    fn yes_no(&self) -> (Option<Decimal>, Option<Decimal>) {
        let best_bid = self.bids.first().map(|(price, _)| *price);
        let best_ask = self.asks.first().map(|(price, _)| *price);

        let yes = match (best_bid, best_ask) {
            (Some(bid), Some(ask)) => Some(round4((bid + ask) / Decimal::TWO)),
            (Some(bid), None) => Some(bid),
            (None, Some(ask)) => Some(ask),
            (None, None) => None,
        };
        let no = yes.map(|y| round4(Decimal::ONE - y));
        (yes, no)
    }
}

fn round4(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

pub struct PredictClient {
    client: reqwest::Client,
    base_url: String,
    concurrency: usize,
}

impl PredictClient {
    pub fn new(client: reqwest::Client, base_url: String, concurrency: usize) -> Self {
        Self {
            client,
            base_url,
            concurrency,
        }
    }

    async fn category_expiry(&self, slug: &str) -> Option<DateTime<Utc>> {
        let url = format!("{}/v1/categories/{slug}", self.base_url);
        let response = self.client.get(&url).send().await.ok()?;
        let body: CategoryResponse = response.json().await.ok()?;
        body.data.ends_at
    }

    async fn orderbook_prices(&self, market_id: u64) -> (Option<Decimal>, Option<Decimal>) {
        let url = format!("{}/v1/markets/{market_id}/orderbook", self.base_url);
        let body: Option<OrderbookResponse> = match self.client.get(&url).send().await {
            Ok(response) => response.json().await.ok(),
            Err(_) => None,
        };
        body.map(|b| b.data.yes_no()).unwrap_or((None, None))
    }

    pub async fn fetch(&self) -> Result<Vec<RawMarket>> {
        info!(venue = %Venue::Predict, "fetching markets");

        let response: MarketsResponse = self
            .client
            .get(format!("{}/v1/markets", self.base_url))
            .query(&[("limit", "50"), ("includeStats", "true")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            return Err(Error::MalformedResponse {
                venue: Venue::Predict,
                reason: "API returned success=false".into(),
            });
        }

        let active: Vec<PredictMarket> = response
            .data
            .into_iter()
            .filter(|m| m.trading_status == "OPEN" && m.status == "REGISTERED")
            .collect();

        debug!(venue = %Venue::Predict, count = active.len(), "resolving category expiries");

        // Distinct category slugs resolve once per run.
        let mut expiry_cache: HashMap<String, Option<DateTime<Utc>>> = HashMap::new();
        for market in &active {
            if !expiry_cache.contains_key(&market.category_slug) {
                let expiry = self.category_expiry(&market.category_slug).await;
                if expiry.is_none() {
                    warn!(
                        venue = %Venue::Predict,
                        slug = %market.category_slug,
                        "category carries no expiry"
                    );
                }
                expiry_cache.insert(market.category_slug.clone(), expiry);
            }
        }

        let markets: Vec<RawMarket> = stream::iter(active)
            .map(|market| {
                let expiry = expiry_cache
                    .get(&market.category_slug)
                    .copied()
                    .flatten();
                async move {
                    let (yes_price, no_price) = self.orderbook_prices(market.id).await;
                    RawMarket {
                        venue: Venue::Predict,
                        native_id: market.id.to_string(),
                        title: market.question,
                        yes_price,
                        no_price,
                        liquidity_usd: market
                            .stats
                            .and_then(|stats| stats.total_liquidity_usd),
                        expiry,
                        status: market.trading_status,
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        info!(venue = %Venue::Predict, count = markets.len(), "fetch complete");
        Ok(markets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn markets_payload_deserializes() {
        let json = r#"{
            "success": true,
            "cursor": "abc",
            "data": [{
                "id": 7,
                "title": "BTC 90k",
                "question": "Will BTC reach 90k by June 2026?",
                "tradingStatus": "OPEN",
                "status": "REGISTERED",
                "categorySlug": "crypto-june",
                "stats": {"totalLiquidityUsd": 12000.5}
            }]
        }"#;
        let response: MarketsResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        let market = &response.data[0];
        assert_eq!(market.id, 7);
        assert_eq!(
            market.stats.as_ref().unwrap().total_liquidity_usd,
            Some(dec!(12000.5))
        );
    }

    #[test]
    fn orderbook_midpoint_uses_best_bid_and_ask() {
        let book = OrderbookData {
            bids: vec![(dec!(0.54), dec!(100)), (dec!(0.50), dec!(300))],
            asks: vec![(dec!(0.62), dec!(80))],
        };
        let (yes, no) = book.yes_no();
        assert_eq!(yes, Some(dec!(0.58)));
        assert_eq!(no, Some(dec!(0.42)));
    }

    #[test]
    fn one_sided_orderbook_falls_back_to_that_side() {
        let bid_only = OrderbookData {
            bids: vec![(dec!(0.4), dec!(10))],
            asks: vec![],
        };
        assert_eq!(bid_only.yes_no(), (Some(dec!(0.4)), Some(dec!(0.6))));

        let empty = OrderbookData {
            bids: vec![],
            asks: vec![],
        };
        assert_eq!(empty.yes_no(), (None, None));
    }
}
