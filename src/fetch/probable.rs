//! Probable Markets fetcher.
//!
//! Lists active events from the market API, then resolves Yes/No midpoints
//! per market from the CLOB API with a bounded request fan-out.

use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{RawMarket, Venue};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct ProbableToken {
    token_id: String,
    outcome: String,
}

#[derive(Debug, Deserialize)]
struct ProbableMarket {
    id: String,
    question: String,
    liquidity: Option<String>,
    active: bool,
    closed: bool,
    archived: bool,
    resolved: bool,
    #[serde(rename = "endDate")]
    end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    tokens: Vec<ProbableToken>,
}

#[derive(Debug, Deserialize)]
struct ProbableEvent {
    #[serde(default)]
    markets: Vec<ProbableMarket>,
}

#[derive(Debug, Deserialize)]
struct MidpointResponse {
    mid: Option<String>,
}

pub struct ProbableClient {
    client: reqwest::Client,
    market_url: String,
    clob_url: String,
    concurrency: usize,
}

impl ProbableClient {
    pub fn new(
        client: reqwest::Client,
        market_url: String,
        clob_url: String,
        concurrency: usize,
    ) -> Self {
        Self {
            client,
            market_url,
            clob_url,
            concurrency,
        }
    }

    /// Midpoint for one token, or `None` when the CLOB has no quote.
    /// Per-token failures degrade to a missing price, not an error.
    async fn midpoint(&self, token_id: &str) -> Option<Decimal> {
        let url = format!("{}/midpoint", self.clob_url);
        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await
            .ok()?;
        let body: MidpointResponse = response.json().await.ok()?;
        body.mid.as_deref().and_then(|mid| mid.parse().ok())
    }

    async fn quote(&self, market: ProbableMarket) -> RawMarket {
        let yes_token = market.tokens.iter().find(|t| t.outcome == "Yes");
        let no_token = market.tokens.iter().find(|t| t.outcome == "No");

        let yes_price = match yes_token {
            Some(token) => self.midpoint(&token.token_id).await,
            None => None,
        };
        let no_price = match no_token {
            Some(token) => self.midpoint(&token.token_id).await,
            None => None,
        };

        RawMarket {
            venue: Venue::Probable,
            native_id: market.id,
            title: market.question,
            yes_price,
            no_price,
            liquidity_usd: market.liquidity.as_deref().and_then(|l| l.parse().ok()),
            expiry: market.end_date,
            status: if market.active { "ACTIVE" } else { "CLOSED" }.to_string(),
        }
    }

    pub async fn fetch(&self, now: DateTime<Utc>) -> Result<Vec<RawMarket>> {
        info!(venue = %Venue::Probable, "fetching events");

        let events: Vec<ProbableEvent> = self
            .client
            .get(format!("{}/events", self.market_url))
            .query(&[("limit", "20"), ("active", "true")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let active: Vec<ProbableMarket> = events
            .into_iter()
            .flat_map(|event| event.markets)
            .filter(|m| {
                m.active
                    && !m.closed
                    && !m.archived
                    && !m.resolved
                    && m.end_date.is_none_or(|end| end > now)
            })
            .collect();

        debug!(
            venue = %Venue::Probable,
            count = active.len(),
            "resolving midpoints"
        );

        let markets: Vec<RawMarket> = stream::iter(active)
            .map(|market| self.quote(market))
            .buffered(self.concurrency)
            .collect()
            .await;

        info!(venue = %Venue::Probable, count = markets.len(), "fetch complete");
        Ok(markets)
    }
}
