//! Persistence of snapshots and matched groups.
//!
//! The backend is a PostgREST-style REST API. Upserts are idempotent:
//! markets key on `(venue, external_id)` and groups on `canonical_title`, so
//! re-running a sync converges on the same rows.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::domain::{Market, MatchedGroup, Venue};
use crate::error::{Result, StoreError};

const BATCH_SIZE: usize = 50;

/// Serialized row for the `raw_markets` table.
#[derive(Debug, Serialize)]
pub struct MarketRow {
    pub venue: Venue,
    pub external_id: String,
    pub title: String,
    pub yes_price: Decimal,
    pub no_price: Decimal,
    pub liquidity_usd: Decimal,
    pub expiry_at: String,
    pub status: String,
    pub updated_at: String,
}

impl MarketRow {
    fn from_market(market: &Market, updated_at: &str) -> Self {
        let prefix = format!("{}-", market.venue());
        let external_id = market
            .id()
            .as_str()
            .strip_prefix(&prefix)
            .unwrap_or(market.id().as_str())
            .to_string();
        Self {
            venue: market.venue(),
            external_id,
            title: market.title().to_string(),
            yes_price: market.yes_price(),
            no_price: market.no_price(),
            liquidity_usd: market.liquidity(),
            expiry_at: market.expiry().to_rfc3339(),
            status: "ACTIVE".into(),
            updated_at: updated_at.to_string(),
        }
    }
}

/// One member's contribution inside a group row's `members` JSON column.
#[derive(Debug, Serialize)]
pub struct MemberEntry {
    pub venue: Venue,
    pub market_id: String,
    pub yes_price: Decimal,
    pub no_price: Decimal,
    pub liquidity: Decimal,
}

/// Serialized row for the `matched_groups` table.
#[derive(Debug, Serialize)]
pub struct GroupRow {
    pub canonical_title: String,
    pub total_liquidity: Decimal,
    pub weighted_yes_price: Decimal,
    pub weighted_no_price: Decimal,
    pub expiry_at: String,
    pub venue_count: usize,
    pub members: Vec<MemberEntry>,
    pub updated_at: String,
}

impl GroupRow {
    fn from_group(group: &MatchedGroup, updated_at: &str) -> Self {
        let members = group
            .members
            .iter()
            .map(|m| MemberEntry {
                venue: m.venue(),
                market_id: m.id().to_string(),
                yes_price: m.yes_price(),
                no_price: m.no_price(),
                liquidity: m.liquidity(),
            })
            .collect();
        Self {
            canonical_title: group.canonical_title.clone(),
            total_liquidity: group.total_liquidity,
            weighted_yes_price: group.weighted_yes,
            weighted_no_price: group.weighted_no,
            expiry_at: group.expiry.to_rfc3339(),
            venue_count: group.members.len(),
            members,
            updated_at: updated_at.to_string(),
        }
    }
}

/// Counts from one sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub markets_upserted: usize,
    pub groups_upserted: usize,
    pub errors: Vec<String>,
}

#[async_trait]
pub trait MarketStore {
    async fn upsert_markets(&self, markets: &[Market]) -> Result<usize>;
    async fn upsert_groups(&self, groups: &[MatchedGroup]) -> Result<usize>;

    /// Sync a whole run. Batch failures are collected, not fatal.
    async fn sync(&self, markets: &[Market], groups: &[MatchedGroup]) -> SyncReport {
        let mut report = SyncReport::default();

        match self.upsert_markets(markets).await {
            Ok(count) => report.markets_upserted = count,
            Err(err) => report.errors.push(format!("markets: {err}")),
        }
        match self.upsert_groups(groups).await {
            Ok(count) => report.groups_upserted = count,
            Err(err) => report.errors.push(format!("groups: {err}")),
        }

        if report.errors.is_empty() {
            info!(
                markets = report.markets_upserted,
                groups = report.groups_upserted,
                "sync complete"
            );
        } else {
            warn!(errors = report.errors.len(), "sync finished with errors");
        }
        report
    }
}

/// PostgREST client over the configured backend.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// # Errors
    ///
    /// `StoreError::NotConfigured` when the URL or API key is missing.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        if !config.is_enabled() {
            return Err(StoreError::NotConfigured.into());
        }
        let api_key = config
            .api_key
            .clone()
            .ok_or(StoreError::NotConfigured)?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn upsert_batch<R: Serialize>(
        &self,
        table: &str,
        on_conflict: &str,
        rows: &[R],
    ) -> Result<()> {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("on_conflict", on_conflict)])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::UpsertFailed {
                table: table.to_string(),
                reason: format!("{status}: {body}"),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl MarketStore for RestStore {
    async fn upsert_markets(&self, markets: &[Market]) -> Result<usize> {
        let updated_at = Utc::now().to_rfc3339();
        let mut upserted = 0;
        for batch in markets.chunks(BATCH_SIZE) {
            let rows: Vec<MarketRow> = batch
                .iter()
                .map(|m| MarketRow::from_market(m, &updated_at))
                .collect();
            self.upsert_batch("raw_markets", "venue,external_id", &rows)
                .await?;
            upserted += batch.len();
        }
        Ok(upserted)
    }

    async fn upsert_groups(&self, groups: &[MatchedGroup]) -> Result<usize> {
        let updated_at = Utc::now().to_rfc3339();
        let mut upserted = 0;
        for batch in groups.chunks(BATCH_SIZE) {
            let rows: Vec<GroupRow> = batch
                .iter()
                .map(|g| GroupRow::from_group(g, &updated_at))
                .collect();
            self.upsert_batch("matched_groups", "canonical_title", &rows)
                .await?;
            upserted += batch.len();
        }
        Ok(upserted)
    }
}
