//! Venue ingestion: per-venue REST clients and the cross-venue fan-out.
//!
//! A single venue outage must never sink a run. `fetch_all` drives every
//! venue concurrently and folds each failure into its [`FetchOutcome`]
//! instead of propagating it.

pub mod normalize;
mod polymarket;
mod predict;
mod probable;
mod xo;

use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};

use crate::config::Config;
use crate::domain::{RawMarket, Venue};
use crate::error::Result;

pub use normalize::{normalize, normalize_all};
pub use polymarket::PolymarketClient;
pub use predict::PredictClient;
pub use probable::ProbableClient;
pub use xo::XoClient;

/// One venue's fetch result. A failed venue carries an empty market list and
/// the error text.
#[derive(Debug)]
pub struct FetchOutcome {
    pub venue: Venue,
    pub markets: Vec<RawMarket>,
    pub error: Option<String>,
}

impl FetchOutcome {
    fn from_result(venue: Venue, result: Result<Vec<RawMarket>>) -> Self {
        match result {
            Ok(markets) => Self {
                venue,
                markets,
                error: None,
            },
            Err(err) => {
                error!(venue = %venue, error = %err, "venue fetch failed");
                Self {
                    venue,
                    markets: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

/// Fetch all venues concurrently against one snapshot timestamp.
///
/// # Errors
///
/// Fails only when the shared HTTP client cannot be built; per-venue errors
/// are isolated into their outcomes.
pub async fn fetch_all(config: &Config) -> Result<Vec<FetchOutcome>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch.timeout_secs))
        .build()?;
    let now = Utc::now();

    let predict = PredictClient::new(
        client.clone(),
        config.venues.predict_url.clone(),
        config.fetch.concurrency,
    );
    let probable = ProbableClient::new(
        client.clone(),
        config.venues.probable_market_url.clone(),
        config.venues.probable_clob_url.clone(),
        config.fetch.concurrency,
    );
    let xo = XoClient::new(client.clone(), config.venues.xo_url.clone());
    let polymarket = PolymarketClient::new(client, config.venues.polymarket_url.clone());

    let (predict_result, probable_result, xo_result, polymarket_result) = tokio::join!(
        predict.fetch(),
        probable.fetch(now),
        xo.fetch(now),
        polymarket.fetch(now),
    );

    let outcomes = vec![
        FetchOutcome::from_result(Venue::Predict, predict_result),
        FetchOutcome::from_result(Venue::Probable, probable_result),
        FetchOutcome::from_result(Venue::Xo, xo_result),
        FetchOutcome::from_result(Venue::Polymarket, polymarket_result),
    ];

    let total: usize = outcomes.iter().map(|o| o.markets.len()).sum();
    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    info!(total, failed, "venue fetch round complete");

    Ok(outcomes)
}
