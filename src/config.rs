//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `STORE_API_KEY`.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub venues: VenuesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Base URLs for each venue's public API.
#[derive(Debug, Clone, Deserialize)]
pub struct VenuesConfig {
    #[serde(default = "default_predict_url")]
    pub predict_url: String,
    #[serde(default = "default_probable_market_url")]
    pub probable_market_url: String,
    #[serde(default = "default_probable_clob_url")]
    pub probable_clob_url: String,
    #[serde(default = "default_xo_url")]
    pub xo_url: String,
    #[serde(default = "default_polymarket_url")]
    pub polymarket_url: String,
}

fn default_predict_url() -> String {
    "https://api-testnet.predict.fun".into()
}

fn default_probable_market_url() -> String {
    "https://market-api.probable.markets/public/api/v1".into()
}

fn default_probable_clob_url() -> String {
    "https://api.probable.markets/public/api/v1".into()
}

fn default_xo_url() -> String {
    "https://api-mainnet.xo.market/api".into()
}

fn default_polymarket_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

/// Fetch-layer behavior. The matching core has no concurrency of its own;
/// these knobs only shape the ingestion fan-out.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Simultaneous per-market price requests per venue.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_concurrency() -> usize {
    5
}

const fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Persistence backend configuration.
/// The API key is loaded from the `STORE_API_KEY` env var at runtime (never
/// from the config file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// PostgREST-style base URL. Empty disables persistence.
    #[serde(default)]
    pub url: String,
    /// API key loaded from `STORE_API_KEY` env var at runtime.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl StoreConfig {
    /// Whether a persistence backend is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.url.is_empty()
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file is not an error;
    /// every field has a default and secrets come from the environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config: Self = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Self::default()
        };

        config.store.api_key = std::env::var("STORE_API_KEY").ok();

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.fetch.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.concurrency",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.store.is_enabled() && self.store.api_key.is_none() {
            return Err(ConfigError::MissingField {
                field: "STORE_API_KEY",
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            venues: VenuesConfig::default(),
            fetch: FetchConfig::default(),
            logging: LoggingConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for VenuesConfig {
    fn default() -> Self {
        Self {
            predict_url: default_predict_url(),
            probable_market_url: default_probable_market_url(),
            probable_clob_url: default_probable_clob_url(),
            xo_url: default_xo_url(),
            polymarket_url: default_polymarket_url(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
