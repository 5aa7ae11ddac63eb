use thiserror::Error;

use crate::domain::{DomainError, Venue};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Persistence errors raised by the store collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store is not configured")]
    NotConfigured,

    #[error("upsert into {table} failed: {reason}")]
    UpsertFailed { table: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("venue {venue} returned malformed data: {reason}")]
    MalformedResponse { venue: Venue, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
