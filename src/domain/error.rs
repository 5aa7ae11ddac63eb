//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate
//! invariants the normalizer is supposed to guarantee. A violation here is a
//! programmer error upstream, not a recoverable data-quality issue.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Prices are probabilities and must lie in `[0, 1]`.
    #[error("{side} price must be within [0, 1], got {price}")]
    PriceOutOfRange {
        /// Which side of the market ("yes" or "no").
        side: &'static str,
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// Liquidity must meet the qualification floor.
    #[error("liquidity {liquidity} is below the {floor} USD floor")]
    LiquidityBelowFloor {
        /// The invalid liquidity that was provided.
        liquidity: rust_decimal::Decimal,
        /// The required minimum.
        floor: rust_decimal::Decimal,
    },

    /// Expiry must be strictly in the future at normalization time.
    #[error("expiry {expiry} is not in the future (now: {now})")]
    ExpiryNotFuture {
        /// The invalid expiry that was provided.
        expiry: DateTime<Utc>,
        /// The normalization timestamp it was compared against.
        now: DateTime<Utc>,
    },

    /// Matched groups require at least two members.
    #[error("cluster must have at least 2 members, got {count}")]
    ClusterTooSmall {
        /// The number of members in the rejected cluster.
        count: usize,
    },
}
