//! Market-related domain types.
//!
//! - [`RawMarket`] - One per-venue record as reported by a fetcher
//! - [`Market`] - A fully-qualified, normalized binary market

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::MarketId;
use super::venue::Venue;

/// Minimum USD liquidity required for a record to qualify as a [`Market`].
pub const MIN_LIQUIDITY_USD: Decimal = dec!(500);

/// A raw per-venue listing, prior to normalization.
///
/// Any field a venue failed to report is `None`; the normalizer decides
/// whether the record qualifies as a [`Market`] or is dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMarket {
    pub venue: Venue,
    pub native_id: String,
    pub title: String,
    pub yes_price: Option<Decimal>,
    pub no_price: Option<Decimal>,
    pub liquidity_usd: Option<Decimal>,
    pub expiry: Option<DateTime<Utc>>,
    pub status: String,
}

/// A normalized, fully-qualified binary market from one venue.
///
/// Immutable once created. Both prices are present and within `[0, 1]`,
/// liquidity meets the [`MIN_LIQUIDITY_USD`] floor, and the expiry was
/// strictly in the future at normalization time. Construction goes through
/// [`Market::try_new`] (or the normalizer, which calls it) so the matching
/// pipeline can rely on these invariants without re-checking them.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    id: MarketId,
    title: String,
    venue: Venue,
    yes_price: Decimal,
    no_price: Decimal,
    liquidity: Decimal,
    expiry: DateTime<Utc>,
}

impl Market {
    /// Create a market without invariant validation.
    ///
    /// Intended for fixtures and tests where the caller controls every field.
    pub fn new(
        id: MarketId,
        title: impl Into<String>,
        venue: Venue,
        yes_price: Decimal,
        no_price: Decimal,
        liquidity: Decimal,
        expiry: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            venue,
            yes_price,
            no_price,
            liquidity,
            expiry,
        }
    }

    /// Create a market with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - `yes_price` and `no_price` must be within `[0, 1]`
    /// - `liquidity` must be at least [`MIN_LIQUIDITY_USD`]
    /// - `expiry` must be strictly after `now`
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        venue: Venue,
        native_id: &str,
        title: impl Into<String>,
        yes_price: Decimal,
        no_price: Decimal,
        liquidity: Decimal,
        expiry: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        for (side, price) in [("yes", yes_price), ("no", no_price)] {
            if !(Decimal::ZERO..=Decimal::ONE).contains(&price) {
                return Err(DomainError::PriceOutOfRange { side, price });
            }
        }

        if liquidity < MIN_LIQUIDITY_USD {
            return Err(DomainError::LiquidityBelowFloor {
                liquidity,
                floor: MIN_LIQUIDITY_USD,
            });
        }

        if expiry <= now {
            return Err(DomainError::ExpiryNotFuture { expiry, now });
        }

        Ok(Self {
            id: MarketId::from_parts(venue, native_id),
            title: title.into(),
            venue,
            yes_price,
            no_price,
            liquidity,
            expiry,
        })
    }

    /// Get the market ID.
    #[must_use]
    pub const fn id(&self) -> &MarketId {
        &self.id
    }

    /// Get the display title, original casing preserved.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the venue this listing came from.
    #[must_use]
    pub const fn venue(&self) -> Venue {
        self.venue
    }

    /// Get the YES probability.
    #[must_use]
    pub const fn yes_price(&self) -> Decimal {
        self.yes_price
    }

    /// Get the NO probability.
    #[must_use]
    pub const fn no_price(&self) -> Decimal {
        self.no_price
    }

    /// Get the USD liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Decimal {
        self.liquidity
    }

    /// Get the expiry timestamp.
    #[must_use]
    pub const fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }
}
