//! Venue-agnostic domain types.

mod error;
mod group;
mod id;
mod market;
mod venue;

pub use error::DomainError;
pub use group::{MatchResult, MatchedGroup, PairRecord, Quote};
pub use id::MarketId;
pub use market::{Market, RawMarket, MIN_LIQUIDITY_USD};
pub use venue::Venue;
