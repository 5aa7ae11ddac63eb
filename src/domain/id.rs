//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::venue::Venue;

/// Market identifier - newtype for type safety.
///
/// Derived deterministically from `(venue, native_id)` so the same listing
/// maps to the same ID across re-fetches. The inner String is private to
/// ensure all construction goes through the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketId(String);

impl MarketId {
    /// Create a `MarketId` from a venue and the venue's native listing ID.
    pub fn from_parts(venue: Venue, native_id: &str) -> Self {
        Self(format!("{venue}-{native_id}"))
    }

    /// Create a `MarketId` from an already-derived string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the market ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MarketId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for MarketId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
