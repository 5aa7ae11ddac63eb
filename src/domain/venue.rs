//! The closed set of supported venues.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A prediction market venue providing raw listings.
///
/// Adding a new venue is a deliberate enum extension: the fetch layer, the
/// matching engine, and the store all key off this type rather than a
/// free-form platform string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Predict,
    Probable,
    Xo,
    Polymarket,
}

impl Venue {
    /// All venues, in fetch order.
    pub const ALL: [Venue; 4] = [
        Venue::Predict,
        Venue::Probable,
        Venue::Xo,
        Venue::Polymarket,
    ];

    /// Lowercase venue name as used in market IDs and store rows.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Venue::Predict => "predict",
            Venue::Probable => "probable",
            Venue::Xo => "xo",
            Venue::Polymarket => "polymarket",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        for venue in Venue::ALL {
            assert_eq!(format!("{venue}"), venue.as_str());
        }
    }

    #[test]
    fn serde_roundtrip_is_lowercase() {
        let json = serde_json::to_string(&Venue::Polymarket).unwrap();
        assert_eq!(json, "\"polymarket\"");
        let back: Venue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Venue::Polymarket);
    }
}
