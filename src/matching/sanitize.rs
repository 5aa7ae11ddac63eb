//! Title sanitization for similarity scoring.
//!
//! The sanitized form is a comparison key only and is never shown to users;
//! canonical titles always keep the original phrasing.

use std::sync::LazyLock;

use regex::Regex;

/// Tokens that carry no discriminative signal between paraphrased questions
/// about the same event ("Will X reach ..." vs "X to hit ...").
const FILLER_WORDS: &[&str] = &[
    "will", "can", "touch", "reach", "get", "to", "at", "the", "a", "is", "be", "by", "on", "in",
    "of", "or", "and", "for", "before", "after", "above", "below", "hit", "win", "exceed",
];

/// Crypto-asset tickers expanded to full names so ticker-form and name-form
/// titles compare equal.
const TICKER_EXPANSIONS: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("sol", "solana"),
    ("bnb", "binance"),
    ("xrp", "ripple"),
    ("doge", "dogecoin"),
    ("ada", "cardano"),
    ("dot", "polkadot"),
    ("avax", "avalanche"),
    ("matic", "polygon"),
    ("link", "chainlink"),
    ("uni", "uniswap"),
    ("ltc", "litecoin"),
    ("atom", "cosmos"),
    ("near", "near"),
    ("apt", "aptos"),
    ("arb", "arbitrum"),
    ("op", "optimism"),
    ("sui", "sui"),
    ("idr", "rupiah"),
];

static RE_CURRENCY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£]\s?(\d[\d,]*\.?\d*)").expect("valid regex"));

static RE_GROUPED_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d),(\d{3})").expect("valid regex"));

static RE_MAGNITUDE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?)(k|m|b)?$").expect("valid regex"));

/// Expand a shorthand magnitude token (`90k`, `1.5m`, `2b`) to its integer
/// value. Tokens not matching the pattern pass through unchanged, including
/// already-plain numbers.
fn expand_magnitude(token: &str) -> String {
    let Some(caps) = RE_MAGNITUDE_SUFFIX.captures(token) else {
        return token.to_string();
    };
    let Ok(num) = caps[1].parse::<f64>() else {
        return token.to_string();
    };
    let multiplier = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(s) if s == "k" => 1_000.0,
        Some(s) if s == "m" => 1_000_000.0,
        Some(s) if s == "b" => 1_000_000_000.0,
        _ => return token.to_string(),
    };

    let value = num * multiplier;
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Sanitize a market title into its similarity-comparison key.
///
/// Pipeline: lowercase, fold currency-prefixed numbers (`$90,000` and
/// `90000` normalize identically), strip punctuation, drop filler words,
/// expand crypto tickers, expand magnitude suffixes, rejoin on single
/// spaces. Empty input yields an empty string.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let lowered = title.to_lowercase();

    let folded = RE_CURRENCY_NUMBER.replace_all(&lowered, |caps: &regex::Captures<'_>| {
        caps[1].replace(',', "")
    });
    let folded = RE_GROUPED_DIGITS.replace_all(&folded, "$1$2");

    let stripped: String = folded
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| !FILLER_WORDS.contains(token))
        .map(|token| {
            TICKER_EXPANSIONS
                .iter()
                .find(|(ticker, _)| *ticker == token)
                .map_or(token, |(_, name)| *name)
        })
        .map(expand_magnitude)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(sanitize_title(""), "");
        assert_eq!(sanitize_title("   "), "");
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(sanitize_title("Solana FLIPS Ethereum!?"), "solana flips ethereum");
    }

    #[test]
    fn folds_currency_prefixed_numbers() {
        assert_eq!(sanitize_title("$90,000"), "90000");
        assert_eq!(sanitize_title("€1,500"), "1500");
        assert_eq!(sanitize_title("$ 250"), "250");
    }

    #[test]
    fn collapses_digit_grouping_commas() {
        assert_eq!(sanitize_title("90,000"), "90000");
    }

    #[test]
    fn drops_filler_words() {
        assert_eq!(
            sanitize_title("Will the price be above 100 by March?"),
            "price 100 march"
        );
    }

    #[test]
    fn expands_tickers() {
        assert_eq!(sanitize_title("BTC flippening ETH"), "bitcoin flippening ethereum");
    }

    #[test]
    fn expands_magnitude_suffixes() {
        assert_eq!(expand_magnitude("90k"), "90000");
        assert_eq!(expand_magnitude("1.5m"), "1500000");
        assert_eq!(expand_magnitude("2B"), "2000000000");
        assert_eq!(expand_magnitude("500"), "500");
        assert_eq!(expand_magnitude("june"), "june");
    }

    #[test]
    fn ticker_and_currency_phrasings_converge() {
        let a = sanitize_title("Bitcoin to hit $90,000 by June 2026");
        let b = sanitize_title("Will BTC reach 90k by June 2026?");
        assert_eq!(a, b);
        assert_eq!(a, "bitcoin 90000 june 2026");
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(sanitize_title("Will SOL reach 500 by June 2026?"), "solana 500 june 2026");
    }
}
