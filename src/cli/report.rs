//! Terminal rendering of a matching run.

use tabled::{Table, Tabled};

use crate::domain::{MatchResult, MatchedGroup, PairRecord};
use crate::fetch::FetchOutcome;

#[derive(Tabled)]
struct VenueRow {
    #[tabled(rename = "Venue")]
    venue: String,
    #[tabled(rename = "Markets")]
    markets: usize,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct PairRow {
    #[tabled(rename = "Title A")]
    title_a: String,
    #[tabled(rename = "Title B")]
    title_b: String,
    #[tabled(rename = "Venues")]
    venues: String,
    #[tabled(rename = "Score")]
    score: String,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Canonical Title")]
    title: String,
    #[tabled(rename = "Venues")]
    venues: usize,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
    #[tabled(rename = "Wtd Yes")]
    weighted_yes: String,
    #[tabled(rename = "Best Yes")]
    best_yes: String,
    #[tabled(rename = "Expiry")]
    expiry: String,
}

fn print_indented(table: &str) {
    for line in table.lines() {
        println!("  {line}");
    }
}

fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        title.to_string()
    } else {
        let head: String = title.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Per-venue fetch summary.
pub fn print_fetch_summary(outcomes: &[FetchOutcome]) {
    println!();
    println!("  Fetch summary");
    let rows: Vec<VenueRow> = outcomes
        .iter()
        .map(|o| VenueRow {
            venue: o.venue.to_string(),
            markets: o.markets.len(),
            status: match &o.error {
                Some(err) => format!("failed: {}", truncate(err, 40)),
                None => "ok".into(),
            },
        })
        .collect();
    print_indented(&Table::new(rows).to_string());
    println!();
}

fn group_row(group: &MatchedGroup) -> GroupRow {
    GroupRow {
        title: truncate(&group.canonical_title, 48),
        venues: group.members.len(),
        liquidity: format!("${}", group.total_liquidity.round_dp(0)),
        weighted_yes: group.weighted_yes.to_string(),
        best_yes: format!("{} @ {}", group.best_yes.venue, group.best_yes.price),
        expiry: group.expiry.format("%Y-%m-%d").to_string(),
    }
}

/// Matched groups and a one-line unmatched tally.
pub fn print_match_result(result: &MatchResult) {
    println!();
    if result.matched.is_empty() {
        println!("  No cross-venue groups found.");
    } else {
        println!("  Matched groups ({})", result.matched.len());
        let rows: Vec<GroupRow> = result.matched.iter().map(group_row).collect();
        print_indented(&Table::new(rows).to_string());
    }
    println!();
    println!(
        "  {} markets matched into {} groups, {} unmatched, {} scored pairs kept",
        result.matched_market_count(),
        result.matched.len(),
        result.unmatched.len(),
        result.pair_log.len()
    );
    println!();
}

fn pair_row(record: &PairRecord) -> PairRow {
    PairRow {
        title_a: truncate(&record.title_a, 36),
        title_b: truncate(&record.title_b, 36),
        venues: format!("{} / {}", record.venue_a, record.venue_b),
        score: format!("{:.4}", record.score),
    }
}

/// Retained candidate pairs, for threshold auditing.
pub fn print_pair_log(result: &MatchResult) {
    if result.pair_log.is_empty() {
        return;
    }
    println!("  Retained pairs ({})", result.pair_log.len());
    let rows: Vec<PairRow> = result.pair_log.iter().map(pair_row).collect();
    print_indented(&Table::new(rows).to_string());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_preserves_short_titles() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_caps_long_titles_with_ellipsis() {
        let out = truncate("a very long market title indeed", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn truncate_handles_zero_width() {
        assert_eq!(truncate("anything", 0), "…");
    }
}
