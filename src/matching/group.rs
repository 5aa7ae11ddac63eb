//! Reduction of a surviving cluster into one [`MatchedGroup`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{DomainError, Market, MatchedGroup, Quote};

/// Liquidity-weighted mean of one side's prices, rounded to 4 decimal
/// places. Returns `None` when total liquidity is zero; the per-market
/// liquidity floor makes that unreachable in practice, but the guard keeps
/// the reduction total.
fn weighted_price<F>(members: &[Market], total_liquidity: Decimal, side: F) -> Option<Decimal>
where
    F: Fn(&Market) -> Decimal,
{
    if total_liquidity.is_zero() {
        return None;
    }
    let weighted: Decimal = members.iter().map(|m| side(m) * m.liquidity()).sum();
    Some((weighted / total_liquidity).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero))
}

/// Pick the member with the numerically lowest price on one side. The lowest
/// price is the cheapest entry, not the best probability. Ties keep the
/// earliest member in stable order.
fn best_quote<F>(members: &[Market], side: F) -> Quote
where
    F: Fn(&Market) -> Decimal,
{
    let best = members
        .iter()
        .reduce(|best, m| if side(m) < side(best) { m } else { best })
        .expect("cluster has at least one member");
    Quote {
        venue: best.venue(),
        price: side(best),
    }
}

/// Reduce one cluster's members into a [`MatchedGroup`].
///
/// A pure reduction with deterministic tie-breaks: the canonical title is
/// the longest member title (first encountered wins ties), the group expiry
/// is the member expiry at index `n / 2` of the ascending sort (the upper
/// middle for even counts), and best quotes keep the earliest member on
/// ties.
///
/// # Errors
///
/// Returns `DomainError::ClusterTooSmall` for clusters of fewer than two
/// members; the cluster builder is supposed to have discarded those.
pub fn synthesize_group(members: Vec<Market>) -> Result<MatchedGroup, DomainError> {
    if members.len() < 2 {
        return Err(DomainError::ClusterTooSmall {
            count: members.len(),
        });
    }

    let canonical_title = members
        .iter()
        .reduce(|best, m| {
            if m.title().len() > best.title().len() {
                m
            } else {
                best
            }
        })
        .expect("cluster has at least one member")
        .title()
        .to_string();

    let total_liquidity: Decimal = members.iter().map(Market::liquidity).sum();

    let weighted_yes =
        weighted_price(&members, total_liquidity, Market::yes_price).unwrap_or(Decimal::ZERO);
    let weighted_no =
        weighted_price(&members, total_liquidity, Market::no_price).unwrap_or(Decimal::ZERO);

    let best_yes = best_quote(&members, Market::yes_price);
    let best_no = best_quote(&members, Market::no_price);

    let mut expiries: Vec<_> = members.iter().map(Market::expiry).collect();
    expiries.sort();
    let expiry = expiries[expiries.len() / 2];

    Ok(MatchedGroup {
        canonical_title,
        members,
        total_liquidity,
        weighted_yes,
        weighted_no,
        expiry,
        best_yes,
        best_no,
    })
}
