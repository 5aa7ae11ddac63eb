//! Handlers for the `run` and `match` commands.

use chrono::Utc;
use tracing::info;

use crate::cli::{mock, report, MatchArgs, RunArgs};
use crate::config::Config;
use crate::domain::{Market, MatchResult};
use crate::error::Result;
use crate::fetch::{self, normalize_all};
use crate::matching::match_markets;
use crate::store::{MarketStore, RestStore};

fn apply_log_overrides(config: &mut Config, log_level: &Option<String>, json_logs: bool) {
    if let Some(level) = log_level {
        config.logging.level = level.clone();
    }
    if json_logs {
        config.logging.format = "json".to_string();
    }
}

async fn fetch_snapshot(config: &Config) -> Result<Vec<Market>> {
    let outcomes = fetch::fetch_all(config).await?;
    report::print_fetch_summary(&outcomes);

    let raws: Vec<_> = outcomes
        .into_iter()
        .flat_map(|outcome| outcome.markets)
        .collect();
    let (markets, dropped) = normalize_all(&raws, Utc::now());
    info!(
        kept = markets.len(),
        dropped, "snapshot normalized"
    );
    Ok(markets)
}

fn run_matching(markets: &[Market]) -> MatchResult {
    let result = match_markets(markets);
    info!(
        groups = result.matched.len(),
        unmatched = result.unmatched.len(),
        "matching complete"
    );
    result
}

/// Execute the `run` command: fetch, match, print, sync.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    apply_log_overrides(&mut config, &args.log_level, args.json_logs);
    config.init_logging();

    let markets = fetch_snapshot(&config).await?;
    let result = run_matching(&markets);
    report::print_match_result(&result);

    if args.no_sync {
        info!("store sync skipped (--no-sync)");
        return Ok(());
    }
    if !config.store.is_enabled() {
        info!("store not configured, skipping sync");
        return Ok(());
    }

    let store = RestStore::from_config(&config.store)?;
    let sync = store.sync(&markets, &result.matched).await;
    for error in &sync.errors {
        tracing::error!(error = %error, "sync error");
    }
    Ok(())
}

/// Execute the `match` command: match a fetched or built-in snapshot and
/// print the result. Never persists.
pub async fn execute_match(args: &MatchArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    apply_log_overrides(&mut config, &args.log_level, args.json_logs);
    config.init_logging();

    let markets = if args.mock {
        info!("matching built-in sample snapshot");
        mock::sample_snapshot()
    } else {
        fetch_snapshot(&config).await?
    };

    let result = run_matching(&markets);
    report::print_match_result(&result);
    report::print_pair_log(&result);
    Ok(())
}
