//! Diagnostic checks.

use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Validate the configuration file without fetching anything.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());
    println!();

    let config = Config::load(path)?;

    println!("✓ Configuration file is valid");
    println!();
    println!("Summary:");
    println!("  Predict API: {}", config.venues.predict_url);
    println!("  Probable market API: {}", config.venues.probable_market_url);
    println!("  Probable CLOB API: {}", config.venues.probable_clob_url);
    println!("  XO API: {}", config.venues.xo_url);
    println!("  Polymarket API: {}", config.venues.polymarket_url);
    println!("  Fetch concurrency: {}", config.fetch.concurrency);
    println!("  Request timeout: {}s", config.fetch.timeout_secs);
    println!();

    if config.store.is_enabled() {
        println!("✓ Store configured: {}", config.store.url);
        println!("✓ Store API key found (from STORE_API_KEY env var)");
    } else {
        println!("  Store: disabled (set [store] url to enable sync)");
    }

    println!();
    println!("Configuration is ready to use.");
    Ok(())
}
