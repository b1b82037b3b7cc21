//! Validate configuration command.

use anyhow::{Context, Result};
use std::path::Path;
use ticker_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    config.validate().context("configuration rejected")?;

    println!("{} is valid", config_path.display());
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Storage: {}", config.storage.path().display());
    println!("Policy: {}", config.policy.name);
    println!("Retention: {} candles, warm-up {}", config.series.keep, config.series.min_samples);
    println!("Backfill: {} days with {} workers", config.fetch.history_days, config.fetch.workers);
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
