//! CLI command implementations.

pub mod add;
pub mod chart;
pub mod ind;
pub mod ls;
pub mod mem;
pub mod rm;
pub mod run;
pub mod strategies;
pub mod validate;
pub mod watch;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use ticker_config::{load_config, AppConfig};
use ticker_data::{CsvDataSource, ReplayOptions};
use ticker_store::Storage;
use tracing::warn;

use crate::cli::RunArgs;
use crate::service;

/// Loaded configuration and the opened storage.
pub(crate) struct Session {
    pub config: AppConfig,
    pub storage: Arc<Storage>,
}

impl Session {
    /// Load and validate the configuration, then open the storage file.
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = load_config(config_path)
            .with_context(|| format!("failed to load configuration from {}", config_path.display()))?;
        config.validate().context("invalid configuration")?;

        let storage = Storage::new(config.build_engine()?);
        let path = config.storage.path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create storage directory {}", dir.display()))?;
        }
        storage
            .open(&path)
            .with_context(|| format!("failed to open storage {}", path.display()))?;

        Ok(Self {
            config,
            storage: Arc::new(storage),
        })
    }

    /// CSV source over `fetch.data_dir`.
    ///
    /// With `args` the source is set up for streaming: the newest bars are
    /// held back from history and replayed by `subscribe`.
    pub fn data_source(&self, args: Option<&RunArgs>) -> Result<CsvDataSource> {
        let fetch = &self.config.fetch;
        let source = CsvDataSource::new(&fetch.data_dir)?;
        let Some(args) = args else {
            return Ok(source);
        };
        let replay = ReplayOptions {
            bars: args.replay_bars.unwrap_or(fetch.replay_bars),
            interval: Duration::from_millis(args.interval_ms.unwrap_or(fetch.replay_interval_ms)),
            ..ReplayOptions::default()
        };
        Ok(source.with_replay(replay))
    }

    /// Backfill `symbols`; a missing data directory only warns, since
    /// history is optional for one-shot commands.
    pub async fn hydrate(&self, symbols: Vec<String>) -> Vec<String> {
        let source = match self.data_source(None) {
            Ok(source) => source,
            Err(e) => {
                warn!(error = %e, "history unavailable");
                return Vec::new();
            }
        };
        let fetch = &self.config.fetch;
        service::backfill(&self.storage, &source, symbols, fetch.workers, fetch.history_days).await
    }

    pub fn close(&self) -> Result<()> {
        self.storage.close().context("failed to close storage")
    }
}

/// Symbols are tracked upper-case.
pub(crate) fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" tsla "), "TSLA");
        assert_eq!(normalize_symbol("BRK.B"), "BRK.B");
    }
}
