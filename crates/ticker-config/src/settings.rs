//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use ticker_core::error::{PolicyError, TickerError};
use ticker_core::traits::SignalPolicy;
use ticker_store::{SeriesConfig, SignalEngine};
use ticker_strategies::{PolicyRegistry, DEFAULT_POLICY};

/// Longest backfill window accepted, roughly a century of daily bars.
pub const MAX_HISTORY_DAYS: u32 = 36_500;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub series: SeriesConfig,
    #[serde(default)]
    pub policy: PolicySettings,
    #[serde(default)]
    pub fetch: FetchSettings,
}

impl AppConfig {
    /// Check ranges and that the configured policy can be built.
    pub fn validate(&self) -> Result<(), TickerError> {
        self.series.validate()?;
        self.build_policy()?;

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(TickerError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        if self.fetch.workers == 0 {
            return Err(TickerError::Config("fetch.workers must be greater than 0".into()));
        }
        if self.fetch.history_days == 0 {
            return Err(TickerError::Config(
                "fetch.history_days must be greater than 0".into(),
            ));
        }
        if self.fetch.history_days > MAX_HISTORY_DAYS {
            return Err(TickerError::Config(format!(
                "fetch.history_days must be at most {MAX_HISTORY_DAYS}, got {}",
                self.fetch.history_days
            )));
        }
        if self.storage.file_name.is_empty() {
            return Err(TickerError::Config("storage.file_name must not be empty".into()));
        }
        Ok(())
    }

    /// Build the configured signal policy.
    pub fn build_policy(&self) -> Result<Box<dyn SignalPolicy>, PolicyError> {
        let params = serde_json::to_value(&self.policy.params)
            .map_err(|e| PolicyError::InvalidConfig(e.to_string()))?;
        PolicyRegistry::new().create(&self.policy.name, params)
    }

    /// Build the signal engine shared by every ticker.
    pub fn build_engine(&self) -> Result<SignalEngine, TickerError> {
        let policy: Arc<dyn SignalPolicy> = Arc::from(self.build_policy()?);
        Ok(SignalEngine::new(self.series.clone(), policy)?)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, TickerError> {
        toml::to_string_pretty(self).map_err(|e| TickerError::Config(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "tickerwatch".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Directory for daily-rolling log files
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Where the tracked symbol set is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub dir: String,
    pub file_name: String,
}

impl StorageSettings {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.file_name)
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            file_name: "tickers.json".to_string(),
        }
    }
}

/// Signal policy selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Registry key, see `tickerwatch strategies`
    pub name: String,
    /// Policy-specific parameters; missing keys take their defaults
    pub params: toml::Table,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_POLICY.to_string(),
            params: toml::Table::new(),
        }
    }
}

/// History backfill and replay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Concurrent history fetches on start
    pub workers: usize,
    /// Days of history requested per symbol
    pub history_days: u32,
    /// Directory of per-symbol CSV files
    pub data_dir: String,
    /// Newest bars replayed per symbol by the stream
    pub replay_bars: usize,
    /// Pause between replay rounds
    pub replay_interval_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            workers: 10,
            history_days: 730,
            data_dir: "data".to_string(),
            replay_bars: 30,
            replay_interval_ms: 500,
        }
    }
}
