//! Registry of tracked tickers with JSON persistence of the symbol set.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use ticker_core::error::StoreError;
use ticker_core::types::{Candle, Signal};
use tracing::{debug, info};

use crate::engine::SignalEngine;
use crate::lock;
use crate::persist;
use crate::projection::{ChartData, MemoryStats, TickerRow};
use crate::ticker::Ticker;

/// Storage lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unopened,
    Open,
    Closed,
}

#[derive(Debug)]
struct Registry {
    tickers: HashMap<String, Ticker>,
    file: Option<File>,
    path: Option<PathBuf>,
    lifecycle: Lifecycle,
}

impl Registry {
    fn save(&mut self) -> Result<(), StoreError> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        persist::save(
            file,
            self.tickers.values().map(|t| (t.symbol(), t.buy_price())),
        )
    }
}

/// Thread-safe registry of [`Ticker`]s.
///
/// Adding, removing, opening and closing take the registry lock
/// exclusively. Inserts and reads take it shared and then lock only the
/// ticker they touch, so different symbols never block each other.
///
/// Without [`Storage::open`] the registry works in memory only.
#[derive(Debug)]
pub struct Storage {
    engine: Arc<SignalEngine>,
    registry: RwLock<Registry>,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(SignalEngine::default())
    }
}

impl Storage {
    pub fn new(engine: SignalEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            registry: RwLock::new(Registry {
                tickers: HashMap::new(),
                file: None,
                path: None,
                lifecycle: Lifecycle::Unopened,
            }),
        }
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    pub fn lifecycle(&self) -> Lifecycle {
        lock::read(&self.registry).lifecycle
    }

    /// Path of the persistence file, once opened.
    pub fn path(&self) -> Option<PathBuf> {
        lock::read(&self.registry).path.clone()
    }

    /// Open (creating if needed) the persistence file and load the symbol
    /// set. Loaded tickers start with empty history.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let loaded = persist::load(&mut file)?;

        let mut registry = lock::write(&self.registry);
        registry.tickers = loaded
            .into_iter()
            .map(|(symbol, buy_price)| {
                let ticker = Ticker::new(symbol.clone(), buy_price, Arc::clone(&self.engine));
                (symbol, ticker)
            })
            .collect();
        registry.file = Some(file);
        registry.path = Some(path.to_path_buf());
        registry.lifecycle = Lifecycle::Open;

        info!(path = %path.display(), symbols = registry.tickers.len(), "storage opened");
        Ok(())
    }

    /// Sync and release the persistence file. Calling it again is a no-op.
    pub fn close(&self) -> Result<(), StoreError> {
        let mut registry = lock::write(&self.registry);
        if let Some(file) = registry.file.take() {
            file.sync_all()?;
            info!(symbols = registry.tickers.len(), "storage closed");
        }
        registry.lifecycle = Lifecycle::Closed;
        Ok(())
    }

    /// Track `symbol`, replacing any existing entry and its history.
    pub fn add_ticker(&self, symbol: &str, buy_price: f64) -> Result<(), StoreError> {
        let mut registry = lock::write(&self.registry);
        let ticker = Ticker::new(symbol, buy_price, Arc::clone(&self.engine));
        let replaced = registry.tickers.insert(symbol.to_string(), ticker).is_some();
        registry.save()?;

        info!(symbol, buy_price, replaced, "ticker added");
        Ok(())
    }

    /// Stop tracking `symbol`. Unknown symbols are not an error.
    pub fn del_ticker(&self, symbol: &str) -> Result<(), StoreError> {
        let mut registry = lock::write(&self.registry);
        let removed = registry.tickers.remove(symbol).is_some();
        registry.save()?;

        info!(symbol, removed, "ticker removed");
        Ok(())
    }

    /// Insert candles into a tracked symbol and return its edge-triggered
    /// signal.
    pub fn insert_candles(&self, symbol: &str, candles: &[Candle]) -> Result<Signal, StoreError> {
        let registry = lock::read(&self.registry);
        let ticker = registry
            .tickers
            .get(symbol)
            .ok_or_else(|| StoreError::SymbolNotTracked(symbol.to_string()))?;
        Ok(ticker.insert(candles))
    }

    fn with_ticker<T>(&self, symbol: &str, missing: T, f: impl FnOnce(&Ticker) -> T) -> T {
        let registry = lock::read(&self.registry);
        match registry.tickers.get(symbol) {
            Some(ticker) => f(ticker),
            None => {
                debug!(symbol, "lookup of untracked symbol");
                missing
            }
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        lock::read(&self.registry).tickers.contains_key(symbol)
    }

    pub fn get_close(&self, symbol: &str) -> f64 {
        self.with_ticker(symbol, f64::NAN, Ticker::close)
    }

    pub fn get_signal(&self, symbol: &str) -> Signal {
        self.with_ticker(symbol, Signal::Hold, Ticker::signal)
    }

    pub fn get_change(&self, symbol: &str) -> f64 {
        self.with_ticker(symbol, f64::NAN, Ticker::change)
    }

    /// `(upper, middle, lower)`.
    pub fn get_bb(&self, symbol: &str) -> (f64, f64, f64) {
        self.with_ticker(symbol, (f64::NAN, f64::NAN, f64::NAN), Ticker::bands)
    }

    /// `(k, d)`.
    pub fn get_stoch(&self, symbol: &str) -> (f64, f64) {
        self.with_ticker(symbol, (f64::NAN, f64::NAN), Ticker::stoch)
    }

    pub fn get_mfi(&self, symbol: &str) -> f64 {
        self.with_ticker(symbol, f64::NAN, Ticker::mfi)
    }

    pub fn get_adx(&self, symbol: &str) -> f64 {
        self.with_ticker(symbol, f64::NAN, Ticker::adx)
    }

    pub fn get_sma(&self, symbol: &str) -> f64 {
        self.with_ticker(symbol, f64::NAN, Ticker::sma)
    }

    pub fn get_rsi(&self, symbol: &str) -> f64 {
        self.with_ticker(symbol, f64::NAN, Ticker::rsi)
    }

    pub fn get_buy_price(&self, symbol: &str) -> f64 {
        self.with_ticker(symbol, f64::NAN, Ticker::buy_price)
    }

    pub fn get_all_close(&self, symbol: &str) -> Vec<f64> {
        self.with_ticker(symbol, Vec::new(), Ticker::all_close)
    }

    pub fn get_all_timestamp(&self, symbol: &str) -> Vec<DateTime<Utc>> {
        self.with_ticker(symbol, Vec::new(), Ticker::all_timestamp)
    }

    /// Tracked symbols in ascending order.
    pub fn get_symbols(&self) -> Vec<String> {
        let registry = lock::read(&self.registry);
        let mut symbols: Vec<String> = registry.tickers.keys().cloned().collect();
        symbols.sort_unstable();
        symbols
    }

    /// One row per symbol with history, ordered by symbol.
    pub fn get_ticker_table(&self) -> Vec<TickerRow> {
        let registry = lock::read(&self.registry);
        let mut rows: Vec<TickerRow> = registry
            .tickers
            .values()
            .filter(|t| !t.is_empty())
            .map(Ticker::row)
            .collect();
        rows.sort_unstable_by(|a, b| a.symbol.cmp(&b.symbol));
        rows
    }

    pub fn get_chart_data(&self, symbol: &str) -> Option<ChartData> {
        self.with_ticker(symbol, None, |t| Some(t.chart_data()))
    }

    /// Totals over every tracked ticker.
    pub fn memory_stats(&self) -> MemoryStats {
        let registry = lock::read(&self.registry);
        registry
            .tickers
            .values()
            .fold(MemoryStats::default(), |mut stats, ticker| {
                stats.symbols += 1;
                stats.candles += ticker.len();
                stats.series_bytes += ticker.series_bytes();
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{bar, engine, history};

    fn storage() -> Storage {
        Storage::new(engine())
    }

    #[test]
    fn test_in_memory_without_open() {
        let s = storage();
        assert_eq!(s.lifecycle(), Lifecycle::Unopened);
        s.add_ticker("AAPL", 0.0).unwrap();
        assert_eq!(s.insert_candles("AAPL", &[bar(0, 10.0)]).unwrap(), Signal::Hold);
        assert_eq!(s.get_close("AAPL"), 10.0);
    }

    #[test]
    fn test_insert_untracked_symbol() {
        let s = storage();
        let err = s.insert_candles("NOPE", &[bar(0, 1.0)]).unwrap_err();
        assert!(matches!(err, StoreError::SymbolNotTracked(ref sym) if sym == "NOPE"));
    }

    #[test]
    fn test_unknown_symbol_sentinels() {
        let s = storage();
        assert!(s.get_close("X").is_nan());
        assert!(s.get_change("X").is_nan());
        assert!(s.get_buy_price("X").is_nan());
        assert!(s.get_bb("X").0.is_nan());
        assert!(s.get_stoch("X").1.is_nan());
        assert_eq!(s.get_signal("X"), Signal::Hold);
        assert!(s.get_all_close("X").is_empty());
        assert!(s.get_all_timestamp("X").is_empty());
        assert!(s.get_chart_data("X").is_none());
    }

    #[test]
    fn test_memory_stats_totals() {
        let s = storage();
        assert_eq!(s.memory_stats(), MemoryStats::default());

        s.add_ticker("AAPL", 0.0).unwrap();
        s.add_ticker("MSFT", 0.0).unwrap();
        s.add_ticker("GOOG", 0.0).unwrap();
        s.insert_candles("AAPL", &history(40)).unwrap();
        s.insert_candles("MSFT", &history(5)).unwrap();

        let stats = s.memory_stats();
        assert_eq!(stats.symbols, 3);
        assert_eq!(stats.candles, 45);

        // Only AAPL is past warm-up and carries twelve indicator arrays.
        let raw = 45 * (std::mem::size_of::<DateTime<Utc>>() + 5 * 8);
        assert_eq!(stats.series_bytes, raw + 12 * 40 * 8);
    }

    #[test]
    fn test_add_replaces_history() {
        let s = storage();
        s.add_ticker("AAPL", 1.0).unwrap();
        s.insert_candles("AAPL", &history(10)).unwrap();
        s.add_ticker("AAPL", 2.0).unwrap();
        assert!(s.get_all_close("AAPL").is_empty());
        assert_eq!(s.get_buy_price("AAPL"), 2.0);
    }

    #[test]
    fn test_symbols_sorted_and_table_filtered() {
        let s = storage();
        s.add_ticker("MSFT", 0.0).unwrap();
        s.add_ticker("AAPL", 0.0).unwrap();
        s.add_ticker("GOOG", 0.0).unwrap();
        s.insert_candles("MSFT", &[bar(0, 5.0)]).unwrap();
        s.insert_candles("AAPL", &[bar(0, 6.0)]).unwrap();

        assert_eq!(s.get_symbols(), vec!["AAPL", "GOOG", "MSFT"]);
        let table = s.get_ticker_table();
        let symbols: Vec<_> = table.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_close_idempotent() {
        let s = storage();
        s.close().unwrap();
        s.close().unwrap();
        assert_eq!(s.lifecycle(), Lifecycle::Closed);
    }
}
