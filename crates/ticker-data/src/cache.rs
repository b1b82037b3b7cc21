//! Parsed candle cache.

use std::collections::HashMap;
use std::sync::Arc;

use ticker_core::types::Candle;

/// In-memory cache of parsed candle files, keyed by upper-cased symbol.
#[derive(Debug, Default)]
pub struct CandleCache {
    cache: HashMap<String, Arc<Vec<Candle>>>,
}

impl CandleCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(symbol: &str) -> String {
        symbol.to_ascii_uppercase()
    }

    pub fn get(&self, symbol: &str) -> Option<Arc<Vec<Candle>>> {
        self.cache.get(&Self::key(symbol)).cloned()
    }

    pub fn put(&mut self, symbol: &str, candles: Vec<Candle>) -> Arc<Vec<Candle>> {
        let candles = Arc::new(candles);
        self.cache.insert(Self::key(symbol), Arc::clone(&candles));
        candles
    }
}
