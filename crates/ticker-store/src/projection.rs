//! Read-only projections handed to the CLI, dashboard and chart consumers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ticker_core::types::Signal;

use crate::series::{IndicatorSet, RawSeries};

/// One line of the ticker table.
///
/// `change` is NaN (serialized as `null`) when no buy price is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerRow {
    pub symbol: String,
    pub buy_price: f64,
    pub close: f64,
    pub change: f64,
    pub signal: Signal,
}

/// Footprint of everything the storage holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub symbols: usize,
    pub candles: usize,
    /// Element bytes of the candle windows and indicator arrays
    pub series_bytes: usize,
}

/// Full raw and derived series of one symbol, index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub symbol: String,
    pub buy_price: f64,
    pub timestamp: Vec<DateTime<Utc>>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    pub sma: Vec<f64>,
    pub rsi: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_hist: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_mid: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub stoch_k: Vec<f64>,
    pub stoch_d: Vec<f64>,
    pub mfi: Vec<f64>,
    pub adx: Vec<f64>,
}

impl ChartData {
    pub(crate) fn new(symbol: &str, buy_price: f64, raw: &RawSeries, derived: &IndicatorSet) -> Self {
        Self {
            symbol: symbol.to_string(),
            buy_price,
            timestamp: raw.timestamp.clone(),
            open: raw.open.clone(),
            high: raw.high.clone(),
            low: raw.low.clone(),
            close: raw.close.clone(),
            volume: raw.volume.clone(),
            sma: derived.sma.clone(),
            rsi: derived.rsi.clone(),
            macd: derived.macd.clone(),
            macd_signal: derived.macd_signal.clone(),
            macd_hist: derived.macd_hist.clone(),
            bb_upper: derived.bb_upper.clone(),
            bb_mid: derived.bb_mid.clone(),
            bb_lower: derived.bb_lower.clone(),
            stoch_k: derived.stoch_k.clone(),
            stoch_d: derived.stoch_d.clone(),
            mfi: derived.mfi.clone(),
            adx: derived.adx.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serializes_camel_case() {
        let row = TickerRow {
            symbol: "AAPL".into(),
            buy_price: 0.0,
            close: 10.5,
            change: f64::NAN,
            signal: Signal::Buy,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["buyPrice"], 0.0);
        assert_eq!(json["signal"], "buy");
        assert!(json["change"].is_null());
    }
}
