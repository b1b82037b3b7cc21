//! Raw candle window and derived indicator arrays.

use chrono::{DateTime, Utc};
use ticker_core::types::{Candle, IndicatorFrame};

/// Parallel OHLCV arrays kept in strictly ascending timestamp order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    pub timestamp: Vec<DateTime<Utc>>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl RawSeries {
    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }

    /// Bytes held by the six arrays' elements.
    pub fn series_bytes(&self) -> usize {
        self.len() * (std::mem::size_of::<DateTime<Utc>>() + 5 * std::mem::size_of::<f64>())
    }

    /// Insert `candle` at its sorted position, or overwrite every field of
    /// the entry with the same Unix second.
    pub fn upsert(&mut self, candle: &Candle) {
        let key = candle.key();
        match self.timestamp.binary_search_by_key(&key, |t| t.timestamp()) {
            Ok(i) => {
                self.timestamp[i] = candle.timestamp;
                self.open[i] = candle.open;
                self.high[i] = candle.high;
                self.low[i] = candle.low;
                self.close[i] = candle.close;
                self.volume[i] = candle.volume;
            }
            Err(i) => {
                self.timestamp.insert(i, candle.timestamp);
                self.open.insert(i, candle.open);
                self.high.insert(i, candle.high);
                self.low.insert(i, candle.low);
                self.close.insert(i, candle.close);
                self.volume.insert(i, candle.volume);
            }
        }
    }

    /// Drop the oldest entries until at most `keep` remain.
    pub fn retain_newest(&mut self, keep: usize) {
        let excess = self.len().saturating_sub(keep);
        if excess == 0 {
            return;
        }
        self.timestamp.drain(..excess);
        self.open.drain(..excess);
        self.high.drain(..excess);
        self.low.drain(..excess);
        self.close.drain(..excess);
        self.volume.drain(..excess);
    }

    /// Candle at position `i`.
    pub fn candle(&self, i: usize) -> Option<Candle> {
        Some(Candle::new(
            *self.timestamp.get(i)?,
            self.open[i],
            self.high[i],
            self.low[i],
            self.close[i],
            self.volume[i],
        ))
    }
}

/// Indicator arrays, each index-aligned with the raw window they were
/// computed from. Positions before an indicator's warm-up hold `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
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

impl IndicatorSet {
    pub fn is_empty(&self) -> bool {
        self.sma.is_empty()
    }

    /// Bytes held by the indicator arrays' elements.
    pub fn series_bytes(&self) -> usize {
        let values = self.sma.len()
            + self.rsi.len()
            + self.macd.len()
            + self.macd_signal.len()
            + self.macd_hist.len()
            + self.bb_upper.len()
            + self.bb_mid.len()
            + self.bb_lower.len()
            + self.stoch_k.len()
            + self.stoch_d.len()
            + self.mfi.len()
            + self.adx.len();
        values * std::mem::size_of::<f64>()
    }

    /// Borrow the arrays together with the close series they belong to.
    pub fn frame<'a>(&'a self, close: &'a [f64]) -> IndicatorFrame<'a> {
        IndicatorFrame {
            close,
            sma: &self.sma,
            rsi: &self.rsi,
            macd: &self.macd,
            macd_signal: &self.macd_signal,
            macd_hist: &self.macd_hist,
            bb_upper: &self.bb_upper,
            bb_mid: &self.bb_mid,
            bb_lower: &self.bb_lower,
            stoch_k: &self.stoch_k,
            stoch_d: &self.stoch_d,
            mfi: &self.mfi,
            adx: &self.adx,
        }
    }
}

/// Latest value of a series, NaN while it is empty.
pub(crate) fn latest(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(f64::NAN)
}
