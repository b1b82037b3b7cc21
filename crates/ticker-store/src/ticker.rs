//! One tracked symbol.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use ticker_core::types::{Candle, Signal};
use tracing::debug;

use crate::engine::SignalEngine;
use crate::lock;
use crate::projection::{ChartData, TickerRow};
use crate::series::{latest, IndicatorSet, RawSeries};

#[derive(Debug, Default)]
struct State {
    raw: RawSeries,
    derived: IndicatorSet,
    signal: Signal,
}

/// A symbol's candle window, indicator arrays and resting signal.
///
/// All series state sits behind one lock, so readers never observe a
/// window whose indicators belong to a different insert.
#[derive(Debug)]
pub struct Ticker {
    symbol: String,
    buy_price: f64,
    engine: Arc<SignalEngine>,
    state: RwLock<State>,
}

impl Ticker {
    /// Create an empty ticker. A non-finite or negative buy price is
    /// stored as 0 (no reference price).
    pub fn new(symbol: impl Into<String>, buy_price: f64, engine: Arc<SignalEngine>) -> Self {
        let buy_price = if buy_price.is_finite() && buy_price > 0.0 {
            buy_price
        } else {
            0.0
        };
        Self {
            symbol: symbol.into(),
            buy_price,
            engine,
            state: RwLock::new(State::default()),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn buy_price(&self) -> f64 {
        self.buy_price
    }

    /// Upsert `candles`, trim to the retention window, recompute and
    /// evaluate. Returns an edge-triggered signal.
    pub fn insert(&self, candles: &[Candle]) -> Signal {
        let keep = self.engine.config().keep;
        let mut state = lock::write(&self.state);

        for candle in candles {
            state.raw.upsert(candle);
        }
        state.raw.retain_newest(keep);

        let State { raw, derived, signal } = &mut *state;
        let emitted = self.engine.evaluate(raw, derived, signal);

        debug!(
            symbol = %self.symbol,
            candles = candles.len(),
            window = raw.len(),
            resting = %signal,
            emitted = %emitted,
            "candles inserted"
        );
        emitted
    }

    pub fn len(&self) -> usize {
        lock::read(&self.state).raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes held by the candle window and its indicator arrays.
    pub fn series_bytes(&self) -> usize {
        let state = lock::read(&self.state);
        state.raw.series_bytes() + state.derived.series_bytes()
    }

    /// Latest close, NaN when there is no history.
    pub fn close(&self) -> f64 {
        latest(&lock::read(&self.state).raw.close)
    }

    /// Resting signal from the last evaluation.
    pub fn signal(&self) -> Signal {
        lock::read(&self.state).signal
    }

    /// Percent change of the latest close versus the buy price; NaN unless
    /// a buy price is set.
    pub fn change(&self) -> f64 {
        change(self.close(), self.buy_price)
    }

    /// Latest Bollinger bands as `(upper, middle, lower)`.
    ///
    /// Derived accessors return NaN until the first recompute.
    pub fn bands(&self) -> (f64, f64, f64) {
        let state = lock::read(&self.state);
        let d = &state.derived;
        (latest(&d.bb_upper), latest(&d.bb_mid), latest(&d.bb_lower))
    }

    /// Latest stochastic as `(k, d)`.
    pub fn stoch(&self) -> (f64, f64) {
        let state = lock::read(&self.state);
        (latest(&state.derived.stoch_k), latest(&state.derived.stoch_d))
    }

    pub fn mfi(&self) -> f64 {
        latest(&lock::read(&self.state).derived.mfi)
    }

    pub fn adx(&self) -> f64 {
        latest(&lock::read(&self.state).derived.adx)
    }

    pub fn sma(&self) -> f64 {
        latest(&lock::read(&self.state).derived.sma)
    }

    pub fn rsi(&self) -> f64 {
        latest(&lock::read(&self.state).derived.rsi)
    }

    /// Copy of the close series, oldest first.
    pub fn all_close(&self) -> Vec<f64> {
        lock::read(&self.state).raw.close.clone()
    }

    /// Copy of the timestamp series, oldest first.
    pub fn all_timestamp(&self) -> Vec<DateTime<Utc>> {
        lock::read(&self.state).raw.timestamp.clone()
    }

    /// Table row under one read lock.
    pub fn row(&self) -> TickerRow {
        let state = lock::read(&self.state);
        let close = latest(&state.raw.close);
        TickerRow {
            symbol: self.symbol.clone(),
            buy_price: self.buy_price,
            close,
            change: change(close, self.buy_price),
            signal: state.signal,
        }
    }

    /// Copy of every raw and derived array under one read lock.
    pub fn chart_data(&self) -> ChartData {
        let state = lock::read(&self.state);
        ChartData::new(&self.symbol, self.buy_price, &state.raw, &state.derived)
    }
}

fn change(close: f64, buy_price: f64) -> f64 {
    if buy_price > 0.0 {
        close / buy_price * 100.0 - 100.0
    } else {
        f64::NAN
    }
}
