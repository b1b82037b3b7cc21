//! Indicator recompute pipeline and edge-triggered signal evaluation.

use std::fmt;
use std::sync::Arc;

use ticker_core::error::IndicatorError;
use ticker_core::traits::{Indicator, SignalPolicy};
use ticker_core::types::Signal;
use ticker_indicators::{align, Adx, BollingerBands, Macd, Mfi, Rsi, Sma, Stochastic};
use ticker_strategies::BandTrendPolicy;

use crate::config::SeriesConfig;
use crate::series::{latest, IndicatorSet, RawSeries};

/// Shared by every ticker in a store: series parameters, the configured
/// indicator instances and the signal policy.
pub struct SignalEngine {
    config: SeriesConfig,
    policy: Arc<dyn SignalPolicy>,
    sma: Sma,
    rsi: Rsi,
    macd: Macd,
    bbands: BollingerBands,
    stoch: Stochastic,
    mfi: Mfi,
    adx: Adx,
}

impl SignalEngine {
    /// Build an engine, rejecting parameters the indicators cannot use.
    pub fn new(config: SeriesConfig, policy: Arc<dyn SignalPolicy>) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self::build(config, policy))
    }

    fn build(config: SeriesConfig, policy: Arc<dyn SignalPolicy>) -> Self {
        let p = &config.indicators;
        Self {
            sma: Sma::new(p.sma_period),
            rsi: Rsi::new(p.rsi_period),
            macd: Macd::with_periods(p.macd_fast, p.macd_slow, p.macd_signal),
            bbands: BollingerBands::with_params(p.bb_period, p.bb_std_dev),
            stoch: Stochastic::with_periods(p.stoch_k_period, p.stoch_k_smoothing, p.stoch_d_period),
            mfi: Mfi::new(p.mfi_period),
            adx: Adx::new(p.adx_period),
            config,
            policy,
        }
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn SignalPolicy {
        self.policy.as_ref()
    }

    /// Recompute every indicator over the full window.
    pub fn compute(&self, raw: &RawSeries) -> IndicatorSet {
        let n = raw.len();
        let close = &raw.close;

        let macd = self.macd.calculate(close);
        let bbands = self.bbands.calculate(close);
        let stoch = self.stoch.calculate_ohlc(&raw.high, &raw.low, close);

        IndicatorSet {
            sma: align(self.sma.calculate(close), n),
            rsi: align(self.rsi.calculate(close), n),
            macd: align(macd.iter().map(|m| m.macd), n),
            macd_signal: align(macd.iter().map(|m| m.signal), n),
            macd_hist: align(macd.iter().map(|m| m.histogram), n),
            bb_upper: align(bbands.iter().map(|b| b.upper), n),
            bb_mid: align(bbands.iter().map(|b| b.middle), n),
            bb_lower: align(bbands.iter().map(|b| b.lower), n),
            stoch_k: align(stoch.iter().map(|s| s.k), n),
            stoch_d: align(stoch.iter().map(|s| s.d), n),
            mfi: align(self.mfi.calculate_hlcv(&raw.high, &raw.low, close, &raw.volume), n),
            adx: align(self.adx.calculate_ohlc(&raw.high, &raw.low, close), n),
        }
    }

    /// Refresh `derived` from `raw` and classify the latest bar.
    ///
    /// Returns the classification only when it is actionable and differs
    /// from the resting signal; `Hold` otherwise. During warm-up the
    /// derived arrays are left untouched. When any band, stochastic or
    /// close value of the latest bar is still `0.0` the resting signal is
    /// left untouched too.
    pub fn evaluate(&self, raw: &RawSeries, derived: &mut IndicatorSet, resting: &mut Signal) -> Signal {
        if raw.len() < self.config.min_samples {
            return Signal::Hold;
        }

        *derived = self.compute(raw);

        let guarded = [
            latest(&derived.bb_upper),
            latest(&derived.bb_lower),
            latest(&raw.close),
            latest(&derived.stoch_d),
            latest(&derived.stoch_k),
        ];
        if guarded.iter().any(|&v| v == 0.0) {
            return Signal::Hold;
        }

        let classified = self.policy.classify(&derived.frame(&raw.close));
        let previous = std::mem::replace(resting, classified);

        if classified.is_hold() || classified == previous {
            Signal::Hold
        } else {
            classified
        }
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::build(SeriesConfig::default(), Arc::new(BandTrendPolicy::default()))
    }
}

impl fmt::Debug for SignalEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalEngine")
            .field("config", &self.config)
            .field("policy", &self.policy.name())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn raw_from(candles: &[ticker_core::types::Candle]) -> RawSeries {
        let mut raw = RawSeries::default();
        for c in candles {
            raw.upsert(c);
        }
        raw
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SeriesConfig::default();
        config.indicators.sma_period = 0;
        assert!(SignalEngine::new(config, Arc::new(ThresholdPolicy)).is_err());
    }

    #[test]
    fn test_compute_aligns_every_array() {
        let raw = raw_from(&history(60));
        let set = engine().compute(&raw);

        for series in [
            &set.sma, &set.rsi, &set.macd, &set.macd_signal, &set.macd_hist, &set.bb_upper,
            &set.bb_mid, &set.bb_lower, &set.stoch_k, &set.stoch_d, &set.mfi, &set.adx,
        ] {
            assert_eq!(series.len(), 60);
        }
        // SMA(14) warms up at index 13, MACD(12,26,9) at index 33.
        assert_eq!(set.sma[12], 0.0);
        assert!(set.sma[13] > 0.0);
        assert_eq!(set.macd[32], 0.0);
        assert!(set.macd[33] != 0.0);
    }

    #[test]
    fn test_warmup_leaves_state_untouched() {
        let engine = engine();
        let raw = raw_from(&history(29));
        let mut derived = IndicatorSet::default();
        let mut resting = Signal::Sell;

        assert_eq!(engine.evaluate(&raw, &mut derived, &mut resting), Signal::Hold);
        assert!(derived.is_empty());
        assert_eq!(resting, Signal::Sell);
    }

    #[test]
    fn test_guard_on_flat_range() {
        let engine = engine();
        let candles: Vec<_> = (0..40)
            .map(|d| ticker_core::types::Candle::at_unix(d * 86_400, 250.0, 250.0, 250.0, 250.0, 1.0))
            .collect();
        let raw = raw_from(&candles);
        let mut derived = IndicatorSet::default();
        let mut resting = Signal::Hold;

        // Close 250 would classify as Buy, but the flat range zeroes %K.
        assert_eq!(engine.evaluate(&raw, &mut derived, &mut resting), Signal::Hold);
        assert_eq!(resting, Signal::Hold);
        assert_eq!(derived.bb_upper.len(), 40);
    }

    #[test]
    fn test_edge_trigger() {
        let engine = engine();
        let mut candles = history(40);
        let mut derived = IndicatorSet::default();
        let mut resting = Signal::Hold;

        candles.push(bar(40, 250.0));
        let raw = raw_from(&candles);
        assert_eq!(engine.evaluate(&raw, &mut derived, &mut resting), Signal::Buy);
        assert_eq!(resting, Signal::Buy);

        // Same classification again is suppressed.
        assert_eq!(engine.evaluate(&raw, &mut derived, &mut resting), Signal::Hold);
        assert_eq!(resting, Signal::Buy);
    }

    #[test]
    fn test_default_engine() {
        let engine = SignalEngine::default();
        assert_eq!(engine.config().keep, 250);
        assert_eq!(engine.policy().name(), "Band Trend");
    }
}
