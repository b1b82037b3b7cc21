//! Series retention and indicator parameters.

use serde::{Deserialize, Serialize};
use ticker_core::error::IndicatorError;

/// Retention window and warm-up floor for every ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Maximum number of candles retained per symbol (oldest evicted first)
    pub keep: usize,
    /// Fewer closes than this skips recomputation entirely
    pub min_samples: usize,
    /// Indicator periods
    pub indicators: IndicatorParams,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            keep: 250,
            min_samples: 30,
            indicators: IndicatorParams::default(),
        }
    }
}

impl SeriesConfig {
    /// Validate retention and indicator parameters.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.min_samples < 2 {
            return Err(IndicatorError::InvalidParameter(
                "min_samples must be at least 2".into(),
            ));
        }
        if self.keep < self.min_samples {
            return Err(IndicatorError::InvalidParameter(format!(
                "keep ({}) must not be smaller than min_samples ({})",
                self.keep, self.min_samples
            )));
        }
        self.indicators.validate()
    }
}

/// Indicator periods used by the recompute pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub stoch_k_period: usize,
    pub stoch_k_smoothing: usize,
    pub stoch_d_period: usize,
    pub mfi_period: usize,
    pub adx_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: 14,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
            stoch_k_period: 14,
            stoch_k_smoothing: 3,
            stoch_d_period: 3,
            mfi_period: 14,
            adx_period: 14,
        }
    }
}

impl IndicatorParams {
    /// Validate periods; the indicator constructors panic on these.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let periods = [
            ("sma_period", self.sma_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_signal", self.macd_signal),
            ("stoch_k_period", self.stoch_k_period),
            ("stoch_k_smoothing", self.stoch_k_smoothing),
            ("stoch_d_period", self.stoch_d_period),
            ("mfi_period", self.mfi_period),
            ("adx_period", self.adx_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(IndicatorError::InvalidParameter(format!(
                "{name} must be greater than 0"
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(
                "macd_fast must be less than macd_slow".into(),
            ));
        }
        if self.bb_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "bb_period must be at least 2".into(),
            ));
        }
        if self.bb_std_dev.is_nan() || self.bb_std_dev <= 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "bb_std_dev must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SeriesConfig::default().validate().is_ok());
    }

    #[test]
    fn test_keep_below_warmup_rejected() {
        let config = SeriesConfig {
            keep: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_periods_rejected() {
        let mut params = IndicatorParams::default();
        params.macd_fast = 30;
        assert!(params.validate().is_err());

        let mut params = IndicatorParams::default();
        params.adx_period = 0;
        assert!(params.validate().is_err());

        let mut params = IndicatorParams::default();
        params.bb_std_dev = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize() {
        let config: SeriesConfig = serde_json::from_str(r#"{"keep": 500}"#).unwrap();
        assert_eq!(config.keep, 500);
        assert_eq!(config.min_samples, 30);
        assert_eq!(config.indicators.rsi_period, 14);
    }
}
