//! Band trend policy using Bollinger Bands, ADX and MFI.
//!
//! Buys when the close breaks below the lower band while money flow is
//! oversold, sells when it breaks above the upper band while money flow is
//! overbought. Both sides require the ADX to confirm a trending market.

use serde::{Deserialize, Serialize};
use ticker_core::{
    error::PolicyError,
    traits::{PolicyConfig, SignalPolicy},
    types::{IndicatorFrame, Signal},
};

/// Configuration for the band trend policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BandTrendConfig {
    /// Minimum ADX for any non-hold decision
    pub adx_threshold: f64,
    /// MFI at or below this is oversold
    pub mfi_oversold: f64,
    /// MFI at or above this is overbought
    pub mfi_overbought: f64,
}

impl Default for BandTrendConfig {
    fn default() -> Self {
        Self {
            adx_threshold: 20.0,
            mfi_oversold: 20.0,
            mfi_overbought: 80.0,
        }
    }
}

impl PolicyConfig for BandTrendConfig {
    fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..=100.0).contains(&self.adx_threshold) {
            return Err(PolicyError::InvalidConfig(
                "ADX threshold must be between 0 and 100".into(),
            ));
        }
        if self.mfi_oversold < 0.0 || self.mfi_overbought > 100.0 {
            return Err(PolicyError::InvalidConfig(
                "MFI thresholds must be between 0 and 100".into(),
            ));
        }
        if self.mfi_overbought <= self.mfi_oversold {
            return Err(PolicyError::InvalidConfig(
                "MFI overbought must be greater than oversold".into(),
            ));
        }
        Ok(())
    }
}

/// Bollinger / ADX / MFI threshold policy.
#[derive(Debug, Clone)]
pub struct BandTrendPolicy {
    config: BandTrendConfig,
}

impl BandTrendPolicy {
    /// Create a new band trend policy.
    pub fn new(config: BandTrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BandTrendConfig {
        &self.config
    }

    fn decide(&self, frame: &IndicatorFrame<'_>) -> Option<Signal> {
        let close = IndicatorFrame::value(frame.close, 0)?;
        let upper = IndicatorFrame::value(frame.bb_upper, 0)?;
        let lower = IndicatorFrame::value(frame.bb_lower, 0)?;
        let mfi = IndicatorFrame::value(frame.mfi, 0)?;
        let adx = IndicatorFrame::value(frame.adx, 0)?;

        if adx < self.config.adx_threshold {
            return Some(Signal::Hold);
        }

        let signal = if close < lower && mfi <= self.config.mfi_oversold {
            Signal::Buy
        } else if close > upper && mfi >= self.config.mfi_overbought {
            Signal::Sell
        } else {
            Signal::Hold
        };
        Some(signal)
    }
}

impl Default for BandTrendPolicy {
    fn default() -> Self {
        Self::new(BandTrendConfig::default())
    }
}

impl SignalPolicy for BandTrendPolicy {
    fn name(&self) -> &str {
        "Band Trend"
    }

    fn description(&self) -> &str {
        "Bollinger band breaks confirmed by ADX trend strength and MFI extremes"
    }

    fn classify(&self, frame: &IndicatorFrame<'_>) -> Signal {
        self.decide(frame).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FrameData;

    #[test]
    fn test_config_validation() {
        let mut config = BandTrendConfig::default();
        assert!(config.validate().is_ok());

        config.mfi_overbought = 10.0;
        assert!(config.validate().is_err());

        let config = BandTrendConfig {
            adx_threshold: 120.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_buy_below_lower_band_when_oversold() {
        let mut data = FrameData::new(3);
        data.close[2] = 85.0;
        data.mfi[2] = 15.0;

        let policy = BandTrendPolicy::default();
        assert_eq!(policy.classify(&data.frame()), Signal::Buy);
    }

    #[test]
    fn test_sell_above_upper_band_when_overbought() {
        let mut data = FrameData::new(3);
        data.close[2] = 115.0;
        data.mfi[2] = 85.0;

        let policy = BandTrendPolicy::default();
        assert_eq!(policy.classify(&data.frame()), Signal::Sell);
    }

    #[test]
    fn test_weak_trend_holds() {
        let mut data = FrameData::new(3);
        data.close[2] = 85.0;
        data.mfi[2] = 15.0;
        data.adx[2] = 12.0;

        let policy = BandTrendPolicy::default();
        assert_eq!(policy.classify(&data.frame()), Signal::Hold);
    }

    #[test]
    fn test_band_break_without_mfi_confirmation_holds() {
        let mut data = FrameData::new(3);
        data.close[2] = 85.0;
        data.mfi[2] = 45.0;

        let policy = BandTrendPolicy::default();
        assert_eq!(policy.classify(&data.frame()), Signal::Hold);
    }

    #[test]
    fn test_empty_frame_holds() {
        let data = FrameData::new(0);
        assert_eq!(BandTrendPolicy::default().classify(&data.frame()), Signal::Hold);
    }
}
