//! Stochastic crossover policy.
//!
//! Sells when %D crosses above %K, buys when %D crosses below %K with both
//! lines in the oversold zone.

use serde::{Deserialize, Serialize};
use ticker_core::{
    error::PolicyError,
    traits::{PolicyConfig, SignalPolicy},
    types::{IndicatorFrame, Signal},
};

/// Configuration for the stochastic crossover policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StochCrossConfig {
    /// %K and %D must both be below this for a buy
    pub oversold: f64,
}

impl Default for StochCrossConfig {
    fn default() -> Self {
        Self { oversold: 20.0 }
    }
}

impl PolicyConfig for StochCrossConfig {
    fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..=100.0).contains(&self.oversold) {
            return Err(PolicyError::InvalidConfig(
                "Oversold level must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// Stochastic %K/%D crossover policy.
#[derive(Debug, Clone)]
pub struct StochCrossPolicy {
    config: StochCrossConfig,
}

impl StochCrossPolicy {
    /// Create a new stochastic crossover policy.
    pub fn new(config: StochCrossConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StochCrossConfig {
        &self.config
    }

    fn decide(&self, frame: &IndicatorFrame<'_>) -> Option<Signal> {
        let k = IndicatorFrame::value(frame.stoch_k, 0)?;
        let d = IndicatorFrame::value(frame.stoch_d, 0)?;
        let prev_k = IndicatorFrame::value(frame.stoch_k, 1)?;
        let prev_d = IndicatorFrame::value(frame.stoch_d, 1)?;

        let signal = if prev_d < prev_k && d > k {
            Signal::Sell
        } else if k < self.config.oversold
            && d < self.config.oversold
            && prev_d > prev_k
            && d < k
        {
            Signal::Buy
        } else {
            Signal::Hold
        };
        Some(signal)
    }
}

impl Default for StochCrossPolicy {
    fn default() -> Self {
        Self::new(StochCrossConfig::default())
    }
}

impl SignalPolicy for StochCrossPolicy {
    fn name(&self) -> &str {
        "Stochastic Crossover"
    }

    fn description(&self) -> &str {
        "Stochastic %K/%D crossovers, buying only out of the oversold zone"
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
        assert!(StochCrossConfig::default().validate().is_ok());
        assert!(StochCrossConfig { oversold: -1.0 }.validate().is_err());
    }

    #[test]
    fn test_bearish_cross_sells() {
        let mut data = FrameData::new(2);
        data.stoch_k = vec![70.0, 60.0];
        data.stoch_d = vec![65.0, 66.0];

        assert_eq!(StochCrossPolicy::default().classify(&data.frame()), Signal::Sell);
    }

    #[test]
    fn test_bullish_cross_in_oversold_zone_buys() {
        let mut data = FrameData::new(2);
        data.stoch_k = vec![10.0, 16.0];
        data.stoch_d = vec![14.0, 13.0];

        assert_eq!(StochCrossPolicy::default().classify(&data.frame()), Signal::Buy);
    }

    #[test]
    fn test_bullish_cross_outside_oversold_zone_holds() {
        let mut data = FrameData::new(2);
        data.stoch_k = vec![40.0, 50.0];
        data.stoch_d = vec![45.0, 44.0];

        assert_eq!(StochCrossPolicy::default().classify(&data.frame()), Signal::Hold);
    }

    #[test]
    fn test_single_bar_holds() {
        let data = FrameData::new(1);
        assert_eq!(StochCrossPolicy::default().classify(&data.frame()), Signal::Hold);
    }
}
