//! Signal policy trait definitions.

use crate::error::PolicyError;
use crate::types::{IndicatorFrame, Signal};

/// Configuration trait for signal policies.
pub trait PolicyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), PolicyError>;
}

/// Decision rule that turns the latest indicator state into a signal.
///
/// Policies are stateless: edge triggering against the previously emitted
/// signal is the caller's job. A policy only answers "what does the latest
/// bar look like right now".
pub trait SignalPolicy: Send + Sync {
    /// Get the unique name of this policy.
    fn name(&self) -> &str;

    /// Classify the latest index of `frame` as buy, sell or hold.
    ///
    /// Called only after the frame has passed the warm-up and sentinel
    /// checks, so the latest close, band and stochastic values are non-zero.
    fn classify(&self, frame: &IndicatorFrame<'_>) -> Signal;

    /// Get a description of the policy.
    fn description(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AboveSma;

    impl SignalPolicy for AboveSma {
        fn name(&self) -> &str {
            "above_sma"
        }

        fn classify(&self, frame: &IndicatorFrame<'_>) -> Signal {
            match (frame.close.last(), frame.sma.last()) {
                (Some(close), Some(sma)) if close > sma => Signal::Buy,
                _ => Signal::Hold,
            }
        }
    }

    #[test]
    fn test_policy_object_safe() {
        let close = [1.0, 3.0];
        let sma = [1.0, 2.0];
        let empty: [f64; 2] = [0.0; 2];
        let frame = IndicatorFrame {
            close: &close,
            sma: &sma,
            rsi: &empty,
            macd: &empty,
            macd_signal: &empty,
            macd_hist: &empty,
            bb_upper: &empty,
            bb_mid: &empty,
            bb_lower: &empty,
            stoch_k: &empty,
            stoch_d: &empty,
            mfi: &empty,
            adx: &empty,
        };

        let policy: Box<dyn SignalPolicy> = Box::new(AboveSma);
        assert_eq!(policy.classify(&frame), Signal::Buy);
        assert_eq!(policy.description(), "");
    }
}
