//! Frame fixtures shared by the policy tests.

use ticker_core::types::IndicatorFrame;

/// Owned backing arrays for an [`IndicatorFrame`].
#[derive(Default)]
pub struct FrameData {
    pub close: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_mid: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub stoch_k: Vec<f64>,
    pub stoch_d: Vec<f64>,
    pub mfi: Vec<f64>,
    pub adx: Vec<f64>,
    zeros: Vec<f64>,
}

impl FrameData {
    pub fn new(len: usize) -> Self {
        Self {
            close: vec![100.0; len],
            bb_upper: vec![110.0; len],
            bb_mid: vec![100.0; len],
            bb_lower: vec![90.0; len],
            stoch_k: vec![50.0; len],
            stoch_d: vec![50.0; len],
            mfi: vec![50.0; len],
            adx: vec![30.0; len],
            zeros: vec![0.0; len],
        }
    }

    pub fn frame(&self) -> IndicatorFrame<'_> {
        IndicatorFrame {
            close: &self.close,
            sma: &self.zeros,
            rsi: &self.zeros,
            macd: &self.zeros,
            macd_signal: &self.zeros,
            macd_hist: &self.zeros,
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
