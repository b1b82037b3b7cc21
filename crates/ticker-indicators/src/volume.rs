//! Volume-weighted indicators.

use crate::simd::sum_simd;

/// Money Flow Index (MFI).
///
/// Volume-weighted RSI over the typical price (HLC average):
/// `MFI = 100 * positive_flow / (positive_flow + negative_flow)`.
/// A window without any money flow reads as a neutral 50.
#[derive(Debug, Clone)]
pub struct Mfi {
    period: usize,
}

impl Mfi {
    /// Create a new MFI indicator (common period is 14).
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Minimum number of bars before the first output.
    pub fn min_len(&self) -> usize {
        self.period + 1
    }

    /// Calculate MFI from HLCV data.
    pub fn calculate_hlcv(&self, high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Vec<f64> {
        let len = high
            .len()
            .min(low.len())
            .min(close.len())
            .min(volume.len());
        if len < self.min_len() {
            return vec![];
        }

        let typical: Vec<f64> = (0..len)
            .map(|i| (high[i] + low[i] + close[i]) / 3.0)
            .collect();

        let mut positive = Vec::with_capacity(len - 1);
        let mut negative = Vec::with_capacity(len - 1);
        for i in 1..len {
            let flow = typical[i] * volume[i];
            if typical[i] > typical[i - 1] {
                positive.push(flow);
                negative.push(0.0);
            } else if typical[i] < typical[i - 1] {
                positive.push(0.0);
                negative.push(flow);
            } else {
                positive.push(0.0);
                negative.push(0.0);
            }
        }

        positive
            .windows(self.period)
            .zip(negative.windows(self.period))
            .map(|(pos, neg)| {
                let pos = sum_simd(pos);
                let total = pos + sum_simd(neg);
                if total == 0.0 {
                    50.0
                } else {
                    100.0 * pos / total
                }
            })
            .collect()
    }
}

impl Default for Mfi {
    fn default() -> Self {
        Self::new(14)
    }
}
