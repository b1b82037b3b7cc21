//! Volatility bands.

use crate::moving_average::Sma;
use crate::simd::std_dev_simd;
use serde::{Deserialize, Serialize};
use ticker_core::traits::Indicator;

/// One Bollinger sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerOutput {
    pub upper: f64,
    /// SMA of the window
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands: an SMA with bands `width` population standard
/// deviations above and below it.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    middle: Sma,
    width: f64,
}

impl BollingerBands {
    /// Bollinger(20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    pub fn with_params(period: usize, width: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(width > 0.0, "Band width must be positive");
        Self {
            middle: Sma::new(period),
            width,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        let means = self.middle.calculate(data);
        let deviations = std_dev_simd(data, self.middle.min_len());

        means
            .into_iter()
            .zip(deviations)
            .map(|(middle, sd)| BollingerOutput {
                upper: middle + self.width * sd,
                middle,
                lower: middle - self.width * sd,
            })
            .collect()
    }

    fn min_len(&self) -> usize {
        self.middle.min_len()
    }

    fn name(&self) -> &str {
        "BBANDS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_straddle_mean() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        let result = bb.calculate(&data);
        assert_eq!(result.len(), 11);
        for out in &result {
            assert!(out.upper > out.middle && out.middle > out.lower);
            assert!(((out.upper - out.middle) - (out.middle - out.lower)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_band_width_known_window() {
        // mean 5, population std dev 2
        let bb = BollingerBands::with_params(8, 1.5);
        let result = bb.calculate(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        assert_eq!(result.len(), 1);
        assert!((result[0].middle - 5.0).abs() < 1e-10);
        assert!((result[0].upper - 8.0).abs() < 1e-10);
        assert!((result[0].lower - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_constant_price_collapses() {
        let result = BollingerBands::with_params(5, 2.0).calculate(&[100.0; 5]);

        assert_eq!(result.len(), 1);
        assert!((result[0].upper - 100.0).abs() < 1e-10);
        assert!((result[0].lower - 100.0).abs() < 1e-10);
    }
}
