//! Moving averages.
//!
//! All three seed with the arithmetic mean of the first `period` values and
//! emit one value per position from `period - 1` on.

use crate::simd::sum_simd;
use ticker_core::traits::Indicator;

/// Simple Moving Average (SMA).
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return Vec::new();
        }

        let n = self.period as f64;
        let seed = sum_simd(&data[..self.period]);
        let rolling = data[self.period..]
            .iter()
            .zip(data)
            .scan(seed, |sum, (incoming, outgoing)| {
                *sum += incoming - outgoing;
                Some(*sum / n)
            });

        std::iter::once(seed / n).chain(rolling).collect()
    }

    fn min_len(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Recursive average `next = prev + alpha * (value - prev)` seeded with
/// the mean of the first `period` values.
fn recursive_average(data: &[f64], period: usize, alpha: f64) -> Vec<f64> {
    if data.len() < period {
        return Vec::new();
    }

    let seed = sum_simd(&data[..period]) / period as f64;
    let rest = data[period..].iter().scan(seed, move |avg, value| {
        *avg += alpha * (value - *avg);
        Some(*avg)
    });

    std::iter::once(seed).chain(rest).collect()
}

/// Exponential Moving Average (EMA), `alpha = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        recursive_average(data, self.period, self.alpha())
    }

    fn min_len(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Wilder's running moving average, `alpha = 1 / period`.
///
/// The smoothing behind RSI and ADX.
#[derive(Debug, Clone)]
pub struct Rma {
    period: usize,
}

impl Rma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        recursive_average(data, self.period, 1.0 / self.period as f64)
    }

    fn min_len(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RMA"
    }
}
