//! Momentum indicators.

use crate::align::zip_newest;
use crate::moving_average::{Ema, Rma, Sma};
use crate::simd::minmax_simd;
use serde::{Deserialize, Serialize};
use ticker_core::traits::Indicator;

/// Relative Strength Index (RSI), Wilder-smoothed.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    smoothing: Rma,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            smoothing: Rma::new(period),
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.min_len() {
            return Vec::new();
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let avg_gain = self.smoothing.calculate(&gains);
        let avg_loss = self.smoothing.calculate(&losses);

        zip_newest(&avg_gain, &avg_loss)
            .map(|(gain, loss)| {
                if gain + loss == 0.0 {
                    50.0
                } else {
                    100.0 * gain / (gain + loss)
                }
            })
            .collect()
    }

    fn min_len(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// One MACD sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA
    pub macd: f64,
    /// EMA of the MACD line
    pub signal: f64,
    pub histogram: f64,
}

/// Moving Average Convergence Divergence.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// MACD(12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let line: Vec<f64> = zip_newest(&self.fast.calculate(data), &self.slow.calculate(data))
            .map(|(fast, slow)| fast - slow)
            .collect();
        let signal = self.signal.calculate(&line);

        zip_newest(&line, &signal)
            .map(|(macd, signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn min_len(&self) -> usize {
        self.slow.min_len() + self.signal.min_len() - 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// One stochastic sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// Smoothed %K
    pub k: f64,
    /// SMA of the smoothed %K
    pub d: f64,
}

/// Slow stochastic oscillator.
///
/// Raw %K places the close inside the `k_period` high/low range and is
/// smoothed by an SMA of `k_smoothing`; %D is an SMA of smoothed %K over
/// `d_period`. A window with no range gives a raw %K of 0.
#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    k_smoothing: Sma,
    d_smoothing: Sma,
}

impl Stochastic {
    /// Stochastic(14, 3, 3).
    pub fn new() -> Self {
        Self::with_periods(14, 3, 3)
    }

    pub fn with_periods(k_period: usize, k_smoothing: usize, d_period: usize) -> Self {
        assert!(k_period > 0, "Period must be greater than 0");
        Self {
            k_period,
            k_smoothing: Sma::new(k_smoothing),
            d_smoothing: Sma::new(d_period),
        }
    }

    /// Bars needed before the first output.
    pub fn min_len(&self) -> usize {
        self.k_period + self.k_smoothing.min_len() + self.d_smoothing.min_len() - 2
    }

    fn raw_k(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        high.windows(self.k_period)
            .zip(low.windows(self.k_period))
            .zip(&close[self.k_period - 1..])
            .map(|((highs, lows), &close)| {
                let highest = minmax_simd(highs).map_or(0.0, |(_, max)| max);
                let lowest = minmax_simd(lows).map_or(0.0, |(min, _)| min);
                match highest - lowest {
                    range if range == 0.0 => 0.0,
                    range => (close - lowest) / range * 100.0,
                }
            })
            .collect()
    }

    pub fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<StochasticOutput> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.min_len() {
            return Vec::new();
        }

        let raw = self.raw_k(&high[..len], &low[..len], &close[..len]);
        let k = self.k_smoothing.calculate(&raw);
        let d = self.d_smoothing.calculate(&k);

        zip_newest(&k, &d)
            .map(|(k, d)| StochasticOutput { k, d })
            .collect()
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}
