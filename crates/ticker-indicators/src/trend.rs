//! Trend strength.

use crate::moving_average::Rma;
use ticker_core::traits::Indicator;

/// Average Directional Index.
///
/// Directional movement and true range are Wilder-smoothed into +DI and
/// -DI, and ADX is the Wilder-smoothed DX. Reads below 20 as ranging,
/// above 40 as strongly trending.
#[derive(Debug, Clone)]
pub struct Adx {
    smoothing: Rma,
}

/// Directional movement and true range of one bar against the previous one.
struct Movement {
    plus: f64,
    minus: f64,
    true_range: f64,
}

impl Movement {
    fn between(prev: (f64, f64, f64), bar: (f64, f64)) -> Self {
        let (prev_high, prev_low, prev_close) = prev;
        let (high, low) = bar;
        let up = high - prev_high;
        let down = prev_low - low;

        Self {
            plus: if up > down && up > 0.0 { up } else { 0.0 },
            minus: if down > up && down > 0.0 { down } else { 0.0 },
            true_range: (high - low)
                .max((high - prev_close).abs())
                .max((low - prev_close).abs()),
        }
    }
}

fn directional_index(plus: f64, minus: f64, true_range: f64) -> f64 {
    if true_range == 0.0 {
        return 0.0;
    }
    let plus_di = plus / true_range * 100.0;
    let minus_di = minus / true_range * 100.0;
    match plus_di + minus_di {
        sum if sum > 0.0 => (plus_di - minus_di).abs() / sum * 100.0,
        _ => 0.0,
    }
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self {
            smoothing: Rma::new(period),
        }
    }

    /// Bars needed before the first output.
    pub fn min_len(&self) -> usize {
        self.smoothing.min_len() * 2
    }

    pub fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.min_len() {
            return Vec::new();
        }

        let moves: Vec<Movement> = (1..len)
            .map(|i| Movement::between((high[i - 1], low[i - 1], close[i - 1]), (high[i], low[i])))
            .collect();

        let smooth = |f: fn(&Movement) -> f64| {
            self.smoothing
                .calculate(&moves.iter().map(f).collect::<Vec<_>>())
        };
        let plus = smooth(|m: &Movement| m.plus);
        let minus = smooth(|m: &Movement| m.minus);
        let true_range = smooth(|m: &Movement| m.true_range);

        let dx: Vec<f64> = plus
            .iter()
            .zip(&minus)
            .zip(&true_range)
            .map(|((&p, &m), &tr)| directional_index(p, m, tr))
            .collect();

        self.smoothing.calculate(&dx)
    }
}

impl Default for Adx {
    fn default() -> Self {
        Self::new(14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adx_one_directional_trend() {
        let adx = Adx::default();
        let close: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();

        let result = adx.calculate_ohlc(&high, &low, &close);
        assert_eq!(result.len(), 60 - 28 + 1);
        // no opposing movement, so every DX is 100
        assert!((result.last().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_adx_needs_two_periods() {
        let adx = Adx::new(5);
        assert!(adx.calculate_ohlc(&[1.0; 9], &[1.0; 9], &[1.0; 9]).is_empty());
        assert_eq!(adx.calculate_ohlc(&[1.0; 10], &[1.0; 10], &[1.0; 10]).len(), 1);
    }

    #[test]
    fn test_adx_flat_market_is_zero() {
        let flat = vec![10.0; 20];
        let result = Adx::new(5).calculate_ohlc(&flat, &flat, &flat);
        assert!(!result.is_empty());
        assert!(result.iter().all(|v| *v == 0.0));
    }
}
