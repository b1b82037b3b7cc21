//! Read-only view over a ticker's aligned indicator arrays.

/// Index-aligned close and indicator series handed to a signal policy.
///
/// Every slice has the same length as the raw window; positions before an
/// indicator's warm-up hold `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorFrame<'a> {
    pub close: &'a [f64],
    pub sma: &'a [f64],
    pub rsi: &'a [f64],
    pub macd: &'a [f64],
    pub macd_signal: &'a [f64],
    pub macd_hist: &'a [f64],
    pub bb_upper: &'a [f64],
    pub bb_mid: &'a [f64],
    pub bb_lower: &'a [f64],
    pub stoch_k: &'a [f64],
    pub stoch_d: &'a [f64],
    pub mfi: &'a [f64],
    pub adx: &'a [f64],
}

impl<'a> IndicatorFrame<'a> {
    /// Value of `series` `back` bars before the latest one.
    pub fn value(series: &[f64], back: usize) -> Option<f64> {
        series
            .len()
            .checked_sub(back + 1)
            .and_then(|i| series.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_lookback() {
        let series = [1.0, 2.0, 3.0];
        assert_eq!(IndicatorFrame::value(&series, 0), Some(3.0));
        assert_eq!(IndicatorFrame::value(&series, 2), Some(1.0));
        assert_eq!(IndicatorFrame::value(&series, 3), None);
        assert_eq!(IndicatorFrame::value(&[], 0), None);
    }
}
