//! OHLCV candle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A daily OHLCV bar keyed by its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time
    pub timestamp: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Create a candle from a Unix timestamp in seconds.
    ///
    /// Out-of-range timestamps collapse to the Unix epoch.
    pub fn at_unix(secs: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        let timestamp = DateTime::from_timestamp(secs, 0).unwrap_or_default();
        Self::new(timestamp, open, high, low, close, volume)
    }

    /// Ordering key on the time axis (whole seconds).
    ///
    /// Two candles with the same key are the same bar; sub-second
    /// differences from a re-sending broker do not create a new entry.
    #[inline]
    pub fn key(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

/// One candle delivered by a streaming subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamItem {
    pub symbol: String,
    pub candle: Candle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_sub_second_part() {
        let a = Candle::at_unix(1_700_000_000, 1.0, 2.0, 0.5, 1.5, 10.0);
        let mut b = a;
        b.timestamp += chrono::Duration::milliseconds(250);

        assert_eq!(a.key(), b.key());
        assert_ne!(a.timestamp, b.timestamp);
    }

    #[test]
    fn test_at_unix() {
        let candle = Candle::at_unix(86_400, 1.0, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(candle.timestamp.to_rfc3339(), "1970-01-02T00:00:00+00:00");
    }
}
