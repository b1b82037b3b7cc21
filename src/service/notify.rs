//! Alert formatting and delivery.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use ticker_core::error::TickerError;
use ticker_core::traits::Notifier;
use ticker_core::types::Signal;
use tracing::info;

/// Alerts kept for the dashboard.
const RECENT_ALERTS: usize = 20;

/// Text sent for an emitted signal, if any.
///
/// A sell is only reported for a position with a buy price; a buy always
/// is, with the change appended when a buy price is set.
pub fn alert_message(signal: Signal, symbol: &str, buy_price: f64, change: f64) -> Option<String> {
    let has_position = buy_price > 0.0;
    match signal {
        Signal::Sell if has_position => Some(format!("{signal} {symbol} {change:+.2}")),
        Signal::Buy if has_position => Some(format!("{signal} {symbol} {change:+.2}%")),
        Signal::Buy => Some(format!("{signal} {symbol}")),
        _ => None,
    }
}

/// Notifier that logs every alert and remembers the most recent ones.
#[derive(Debug, Default)]
pub struct LogNotifier {
    recent: Mutex<VecDeque<String>>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent alerts, oldest first.
    pub fn recent(&self) -> Vec<String> {
        self.recent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_text(&self, text: &str) -> Result<(), TickerError> {
        info!(target: "tickerwatch::alert", alert = text, "alert");

        let mut recent = self.recent.lock().unwrap_or_else(PoisonError::into_inner);
        if recent.len() == RECENT_ALERTS {
            recent.pop_front();
        }
        recent.push_back(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sell_requires_buy_price() {
        assert_eq!(alert_message(Signal::Sell, "TSLA", 0.0, f64::NAN), None);
        assert_eq!(
            alert_message(Signal::Sell, "TSLA", 250.0, 20.0).as_deref(),
            Some("sell TSLA +20.00")
        );
    }

    #[test]
    fn test_buy_messages() {
        assert_eq!(
            alert_message(Signal::Buy, "AAPL", 0.0, f64::NAN).as_deref(),
            Some("buy AAPL")
        );
        assert_eq!(
            alert_message(Signal::Buy, "AAPL", 200.0, -4.5).as_deref(),
            Some("buy AAPL -4.50%")
        );
        assert_eq!(alert_message(Signal::Hold, "AAPL", 200.0, 1.0), None);
    }

    #[tokio::test]
    async fn test_recent_is_bounded() {
        let notifier = LogNotifier::new();
        for i in 0..25 {
            notifier.send_text(&format!("alert {i}")).await.unwrap();
        }
        let recent = notifier.recent();
        assert_eq!(recent.len(), RECENT_ALERTS);
        assert_eq!(recent[0], "alert 5");
        assert_eq!(recent[19], "alert 24");
    }
}
