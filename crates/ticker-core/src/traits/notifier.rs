//! Notification sink trait definitions.

use crate::error::TickerError;
use async_trait::async_trait;

/// Outbound alert channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a plain-text message.
    async fn send_text(&self, text: &str) -> Result<(), TickerError>;

    /// Get the notifier name.
    fn name(&self) -> &str;
}
