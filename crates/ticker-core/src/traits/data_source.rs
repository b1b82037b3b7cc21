//! Market data boundary.

use crate::error::DataError;
use crate::types::{Candle, StreamItem};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Supplier of daily bars: a historical range for backfill and a live
/// subscription.
///
/// Subscription items may interleave symbols in any order and may repeat a
/// bar that was already delivered; the store's upsert absorbs both.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Bars for `symbol` with `start <= timestamp <= end`, oldest first.
    async fn fetch(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, DataError>;

    /// Start delivering bars for `symbols`. The stream ends when the source
    /// runs dry or the receiver is dropped.
    async fn subscribe(&self, symbols: &[String]) -> Result<mpsc::Receiver<StreamItem>, DataError>;

    /// Stop delivering bars for `symbols`. Unknown symbols are ignored.
    async fn unsubscribe(&self, symbols: &[String]) -> Result<(), DataError>;

    fn name(&self) -> &str;
}
