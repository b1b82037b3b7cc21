//! Candle stream consumer.

use std::future::Future;
use std::sync::Arc;

use ticker_core::error::StoreError;
use ticker_core::traits::Notifier;
use ticker_core::types::StreamItem;
use ticker_store::Storage;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tracing::{debug, info, warn};

use super::notify::alert_message;

/// Counters reported when the loop stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub candles: usize,
    pub alerts: usize,
    pub untracked: usize,
}

/// Insert every streamed candle and send an alert for each emitted signal,
/// until the stream ends or `shutdown` resolves.
pub async fn run_event_loop<F>(
    storage: Arc<Storage>,
    stream: mpsc::Receiver<StreamItem>,
    notifier: Arc<dyn Notifier>,
    shutdown: F,
) -> LoopStats
where
    F: Future<Output = ()>,
{
    let mut stream = ReceiverStream::new(stream);
    let mut stats = LoopStats::default();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
            item = stream.next() => {
                let Some(item) = item else {
                    info!("candle stream ended");
                    break;
                };
                handle(&storage, notifier.as_ref(), item, &mut stats).await;
            }
        }
    }

    info!(candles = stats.candles, alerts = stats.alerts, "event loop stopped");
    stats
}

async fn handle(storage: &Storage, notifier: &dyn Notifier, item: StreamItem, stats: &mut LoopStats) {
    let StreamItem { symbol, candle } = item;
    let signal = match storage.insert_candles(&symbol, &[candle]) {
        Ok(signal) => signal,
        Err(StoreError::SymbolNotTracked(_)) => {
            // Removed while its subscription was still delivering.
            debug!(symbol = %symbol, "candle for untracked symbol");
            stats.untracked += 1;
            return;
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "insert failed");
            return;
        }
    };
    stats.candles += 1;

    let buy_price = storage.get_buy_price(&symbol);
    let change = storage.get_change(&symbol);
    let Some(message) = alert_message(signal, &symbol, buy_price, change) else {
        return;
    };

    stats.alerts += 1;
    if let Err(e) = notifier.send_text(&message).await {
        warn!(notifier = notifier.name(), error = %e, "failed to send alert");
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
