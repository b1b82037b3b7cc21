//! Concurrent history backfill.

use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use ticker_core::traits::DataSource;
use ticker_store::Storage;
use tracing::{debug, info, warn};

/// `(start, end)` covering the last `history_days` up to now, clamped to the
/// earliest representable instant.
pub fn history_window(history_days: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = Utc::now();
    let start = end
        .checked_sub_signed(Duration::days(i64::from(history_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    (start, end)
}

/// Fetch `history_days` of candles for every symbol with at most `workers`
/// requests in flight, and insert them.
///
/// Symbols whose fetch fails or comes back empty are logged and skipped.
/// Returns the symbols that received history, sorted.
pub async fn backfill<D>(
    storage: &Storage,
    source: &D,
    symbols: Vec<String>,
    workers: usize,
    history_days: u32,
) -> Vec<String>
where
    D: DataSource + ?Sized,
{
    let (start, end) = history_window(history_days);
    info!(symbols = symbols.len(), workers, history_days, source = source.name(), "fetching history candles");

    let mut ready: Vec<String> = stream::iter(symbols)
        .map(|symbol| async move {
            let candles = match source.fetch(&symbol, start, end).await {
                Ok(candles) if candles.is_empty() => {
                    warn!(symbol = %symbol, "no candles fetched");
                    return None;
                }
                Ok(candles) => candles,
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "failed to fetch candles");
                    return None;
                }
            };

            match storage.insert_candles(&symbol, &candles) {
                Ok(signal) => {
                    debug!(symbol = %symbol, candles = candles.len(), %signal, "history inserted");
                    Some(symbol)
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "history dropped");
                    None
                }
            }
        })
        .buffer_unordered(workers.max(1))
        .filter_map(|symbol| async move { symbol })
        .collect()
        .await;

    ready.sort_unstable();
    ready
}
