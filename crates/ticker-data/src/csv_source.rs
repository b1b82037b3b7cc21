//! CSV data source.
//!
//! History is read from `<dir>/<SYMBOL>.csv` (lower-case names and a
//! `_daily` suffix are accepted too). A subscription replays the newest
//! candles of every subscribed symbol, one bar per symbol per round, the
//! way a daily-bar feed delivers them. Once replay options are set, `fetch`
//! holds those newest candles back so the replay delivers them as new bars.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use ticker_core::error::DataError;
use ticker_core::traits::DataSource;
use ticker_core::types::{Candle, StreamItem};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::CandleCache;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// How a subscription replays history.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    /// Newest candles replayed per symbol
    pub bars: usize,
    /// Pause between rounds
    pub interval: Duration,
    /// Channel capacity
    pub buffer: usize,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            bars: 30,
            interval: Duration::from_millis(500),
            buffer: 1024,
        }
    }
}

/// CSV data source for daily candles.
pub struct CsvDataSource {
    dir: PathBuf,
    replay: Option<ReplayOptions>,
    cache: Mutex<CandleCache>,
    active: Arc<Mutex<HashSet<String>>>,
}

impl CsvDataSource {
    /// Create a source over a directory of per-symbol CSV files.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::Internal(format!(
                "data directory not found: {}",
                dir.display()
            )));
        }
        Ok(Self {
            dir,
            replay: None,
            cache: Mutex::new(CandleCache::new()),
            active: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Set replay options for subscriptions. The replayed candles are
    /// excluded from `fetch` from then on.
    pub fn with_replay(mut self, replay: ReplayOptions) -> Self {
        self.replay = Some(replay);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Find the file holding `symbol`'s history.
    fn locate(&self, symbol: &str) -> Option<PathBuf> {
        let upper = symbol.to_ascii_uppercase();
        let lower = symbol.to_ascii_lowercase();
        [
            format!("{upper}.csv"),
            format!("{lower}.csv"),
            format!("{upper}_daily.csv"),
            format!("{lower}_daily.csv"),
        ]
        .into_iter()
        .map(|name| self.dir.join(name))
        .find(|path| path.is_file())
    }

    /// All candles of `symbol`, parsed once and cached.
    fn candles(&self, symbol: &str) -> Result<Arc<Vec<Candle>>, DataError> {
        if let Some(candles) = self.cache.lock().unwrap_or_else(PoisonError::into_inner).get(symbol) {
            return Ok(candles);
        }

        let path = self
            .locate(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;
        let candles = read_candles(&path)?;
        debug!(symbol, path = %path.display(), candles = candles.len(), "csv loaded");

        Ok(self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(symbol, candles))
    }

    fn is_active(active: &Mutex<HashSet<String>>, symbol: &str) -> bool {
        active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(symbol)
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn fetch(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, DataError> {
        let candles = self.candles(symbol)?;
        let held_back = self.replay.as_ref().map_or(0, |r| r.bars);
        let history = &candles[..candles.len().saturating_sub(held_back)];
        Ok(history
            .iter()
            .filter(|c| c.timestamp >= start && c.timestamp <= end)
            .copied()
            .collect())
    }

    async fn subscribe(&self, symbols: &[String]) -> Result<mpsc::Receiver<StreamItem>, DataError> {
        let replay = self.replay.clone().unwrap_or_default();
        let mut tails = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.candles(symbol) {
                Ok(candles) => {
                    let skip = candles.len().saturating_sub(replay.bars);
                    tails.push((symbol.clone(), candles[skip..].to_vec()));
                }
                Err(e) => warn!(symbol = %symbol, error = %e, "skipping subscription"),
            }
        }
        if tails.is_empty() && !symbols.is_empty() {
            return Err(DataError::SymbolNotFound(symbols.join(",")));
        }

        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(tails.iter().map(|(symbol, _)| symbol.clone()));

        let (tx, rx) = mpsc::channel(replay.buffer.max(1));
        let active = Arc::clone(&self.active);
        let interval = replay.interval;
        let rounds = tails.iter().map(|(_, c)| c.len()).max().unwrap_or(0);

        info!(symbols = tails.len(), rounds, "csv replay started");
        tokio::spawn(async move {
            for round in 0..rounds {
                if round > 0 && !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                for (symbol, candles) in &tails {
                    let Some(candle) = candles.get(round) else {
                        continue;
                    };
                    if !Self::is_active(&active, symbol) {
                        continue;
                    }
                    let item = StreamItem {
                        symbol: symbol.clone(),
                        candle: *candle,
                    };
                    if tx.send(item).await.is_err() {
                        debug!("replay receiver dropped");
                        return;
                    }
                }
            }
            debug!("csv replay finished");
        });

        Ok(rx)
    }

    async fn unsubscribe(&self, symbols: &[String]) -> Result<(), DataError> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        for symbol in symbols {
            active.remove(symbol);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "CSV"
    }
}

/// Read and sort every candle in a CSV file.
pub(crate) fn read_candles(path: &Path) -> Result<Vec<Candle>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut candles = Vec::new();
    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let timestamp = parse_timestamp(&record.date)?;
        candles.push(Candle::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    candles.sort_by_key(Candle::key);
    Ok(candles)
}

/// Parse the date formats found in common daily-bar exports.
fn parse_timestamp(date_str: &str) -> Result<DateTime<Utc>, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc());
        }
    }

    // Unix timestamp, milliseconds if it has more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        let parsed = if ts > 10_000_000_000 {
            DateTime::from_timestamp_millis(ts)
        } else {
            DateTime::from_timestamp(ts, 0)
        };
        if let Some(dt) = parsed {
            return Ok(dt);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let dir = std::env::temp_dir().join(format!("tickerwatch-csv-{name}-{nanos}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_csv(dir: &Path, file: &str, days: u32, base: f64) {
        let mut body = String::from("Date,Open,High,Low,Close,Volume\n");
        // Written newest first; the reader sorts.
        for day in (1..=days).rev() {
            let close = base + day as f64;
            body.push_str(&format!(
                "2024-01-{day:02},{close},{},{},{close},1000\n",
                close + 1.0,
                close - 1.0
            ));
        }
        std::fs::write(dir.join(file), body).unwrap();
    }

    fn instant(s: &str) -> DateTime<Utc> {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(instant("2024-01-15").timestamp(), 1_705_276_800);
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_ok());
        assert_eq!(instant("1705312800000"), instant("1705312800"));
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_missing_directory() {
        assert!(CsvDataSource::new("/nonexistent/tickerwatch").is_err());
    }

    #[tokio::test]
    async fn test_fetch_filters_range() {
        let dir = temp_dir("fetch");
        write_csv(&dir, "AAPL.csv", 10, 100.0);
        let source = CsvDataSource::new(&dir).unwrap();

        let candles = source
            .fetch("AAPL", instant("2024-01-03"), instant("2024-01-05"))
            .await
            .unwrap();
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![103.0, 104.0, 105.0]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_holds_back_replayed_bars() {
        let dir = temp_dir("holdback");
        write_csv(&dir, "AAPL.csv", 10, 100.0);
        let source = CsvDataSource::new(&dir).unwrap().with_replay(ReplayOptions {
            bars: 3,
            interval: Duration::ZERO,
            buffer: 16,
        });

        let history = source
            .fetch("AAPL", instant("2024-01-01"), instant("2024-12-31"))
            .await
            .unwrap();
        let closes: Vec<f64> = history.iter().map(|c| c.close).collect();
        assert_eq!(closes, (101..=107).map(f64::from).collect::<Vec<_>>());

        let mut rx = source.subscribe(&["AAPL".to_string()]).await.unwrap();
        let mut replayed = Vec::new();
        while let Some(item) = rx.recv().await {
            replayed.push(item.candle.close);
        }
        assert_eq!(replayed, vec![108.0, 109.0, 110.0]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_file_name_variants() {
        let dir = temp_dir("variants");
        write_csv(&dir, "msft_daily.csv", 3, 10.0);
        let source = CsvDataSource::new(&dir).unwrap();

        let candles = source
            .fetch("MSFT", instant("2024-01-01"), instant("2024-12-31"))
            .await
            .unwrap();
        assert_eq!(candles.len(), 3);

        let err = source
            .fetch("NOPE", instant("2024-01-01"), instant("2024-12-31"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_subscribe_interleaves_newest_bars() {
        let dir = temp_dir("replay");
        write_csv(&dir, "AAA.csv", 10, 100.0);
        write_csv(&dir, "BBB.csv", 10, 200.0);
        let source = CsvDataSource::new(&dir).unwrap().with_replay(ReplayOptions {
            bars: 2,
            interval: Duration::ZERO,
            buffer: 16,
        });

        let mut rx = source
            .subscribe(&["AAA".to_string(), "BBB".to_string(), "ZZZ".to_string()])
            .await
            .unwrap();

        let mut items = Vec::new();
        while let Some(item) = rx.recv().await {
            items.push((item.symbol, item.candle.close));
        }
        assert_eq!(
            items,
            vec![
                ("AAA".to_string(), 109.0),
                ("BBB".to_string(), 209.0),
                ("AAA".to_string(), 110.0),
                ("BBB".to_string(), 210.0),
            ]
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_symbol() {
        let dir = temp_dir("unsub");
        write_csv(&dir, "AAA.csv", 5, 100.0);
        write_csv(&dir, "BBB.csv", 5, 200.0);
        let source = CsvDataSource::new(&dir).unwrap().with_replay(ReplayOptions {
            bars: 5,
            interval: Duration::from_millis(20),
            buffer: 1,
        });

        let mut rx = source
            .subscribe(&["AAA".to_string(), "BBB".to_string()])
            .await
            .unwrap();
        source.unsubscribe(&["BBB".to_string()]).await.unwrap();

        let (mut aaa, mut bbb) = (0, 0);
        while let Some(item) = rx.recv().await {
            match item.symbol.as_str() {
                "AAA" => aaa += 1,
                _ => bbb += 1,
            }
        }
        assert_eq!(aaa, 5);
        // At most the bar already in flight when unsubscribing.
        assert!(bbb <= 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_subscribe_unknown_symbols_fails() {
        let dir = temp_dir("unknown");
        let source = CsvDataSource::new(&dir).unwrap();
        assert!(source.subscribe(&["ZZZ".to_string()]).await.is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
