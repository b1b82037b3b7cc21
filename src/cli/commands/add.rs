//! Add ticker command.

use anyhow::{bail, Context, Result};
use std::path::Path;
use ticker_core::traits::DataSource;
use tracing::info;

use super::{normalize_symbol, Session};
use crate::cli::AddArgs;
use crate::service;

pub async fn run(args: AddArgs, config_path: &Path) -> Result<()> {
    let symbol = normalize_symbol(&args.symbol);
    if symbol.is_empty() {
        bail!("symbol must not be empty");
    }
    let session = Session::open(config_path)?;

    // A symbol without history is never added.
    let history = if args.offline {
        Vec::new()
    } else {
        let source = session.data_source(None)?;
        let (start, end) = service::history_window(session.config.fetch.history_days);
        let candles = source
            .fetch(&symbol, start, end)
            .await
            .with_context(|| format!("failed to fetch candles for {symbol}"))?;
        if candles.is_empty() {
            session.close()?;
            bail!("no candles fetched for {symbol}");
        }
        candles
    };

    session.storage.add_ticker(&symbol, args.buy_price)?;
    if !history.is_empty() {
        session.storage.insert_candles(&symbol, &history)?;
    }
    info!(symbol = %symbol, buy_price = args.buy_price, candles = history.len(), "ticker added");

    let mut line = format!("Added {symbol}");
    let buy_price = session.storage.get_buy_price(&symbol);
    if buy_price > 0.0 {
        line.push_str(&format!(", buy price ${buy_price:.2}"));
    }
    let close = session.storage.get_close(&symbol);
    if close.is_finite() {
        line.push_str(&format!(", close ${close:.2}"));
    }
    println!("{line}");

    session.close()
}
