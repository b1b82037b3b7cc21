//! Status table command.

use anyhow::Result;
use std::path::Path;
use ticker_monitor::{format_change, format_price};
use ticker_store::Storage;

use super::Session;
use crate::cli::LsArgs;

pub async fn run(args: LsArgs, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    if !args.no_fetch {
        session.hydrate(session.storage.get_symbols()).await;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.storage.get_ticker_table())?);
    } else {
        print!("{}", render_table(&session.storage));
    }
    session.close()
}

/// Every tracked symbol; buy price and change are blank without a buy price.
pub(crate) fn render_table(storage: &Storage) -> String {
    let header = ["Symbol", "Buy Price", "Close", "Change", "Signal"].map(String::from);
    let mut rows = vec![header];
    for symbol in storage.get_symbols() {
        let buy_price = storage.get_buy_price(&symbol);
        let (buy_price, change) = if buy_price > 0.0 {
            (
                format!("${}", format_price(buy_price)),
                format_change(storage.get_change(&symbol)),
            )
        } else {
            (String::new(), String::new())
        };
        let close = match format_price(storage.get_close(&symbol)) {
            price if price.is_empty() => price,
            price => format!("${price}"),
        };
        let signal = storage.get_signal(&symbol).to_string();
        rows.push([symbol, buy_price, close, change, signal]);
    }

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
