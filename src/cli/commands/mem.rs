//! Storage footprint command.

use anyhow::Result;
use std::path::Path;
use ticker_store::MemoryStats;

use super::Session;
use crate::cli::MemArgs;

pub async fn run(args: MemArgs, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    if !args.no_fetch {
        session.hydrate(session.storage.get_symbols()).await;
    }

    let stats = session.storage.memory_stats();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_stats(&stats));
    }
    session.close()
}

pub(crate) fn render_stats(stats: &MemoryStats) -> String {
    format!(
        "Symbols = {}\nCandles = {}\nSeries = {:.2} KiB\n",
        stats.symbols,
        stats.candles,
        stats.series_bytes as f64 / 1024.0
    )
}
