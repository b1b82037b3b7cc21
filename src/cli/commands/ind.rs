//! Indicator summary command.

use anyhow::{bail, Result};
use std::path::Path;
use ticker_store::Storage;

use super::{normalize_symbol, Session};
use crate::cli::SymbolArgs;

pub async fn run(args: SymbolArgs, config_path: &Path) -> Result<()> {
    let symbol = normalize_symbol(&args.symbol);
    let session = Session::open(config_path)?;
    if !session.storage.contains(&symbol) {
        session.close()?;
        bail!("{symbol} is not tracked");
    }

    session.hydrate(vec![symbol.clone()]).await;
    println!("{}", summary(&session.storage, &symbol));
    session.close()
}

/// One-line summary of the latest close and band, stochastic, MFI and ADX
/// values. Bands read lower, middle, upper.
pub(crate) fn summary(storage: &Storage, symbol: &str) -> String {
    let close = storage.get_close(symbol);
    let (upper, middle, lower) = storage.get_bb(symbol);
    let (k, d) = storage.get_stoch(symbol);
    format!(
        "{symbol}: Close ${close:.2}, BB({lower:.2}, {middle:.2}, {upper:.2}), Stoch({k:.2}, {d:.2}), MFI({:.2}), ADX({:.2})",
        storage.get_mfi(symbol),
        storage.get_adx(symbol),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_history() {
        let storage = Storage::default();
        storage.add_ticker("TSLA", 0.0).unwrap();
        assert_eq!(
            summary(&storage, "TSLA"),
            "TSLA: Close $NaN, BB(NaN, NaN, NaN), Stoch(NaN, NaN), MFI(NaN), ADX(NaN)"
        );
    }
}
