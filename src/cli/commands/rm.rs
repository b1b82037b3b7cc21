//! Remove ticker command.

use anyhow::Result;
use std::path::Path;

use super::{normalize_symbol, Session};
use crate::cli::SymbolArgs;

pub async fn run(args: SymbolArgs, config_path: &Path) -> Result<()> {
    let symbol = normalize_symbol(&args.symbol);
    let session = Session::open(config_path)?;

    if session.storage.contains(&symbol) {
        session.storage.del_ticker(&symbol)?;
        println!("Removed {symbol}");
    } else {
        println!("{symbol} is not tracked");
    }
    session.close()
}
