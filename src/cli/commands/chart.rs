//! Chart data command.

use anyhow::{bail, Result};
use std::path::Path;

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
    let chart = session.storage.get_chart_data(&symbol);
    println!("{}", serde_json::to_string_pretty(&chart)?);
    session.close()
}
