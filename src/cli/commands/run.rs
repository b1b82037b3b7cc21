//! Stream processing command.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use ticker_core::traits::{DataSource, Notifier};
use tracing::{info, warn};

use super::{ls::render_table, Session};
use crate::cli::RunArgs;
use crate::service::{self, LogNotifier};

pub async fn run(args: RunArgs, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let source = session.data_source(Some(&args))?;

    let symbols = session.storage.get_symbols();
    if symbols.is_empty() {
        warn!("no symbols tracked, add one with `tickerwatch add <SYMBOL>`");
        return session.close();
    }

    let fetch = &session.config.fetch;
    let ready = service::backfill(&session.storage, &source, symbols, fetch.workers, fetch.history_days).await;
    let stream = source.subscribe(&ready).await?;
    info!(symbols = ready.len(), policy = session.storage.engine().policy().name(), "ready");

    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier::new());
    let stats = service::run_event_loop(
        Arc::clone(&session.storage),
        stream,
        notifier,
        service::shutdown_signal(),
    )
    .await;

    source.unsubscribe(&ready).await?;
    println!("{}", render_table(&session.storage));
    println!("{} candles processed, {} alerts", stats.candles, stats.alerts);

    session.close()?;
    info!("stopped");
    Ok(())
}
