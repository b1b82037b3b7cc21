//! Dashboard command.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use ticker_core::traits::DataSource;
use ticker_monitor::{Dashboard, DashboardState};
use tokio::sync::oneshot;
use tracing::info;

use super::Session;
use crate::cli::WatchArgs;
use crate::service::{self, LogNotifier};

pub async fn run(args: WatchArgs, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let source = session.data_source(Some(&args.run))?;

    let fetch = &session.config.fetch;
    let ready = service::backfill(
        &session.storage,
        &source,
        session.storage.get_symbols(),
        fetch.workers,
        fetch.history_days,
    )
    .await;
    let stream = source.subscribe(&ready).await?;

    let notifier = Arc::new(LogNotifier::new());
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let event_loop = tokio::spawn(service::run_event_loop(
        Arc::clone(&session.storage),
        stream,
        notifier.clone(),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let storage = Arc::clone(&session.storage);
    let policy_name = storage.engine().policy().name().to_string();
    let refresh_ms = args.refresh_ms;
    tokio::task::spawn_blocking(move || {
        Dashboard::new(refresh_ms).run(|| DashboardState {
            policy_name: policy_name.clone(),
            tracked: storage.get_symbols().len(),
            rows: storage.get_ticker_table(),
            messages: notifier.recent(),
            updated: Utc::now(),
        })
    })
    .await
    .context("dashboard task failed")?
    .context("dashboard terminal error")?;

    let _ = stop_tx.send(());
    let stats = event_loop.await.context("event loop task failed")?;
    source.unsubscribe(&ready).await?;

    info!(candles = stats.candles, alerts = stats.alerts, "stopped");
    session.close()
}
