//! Long-running watcher: history backfill, candle stream and alerts.

mod backfill;
mod event_loop;
mod notify;

pub use backfill::{backfill, history_window};
pub use event_loop::{run_event_loop, shutdown_signal};
pub use notify::LogNotifier;
