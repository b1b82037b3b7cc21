//! Logging setup and TUI status dashboard.

mod dashboard;
mod logging;

pub use dashboard::{format_change, format_price, Dashboard, DashboardState};
pub use logging::{setup_logging, LOG_FILE_PREFIX};
