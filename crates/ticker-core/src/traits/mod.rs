//! Core traits for the ticker watcher.

mod data_source;
mod indicator;
mod notifier;
mod policy;

pub use data_source::DataSource;
pub use indicator::Indicator;
pub use notifier::Notifier;
pub use policy::{PolicyConfig, SignalPolicy};
