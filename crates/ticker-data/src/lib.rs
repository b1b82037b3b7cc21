//! Market data sources.

mod cache;
mod csv_source;

pub use cache::CandleCache;
pub use csv_source::{CsvDataSource, ReplayOptions};
