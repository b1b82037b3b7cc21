//! Ticker time-series store and signal engine.
//!
//! - [`Ticker`] owns one symbol's ordered candle window, the indicator
//!   arrays derived from it and the resting signal.
//! - [`SignalEngine`] recomputes indicators wholesale and runs the
//!   configured [`SignalPolicy`](ticker_core::traits::SignalPolicy) with
//!   edge triggering.
//! - [`Storage`] owns every ticker behind a registry lock, persists the
//!   symbol set with buy prices, and serves table and chart projections.

mod config;
mod engine;
mod lock;
mod persist;
mod projection;
mod series;
mod storage;
mod ticker;

pub use config::{IndicatorParams, SeriesConfig};
pub use engine::SignalEngine;
pub use projection::{ChartData, MemoryStats, TickerRow};
pub use series::{IndicatorSet, RawSeries};
pub use storage::{Lifecycle, Storage};
pub use ticker::Ticker;
