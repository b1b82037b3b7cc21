//! Core types and traits for the ticker watcher.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Candle, StreamItem)
//! - The buy/sell/hold signal taxonomy
//! - Core traits for indicators, signal policies, data sources and notifiers

pub mod error;
pub mod traits;
pub mod types;

pub use error::TickerError;
pub use traits::*;
pub use types::*;
