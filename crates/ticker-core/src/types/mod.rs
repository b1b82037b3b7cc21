//! Core data types for the ticker watcher.

mod candle;
mod frame;
mod signal;

pub use candle::{Candle, StreamItem};
pub use frame::IndicatorFrame;
pub use signal::Signal;
