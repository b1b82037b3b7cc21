//! Signal policy implementations.
//!
//! This crate provides the interchangeable decision rules a ticker runs
//! after every indicator recompute:
//! - Band trend (Bollinger Bands + ADX + MFI), the default
//! - Stochastic %K/%D crossover

mod band_trend;
mod registry;
mod stoch_cross;

#[cfg(test)]
pub(crate) mod testing;

pub use band_trend::{BandTrendConfig, BandTrendPolicy};
pub use registry::{PolicyInfo, PolicyRegistry, DEFAULT_POLICY};
pub use stoch_cross::{StochCrossConfig, StochCrossPolicy};
