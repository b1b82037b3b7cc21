//! Technical indicators with SIMD helpers.
//!
//! This crate provides the indicator set the ticker store recomputes on
//! every insert:
//! - Moving averages (SMA, EMA, Wilder's RMA)
//! - Momentum indicators (RSI, MACD, Stochastic)
//! - Bollinger Bands
//! - Volume indicators (MFI)
//! - Trend strength (ADX)
//!
//! Indicators return compact series. [`align`] pads them back to the input
//! length with leading zeros, which downstream code treats as "no value yet".

mod align;
pub mod momentum;
pub mod moving_average;
pub mod simd;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use align::align;
pub use momentum::{Macd, MacdOutput, Rsi, Stochastic, StochasticOutput};
pub use moving_average::{Ema, Rma, Sma};
pub use trend::Adx;
pub use volatility::{BollingerBands, BollingerOutput};
pub use volume::Mfi;
