//! Trading signal taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete decision emitted by a signal policy.
///
/// `Hold` is the resting value and serializes as an empty string, so a
/// status row without a pending signal renders blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Signal {
    #[default]
    #[serde(rename = "")]
    Hold,
    #[serde(rename = "buy")]
    Buy,
    #[serde(rename = "sell")]
    Sell,
}

impl Signal {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Hold => "",
            Signal::Buy => "buy",
            Signal::Sell => "sell",
        }
    }

    #[inline]
    pub fn is_hold(&self) -> bool {
        matches!(self, Signal::Hold)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
