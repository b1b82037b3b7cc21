//! Error types for the ticker watcher.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum TickerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Registry and persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Symbol not tracked: {0}")]
    SymbolNotTracked(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage file: {0}")]
    Corrupt(String),
}

/// Market data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Signal policy errors.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Policy not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts() {
        let err: TickerError = StoreError::SymbolNotTracked("AAPL".into()).into();
        assert_eq!(err.to_string(), "Storage error: Symbol not tracked: AAPL");
    }

    #[test]
    fn test_invalid_parameter_bubbles_up() {
        let err: TickerError = IndicatorError::InvalidParameter("bb_period must be >= 2".into()).into();
        assert_eq!(
            err.to_string(),
            "Indicator error: Invalid parameter: bb_period must be >= 2"
        );
    }
}
