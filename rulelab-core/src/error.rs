//! Typed errors for configuration and simulation.

use thiserror::Error;

/// Rejected configuration — checked before any simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial capital must be positive and finite, got {0}")]
    InvalidCapital(f64),

    #[error("stop-loss fraction must be in (0, 1), got {0}")]
    InvalidStopLoss(f64),

    #[error("take-profit fraction must be positive and finite, got {0}")]
    InvalidTakeProfit(f64),

    #[error("indicator window must be >= 1: {name} = {value}")]
    InvalidWindow { name: &'static str, value: usize },

    #[error("MACD slow period ({slow}) must exceed fast period ({fast})")]
    MacdPeriodOrder { fast: usize, slow: usize },

    #[error("RSI oversold band ({oversold}) must be below overbought band ({overbought})")]
    RsiBandOrder { oversold: f64, overbought: f64 },

    #[error("signal threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    #[error("signal weight must be finite and non-negative: {name} = {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("Bollinger multiplier must be positive and finite, got {0}")]
    InvalidBollingerMult(f64),
}

/// Rejected simulation input — the whole run aborts.
///
/// Insufficient data is deliberately NOT an error: it produces an empty
/// result with `bars_simulated == 0` (see `engine::run_backtest`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("bar {index} has invalid close price {close} (must be positive and finite)")]
    InvalidBar { index: usize, close: f64 },

    #[error("bar {index} dated {date} does not strictly follow its predecessor")]
    UnorderedBars {
        index: usize,
        date: chrono::NaiveDate,
    },

    #[error("signal series length {signals} does not match bar series length {bars}")]
    LengthMismatch { bars: usize, signals: usize },

    #[error("indicator series length {indicators} does not match bar series length {bars}")]
    IndicatorLengthMismatch { bars: usize, indicators: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_value() {
        let err = ConfigError::InvalidStopLoss(1.5);
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn engine_error_wraps_config_error() {
        let err: EngineError = ConfigError::InvalidCapital(-1.0).into();
        assert!(matches!(err, EngineError::Config(_)));
        assert!(err.to_string().contains("configuration rejected"));
    }

    #[test]
    fn invalid_bar_names_index_and_price() {
        let err = EngineError::InvalidBar {
            index: 7,
            close: -3.0,
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("-3"));
    }
}
