//! RuleLab Core — signal generation and backtest simulation.
//!
//! This crate contains the heart of the backtesting engine:
//! - Domain types (bars, signals, trades, per-bar indicator views)
//! - Indicator precompute (SMA, EMA, RSI, MACD, Bollinger Bands)
//! - Weighted-vote signal generator
//! - Bar-by-bar simulator with stop-loss/take-profit risk exits
//!
//! Everything here is pure computation: no I/O, no clocks, no randomness.
//! Identical inputs always produce bit-identical results.

pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod signals;

pub use engine::{run_backtest, BacktestResult, EngineConfig, PositionState};
pub use error::{ConfigError, EngineError};
pub use signals::{generate_signals, CombinedSignal, SignalParams};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all public types are Send + Sync.
    ///
    /// Callers run backtests from worker threads; none of these types may
    /// grow interior non-Sync state without breaking this check.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::IndicatorSet>();
        require_sync::<domain::IndicatorSet>();

        require_send::<indicators::IndicatorParams>();
        require_sync::<indicators::IndicatorParams>();
        require_send::<indicators::IndicatorSeries>();
        require_sync::<indicators::IndicatorSeries>();

        require_send::<SignalParams>();
        require_sync::<SignalParams>();
        require_send::<CombinedSignal>();
        require_sync::<CombinedSignal>();

        require_send::<EngineConfig>();
        require_sync::<EngineConfig>();
        require_send::<PositionState>();
        require_sync::<PositionState>();
        require_send::<BacktestResult>();
        require_sync::<BacktestResult>();

        require_send::<ConfigError>();
        require_sync::<ConfigError>();
        require_send::<EngineError>();
        require_sync::<EngineError>();
    }
}
