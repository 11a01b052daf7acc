//! Result of a complete backtest run.

use crate::domain::Trade;
use serde::{Deserialize, Serialize};

/// Everything a reporting layer needs from one run.
///
/// `portfolio_values` holds one mark-to-market value per simulated bar,
/// aligned by index to the input bars that were not skipped for warm-up.
/// `bars_simulated == 0` distinguishes an insufficient-data run from a
/// genuine zero-return run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_capital: f64,
    /// Cash after the final (possibly forced) close.
    pub final_capital: f64,
    /// Percent return relative to initial capital.
    pub total_return: f64,
    /// Append-only trade ledger, alternating BUY/SELL.
    pub trades: Vec<Trade>,
    /// Mark-to-market value per simulated bar.
    pub portfolio_values: Vec<f64>,
    /// Total bars in the input series.
    pub bar_count: usize,
    /// Bars skipped because the short SMA was still undefined.
    pub warmup_bars: usize,
    /// Bars that actually went through the state machine.
    pub bars_simulated: usize,
}

impl BacktestResult {
    /// An empty run: nothing simulated, capital untouched.
    pub(crate) fn empty(initial_capital: f64, bar_count: usize, warmup_bars: usize) -> Self {
        Self {
            initial_capital,
            final_capital: initial_capital,
            total_return: 0.0,
            trades: Vec::new(),
            portfolio_values: Vec::new(),
            bar_count,
            warmup_bars,
            bars_simulated: 0,
        }
    }

    /// True when the input had too little history to simulate anything.
    pub fn is_insufficient_data(&self) -> bool {
        self.bars_simulated == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_preserves_capital() {
        let result = BacktestResult::empty(10_000.0, 3, 3);
        assert_eq!(result.final_capital, 10_000.0);
        assert_eq!(result.total_return, 0.0);
        assert!(result.trades.is_empty());
        assert!(result.portfolio_values.is_empty());
        assert!(result.is_insufficient_data());
    }

    #[test]
    fn result_serialization_roundtrip() {
        let result = BacktestResult::empty(10_000.0, 0, 0);
        let json = serde_json::to_string(&result).unwrap();
        let deser: BacktestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deser);
    }
}
