//! Engine configuration: capital and risk-exit fractions.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for a single backtest run.
///
/// Defaults: 10 000 initial capital, 5% stop-loss, 10% take-profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Starting cash. Must be positive and finite.
    pub initial_capital: f64,
    /// Fractional drop from entry that forces an exit. Must be in (0, 1).
    pub stop_loss: f64,
    /// Fractional rise from entry that forces an exit. Must be positive.
    pub take_profit: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            stop_loss: 0.05,
            take_profit: 0.10,
        }
    }
}

impl EngineConfig {
    pub fn new(initial_capital: f64, stop_loss: f64, take_profit: f64) -> Self {
        Self {
            initial_capital,
            stop_loss,
            take_profit,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(ConfigError::InvalidCapital(self.initial_capital));
        }
        if !self.stop_loss.is_finite() || self.stop_loss <= 0.0 || self.stop_loss >= 1.0 {
            return Err(ConfigError::InvalidStopLoss(self.stop_loss));
        }
        if !self.take_profit.is_finite() || self.take_profit <= 0.0 {
            return Err(ConfigError::InvalidTakeProfit(self.take_profit));
        }
        Ok(())
    }
}
