//! Combined weighted-vote signal.
//!
//! Three component votes per bar, each in {-1, 0, +1}:
//! - Trend: close vs. short SMA. Binary — never 0.
//! - Momentum: RSI against the oversold/overbought bands.
//! - MACD: line vs. signal line; 0 when equal or undefined.
//!
//! score = trend_weight * trend + momentum_weight * momentum + macd_weight * macd
//!
//! score above the buy threshold → BUY; below the sell threshold → SELL;
//! otherwise HOLD. A bar whose SMA or RSI is undefined is always HOLD.
//!
//! The asymmetry between the binary trend vote and the ternary RSI/MACD
//! votes is intentional and preserved as-is; the weights and the 0.3
//! threshold are policy constants, not derived quantities.

use crate::domain::{Bar, IndicatorSet, Signal};
use crate::error::ConfigError;
use crate::indicators::IndicatorSeries;
use serde::{Deserialize, Serialize};

/// Vote weights, decision thresholds, and RSI bands.
///
/// Defaults: weights 0.5/0.3/0.2, buy threshold 0.3 (sell at its
/// negation), RSI bands 30/70. Fields omitted from a config file fall
/// back to these defaults individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub trend_weight: f64,
    pub momentum_weight: f64,
    pub macd_weight: f64,
    /// Score strictly above this fires BUY; strictly below its negation
    /// fires SELL.
    pub threshold: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            trend_weight: 0.5,
            momentum_weight: 0.3,
            macd_weight: 0.2,
            threshold: 0.3,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
        }
    }
}

impl SignalParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("trend_weight", self.trend_weight),
            ("momentum_weight", self.momentum_weight),
            ("macd_weight", self.macd_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(ConfigError::RsiBandOrder {
                oversold: self.rsi_oversold,
                overbought: self.rsi_overbought,
            });
        }
        Ok(())
    }
}

/// The weighted-vote signal generator.
#[derive(Debug, Clone, Default)]
pub struct CombinedSignal {
    params: SignalParams,
}

impl CombinedSignal {
    pub fn new(params: SignalParams) -> Self {
        Self { params }
    }

    /// Evaluate one bar against its indicator view.
    pub fn evaluate(&self, bar: &Bar, indicators: &IndicatorSet) -> Signal {
        // Warm-up guard: both required inputs must be defined.
        let (Some(sma), Some(rsi)) = (indicators.sma, indicators.rsi) else {
            return Signal::Hold;
        };

        let trend: f64 = if bar.close > sma { 1.0 } else { -1.0 };

        let momentum: f64 = if rsi < self.params.rsi_oversold {
            1.0
        } else if rsi > self.params.rsi_overbought {
            -1.0
        } else {
            0.0
        };

        let macd: f64 = match (indicators.macd, indicators.macd_signal) {
            (Some(line), Some(signal)) if line > signal => 1.0,
            (Some(line), Some(signal)) if line < signal => -1.0,
            _ => 0.0,
        };

        let score = self.params.trend_weight * trend
            + self.params.momentum_weight * momentum
            + self.params.macd_weight * macd;

        if score > self.params.threshold {
            Signal::Buy
        } else if score < -self.params.threshold {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

/// Generate one signal per bar.
///
/// Bar 0 is always HOLD — the combination starts at index 1, so the
/// output series lines up index-for-index with the input bars.
pub fn generate_signals(
    bars: &[Bar],
    indicators: &IndicatorSeries,
    params: &SignalParams,
) -> Vec<Signal> {
    let generator = CombinedSignal::new(params.clone());
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                Signal::Hold
            } else {
                generator.evaluate(bar, &indicators.at(i))
            }
        })
        .collect()
}
