//! Indicator precompute.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! Each series is computed once over the full bar slice before the
//! simulation loop; the first `lookback()` values are `f64::NAN` (warm-up).
//! The NaN convention stays internal to this module — consumers read
//! per-bar values through `IndicatorSeries::at`, which yields
//! `Option<f64>`.
//!
//! No indicator value at bar t may depend on price data from bar t+1 or
//! later.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod series;
pub mod sma;

pub use bollinger::Bollinger;
pub use ema::{ema_of_series, Ema};
pub use macd::Macd;
pub use rsi::Rsi;
pub use series::IndicatorSeries;
pub use sma::Sma;

use crate::domain::Bar;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Trait for indicators.
///
/// `compute` returns a `Vec<f64>` of the same length as `bars`, with the
/// first `lookback()` values set to `f64::NAN`.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_5", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars consumed before the first defined output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Window lengths for the indicator set.
///
/// Defaults follow the strategy's documented configuration: SMA 5, RSI 14,
/// MACD 12/26/9, Bollinger 20 with a 2.0 multiplier. Fields omitted from
/// a config file fall back to these defaults individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_mult: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: 5,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_mult: 2.0,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("sma_period", self.sma_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_period", self.bollinger_period),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidWindow { name, value });
            }
        }
        if self.macd_slow <= self.macd_fast {
            return Err(ConfigError::MacdPeriodOrder {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }
        if !self.bollinger_mult.is_finite() || self.bollinger_mult <= 0.0 {
            return Err(ConfigError::InvalidBollingerMult(self.bollinger_mult));
        }
        Ok(())
    }
}

/// Extract the close series from a bar slice.
pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create bars from close prices for testing.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar::new(base_date + chrono::Duration::days(i as i64), close))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_validate() {
        assert!(IndicatorParams::default().validate().is_ok());
    }

    #[test]
    fn zero_window_rejected() {
        let params = IndicatorParams {
            sma_period: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidWindow {
                name: "sma_period",
                ..
            })
        ));
    }

    #[test]
    fn macd_slow_must_exceed_fast() {
        let params = IndicatorParams {
            macd_fast: 26,
            macd_slow: 12,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::MacdPeriodOrder { .. })
        ));
    }

    #[test]
    fn bollinger_mult_must_be_positive() {
        let params = IndicatorParams {
            bollinger_mult: -2.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidBollingerMult(_))
        ));
    }
}
