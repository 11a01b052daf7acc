//! IndicatorSet — per-bar view of the precomputed indicator series.

use serde::{Deserialize, Serialize};

/// Indicator values for a single bar.
///
/// `None` is the explicit "not yet available" marker for warm-up bars —
/// never a sentinel number. Built from the NaN-seeded precomputed series
/// by `IndicatorSeries::at`; consumers (the signal generator, exporters)
/// only ever see this Option view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Short simple moving average of the close.
    pub sma: Option<f64>,
    /// Relative Strength Index in [0, 100].
    pub rsi: Option<f64>,
    /// MACD line (fast EMA − slow EMA).
    pub macd: Option<f64>,
    /// Signal line (EMA of the MACD line).
    pub macd_signal: Option<f64>,
    /// Upper Bollinger band.
    pub bb_upper: Option<f64>,
    /// Lower Bollinger band.
    pub bb_lower: Option<f64>,
}

impl IndicatorSet {
    /// True when the signal generator's required inputs are present.
    pub fn has_required(&self) -> bool {
        self.sma.is_some() && self.rsi.is_some()
    }
}

/// Convert the NaN warm-up convention into the explicit marker.
pub(crate) fn nan_to_none(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
