//! IndicatorSeries — the precomputed indicator set for a bar series.

use super::{Bollinger, Indicator, IndicatorParams, Macd, Rsi, Sma};
use crate::domain::indicator_set::nan_to_none;
use crate::domain::{Bar, IndicatorSet};

/// All indicator series the strategy consumes, precomputed once.
///
/// Internally NaN-seeded `Vec<f64>` per series; `at()` is the only read
/// path and converts NaN to the explicit `None` marker.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    len: usize,
    sma: Vec<f64>,
    rsi: Vec<f64>,
    macd: Vec<f64>,
    macd_signal: Vec<f64>,
    bb_upper: Vec<f64>,
    bb_lower: Vec<f64>,
}

impl IndicatorSeries {
    /// Precompute every series over the full bar slice.
    pub fn compute(bars: &[Bar], params: &IndicatorParams) -> Self {
        Self {
            len: bars.len(),
            sma: Sma::new(params.sma_period).compute(bars),
            rsi: Rsi::new(params.rsi_period).compute(bars),
            macd: Macd::line(params.macd_fast, params.macd_slow, params.macd_signal)
                .compute(bars),
            macd_signal: Macd::signal(params.macd_fast, params.macd_slow, params.macd_signal)
                .compute(bars),
            bb_upper: Bollinger::upper(params.bollinger_period, params.bollinger_mult)
                .compute(bars),
            bb_lower: Bollinger::lower(params.bollinger_period, params.bollinger_mult)
                .compute(bars),
        }
    }

    /// Per-bar view with explicit undefined markers.
    ///
    /// Out-of-range indices yield an all-`None` set.
    pub fn at(&self, bar_index: usize) -> IndicatorSet {
        let pick = |series: &[f64]| series.get(bar_index).copied().and_then(nan_to_none);
        IndicatorSet {
            sma: pick(&self.sma),
            rsi: pick(&self.rsi),
            macd: pick(&self.macd),
            macd_signal: pick(&self.macd_signal),
            bb_upper: pick(&self.bb_upper),
            bb_lower: pick(&self.bb_lower),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
