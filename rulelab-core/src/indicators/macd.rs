//! Moving Average Convergence Divergence (MACD).
//!
//! Two series, exposed as separate `Indicator` instances (the same
//! pattern Bollinger uses for its bands):
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal_period), computed over the defined suffix
//!   of the line so the leading NaNs don't taint the seed.
//!
//! Lookbacks: line = slow - 1; signal = slow + signal_period - 2.

use super::ema::ema_of_series;
use super::{closes, Indicator};
use crate::domain::Bar;

/// Which MACD series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdSeries {
    Line,
    Signal,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal_period: usize,
    series: MacdSeries,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal_period: usize) -> Self {
        Self::build(fast, slow, signal_period, MacdSeries::Line)
    }

    pub fn signal(fast: usize, slow: usize, signal_period: usize) -> Self {
        Self::build(fast, slow, signal_period, MacdSeries::Signal)
    }

    fn build(fast: usize, slow: usize, signal_period: usize, series: MacdSeries) -> Self {
        assert!(fast >= 1, "MACD fast period must be >= 1");
        assert!(slow > fast, "MACD slow period must exceed fast period");
        assert!(signal_period >= 1, "MACD signal period must be >= 1");
        let suffix = match series {
            MacdSeries::Line => "line",
            MacdSeries::Signal => "signal",
        };
        Self {
            fast,
            slow,
            signal_period,
            series,
            name: format!("macd_{suffix}_{fast}_{slow}_{signal_period}"),
        }
    }

    fn compute_line(&self, values: &[f64]) -> Vec<f64> {
        let fast_ema = ema_of_series(values, self.fast);
        let slow_ema = ema_of_series(values, self.slow);
        fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(f, s)| f - s)
            .collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.series {
            MacdSeries::Line => self.slow - 1,
            MacdSeries::Signal => self.slow + self.signal_period - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let values = closes(bars);
        let line = self.compute_line(&values);
        match self.series {
            MacdSeries::Line => line,
            MacdSeries::Signal => {
                let mut result = vec![f64::NAN; line.len()];
                let offset = self.slow - 1;
                if line.len() > offset {
                    let smoothed = ema_of_series(&line[offset..], self.signal_period);
                    for (i, v) in smoothed.into_iter().enumerate() {
                        result[offset + i] = v;
                    }
                }
                result
            }
        }
    }
}
