//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and losses:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; both zero → 50.

use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let values = closes(bars);
        let n = values.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period + 1 {
            return result;
        }

        // Per-bar close-to-close changes; changes[0] is undefined.
        let changes: Vec<f64> = std::iter::once(f64::NAN)
            .chain(values.windows(2).map(|w| w[1] - w[0]))
            .collect();

        // Seed averages over the first `period` changes.
        let seed = &changes[1..=self.period];
        if seed.iter().any(|c| c.is_nan()) {
            return result;
        }
        let mut avg_gain = seed.iter().filter(|&&c| c > 0.0).sum::<f64>() / self.period as f64;
        let mut avg_loss = -seed.iter().filter(|&&c| c < 0.0).sum::<f64>() / self.period as f64;
        result[self.period] = rsi_value(avg_gain, avg_loss);

        // Wilder smoothing for the rest.
        let alpha = 1.0 / self.period as f64;
        for i in (self.period + 1)..n {
            let change = changes[i];
            if change.is_nan() {
                return result;
            }
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);
            avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
            avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
            result[i] = rsi_value(avg_gain, avg_loss);
        }

        result
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
