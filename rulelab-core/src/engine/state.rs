//! Position state — the single mutable accumulator of the simulation.

use serde::{Deserialize, Serialize};

/// Either all cash or all shares. Exactly one variant holds at any time;
/// transitioning between them is the only way capital changes hands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionState {
    /// No position; `cash` is the full account value.
    Flat { cash: f64 },
    /// Fully invested; cash is zero by construction.
    Long { shares: f64, entry_price: f64 },
}

impl PositionState {
    pub fn is_long(&self) -> bool {
        matches!(self, PositionState::Long { .. })
    }

    /// Mark-to-market value at the given price: cash if flat, shares ×
    /// price if long.
    pub fn market_value(&self, price: f64) -> f64 {
        match *self {
            PositionState::Flat { cash } => cash,
            PositionState::Long { shares, .. } => shares * price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_value_is_cash() {
        let state = PositionState::Flat { cash: 10_000.0 };
        assert!(!state.is_long());
        assert_eq!(state.market_value(123.0), 10_000.0);
    }

    #[test]
    fn long_value_tracks_price() {
        let state = PositionState::Long {
            shares: 100.0,
            entry_price: 100.0,
        };
        assert!(state.is_long());
        assert_eq!(state.market_value(110.0), 11_000.0);
        assert_eq!(state.market_value(90.0), 9_000.0);
    }
}
