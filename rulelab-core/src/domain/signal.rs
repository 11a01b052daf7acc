//! Trade signals and position-change events.

use serde::{Deserialize, Serialize};

/// Discrete per-bar trade decision.
///
/// Numeric values (+1/−1/0) match the convention used throughout the
/// weighted-vote combination and in exported artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

/// A bar where the raw signal value transitioned from the previous bar.
///
/// Used by reporting layers to place entry/exit markers on charts. The
/// simulator does not consume these — it re-reads the raw signal each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    pub bar_index: usize,
    pub from: Signal,
    pub to: Signal,
}

/// Diff consecutive signals and report the bars where the value changes.
///
/// Bar 0 never appears: there is no previous signal to diff against.
pub fn position_changes(signals: &[Signal]) -> Vec<PositionChange> {
    signals
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .map(|(i, w)| PositionChange {
            bar_index: i + 1,
            from: w[0],
            to: w[1],
        })
        .collect()
}
