//! Performance metrics — pure functions over the value series and ledger.
//!
//! Every metric is a pure function: portfolio values and/or trades in,
//! scalar out. No dependencies on the runner or the engine loop.

use rulelab_core::domain::{ExitReason, Trade, TradeAction};
use serde::{Deserialize, Serialize};

/// One completed entry/exit pair reconstructed from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub entry_date: chrono::NaiveDate,
    pub exit_date: chrono::NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub shares: f64,
    pub pnl: f64,
    pub exit_reason: Option<ExitReason>,
}

impl RoundTrip {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    /// Return on the round trip as a fraction of entry cost.
    pub fn return_pct(&self) -> f64 {
        if self.entry_price == 0.0 || self.shares == 0.0 {
            return 0.0;
        }
        self.pnl / (self.entry_price * self.shares)
    }
}

/// Pair the alternating BUY/SELL ledger into round trips.
///
/// The engine guarantees strict alternation starting with BUY, so the
/// ledger pairs cleanly; a trailing unmatched BUY (which the engine's
/// forced close makes impossible) is ignored.
pub fn round_trips(trades: &[Trade]) -> Vec<RoundTrip> {
    trades
        .chunks(2)
        .filter_map(|pair| match pair {
            [buy, sell]
                if buy.action == TradeAction::Buy && sell.action == TradeAction::Sell =>
            {
                Some(RoundTrip {
                    entry_date: buy.date,
                    exit_date: sell.date,
                    entry_price: buy.price,
                    exit_price: sell.price,
                    shares: buy.shares,
                    pnl: (sell.price - buy.price) * buy.shares,
                    exit_reason: sell.reason,
                })
            }
            _ => None,
        })
        .collect()
}

/// Aggregate performance metrics for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Percent return relative to initial capital.
    pub total_return: f64,
    /// Maximum drawdown as a negative fraction (e.g., -0.15).
    pub max_drawdown: f64,
    /// Ledger entries (each BUY and SELL counts).
    pub trade_count: usize,
    /// Completed entry/exit pairs.
    pub round_trip_count: usize,
    /// Fraction of round trips with positive PnL.
    pub win_rate: f64,
    /// Gross profits / gross losses, capped at 100.
    pub profit_factor: f64,
    /// Round trips closed by the stop-loss.
    pub stop_loss_exits: usize,
    /// Round trips closed by the take-profit.
    pub take_profit_exits: usize,
}

impl PerformanceMetrics {
    pub fn compute(
        portfolio_values: &[f64],
        trades: &[Trade],
        initial_capital: f64,
        final_capital: f64,
    ) -> Self {
        let trips = round_trips(trades);
        Self {
            total_return: (final_capital - initial_capital) / initial_capital * 100.0,
            max_drawdown: max_drawdown(portfolio_values),
            trade_count: trades.len(),
            round_trip_count: trips.len(),
            win_rate: win_rate(&trips),
            profit_factor: profit_factor(&trips),
            stop_loss_exits: count_exits(&trips, ExitReason::StopLoss),
            take_profit_exits: count_exits(&trips, ExitReason::TakeProfit),
        }
    }
}

/// Maximum drawdown as a negative fraction; 0.0 for monotone series.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = match values.first() {
        Some(&v) => v,
        None => return 0.0,
    };
    let mut max_dd = 0.0_f64;

    for &v in values {
        if v > peak {
            peak = v;
        }
        if peak > 0.0 {
            let dd = (v - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Fraction of round trips that were winners; 0.0 with no trips.
pub fn win_rate(trips: &[RoundTrip]) -> f64 {
    if trips.is_empty() {
        return 0.0;
    }
    trips.iter().filter(|t| t.is_winner()).count() as f64 / trips.len() as f64
}

/// Gross profits / gross losses, capped at 100 for all-winner runs.
pub fn profit_factor(trips: &[RoundTrip]) -> f64 {
    if trips.is_empty() {
        return 0.0;
    }
    let gross_profit: f64 = trips.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_loss: f64 = trips
        .iter()
        .filter(|t| t.pnl < 0.0)
        .map(|t| t.pnl.abs())
        .sum();

    if gross_loss < 1e-10 {
        return if gross_profit > 0.0 { 100.0 } else { 0.0 };
    }
    (gross_profit / gross_loss).min(100.0)
}

fn count_exits(trips: &[RoundTrip], reason: ExitReason) -> usize {
    trips
        .iter()
        .filter(|t| t.exit_reason == Some(reason))
        .count()
}
