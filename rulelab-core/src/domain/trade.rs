//! Trade — one executed buy or sell, appended to the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Side of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    /// Stable text form, matching the serde encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        }
    }
}

/// Why a position was closed, when the close was not signal-driven.
///
/// A plain signal-driven SELL carries no reason (`None` in `Trade::reason`),
/// matching the ledger format the reporting layer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    EndOfPeriod,
}

impl ExitReason {
    /// Stable text form, matching the serde encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            ExitReason::StopLoss => "STOP_LOSS",
            ExitReason::TakeProfit => "TAKE_PROFIT",
            ExitReason::EndOfPeriod => "END_OF_PERIOD",
        }
    }
}

/// One executed trade. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub price: f64,
    pub shares: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ExitReason>,
}

impl Trade {
    /// Notional value of the trade (price × shares).
    pub fn notional(&self) -> f64 {
        self.price * self.shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade() -> Trade {
        Trade {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            action: TradeAction::Buy,
            price: 100.0,
            shares: 100.0,
            reason: None,
        }
    }

    #[test]
    fn notional_is_price_times_shares() {
        assert_eq!(sample_trade().notional(), 10_000.0);
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = Trade {
            reason: Some(ExitReason::StopLoss),
            action: TradeAction::Sell,
            ..sample_trade()
        };
        let json = serde_json::to_string(&trade).unwrap();
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deser);
    }

    #[test]
    fn signal_driven_trade_omits_reason_field() {
        let json = serde_json::to_string(&sample_trade()).unwrap();
        assert!(!json.contains("reason"));
    }

    #[test]
    fn exit_reason_serializes_as_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ExitReason::EndOfPeriod).unwrap(),
            "\"END_OF_PERIOD\""
        );
    }

    #[test]
    fn as_str_matches_serde_encoding() {
        assert_eq!(TradeAction::Sell.as_str(), "SELL");
        assert_eq!(ExitReason::StopLoss.as_str(), "STOP_LOSS");
        assert_eq!(
            serde_json::to_string(&ExitReason::StopLoss).unwrap(),
            format!("\"{}\"", ExitReason::StopLoss.as_str())
        );
    }
}
