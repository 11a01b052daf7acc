//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One time step of market data for a single symbol.
///
/// Only the close is required; high/low/volume are carried for reporting
/// layers that want them (candle charts, liquidity columns) and are never
/// read by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            high: None,
            low: None,
            volume: None,
        }
    }

    /// Returns true if the close is a usable price: finite and > 0.
    ///
    /// Division by the close determines share counts, so zero and negative
    /// prices are rejected before simulation (see `EngineError::InvalidBar`).
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close: 103.0,
            high: Some(105.0),
            low: Some(98.0),
            volume: Some(50_000),
        }
    }

    #[test]
    fn bar_is_valid() {
        assert!(sample_bar().is_valid());
    }

    #[test]
    fn bar_rejects_nonpositive_close() {
        let mut bar = sample_bar();
        bar.close = 0.0;
        assert!(!bar.is_valid());
        bar.close = -5.0;
        assert!(!bar.is_valid());
    }

    #[test]
    fn bar_rejects_non_finite_close() {
        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(!bar.is_valid());
        bar.close = f64::INFINITY;
        assert!(!bar.is_valid());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }

    #[test]
    fn bar_deserializes_without_optional_fields() {
        let bar: Bar = serde_json::from_str(r#"{"date":"2024-01-02","close":100.5}"#).unwrap();
        assert_eq!(bar.close, 100.5);
        assert_eq!(bar.high, None);
        assert_eq!(bar.volume, None);
    }
}
