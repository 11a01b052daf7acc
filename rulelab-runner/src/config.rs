//! Serializable backtest configuration.
//!
//! A complete run is described by one TOML file:
//!
//! ```toml
//! [backtest]
//! symbol = "AAPL"
//! initial_capital = 10000.0
//! stop_loss = 0.05
//! take_profit = 0.10
//!
//! [signal]
//! sma_period = 5
//! rsi_period = 14
//! trend_weight = 0.5
//!
//! [data]
//! csv = "bars/aapl.csv"
//! ```
//!
//! Every field has a documented default; an empty `[signal]` section (or
//! none at all) runs the stock strategy. Validation happens on load, so a
//! config that parses is a config that will simulate.

use rulelab_core::indicators::IndicatorParams;
use rulelab_core::{ConfigError, EngineConfig, SignalParams};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Complete configuration for a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub backtest: BacktestSection,
    #[serde(default)]
    pub signal: SignalSection,
    #[serde(default)]
    pub data: DataSection,
}

/// Capital and risk-exit settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSection {
    pub symbol: String,
    #[serde(default = "default_capital")]
    pub initial_capital: f64,
    #[serde(default = "default_stop_loss")]
    pub stop_loss: f64,
    #[serde(default = "default_take_profit")]
    pub take_profit: f64,
}

fn default_capital() -> f64 {
    10_000.0
}

fn default_stop_loss() -> f64 {
    0.05
}

fn default_take_profit() -> f64 {
    0.10
}

/// Indicator windows plus vote weights/thresholds, flattened into one
/// TOML table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalSection {
    #[serde(flatten)]
    pub indicators: IndicatorParams,
    #[serde(flatten)]
    pub weights: SignalParams,
}

/// Where bars come from. A CSV path when present; otherwise the runner
/// falls back to synthetic data over the given range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl BacktestConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml(input: &str) -> Result<Self, ConfigFileError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Run every validator the core exposes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine_config().validate()?;
        self.signal.indicators.validate()?;
        self.signal.weights.validate()?;
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(
            self.backtest.initial_capital,
            self.backtest.stop_loss,
            self.backtest.take_profit,
        )
    }

    /// Deterministic hash id for this configuration.
    ///
    /// Two runs with identical configs share a RunId, which makes result
    /// directories and reproducibility checks content-addressable.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_toml() -> &'static str {
        r#"
[backtest]
symbol = "AAPL"
"#
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = BacktestConfig::from_toml(minimal_toml()).unwrap();
        assert_eq!(config.backtest.symbol, "AAPL");
        assert_eq!(config.backtest.initial_capital, 10_000.0);
        assert_eq!(config.backtest.stop_loss, 0.05);
        assert_eq!(config.backtest.take_profit, 0.10);
        assert_eq!(config.signal.indicators, IndicatorParams::default());
        assert_eq!(config.signal.weights, SignalParams::default());
        assert_eq!(config.data.csv, None);
    }

    #[test]
    fn full_config_parses() {
        let config = BacktestConfig::from_toml(
            r#"
[backtest]
symbol = "MSFT"
initial_capital = 50000.0
stop_loss = 0.03
take_profit = 0.15

[signal]
sma_period = 10
rsi_period = 7
trend_weight = 0.6
momentum_weight = 0.2
macd_weight = 0.2
threshold = 0.4

[data]
csv = "bars/msft.csv"
start_date = "2024-01-02"
end_date = "2024-12-31"
"#,
        )
        .unwrap();

        assert_eq!(config.backtest.initial_capital, 50_000.0);
        assert_eq!(config.signal.indicators.sma_period, 10);
        assert_eq!(config.signal.weights.threshold, 0.4);
        assert_eq!(config.data.csv, Some(PathBuf::from("bars/msft.csv")));
        assert_eq!(
            config.data.start_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
    }

    #[test]
    fn invalid_values_rejected_on_load() {
        let result = BacktestConfig::from_toml(
            r#"
[backtest]
symbol = "AAPL"
stop_loss = 1.5
"#,
        );
        assert!(matches!(result, Err(ConfigFileError::Invalid(_))));
    }

    #[test]
    fn malformed_toml_rejected() {
        let result = BacktestConfig::from_toml("not = [valid");
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn run_id_is_deterministic() {
        let a = BacktestConfig::from_toml(minimal_toml()).unwrap();
        let b = BacktestConfig::from_toml(minimal_toml()).unwrap();
        assert_eq!(a.run_id(), b.run_id());
        assert!(!a.run_id().is_empty());
    }

    #[test]
    fn run_id_changes_with_params() {
        let a = BacktestConfig::from_toml(minimal_toml()).unwrap();
        let mut b = a.clone();
        b.backtest.stop_loss = 0.07;
        assert_ne!(a.run_id(), b.run_id());
    }

    #[test]
    fn config_toml_roundtrip() {
        let config = BacktestConfig::from_toml(minimal_toml()).unwrap();
        let encoded = toml::to_string(&config).unwrap();
        let decoded = BacktestConfig::from_toml(&encoded).unwrap();
        assert_eq!(config, decoded);
    }
}
