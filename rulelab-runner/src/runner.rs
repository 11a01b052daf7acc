//! Backtest runner — wires together config, indicators, signals, engine,
//! and metrics.
//!
//! `run_single_backtest()` takes pre-loaded bars so callers decide where
//! data comes from (CSV file, synthetic generator, tests). The CLI
//! resolves the data source from the config's `[data]` section first.

use rulelab_core::domain::{Bar, Signal};
use rulelab_core::indicators::IndicatorSeries;
use rulelab_core::{generate_signals, run_backtest, BacktestResult, EngineError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BacktestConfig;
use crate::data::{dataset_hash, LoadError};
use crate::metrics::PerformanceMetrics;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigFileError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    /// Content hash of the configuration that produced this report.
    pub run_id: String,
    /// Content hash of the bar series that produced this report.
    pub dataset_hash: String,
    /// Whether the bars came from the synthetic generator.
    pub synthetic_data: bool,
    pub config: BacktestConfig,
    pub result: BacktestResult,
    pub metrics: PerformanceMetrics,
    /// Per-bar signal stream, aligned with the input bars. Reporting
    /// layers use it to place buy/sell markers.
    pub signals: Vec<Signal>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run one backtest over pre-loaded bars.
pub fn run_single_backtest(
    config: &BacktestConfig,
    bars: &[Bar],
    synthetic_data: bool,
) -> Result<RunReport, RunError> {
    let series = IndicatorSeries::compute(bars, &config.signal.indicators);
    let signals = generate_signals(bars, &series, &config.signal.weights);
    let result = run_backtest(bars, &signals, &series, &config.engine_config())?;
    let metrics = PerformanceMetrics::compute(
        &result.portfolio_values,
        &result.trades,
        result.initial_capital,
        result.final_capital,
    );

    Ok(RunReport {
        schema_version: SCHEMA_VERSION,
        symbol: config.backtest.symbol.clone(),
        start_date: bars.first().map(|b| b.date.to_string()).unwrap_or_default(),
        end_date: bars.last().map(|b| b.date.to_string()).unwrap_or_default(),
        run_id: config.run_id(),
        dataset_hash: dataset_hash(bars),
        synthetic_data,
        config: config.clone(),
        result,
        metrics,
        signals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_synthetic_bars;
    use chrono::NaiveDate;

    fn config() -> BacktestConfig {
        BacktestConfig::from_toml(
            r#"
[backtest]
symbol = "TEST"
initial_capital = 10000.0
"#,
        )
        .unwrap()
    }

    fn bars() -> Vec<Bar> {
        generate_synthetic_bars(
            "TEST",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[test]
    fn run_produces_consistent_report() {
        let report = run_single_backtest(&config(), &bars(), true).unwrap();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.symbol, "TEST");
        assert_eq!(report.start_date, "2024-01-01");
        assert!(report.synthetic_data);
        assert_eq!(report.signals.len(), report.result.bar_count);
        assert_eq!(
            report.result.bar_count,
            report.result.warmup_bars + report.result.bars_simulated
        );
        assert!((report.metrics.total_return - report.result.total_return).abs() < 1e-9);
    }

    #[test]
    fn run_is_deterministic() {
        let a = run_single_backtest(&config(), &bars(), true).unwrap();
        let b = run_single_backtest(&config(), &bars(), true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_bars_yield_insufficient_data_report() {
        let report = run_single_backtest(&config(), &[], false).unwrap();
        assert!(report.result.is_insufficient_data());
        assert_eq!(report.result.final_capital, 10_000.0);
        assert!(report.signals.is_empty());
        assert_eq!(report.start_date, "");
    }

    #[test]
    fn invalid_bars_surface_engine_error() {
        let mut data = bars();
        data[10].close = -1.0;
        let err = run_single_backtest(&config(), &data, true).unwrap_err();
        assert!(matches!(err, RunError::Engine(EngineError::InvalidBar { .. })));
    }

    #[test]
    fn report_serialization_roundtrip() {
        let report = run_single_backtest(&config(), &bars(), true).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let deser: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, deser);
    }
}
