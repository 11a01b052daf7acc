//! RuleLab Runner — backtest orchestration on top of `rulelab-core`.
//!
//! This crate wires the pure engine to the outside world:
//! - TOML config files with validation and deterministic run ids
//! - Bar loading from CSV, with a synthetic-data fallback
//! - Performance metrics (drawdown, win rate, round trips)
//! - Artifact export (manifest JSON, trade/portfolio/signal CSVs)
//! - The single-backtest runner used by the CLI

pub mod config;
pub mod data;
pub mod export;
pub mod metrics;
pub mod runner;

pub use config::{BacktestConfig, ConfigFileError};
pub use data::{dataset_hash, generate_synthetic_bars, load_bars_csv, LoadError};
pub use export::{export_json, save_artifacts};
pub use metrics::{round_trips, PerformanceMetrics, RoundTrip};
pub use runner::{run_single_backtest, RunError, RunReport};
