//! Reporting and export — JSON and CSV artifact generation.
//!
//! Three artifact kinds per run:
//! - **manifest.json** — the full `RunReport`, schema-versioned
//! - **trades.csv / portfolio.csv** — the ledger and value series for
//!   external analysis tools
//! - **signals.csv** — per-bar signal and position-change column for
//!   plotting buy/sell markers
//!
//! Persisted JSON includes a `schema_version` field; unknown versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rulelab_core::domain::{Bar, Signal, Trade};

use crate::data::BarRecord;
use crate::runner::{RunReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `RunReport` to pretty JSON.
pub fn export_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize RunReport to JSON")
}

/// Deserialize a `RunReport`, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<RunReport> {
    let report: RunReport =
        serde_json::from_str(json).context("failed to deserialize RunReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the trade ledger as CSV.
///
/// Columns: date, action, price, shares, reason (empty for signal-driven
/// exits and entries).
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "action", "price", "shares", "reason"])?;
    for t in trades {
        let date = t.date.to_string();
        let price = format!("{:.6}", t.price);
        let shares = format!("{:.6}", t.shares);
        wtr.write_record([
            date.as_str(),
            t.action.as_str(),
            price.as_str(),
            shares.as_str(),
            t.reason.map(|r| r.as_str()).unwrap_or(""),
        ])?;
    }

    finish_csv(wtr)
}

/// Export the portfolio value series as CSV with bar_index and value
/// columns.
pub fn export_portfolio_csv(portfolio_values: &[f64]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["bar_index", "value"])?;
    for (i, v) in portfolio_values.iter().enumerate() {
        wtr.write_record([&i.to_string(), &format!("{:.2}", v)])?;
    }
    finish_csv(wtr)
}

/// Export the per-bar signal stream as CSV.
///
/// The `position_change` column is the diff of consecutive signal values
/// (+1/−1/0 scale): non-zero rows are where charts place entry/exit
/// markers.
pub fn export_signals_csv(bars: &[Bar], signals: &[Signal]) -> Result<String> {
    if bars.len() != signals.len() {
        bail!(
            "bar/signal length mismatch: {} bars, {} signals",
            bars.len(),
            signals.len()
        );
    }

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["bar_index", "date", "close", "signal", "position_change"])?;
    for (i, (bar, signal)) in bars.iter().zip(signals).enumerate() {
        let change = if i == 0 {
            0
        } else {
            signal.value() - signals[i - 1].value()
        };
        wtr.write_record([
            &i.to_string(),
            &bar.date.to_string(),
            &format!("{:.6}", bar.close),
            &signal.value().to_string(),
            &change.to_string(),
        ])?;
    }
    finish_csv(wtr)
}

/// Serialize bars to CSV (the inverse of `data::load_bars_csv`). Used by
/// the sample-data command.
pub fn bars_to_csv(bars: &[Bar]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for bar in bars {
        wtr.serialize(BarRecord::from(bar))?;
    }
    finish_csv(wtr)
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a single run.
///
/// Creates `{symbol}_{run_id_prefix}/` under `output_dir` containing
/// `manifest.json`, `trades.csv`, `portfolio.csv`, and `signals.csv`.
/// The directory name is content-addressed, so re-running an identical
/// config overwrites its own artifacts instead of piling up copies.
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &RunReport, bars: &[Bar], output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("{}_{}", report.symbol, &report.run_id[..12.min(report.run_id.len())]);
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("manifest.json"), export_json(report)?)?;
    std::fs::write(
        run_dir.join("trades.csv"),
        export_trades_csv(&report.result.trades)?,
    )?;
    std::fs::write(
        run_dir.join("portfolio.csv"),
        export_portfolio_csv(&report.result.portfolio_values)?,
    )?;
    std::fs::write(
        run_dir.join("signals.csv"),
        export_signals_csv(bars, &report.signals)?,
    )?;

    Ok(run_dir)
}
