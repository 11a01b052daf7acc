//! RuleLab CLI — run backtests and generate sample data.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file or inline flags
//! - `sample-data` — write a deterministic synthetic bar CSV

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use rulelab_core::domain::Trade;
use rulelab_runner::config::{BacktestConfig, BacktestSection, DataSection, SignalSection};
use rulelab_runner::data::{generate_synthetic_bars, load_bars_csv};
use rulelab_runner::export::{bars_to_csv, save_artifacts};
use rulelab_runner::metrics::round_trips;
use rulelab_runner::runner::{run_single_backtest, RunReport};

#[derive(Parser)]
#[command(
    name = "rulelab",
    about = "RuleLab CLI — rule-based strategy backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file or inline flags.
    Run {
        /// Path to a TOML config file. Inline flags override nothing when
        /// this is given.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bar CSV file (date,close[,high,low,volume]).
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Symbol label for reports (required without --config).
        #[arg(long)]
        symbol: Option<String>,

        /// Initial capital.
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,

        /// Stop-loss fraction (e.g., 0.05 = 5%).
        #[arg(long, default_value_t = 0.05)]
        stop_loss: f64,

        /// Take-profit fraction (e.g., 0.10 = 10%).
        #[arg(long, default_value_t = 0.10)]
        take_profit: f64,

        /// Use deterministic synthetic data when no CSV is configured.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Start date for synthetic data (YYYY-MM-DD).
        #[arg(long, default_value = "2024-01-01")]
        start: String,

        /// End date for synthetic data (YYYY-MM-DD).
        #[arg(long, default_value = "2024-12-31")]
        end: String,

        /// Output directory for result artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print the full trade ledger, not just the summary.
        #[arg(long, default_value_t = false)]
        trades: bool,

        /// Print the metrics as one JSON line (for scripting).
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a deterministic synthetic bar CSV.
    SampleData {
        /// Symbol seed: the same symbol always yields the same series.
        #[arg(long, default_value = "SAMPLE")]
        symbol: String,

        /// Start date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-01-01")]
        start: String,

        /// End date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-12-31")]
        end: String,

        /// Output file path.
        #[arg(long, default_value = "sample_bars.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            csv,
            symbol,
            capital,
            stop_loss,
            take_profit,
            synthetic,
            start,
            end,
            output_dir,
            trades,
            json,
        } => run_backtest_cmd(
            config,
            csv,
            symbol,
            capital,
            stop_loss,
            take_profit,
            synthetic,
            &start,
            &end,
            &output_dir,
            trades,
            json,
        ),
        Commands::SampleData {
            symbol,
            start,
            end,
            out,
        } => run_sample_data(&symbol, &start, &end, &out),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_backtest_cmd(
    config_path: Option<PathBuf>,
    csv: Option<PathBuf>,
    symbol: Option<String>,
    capital: f64,
    stop_loss: f64,
    take_profit: f64,
    synthetic: bool,
    start: &str,
    end: &str,
    output_dir: &Path,
    print_trades: bool,
    print_json: bool,
) -> Result<()> {
    let config = if let Some(path) = config_path {
        if csv.is_some() || symbol.is_some() {
            bail!("--config is mutually exclusive with --csv/--symbol");
        }
        BacktestConfig::from_file(&path)?
    } else {
        let Some(symbol) = symbol else {
            bail!("one of --config or --symbol is required");
        };
        build_inline_config(symbol, csv, capital, stop_loss, take_profit)?
    };

    // Resolve bars: configured CSV first, then the synthetic fallback.
    let (bars, is_synthetic) = match &config.data.csv {
        Some(path) => (load_bars_csv(path)?, false),
        None => {
            if !synthetic {
                bail!(
                    "no bar CSV configured — pass --csv, set [data].csv, or \
                     opt into --synthetic data"
                );
            }
            let (start_date, end_date) = parse_range(
                config.data.start_date,
                config.data.end_date,
                start,
                end,
            )?;
            eprintln!(
                "WARNING: using synthetic data for {} — results will be tagged as synthetic",
                config.backtest.symbol
            );
            (
                generate_synthetic_bars(&config.backtest.symbol, start_date, end_date),
                true,
            )
        }
    };

    let report = run_single_backtest(&config, &bars, is_synthetic)?;

    if print_json {
        println!("{}", serde_json::to_string(&report.metrics)?);
    } else {
        print_summary(&report);
        if print_trades {
            print_ledger(&report.result.trades);
        }
    }

    let run_dir = save_artifacts(&report, &bars, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn build_inline_config(
    symbol: String,
    csv: Option<PathBuf>,
    capital: f64,
    stop_loss: f64,
    take_profit: f64,
) -> Result<BacktestConfig> {
    let config = BacktestConfig {
        backtest: BacktestSection {
            symbol,
            initial_capital: capital,
            stop_loss,
            take_profit,
        },
        signal: SignalSection::default(),
        data: DataSection {
            csv,
            start_date: None,
            end_date: None,
        },
    };
    config.validate()?;
    Ok(config)
}

fn parse_range(
    config_start: Option<NaiveDate>,
    config_end: Option<NaiveDate>,
    flag_start: &str,
    flag_end: &str,
) -> Result<(NaiveDate, NaiveDate)> {
    let start = match config_start {
        Some(d) => d,
        None => parse_date(flag_start)?,
    };
    let end = match config_end {
        Some(d) => d,
        None => parse_date(flag_end)?,
    };
    if end < start {
        bail!("end date {end} precedes start date {start}");
    }
    Ok((start, end))
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{input}' (expected YYYY-MM-DD)"))
}

fn run_sample_data(symbol: &str, start: &str, end: &str, out: &Path) -> Result<()> {
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;
    if end_date < start_date {
        bail!("end date {end_date} precedes start date {start_date}");
    }

    let bars = generate_synthetic_bars(symbol, start_date, end_date);
    std::fs::write(out, bars_to_csv(&bars)?)
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!("Wrote {} bars to {}", bars.len(), out.display());
    Ok(())
}

fn print_summary(report: &RunReport) {
    let result = &report.result;
    let metrics = &report.metrics;

    println!();
    println!("=== Backtest Result ===");
    println!("Symbol:         {}", report.symbol);
    println!(
        "Period:         {} to {}",
        report.start_date, report.end_date
    );
    println!(
        "Bars:           {} ({} warmup)",
        result.bar_count, result.warmup_bars
    );
    if result.is_insufficient_data() {
        println!();
        println!("Insufficient data: nothing was simulated.");
        return;
    }
    println!();
    println!("--- Performance ---");
    println!("Initial Capital: {:>12.2}", result.initial_capital);
    println!("Final Capital:   {:>12.2}", result.final_capital);
    println!("Total Return:    {:>11.2}%", result.total_return);
    println!("Max Drawdown:    {:>11.2}%", metrics.max_drawdown * 100.0);
    println!("Trades:          {:>8}", metrics.trade_count);
    println!("Round Trips:     {:>8}", metrics.round_trip_count);
    println!("Win Rate:        {:>11.1}%", metrics.win_rate * 100.0);
    println!("Profit Factor:   {:>8.2}", metrics.profit_factor);
    println!("Stop-Loss Exits: {:>8}", metrics.stop_loss_exits);
    println!("Take-Profit Exits:{:>7}", metrics.take_profit_exits);
    if report.synthetic_data {
        println!();
        println!("WARNING: Results based on SYNTHETIC data");
    }
    println!();
}

fn print_ledger(trades: &[Trade]) {
    if trades.is_empty() {
        println!("No trades.");
        return;
    }

    println!("--- Trades ---");
    println!(
        "{:<12} {:<5} {:>12} {:>14} {:<14}",
        "Date", "Side", "Price", "Shares", "Reason"
    );
    println!("{}", "-".repeat(60));
    for trade in trades {
        println!(
            "{:<12} {:<5} {:>12.2} {:>14.4} {:<14}",
            trade.date.to_string(),
            trade.action.as_str(),
            trade.price,
            trade.shares,
            trade.reason.map(|r| r.as_str()).unwrap_or("-"),
        );
    }

    println!();
    println!("--- Round Trips ---");
    for trip in round_trips(trades) {
        println!(
            "{} -> {}  pnl {:>10.2}  ({:>6.2}%)",
            trip.entry_date,
            trip.exit_date,
            trip.pnl,
            trip.return_pct() * 100.0
        );
    }
    println!();
}
