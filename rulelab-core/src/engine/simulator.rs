//! Bar-by-bar backtest simulation.
//!
//! A pure left-to-right fold over the bar sequence with one mutable
//! accumulator: the position state plus the trade ledger and the
//! portfolio-value series. One bar is fully processed before the next
//! begins; there is no feedback from the simulation into the signals.

use crate::domain::{Bar, ExitReason, Signal, Trade, TradeAction};
use crate::engine::config::EngineConfig;
use crate::engine::result::BacktestResult;
use crate::engine::state::PositionState;
use crate::error::EngineError;
use crate::indicators::IndicatorSeries;

/// Replay a signal stream against capital under stop-loss/take-profit
/// constraints.
///
/// Bars whose short SMA is still undefined are skipped entirely — no
/// state transition, no portfolio-value entry. While long, risk exits are
/// evaluated before the signal: stop-loss, then take-profit, then a SELL
/// signal. A position still open after the last bar is force-closed at
/// that bar's close with reason `EndOfPeriod`.
///
/// Invalid input aborts the whole run: any non-positive or non-finite
/// close, out-of-order or duplicate dates, or a signal/indicator series
/// whose length differs from the bars.
pub fn run_backtest(
    bars: &[Bar],
    signals: &[Signal],
    indicators: &IndicatorSeries,
    config: &EngineConfig,
) -> Result<BacktestResult, EngineError> {
    config.validate()?;

    if signals.len() != bars.len() {
        return Err(EngineError::LengthMismatch {
            bars: bars.len(),
            signals: signals.len(),
        });
    }
    if indicators.len() != bars.len() {
        return Err(EngineError::IndicatorLengthMismatch {
            bars: bars.len(),
            indicators: indicators.len(),
        });
    }
    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_valid() {
            return Err(EngineError::InvalidBar {
                index: i,
                close: bar.close,
            });
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(EngineError::UnorderedBars {
                index: i,
                date: bar.date,
            });
        }
    }

    let stop_mult = 1.0 - config.stop_loss;
    let profit_mult = 1.0 + config.take_profit;

    let mut state = PositionState::Flat {
        cash: config.initial_capital,
    };
    let mut trades: Vec<Trade> = Vec::new();
    let mut portfolio_values: Vec<f64> = Vec::new();
    let mut warmup_bars = 0usize;
    let mut last_processed: Option<(chrono::NaiveDate, f64)> = None;

    for (i, bar) in bars.iter().enumerate() {
        if indicators.at(i).sma.is_none() {
            warmup_bars += 1;
            continue;
        }

        let price = bar.close;
        let signal = signals[i];

        state = match state {
            PositionState::Flat { cash } => {
                if signal == Signal::Buy {
                    // Full-capital sizing: every unit of cash becomes shares.
                    let shares = cash / price;
                    trades.push(Trade {
                        date: bar.date,
                        action: TradeAction::Buy,
                        price,
                        shares,
                        reason: None,
                    });
                    PositionState::Long {
                        shares,
                        entry_price: price,
                    }
                } else {
                    PositionState::Flat { cash }
                }
            }
            PositionState::Long {
                shares,
                entry_price,
            } => {
                // Risk exits take precedence over the signal, stop-loss first.
                let exit = if price <= entry_price * stop_mult {
                    Some(Some(ExitReason::StopLoss))
                } else if price >= entry_price * profit_mult {
                    Some(Some(ExitReason::TakeProfit))
                } else if signal == Signal::Sell {
                    Some(None)
                } else {
                    // HOLD, or BUY while already long: no pyramiding.
                    None
                };

                match exit {
                    Some(reason) => {
                        trades.push(Trade {
                            date: bar.date,
                            action: TradeAction::Sell,
                            price,
                            shares,
                            reason,
                        });
                        PositionState::Flat {
                            cash: shares * price,
                        }
                    }
                    None => PositionState::Long {
                        shares,
                        entry_price,
                    },
                }
            }
        };

        portfolio_values.push(state.market_value(price));
        last_processed = Some((bar.date, price));
    }

    let Some((last_date, last_price)) = last_processed else {
        // Zero-length input or all bars inside the warm-up window.
        return Ok(BacktestResult::empty(
            config.initial_capital,
            bars.len(),
            warmup_bars,
        ));
    };

    let final_capital = match state {
        PositionState::Flat { cash } => cash,
        PositionState::Long { shares, .. } => {
            trades.push(Trade {
                date: last_date,
                action: TradeAction::Sell,
                price: last_price,
                shares,
                reason: Some(ExitReason::EndOfPeriod),
            });
            shares * last_price
        }
    };

    let bars_simulated = portfolio_values.len();
    Ok(BacktestResult {
        initial_capital: config.initial_capital,
        final_capital,
        total_return: (final_capital - config.initial_capital) / config.initial_capital * 100.0,
        trades,
        portfolio_values,
        bar_count: bars.len(),
        warmup_bars,
        bars_simulated,
    })
}
