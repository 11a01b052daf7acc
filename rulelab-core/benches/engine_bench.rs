//! Criterion benchmarks for the engine hot paths.
//!
//! Benchmarks:
//! 1. Indicator precompute (full set over the bar series)
//! 2. Signal generation (weighted vote per bar)
//! 3. Full backtest (indicators + signals + simulation)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rulelab_core::domain::Bar;
use rulelab_core::indicators::{IndicatorParams, IndicatorSeries};
use rulelab_core::{generate_signals, run_backtest, EngineConfig, SignalParams};

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.01;
            Bar::new(base_date + chrono::Duration::days(i as i64), close)
        })
        .collect()
}

fn bench_indicator_precompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_precompute");
    let params = IndicatorParams::default();

    for n in [252, 2520] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| IndicatorSeries::compute(black_box(bars), &params));
        });
    }
    group.finish();
}

fn bench_signal_generation(c: &mut Criterion) {
    let bars = make_bars(2520);
    let series = IndicatorSeries::compute(&bars, &IndicatorParams::default());
    let params = SignalParams::default();

    c.bench_function("signal_generation_2520", |b| {
        b.iter(|| generate_signals(black_box(&bars), &series, &params));
    });
}

fn bench_full_backtest(c: &mut Criterion) {
    let bars = make_bars(2520);
    let ind_params = IndicatorParams::default();
    let sig_params = SignalParams::default();
    let config = EngineConfig::default();

    c.bench_function("full_backtest_2520", |b| {
        b.iter(|| {
            let series = IndicatorSeries::compute(black_box(&bars), &ind_params);
            let signals = generate_signals(&bars, &series, &sig_params);
            run_backtest(&bars, &signals, &series, &config)
        });
    });
}

criterion_group!(
    benches,
    bench_indicator_precompute,
    bench_signal_generation,
    bench_full_backtest
);
criterion_main!(benches);
