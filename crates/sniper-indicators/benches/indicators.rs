//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sniper_core::traits::{BarIndicator, Indicator, MultiOutputIndicator};
use sniper_core::types::Bar;
use sniper_indicators::{
    BollingerBands, Ema, LinearRegression, Macd, Mfi, PriorExtremes, Rsi, Sma, Stochastic,
};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_test_bars(size: usize) -> Vec<Bar> {
    generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, close)| {
            let volume = 1_000_000.0 + (i as f64 * 0.7).cos() * 250_000.0;
            Bar::new(i as i64 * 86_400_000, close, close * 1.01, close * 0.99, close, volume)
        })
        .collect()
}

fn benchmark_moving_averages(c: &mut Criterion) {
    let mut group = c.benchmark_group("MovingAverage");

    for size in [250, 1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sma200", size), &data, |b, data| {
            let sma = Sma::new(200);
            b.iter(|| sma.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("ema20", size), &data, |b, data| {
            let ema = Ema::new(20);
            b.iter(|| ema.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_oscillators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Oscillators");

    for size in [250, 1000, 10000].iter() {
        let data = generate_test_data(*size);
        let bars = generate_test_bars(*size);

        group.bench_with_input(BenchmarkId::new("rsi14", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("macd", size), &data, |b, data| {
            let macd = Macd::new();
            b.iter(|| macd.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("stochastic", size), &bars, |b, bars| {
            let stoch = Stochastic::new();
            b.iter(|| stoch.calculate(black_box(bars)))
        });

        group.bench_with_input(BenchmarkId::new("mfi14", size), &bars, |b, bars| {
            let mfi = Mfi::new(14);
            b.iter(|| mfi.calculate(black_box(bars)))
        });
    }

    group.finish();
}

fn benchmark_channels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Channels");

    for size in [250, 1000, 10000].iter() {
        let data = generate_test_data(*size);
        let bars = generate_test_bars(*size);

        group.bench_with_input(BenchmarkId::new("bollinger", size), &data, |b, data| {
            let bb = BollingerBands::new();
            b.iter(|| bb.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("linreg50", size), &data, |b, data| {
            let lr = LinearRegression::new();
            b.iter(|| lr.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("prior_extremes50", size), &bars, |b, bars| {
            let levels = PriorExtremes::new(50);
            b.iter(|| levels.calculate(black_box(bars)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_moving_averages,
    benchmark_oscillators,
    benchmark_channels
);
criterion_main!(benches);
