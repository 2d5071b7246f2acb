//! Benchmark suite for the CAPM estimation pipeline.

use capm_api::CapmConfig;
use capm_core::{align, covariance_beta, regression_fit, resample, CapmEstimator};
use capm_spi::{BetaMethod, Frequency, PriceSeries};
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_daily_series(symbol: &str, days: usize, drift: f64, phase: f64) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let mut dates = Vec::with_capacity(days);
    let mut prices = Vec::with_capacity(days);
    for i in 0..days {
        let trend = i as f64 * drift;
        let noise = (i as f64 * 0.3 + phase).sin() * 3.0;
        dates.push(start + Days::new(i as u64));
        prices.push(100.0 + trend + noise);
    }
    PriceSeries::from_parts(symbol, &dates, &prices).unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");

    for days in [1_000, 5_000, 20_000].iter() {
        let asset = create_daily_series("ASSET", *days, 0.05, 0.0);
        let benchmark = create_daily_series("INDEX", *days, 0.03, 0.7);

        for method in [BetaMethod::Regression, BetaMethod::Covariance] {
            let estimator =
                CapmEstimator::new(CapmConfig::default().with_beta_method(method)).unwrap();
            group.bench_with_input(
                BenchmarkId::new(method.to_string(), days),
                &(&asset, &benchmark),
                |b, (asset, benchmark)| {
                    b.iter(|| estimator.estimate(black_box(asset), black_box(benchmark)))
                },
            );
        }
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let asset = create_daily_series("ASSET", 10_000, 0.05, 0.0);
    let benchmark = create_daily_series("INDEX", 10_000, 0.03, 0.7);
    let returns = align(&asset, &benchmark, Frequency::Weekly).unwrap();

    let mut group = c.benchmark_group("Stages");

    for frequency in [Frequency::Weekly, Frequency::Monthly, Frequency::Quarterly] {
        group.bench_function(BenchmarkId::new("resample", frequency), |b| {
            b.iter(|| resample(black_box(&asset), frequency))
        });
    }
    group.bench_function("align_weekly", |b| {
        b.iter(|| align(black_box(&asset), black_box(&benchmark), Frequency::Weekly))
    });
    group.bench_function("regression_fit", |b| {
        b.iter(|| regression_fit(black_box(&returns)))
    });
    group.bench_function("covariance_beta", |b| {
        b.iter(|| covariance_beta(black_box(&returns)))
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_stages);
criterion_main!(benches);
