//! Resampling benchmarks over synthetic tick streams.
//!
//! Run with: `cargo bench --package tickbar-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickbar_bench::{SyntheticConfig, covering_range, synthetic_records, synthetic_ticks};
use tickbar_lib::{CsvFormatter, Formatter, Interval, aggregate, clean, filter_outliers};

const INTERVALS: [&str; 4] = ["1s", "1m", "1h", "1d"];

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for ticks in [10_000, 100_000, 1_000_000] {
        let stream = synthetic_ticks(&SyntheticConfig {
            ticks,
            ..Default::default()
        });
        let Some(range) = covering_range(&stream) else {
            continue;
        };
        group.throughput(Throughput::Elements(ticks as u64));

        for expr in INTERVALS {
            let interval: Interval = expr.parse().unwrap();
            group.bench_with_input(
                BenchmarkId::new(expr, ticks),
                &stream,
                |b, stream| {
                    b.iter(|| aggregate(black_box(stream), interval, range).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn outlier_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_outliers");

    for len in [16, 1_024, 65_536] {
        let prices: Vec<f64> = synthetic_ticks(&SyntheticConfig {
            ticks: len,
            ..Default::default()
        })
        .iter()
        .map(|t| t.price)
        .collect();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &prices, |b, prices| {
            b.iter(|| filter_outliers(black_box(prices)));
        });
    }

    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let ticks = synthetic_ticks(&SyntheticConfig::default());
    let records = synthetic_records(&ticks);
    let range = covering_range(&ticks).unwrap();
    let interval: Interval = "1m".parse().unwrap();

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("clean", |b| {
        b.iter(|| clean(black_box(records.clone())));
    });

    group.bench_function("clean_aggregate_csv", |b| {
        b.iter(|| {
            let (ticks, _) = clean(records.clone());
            let bars = aggregate(&ticks, interval, range).unwrap();
            CsvFormatter::new()
                .write_bars(&bars, std::io::sink())
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    aggregate_benchmark,
    outlier_benchmark,
    pipeline_benchmark
);
criterion_main!(benches);
