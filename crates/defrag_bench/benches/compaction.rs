//! Compaction benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use defrag_bench::utils::{random_layout, uniform_layout};
use defrag_core::{checksum, decode_str, CompactionConfig, CompactionMode, Compactor};

/// Benchmark decoding layout lines.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for files in [1_000, 10_000].iter() {
        let digits = random_layout(*files, 9);
        group.throughput(Throughput::Bytes(digits.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(files), &digits, |b, digits| {
            b.iter(|| {
                let list = decode_str(black_box(digits)).unwrap();
                black_box(list);
            });
        });
    }

    group.finish();
}

/// Benchmark a full compaction pass in both modes.
fn bench_compact(c: &mut Criterion) {
    for mode in [CompactionMode::WholeFile, CompactionMode::Fragment] {
        let mut group = c.benchmark_group(format!("compact_{mode}"));
        let compactor = Compactor::new(CompactionConfig::new().mode(mode));

        for files in [1_000, 10_000].iter() {
            let layout = decode_str(&random_layout(*files, 9)).unwrap();
            group.throughput(Throughput::Elements(*files as u64));
            group.bench_with_input(BenchmarkId::from_parameter(files), &layout, |b, layout| {
                b.iter_batched(
                    || layout.clone(),
                    |mut list| {
                        let report = compactor.compact(&mut list).unwrap();
                        black_box(report);
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }

        group.finish();
    }
}

/// Benchmark layouts where gaps are too small for most files.
fn bench_compact_no_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_no_fit");
    // Every gap is one unit and every file is two, so each search runs to the end
    group.sample_size(20);

    for files in [1_000, 5_000].iter() {
        let layout = decode_str(&uniform_layout(*files, 2, 1)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(files), &layout, |b, layout| {
            b.iter_batched(
                || layout.clone(),
                |mut list| {
                    let report = Compactor::with_defaults().compact(&mut list).unwrap();
                    black_box(report);
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark the checksum over a compacted layout.
fn bench_checksum(c: &mut Criterion) {
    let mut layout = decode_str(&random_layout(10_000, 9)).unwrap();
    Compactor::with_defaults().compact(&mut layout).unwrap();

    c.bench_function("checksum_10000", |b| {
        b.iter(|| black_box(checksum(black_box(&layout)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_compact,
    bench_compact_no_fit,
    bench_checksum
);
criterion_main!(benches);
