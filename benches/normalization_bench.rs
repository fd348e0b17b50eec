//! Normalizer throughput benchmarks.
//!
//! Every sampler row passes through both normalizers, so their cost scales
//! with the length of the benchmark run being plotted.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `size` | Size parsing per unit family, plus fallbacks |
//! | `percent` | Percentage parsing |
//! | `mixed_corpus` | A realistic sampler column of mixed units |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalization_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use benchplot_core::{Normalizer, PercentNormalizer, SizeNormalizer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

fn size_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("size");
    let normalizer = SizeNormalizer::default();

    let inputs = [
        ("binary", "512MiB"),
        ("decimal", "1.5GB"),
        ("bytes", "1048576B"),
        ("unknown_unit", "7PB"),
        ("docker_pair", "12.5MiB / 7.6GiB"),
        ("garbage", "n/a"),
    ];

    group.throughput(Throughput::Elements(1));
    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::new(name, input), input, |b, input| {
            b.iter(|| normalizer.normalize(black_box(input)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Percent
// ---------------------------------------------------------------------------

fn percent_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("percent");
    let normalizer = PercentNormalizer;

    group.throughput(Throughput::Elements(1));
    for input in ["12.5%", "187.25%", "0%", "--"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| normalizer.normalize(black_box(input)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Mixed corpus
// ---------------------------------------------------------------------------

fn mixed_corpus_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_corpus");
    let normalizer = SizeNormalizer::default();

    let units = ["B", "KB", "MB", "GB", "KiB", "MiB", "GiB", ""];
    let corpus: Vec<String> = (0..1_000usize)
        .map(|i| format!("{}.{}{}", i % 4096, i % 10, units[i % units.len()]))
        .collect();

    group.throughput(Throughput::Elements(corpus.len() as u64));
    group.bench_function("1k_cells", |b| {
        b.iter(|| {
            corpus
                .iter()
                .map(|cell| normalizer.normalize(black_box(cell)))
                .sum::<f64>()
        })
    });
    group.finish();
}

criterion_group!(benches, size_bench, percent_bench, mixed_corpus_bench);
criterion_main!(benches);
