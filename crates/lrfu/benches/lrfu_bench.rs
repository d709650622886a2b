//! LRFU engine benchmarks
//!
//! Covers insert, hit, miss and eviction paths for both eviction strategies.
//!
//! Run with: `cargo bench --bench lrfu_bench -p lrfu`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lrfu::{EvictionStrategy, Lrfu, LrfuConfig};

fn engine(capacity: usize, strategy: EvictionStrategy) -> Lrfu<u64, String> {
    let config = LrfuConfig::builder().max_entries(capacity).lambda(0.01).strategy(strategy).build();
    Lrfu::with_config(config).unwrap()
}

// ============================================================================
// Recency strategy
// ============================================================================

fn bench_set_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("lrfu_set_evicting");

    for capacity in [100, 1000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut cache = engine(capacity, EvictionStrategy::Recency);
            let mut counter = 0u64;
            b.iter(|| {
                cache.set(black_box(counter), black_box(format!("value_{}", counter)));
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lrfu_get_hit");

    for capacity in [100, 1000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut cache = engine(capacity, EvictionStrategy::Recency);
            // Pre-populate
            for i in 0..capacity {
                cache.set(i as u64, format!("value_{}", i));
            }
            let mut counter = 0u64;
            b.iter(|| {
                let key = counter % (capacity as u64);
                let result = black_box(cache.get(&black_box(key)).is_some());
                black_box(result);
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_get_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("lrfu_get_miss");

    for capacity in [100, 1000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut cache = engine(capacity, EvictionStrategy::Recency);
            for i in 0..capacity {
                cache.set(i as u64, format!("value_{}", i));
            }
            let mut counter = capacity as u64;
            b.iter(|| {
                let result = black_box(cache.get(&black_box(counter)).is_none());
                black_box(result);
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Minimum CRF strategy
// ============================================================================

fn bench_set_evicting_minimum_crf(c: &mut Criterion) {
    let mut group = c.benchmark_group("lrfu_set_evicting_minimum_crf");

    for capacity in [100, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut cache = engine(capacity, EvictionStrategy::MinimumCrf);
            let mut counter = 0u64;
            b.iter(|| {
                cache.set(black_box(counter), black_box(format!("value_{}", counter)));
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Real-world scenarios
// ============================================================================

/// Hot working set interleaved with a one-shot scan.
fn bench_scan_with_hot_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("lrfu_scan_with_hot_set");

    for strategy in [EvictionStrategy::Recency, EvictionStrategy::MinimumCrf] {
        group.bench_function(format!("{:?}", strategy), |b| {
            b.iter_batched(
                || engine(256, strategy),
                |mut cache| {
                    for round in 0..1_000u64 {
                        cache.set(round % 32, String::new());
                        cache.set(10_000 + round, String::new());
                    }
                    black_box(cache.stats());
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(recency, bench_set_evicting, bench_get_hit, bench_get_miss);

criterion_group!(minimum_crf, bench_set_evicting_minimum_crf);

criterion_group!(real_world, bench_scan_with_hot_set);

criterion_main!(recency, minimum_crf, real_world);
