//! Benchmarks for TieredCache.
//!
//! Run with: `cargo bench --bench tiered`

mod common;

use std::time::Instant;

use common::workload::{Workload, WorkloadSpec, run_tier_hits};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use tierkit::cache::{DefaultPolicy, FnPolicy, TieredCache};

type Cache = TieredCache<u64, u64, DefaultPolicy, 3>;

fn configured() -> Cache {
    let mut cache = Cache::with_capacity(DefaultPolicy, 8192);
    cache.configure_level(0, 1024, usize::MAX);
    cache.configure_level(1, 4096, usize::MAX);
    cache
}

// ============================================================================
// Micro operations
// ============================================================================

fn bench_get_hot_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiered_micro");
    group.throughput(Throughput::Elements(1024));

    group.bench_function("get_hot_hit", |b| {
        let mut cache = configured();
        for i in 0..1024u64 {
            cache.get_ptr(&i, None);
        }
        b.iter(|| {
            for i in 0..1024u64 {
                let _ = std::hint::black_box(cache.get_ptr(&std::hint::black_box(i), None));
            }
        })
    });

    group.bench_function("find_no_touch", |b| {
        let mut cache = configured();
        for i in 0..4096u64 {
            cache.get_ptr(&i, None);
        }
        b.iter(|| {
            for i in 0..1024u64 {
                let _ = std::hint::black_box(cache.find_ptr(&std::hint::black_box(i * 4)));
            }
        })
    });

    group.finish();
}

// ============================================================================
// Cascade churn (every insert pushes an entry down)
// ============================================================================

fn bench_cascade_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiered_cascade");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("insert_cascade", |b| {
        b.iter_batched(
            || {
                let mut cache = configured();
                for i in 0..5120u64 {
                    cache.get_ptr(&i, None);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.get_ptr(&std::hint::black_box(i + 100_000), None);
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("promote_cold", |b| {
        b.iter_batched(
            || {
                let mut cache = configured();
                for i in 0..5120u64 {
                    cache.get_ptr(&i, None);
                }
                cache
            },
            |mut cache| {
                // the oldest keys sit in tier 1; pull them back up
                for i in 0..4096u64 {
                    cache.get_ptr(&std::hint::black_box(i), Some(0));
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Memory-weighted policy
// ============================================================================

fn bench_mem_weighted(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiered_mem");
    group.throughput(Throughput::Elements(2048));

    group.bench_function("vec_values", |b| {
        b.iter_batched(
            || {
                let policy = FnPolicy::new(|key: &u64, _level| Some(vec![0u8; (*key % 64) as usize]));
                let mut cache: TieredCache<u64, Vec<u8>, _, 2> = TieredCache::new(policy);
                cache.configure_level(0, usize::MAX, 16 * 1024);
                cache
            },
            |mut cache| {
                for i in 0..2048u64 {
                    cache.get_ptr(&std::hint::black_box(i), None);
                }
                cache
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Workload-based tier distribution
// ============================================================================

fn bench_workload_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiered_workload");
    let operations = 100_000usize;
    group.throughput(Throughput::Elements(operations as u64));

    let specs = [
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("scan", Workload::Scan),
    ];

    for (name, workload) in specs {
        group.bench_function(name, |b| {
            b.iter_custom(|iters| {
                let mut total = std::time::Duration::default();
                for _ in 0..iters {
                    let mut cache = configured();
                    let mut generator = WorkloadSpec {
                        universe: 16_384,
                        workload,
                        seed: 42,
                    }
                    .generator();
                    let start = Instant::now();
                    let hits = run_tier_hits(&mut cache, &mut generator, operations);
                    let _ = std::hint::black_box(hits.hot_rate());
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

criterion_group!(micro_ops, bench_get_hot_hit);
criterion_group!(cascade, bench_cascade_churn, bench_mem_weighted);
criterion_group!(workloads, bench_workload_tiers);
criterion_main!(micro_ops, cascade, workloads);
