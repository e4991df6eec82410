//! Benchmarks for the expirable set.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use expirable_set::ExpirableSet;
use std::sync::Arc;
use std::time::Duration;

/// Benchmark single-threaded membership and writes.
fn bench_single_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_threaded");

    let set = ExpirableSet::with_capacity(100_000);
    for i in 0..10_000u64 {
        set.add(i);
    }

    group.bench_function("contains_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(set.contains(&(i % 10_000)));
            i += 1;
        });
    });

    group.bench_function("contains_missing", |b| {
        let mut i = 10_000u64;
        b.iter(|| {
            black_box(set.contains(&i));
            i += 1;
        });
    });

    group.bench_function("add_new", |b| {
        let set = ExpirableSet::with_capacity(1_000_000);
        let mut i = 0u64;
        b.iter(|| {
            set.add(i);
            i += 1;
        });
    });

    group.bench_function("add_with_expire", |b| {
        let set = ExpirableSet::new();
        let mut i = 0u64;
        b.iter(|| {
            set.add_with_expire(i, Duration::from_secs(300));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark the full-scan operations that sweep.
fn bench_sweeps(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweeps");

    for size in [1_000u64, 10_000] {
        let set = ExpirableSet::new();
        for i in 0..size {
            set.add_with_expire(i, Duration::from_secs(300));
        }

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("size", size), &set, |b, set| {
            b.iter(|| black_box(set.size()));
        });
        group.bench_with_input(BenchmarkId::new("get_all", size), &set, |b, set| {
            b.iter(|| black_box(set.get_all()));
        });
    }

    group.finish();
}

/// Benchmark binary set operations.
fn bench_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");

    let a: ExpirableSet<u64> = (0..10_000).collect();
    let b: ExpirableSet<u64> = (5_000..15_000).collect();

    group.bench_function("union", |bench| bench.iter(|| black_box(a.union(&b))));
    group.bench_function("intersect", |bench| {
        bench.iter(|| black_box(a.intersect(&b)))
    });
    group.bench_function("different", |bench| {
        bench.iter(|| black_box(a.different(&b)))
    });
    group.bench_function("is_subset", |bench| {
        bench.iter(|| black_box(a.is_subset(&b)))
    });

    group.finish();
}

/// Benchmark concurrent mixed operations.
fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");

    for num_threads in [2u64, 4, 8] {
        let set = Arc::new(ExpirableSet::with_capacity(100_000));
        for i in 0..10_000u64 {
            set.add(i);
        }

        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(
            BenchmarkId::new("mixed_ops", num_threads),
            &num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let handles: Vec<_> = (0..num_threads)
                        .map(|t| {
                            let set = Arc::clone(&set);
                            std::thread::spawn(move || {
                                for i in 0..1000 {
                                    let elem = (t * 1000 + i) % 10_000;
                                    if i % 5 == 0 {
                                        set.add(elem);
                                    } else {
                                        black_box(set.contains(&elem));
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_threaded,
    bench_sweeps,
    bench_algebra,
    bench_concurrent,
);
criterion_main!(benches);
