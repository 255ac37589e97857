//! Benchmark for `PersistentTreeMap` vs standard `BTreeMap`.
//!
//! The persistent map pays for path copying on every update; these groups
//! show how much that costs against the mutable standard map.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_rbtree::persistent::PersistentTreeMap;
use std::collections::BTreeMap;
use std::hint::black_box;

const SIZES: [i32; 3] = [100, 1000, 10000];

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in SIZES {
        group.bench_with_input(
            BenchmarkId::new("PersistentTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = PersistentTreeMap::new();
                    for index in 0..size {
                        map = map.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for index in 0..size {
                    map.insert(black_box(index), black_box(index * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in SIZES {
        let persistent_map: PersistentTreeMap<i32, i32> =
            (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0_i64;
                    for key in 0..size {
                        if let Some(&value) = persistent_map.get(&black_box(key)) {
                            sum += i64::from(value);
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0_i64;
                for key in 0..size {
                    if let Some(&value) = standard_map.get(&black_box(key)) {
                        sum += i64::from(value);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in SIZES {
        let persistent_map: PersistentTreeMap<i32, i32> =
            (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = persistent_map.clone();
                    for key in 0..size {
                        map = map.remove(&black_box(key));
                    }
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = standard_map.clone();
                for key in 0..size {
                    map.remove(&black_box(key));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// snapshot Benchmark
// =============================================================================

/// Keeps every intermediate version alive, which `BTreeMap` can only match
/// by cloning the whole map per update.
fn benchmark_snapshots(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("snapshots");

    for size in [100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentTreeMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut versions = vec![PersistentTreeMap::new()];
                    for index in 0..size {
                        let next = versions[versions.len() - 1].insert(index, index);
                        versions.push(next);
                    }
                    black_box(versions)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut versions = vec![BTreeMap::new()];
                for index in 0..size {
                    let mut next = versions[versions.len() - 1].clone();
                    next.insert(index, index);
                    versions.push(next);
                }
                black_box(versions)
            });
        });
    }

    group.finish();
}

// =============================================================================
// iter Benchmark
// =============================================================================

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for size in SIZES {
        let persistent_map: PersistentTreeMap<i32, i32> =
            (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        group.bench_with_input(BenchmarkId::new("PersistentTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = persistent_map.iter().map(|(_, value)| i64::from(*value)).sum();
                black_box(sum)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("PersistentTreeMap::fold", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    black_box(persistent_map.fold(0_i64, |sum, _, value| sum + i64::from(*value)))
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = standard_map.values().map(|value| i64::from(*value)).sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_get,
    benchmark_remove,
    benchmark_snapshots,
    benchmark_iter
);

criterion_main!(benches);
