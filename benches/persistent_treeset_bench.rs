//! Benchmark for `PersistentTreeSet` vs standard `BTreeSet`.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_rbtree::persistent::PersistentTreeSet;
use std::collections::BTreeSet;
use std::hint::black_box;

const SIZES: [i32; 3] = [100, 1000, 10000];

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_insert");

    for size in SIZES {
        group.bench_with_input(
            BenchmarkId::new("PersistentTreeSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = PersistentTreeSet::new();
                    for element in 0..size {
                        set = set.insert(black_box(element));
                    }
                    black_box(set)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = BTreeSet::new();
                for element in 0..size {
                    set.insert(black_box(element));
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_contains");

    for size in SIZES {
        let persistent_set: PersistentTreeSet<i32> = (0..size).collect();
        let standard_set: BTreeSet<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentTreeSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let hits = (0..size * 2)
                        .filter(|element| persistent_set.contains(&black_box(*element)))
                        .count();
                    black_box(hits)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let hits = (0..size * 2)
                    .filter(|element| standard_set.contains(&black_box(*element)))
                    .count();
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn benchmark_union(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_union");

    for size in [100, 1000] {
        let evens: PersistentTreeSet<i32> = (0..size).map(|element| element * 2).collect();
        let threes: PersistentTreeSet<i32> = (0..size).map(|element| element * 3).collect();
        let standard_evens: BTreeSet<i32> = evens.iter().copied().collect();
        let standard_threes: BTreeSet<i32> = threes.iter().copied().collect();

        group.bench_with_input(BenchmarkId::new("PersistentTreeSet", size), &size, |bencher, _| {
            bencher.iter(|| black_box(evens.union(&threes)));
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, _| {
            bencher.iter(|| {
                let union: BTreeSet<i32> =
                    standard_evens.union(&standard_threes).copied().collect();
                black_box(union)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_insert, benchmark_contains, benchmark_union);

criterion_main!(benches);
