//! Benchmarks for rankfx filters.
//!
//! Run with: `cargo bench -p rankfx-bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use rankfx_bench::test_image;
use rankfx_ops::select::{ExtremeTree, Min, RankWindow};
use rankfx_ops::{min_filter, parallel, percentile_filter};

/// Benchmark the raw selection structures.
fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let values: Vec<f32> = (0..10_000).map(|i| ((i * 7919) % 1000) as f32).collect();
    group.throughput(Throughput::Elements(values.len() as u64));

    for radius in [1usize, 8, 32] {
        group.bench_with_input(BenchmarkId::new("extreme_tree_push", radius), &values, |b, v| {
            let mut tree = ExtremeTree::<Min>::new(radius);
            b.iter(|| {
                for &x in v {
                    tree.push(black_box(x));
                }
                tree.query()
            })
        });

        let capacity = (2 * radius + 1) * (2 * radius + 1);
        group.bench_with_input(BenchmarkId::new("rank_window_slide", radius), &values, |b, v| {
            let mut window = RankWindow::new(capacity);
            b.iter(|| {
                window.clear();
                for (i, &x) in v.iter().enumerate() {
                    let slot = i % capacity;
                    if i >= capacity {
                        window.remove(slot);
                    }
                    window.insert(slot, black_box(x));
                    window.rebalance(0.5);
                }
                window.pivot()
            })
        });
    }

    group.finish();
}

/// Benchmark min/max filters against image size.
fn bench_extremum(c: &mut Criterion) {
    let mut group = c.benchmark_group("extremum");

    for size in [128usize, 512] {
        let img = test_image(size, size, 3);
        group.throughput(Throughput::Elements(img.len() as u64));

        for radius in [2i32, 16] {
            let id = format!("{size}x{size}/r{radius}");
            group.bench_with_input(BenchmarkId::new("min_filter", &id), &img, |b, img| {
                b.iter(|| {
                    let mut work = img.clone();
                    min_filter(&mut work, radius).unwrap();
                    work
                })
            });
            group.bench_with_input(BenchmarkId::new("max_filter_par", &id), &img, |b, img| {
                b.iter(|| {
                    let mut work = img.clone();
                    parallel::max_filter(&mut work, radius).unwrap();
                    work
                })
            });
        }
    }

    group.finish();
}

/// Benchmark disk percentile filters.
fn bench_percentile(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentile");
    group.sample_size(20);

    let img = test_image(256, 256, 1);
    group.throughput(Throughput::Elements(img.len() as u64));

    for radius in [1i32, 4, 12] {
        group.bench_with_input(BenchmarkId::new("median", radius), &img, |b, img| {
            b.iter(|| percentile_filter(black_box(img), radius, 0.5).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("median_par", radius), &img, |b, img| {
            b.iter(|| parallel::percentile_filter(black_box(img), radius, 0.5).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select, bench_extremum, bench_percentile);
criterion_main!(benches);
