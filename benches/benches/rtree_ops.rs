// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stratum_rtree::{Bounds, BoxDistance, Fanout, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Bounds<2>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Bounds::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, side: f64) -> Vec<Bounds<2>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (extent - side);
            let y0 = rng.next_f64() * (extent - side);
            Bounds::from_xywh(x0, y0, side, side)
        })
        .collect()
}

fn gen_random_points(count: usize, extent: f64) -> Vec<Bounds<2>> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| Bounds::point([rng.next_f64() * extent, rng.next_f64() * extent]))
        .collect()
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Bounds<2>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Bounds::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn build(rects: &[Bounds<2>], fanout: Fanout) -> RTree<2, u32> {
    let mut tree = RTree::with_fanout(fanout);
    for (i, r) in rects.iter().enumerate() {
        let _ = tree.insert(r.min, r.max, i as u32);
    }
    tree
}

fn count_hits(tree: &RTree<2, u32>, query: Bounds<2>) -> usize {
    let mut hits = 0;
    tree.search(query.min, query.max, |_, _| {
        hits += 1;
        true
    });
    hits
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| black_box(build(&rects, Fanout::default()).len()));
        });
    }
    let rects = gen_random_rects(16_384, 2000.0, 12.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("random_16k", |b| {
        b.iter(|| black_box(build(&rects, Fanout::default()).len()));
    });
    let rects = gen_clustered_rects(64, 256, 80.0);
    group.bench_function("clustered_16k", |b| {
        b.iter(|| black_box(build(&rects, Fanout::default()).len()));
    });
    group.finish();
}

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout");
    let rects = gen_random_rects(16_384, 2000.0, 12.0);
    let query = Bounds::from_xywh(800.0, 800.0, 400.0, 400.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    for &(max, min) in &[(4usize, 2usize), (8, 4), (16, 6), (32, 12)] {
        let Ok(fanout) = Fanout::new(max, min) else {
            continue;
        };
        group.bench_function(format!("build_query_m{}", max), |b| {
            b.iter(|| {
                let tree = build(&rects, fanout);
                black_box(count_hits(&tree, query))
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let rects = gen_random_rects(65_536, 4000.0, 8.0);
    let tree = build(&rects, Fanout::default());
    for &side in &[10.0, 100.0, 1000.0] {
        let query = Bounds::from_xywh(1500.0, 1500.0, side, side);
        group.bench_function(format!("window_{}", side), |b| {
            b.iter(|| black_box(count_hits(&tree, query)));
        });
    }
    group.bench_function("scan_all", |b| {
        b.iter(|| {
            let mut n = 0;
            tree.scan(|_, _| {
                n += 1;
                true
            });
            black_box(n)
        });
    });
    group.finish();
}

fn bench_nearby(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearby");
    let points = gen_random_points(65_536, 4000.0);
    let tree = build(&points, Fanout::default());
    for &k in &[1usize, 10, 100] {
        group.bench_function(format!("knn_k{}", k), |b| {
            b.iter(|| {
                let algo = BoxDistance::point([2000.0, 2000.0]);
                let sum: f64 = tree.nearby_iter(algo).take(k).map(|(_, _, d)| d).sum();
                black_box(sum)
            });
        });
    }
    group.bench_function("drain_all", |b| {
        b.iter(|| {
            let algo = BoxDistance::point([0.0, 0.0]);
            black_box(tree.nearby_iter(algo).count())
        });
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    let rects = gen_random_rects(16_384, 2000.0, 12.0);
    group.throughput(Throughput::Elements((rects.len() / 2) as u64));
    group.bench_function("half_random_16k", |b| {
        b.iter_batched(
            || build(&rects, Fanout::default()),
            |mut tree| {
                for (i, r) in rects.iter().enumerate().step_by(2) {
                    let _ = tree.remove(r.min, r.max, &(i as u32));
                }
                black_box(tree.len())
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_fanout,
    bench_search,
    bench_nearby,
    bench_remove
);
criterion_main!(benches);
