// Copyright 2025 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stratum_rtree::{Bounds, BoxDistance};

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

type RstarRect = GeomWithData<Rectangle<[f64; 2]>, u32>;

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

fn to_rstar_rects(v: &[Bounds<2>]) -> Vec<RstarRect> {
    v.iter()
        .enumerate()
        .map(|(i, r)| GeomWithData::new(Rectangle::from_corners(r.min, r.max), i as u32))
        .collect()
}

fn build_stratum(rects: &[Bounds<2>]) -> stratum_rtree::RTree<2, u32> {
    let mut tree = stratum_rtree::RTree::new();
    for (i, r) in rects.iter().enumerate() {
        let _ = tree.insert(r.min, r.max, i as u32);
    }
    tree
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = Bounds::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("stratum_build_query_n{}", n), |b| {
            b.iter(|| {
                let tree = build_stratum(&rects);
                let mut hits = 0_usize;
                tree.search(query.min, query.max, |_, _| {
                    hits += 1;
                    true
                });
                black_box(hits);
            });
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(query.min, query.max);
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        let stratum = build_stratum(&rects);
        let rstar = RTree::bulk_load(to_rstar_rects(&rects));
        group.bench_function(format!("stratum_nearest_10_n{}", n), |b| {
            b.iter(|| {
                let algo = BoxDistance::point([333.3, 444.4]);
                let ids: u32 = stratum.nearby_iter(algo).take(10).map(|(_, v, _)| *v).sum();
                black_box(ids);
            });
        });
        group.bench_function(format!("rstar_nearest_10_n{}", n), |b| {
            b.iter(|| {
                let ids: u32 = rstar
                    .nearest_neighbor_iter(&[333.3, 444.4])
                    .take(10)
                    .map(|r| r.data)
                    .sum();
                black_box(ids);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
