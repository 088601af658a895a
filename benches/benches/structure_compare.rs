// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fast_rect_index::{
    FastRectDataList, FastRectNode, FastRectNodeSettings, FastRectPyramid, Intersect, Rect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BOUND: Rect = Rect::new(0, 0, 4096, 4096);

fn gen_grid_rects(n: i32, cell: i32) -> Vec<Rect> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(x * cell, y * cell, cell, cell));
        }
    }
    out
}

fn gen_random_rects(count: usize, extent: i32, max_side: i32, seed: u64) -> Vec<Rect> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Rect::new(
                rng.random_range(0..extent - max_side),
                rng.random_range(0..extent - max_side),
                rng.random_range(1..=max_side),
                rng.random_range(1..=max_side),
            )
        })
        .collect()
}

fn gen_clustered_rects(clusters: usize, per_cluster: usize, spread: i32) -> Vec<Rect> {
    let mut rng = StdRng::seed_from_u64(0xC1A5_7E55);
    let mut out = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let cx = rng.random_range(spread..4096 - 2 * spread);
        let cy = rng.random_range(spread..4096 - 2 * spread);
        for _ in 0..per_cluster {
            out.push(Rect::new(
                cx + rng.random_range(-spread..spread),
                cy + rng.random_range(-spread..spread),
                rng.random_range(1..8),
                rng.random_range(1..8),
            ));
        }
    }
    out
}

fn gen_queries(count: usize, side: i32) -> Vec<Rect> {
    let mut rng = StdRng::seed_from_u64(0xBADC_F00D);
    (0..count)
        .map(|_| {
            Rect::new(
                rng.random_range(0..4096 - side),
                rng.random_range(0..4096 - side),
                side,
                side,
            )
        })
        .collect()
}

fn build_list(rects: &[Rect]) -> FastRectDataList<u32> {
    let mut list = FastRectDataList::new(BOUND).unwrap();
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = list.add(r, i as u32);
    }
    list
}

fn build_node(rects: &[Rect]) -> FastRectNode<u32> {
    let mut node = FastRectNode::new(BOUND, FastRectNodeSettings::default()).unwrap();
    for (i, r) in rects.iter().copied().enumerate() {
        node.add(r, i as u32).unwrap();
    }
    node
}

fn build_pyramid(rects: &[Rect]) -> FastRectPyramid<u32> {
    let mut pyramid = FastRectPyramid::default();
    for (i, r) in rects.iter().copied().enumerate() {
        pyramid.add(r, i as u32).unwrap();
    }
    pyramid
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for (name, rects) in [
        ("grid_128", gen_grid_rects(128, 32)),
        ("random_20k", gen_random_rects(20_000, 4096, 64, 1)),
        ("clustered_20k", gen_clustered_rects(40, 500, 100)),
    ] {
        group.throughput(Throughput::Elements(rects.len() as u64));
        group.bench_function(format!("list_{name}"), |b| {
            b.iter(|| black_box(build_list(&rects)));
        });
        group.bench_function(format!("node_{name}"), |b| {
            b.iter(|| black_box(build_node(&rects)));
        });
        group.bench_function(format!("pyramid_{name}"), |b| {
            b.iter(|| black_box(build_pyramid(&rects)));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let queries = gen_queries(256, 96);
    for (name, rects) in [
        ("grid_128", gen_grid_rects(128, 32)),
        ("random_20k", gen_random_rects(20_000, 4096, 64, 2)),
        ("clustered_20k", gen_clustered_rects(40, 500, 100)),
    ] {
        group.throughput(Throughput::Elements(queries.len() as u64));

        group.bench_function(format!("brute_force_{name}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for q in &queries {
                    hits += rects.iter().filter(|r| r.intersects(q)).count();
                }
                black_box(hits)
            });
        });

        let list = build_list(&rects);
        group.bench_function(format!("list_{name}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for q in &queries {
                    hits += list.enumerate(*q).count();
                }
                black_box(hits)
            });
        });

        let node = build_node(&rects);
        group.bench_function(format!("node_{name}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for q in &queries {
                    hits += node.enumerate(*q).count();
                }
                black_box(hits)
            });
        });

        let pyramid = build_pyramid(&rects);
        group.bench_function(format!("pyramid_{name}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for q in &queries {
                    hits += pyramid.enumerate(*q).count();
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_first_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_hit");
    let rects = gen_random_rects(20_000, 4096, 64, 3);
    let queries = gen_queries(256, 16);
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("list_find_first", |b| {
        b.iter_batched(
            || build_list(&rects),
            |list| {
                let found = queries
                    .iter()
                    .filter(|q| list.rects().find_first(Intersect, **q).is_some())
                    .count();
                black_box(found)
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_first_hit);
criterion_main!(benches);
