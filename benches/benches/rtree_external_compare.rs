// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fast_rect_index::{FastRectPyramid, Rect};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: i32, cell: i32) -> Vec<Rect> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(x * cell, y * cell, cell, cell));
        }
    }
    out
}

/// Closed pixel corners, so rstar's inclusive envelope test matches positive-area overlap.
fn pixel_corners(r: &Rect) -> ([i32; 2], [i32; 2]) {
    ([r.left(), r.top()], [r.right() - 1, r.bottom() - 1])
}

fn to_rstar_rects(v: &[Rect]) -> Vec<Rectangle<[i32; 2]>> {
    v.iter()
        .map(|r| {
            let (lo, hi) = pixel_corners(r);
            Rectangle::from_corners(lo, hi)
        })
        .collect()
}

fn bench_rtree_external_compare_i32(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_i32");
    for &n in &[64_i32, 128] {
        let rects = gen_grid_rects(n, 10);
        let query = Rect::new(100, 100, 400, 400);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("pyramid_build_query_n{n}"), |b| {
            b.iter_batched(
                FastRectPyramid::<u32>::default,
                |mut pyramid| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        pyramid.add(r, i as u32).unwrap();
                    }
                    let hits: usize = pyramid.enumerate(query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let (lo, hi) = pixel_corners(&query);
                    let aabb = AABB::from_corners(lo, hi);
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_i32);
criterion_main!(benches);
