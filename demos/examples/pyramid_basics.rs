// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pyramid basics.
//!
//! Insert items of very different sizes anywhere on the plane, see which level each one
//! lands in, and query a window.
//!
//! Run:
//! - `cargo run -p fast_rect_demos --example pyramid_basics`

use fast_rect_index::{Error, FastRectPyramid, Rect};

fn main() {
    let mut pyramid: FastRectPyramid<&str> = FastRectPyramid::default();
    println!("radii: {:?}", pyramid.radii());

    // Floating-point layout boxes are snapped outward to whole pixels.
    let button = Rect::from_kurbo_outer(kurbo::Rect::new(10.4, 12.0, 90.6, 40.2));
    let items = [
        (button, "button"),
        (Rect::new(-3, -3, 6, 6), "cursor"),
        (Rect::new(-40_000, 0, 80_000, 1_200), "ruler"),
        (Rect::new(2_000_000, 2_000_000, 16, 16), "far marker"),
    ];
    for (rect, name) in items {
        let level = pyramid.level_of(rect).unwrap();
        pyramid.add(rect, name).unwrap();
        println!("{name:>10} {rect:?} -> level {level}");
    }

    match pyramid.add(Rect::new(0, 0, 0, 10), "empty") {
        Err(Error::TrivialRect(r)) => println!("rejected trivial rect {r:?}"),
        other => println!("unexpected: {other:?}"),
    }

    let window = Rect::new(0, 0, 100, 100);
    let hits: Vec<_> = pyramid.enumerate(window).map(|(_, name)| *name).collect();
    println!("hits in {window:?}: {hits:?}");
    println!(
        "materialized levels: {:?}",
        pyramid.materialized_levels().collect::<Vec<_>>()
    );
}
