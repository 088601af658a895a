// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Fast Rect Index: fill a flat list and query it.

use fast_rect_index::{FastRectDataList, Rect};

fn main() {
    let mut list: FastRectDataList<&str> =
        FastRectDataList::new(Rect::new(0, 0, 1024, 1024)).unwrap();
    let _ = list.add(Rect::new(10, 10, 50, 50), "a");
    let _ = list.add(Rect::new(500, 500, 20, 20), "b");
    // Outside the bound: stored with a full mask on the x axis and always checked exactly.
    let _ = list.add(Rect::new(-300, 20, 100, 10), "c");

    let hits: Vec<_> = list.enumerate(Rect::new(0, 0, 100, 100)).collect();
    println!("hits in (0,0,100,100): {hits:?}");

    let hits: Vec<_> = list.enumerate(Rect::new(-250, 0, 10, 100)).collect();
    println!("hits left of the bound: {hits:?}");
}
