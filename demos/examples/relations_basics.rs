// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relations and masks.
//!
//! Store a few rectangles in a flat list, look at their masks, and run each relation
//! against the same query.
//!
//! Run:
//! - `cargo run -p fast_rect_demos --example relations_basics`

use fast_rect_index::{
    EncompassedBy, EncompassedByNt, Encompassing, EncompassingNt, FastRectList, Identical,
    Intersect, Rect, RectMask32, RectMaskRelation,
};

fn main() {
    let mut list: FastRectList<RectMask32> = FastRectList::new(Rect::new(0, 0, 256, 256)).unwrap();
    for rect in [
        Rect::new(0, 0, 256, 256),
        Rect::new(32, 32, 64, 64),
        Rect::new(40, 40, 8, 8),
        Rect::new(200, 10, 30, 30),
        Rect::new(50, 50, 0, 0),
        Rect::new(-20, 60, 40, 10),
    ] {
        let id = list.add(rect);
        println!("{id}: {rect:?} mask {:?}", list.mask(id).unwrap());
    }

    let query = Rect::new(32, 32, 64, 64);
    println!("query {query:?}");
    show(&list, "intersect", Intersect, query);
    show(&list, "identical", Identical, query);
    show(&list, "encompassing", Encompassing, query);
    show(&list, "encompassing (nt)", EncompassingNt, query);
    show(&list, "encompassed by", EncompassedBy, query);
    show(&list, "encompassed by (nt)", EncompassedByNt, query);
}

fn show<R: RectMaskRelation<RectMask32>>(
    list: &FastRectList<RectMask32>,
    name: &str,
    relation: R,
    query: Rect,
) {
    let ids: Vec<usize> = list.enumerate(relation, query).collect();
    println!("  {name:<20} {ids:?}");
}
