// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node basics.
//!
//! Fill an adaptive node with small tiles, once with the built-in child grids and once
//! with a custom quadtree-like layout, and compare how many nodes each creates.
//!
//! Run:
//! - `cargo run -p fast_rect_demos --example node_basics`

use fast_rect_index::{
    ChildGrids, FastRectNode, FastRectNodeChildFactory, FastRectNodeChildSpec,
    FastRectNodeSettings, Rect,
};

fn fill(node: &mut FastRectNode<u32>) {
    let mut id = 0;
    for y in (0..1024).step_by(8) {
        for x in (0..1024).step_by(8) {
            node.add(Rect::new(x + 1, y + 1, 6, 6), id).unwrap();
            id += 1;
        }
    }
}

fn main() {
    let bound = Rect::new(0, 0, 1024, 1024);
    let query = Rect::new(500, 500, 24, 24);

    let menu = FastRectNodeSettings::default().with_split_threshold(64);
    let quads = FastRectNodeSettings::default()
        .with_split_threshold(64)
        .with_child_factory(FastRectNodeChildFactory::new([
            FastRectNodeChildSpec::grid(2).unwrap()
        ]));
    let strips_only = FastRectNodeSettings::default()
        .with_split_threshold(64)
        .with_child_grids(ChildGrids::STRIPS_4X4 | ChildGrids::HALVES_4X4);

    for (name, settings) in [("menu", menu), ("quads", quads), ("strips", strips_only)] {
        let mut node = FastRectNode::new(bound, settings).unwrap();
        fill(&mut node);
        let hits = node.enumerate(query).count();
        println!(
            "{name:>6}: {} items in {} nodes, {hits} hits for {query:?}",
            node.len(),
            node.node_count()
        );
    }
}
