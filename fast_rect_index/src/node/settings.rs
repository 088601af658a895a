// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for [`FastRectNode`](super::FastRectNode).

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use bitflags::bitflags;

use super::child_spec::{FastRectNodeChildFactory, FastRectNodeChildSpec};
use crate::error::{Error, Result};
use crate::rect::Rect;

/// Number of buffered items that makes a node route its buffer into children.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 1024;

/// Nodes narrower or shorter than this never get children.
pub const MIN_SPLIT_SIDE: i32 = 4;

bitflags! {
    /// Built-in child layouts a node may use, from most to least specific.
    ///
    /// Each layout is only used when both sides of the node are at least its minimum side.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ChildGrids: u8 {
        /// 8×8 grid of single cells. Minimum side 64.
        const FINE_8X8    = 0b0000_0001;
        /// 2×2 windows over an 8×8 grid, one cell apart. Minimum side 32.
        const OVERLAP_8X8 = 0b0000_0010;
        /// 2×2 windows over a 4×4 grid, one cell apart. Minimum side 4.
        const OVERLAP_4X4 = 0b0000_0100;
        /// Full-width rows and full-height columns of a 4×4 grid. Minimum side 16.
        const STRIPS_4X4  = 0b0000_1000;
        /// Full-width and full-height half bands over a 4×4 grid, one cell apart.
        /// Minimum side 8.
        const HALVES_4X4  = 0b0001_0000;
    }
}

impl Default for ChildGrids {
    fn default() -> Self {
        Self::all()
    }
}

struct MenuEntry {
    grid: ChildGrids,
    min_side: i32,
    specs: &'static [FastRectNodeChildSpec],
}

const MENU: [MenuEntry; 5] = [
    MenuEntry {
        grid: ChildGrids::FINE_8X8,
        min_side: 64,
        specs: &[FastRectNodeChildSpec::new_unchecked(8, 8, 1, 1, 1, 1)],
    },
    MenuEntry {
        grid: ChildGrids::OVERLAP_8X8,
        min_side: 32,
        specs: &[FastRectNodeChildSpec::new_unchecked(8, 8, 2, 2, 1, 1)],
    },
    MenuEntry {
        grid: ChildGrids::OVERLAP_4X4,
        min_side: MIN_SPLIT_SIDE,
        specs: &[FastRectNodeChildSpec::new_unchecked(4, 4, 2, 2, 1, 1)],
    },
    MenuEntry {
        grid: ChildGrids::STRIPS_4X4,
        min_side: 16,
        specs: &[
            FastRectNodeChildSpec::new_unchecked(4, 4, 4, 1, 1, 1),
            FastRectNodeChildSpec::new_unchecked(4, 4, 1, 4, 1, 1),
        ],
    },
    MenuEntry {
        grid: ChildGrids::HALVES_4X4,
        min_side: 8,
        specs: &[
            FastRectNodeChildSpec::new_unchecked(4, 4, 4, 2, 1, 1),
            FastRectNodeChildSpec::new_unchecked(4, 4, 2, 4, 1, 1),
        ],
    },
];

/// Configuration for a [`FastRectNode`](super::FastRectNode) and all of its descendants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastRectNodeSettings {
    /// Buffered items that trigger routing into children. Must be non-zero.
    pub split_threshold: usize,
    /// Built-in child layouts to use.
    pub child_grids: ChildGrids,
    /// Custom child layout. When set it replaces `child_grids` entirely.
    pub child_factory: Option<FastRectNodeChildFactory>,
}

impl Default for FastRectNodeSettings {
    fn default() -> Self {
        Self {
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            child_grids: ChildGrids::default(),
            child_factory: None,
        }
    }
}

impl FastRectNodeSettings {
    /// Set the split threshold.
    pub fn with_split_threshold(mut self, split_threshold: usize) -> Self {
        self.split_threshold = split_threshold;
        self
    }

    /// Restrict the built-in child layouts.
    pub fn with_child_grids(mut self, child_grids: ChildGrids) -> Self {
        self.child_grids = child_grids;
        self
    }

    /// Use a custom child layout instead of the built-in ones.
    pub fn with_child_factory(mut self, factory: FastRectNodeChildFactory) -> Self {
        self.child_factory = Some(factory);
        self
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.split_threshold == 0 {
            return Err(Error::InvalidThreshold);
        }
        Ok(())
    }

    /// Child rectangles for a node with the given bound, most specific first.
    ///
    /// # Panics
    ///
    /// Panics if the layout produces the same rectangle twice or a rectangle equal to
    /// `parent`.
    pub fn child_rects(&self, parent: Rect) -> Vec<Rect> {
        if parent.width < MIN_SPLIT_SIDE || parent.height < MIN_SPLIT_SIDE {
            return Vec::new();
        }
        let rects: Vec<Rect> = match &self.child_factory {
            Some(factory) => factory.child_rects(parent),
            None => {
                let side = parent.width.min(parent.height);
                MENU.iter()
                    .filter(|entry| self.child_grids.contains(entry.grid) && side >= entry.min_side)
                    .flat_map(|entry| entry.specs.iter())
                    .flat_map(|spec| spec.enumerate(parent))
                    .collect()
            }
        };
        let mut seen = BTreeSet::new();
        for r in &rects {
            assert_ne!(*r, parent, "child rect equals its parent bound");
            assert!(seen.insert(*r), "duplicate child rect {r:?} in {parent:?}");
        }
        rects
    }
}
