// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative child rectangle layouts.
//!
//! A [`FastRectNodeChildSpec`] cuts a parent rectangle into a grid of equal cells and
//! slides a window of child cells across it. With a shift smaller than the window, the
//! windows overlap, so an item that straddles a cell border can still fit in one child.
//! A [`FastRectNodeChildFactory`] merges several specs into a single list sorted from
//! most to least specific.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::{Error, Result};
use crate::rect::Rect;

/// One family of child rectangles.
///
/// The parent is divided into `horz_parent_cells × vert_parent_cells` cells. Each child
/// spans `horz_child_cells × vert_child_cells` cells, and neighbouring children are
/// `horz_shift` / `vert_shift` cells apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FastRectNodeChildSpec {
    horz_parent_cells: u32,
    vert_parent_cells: u32,
    horz_child_cells: u32,
    vert_child_cells: u32,
    horz_shift: u32,
    vert_shift: u32,
}

impl FastRectNodeChildSpec {
    /// Create a spec.
    ///
    /// All counts must be at least 1, child cells may not exceed parent cells, and the
    /// child window may not cover the whole parent.
    pub fn new(
        horz_parent_cells: u32,
        vert_parent_cells: u32,
        horz_child_cells: u32,
        vert_child_cells: u32,
        horz_shift: u32,
        vert_shift: u32,
    ) -> Result<Self> {
        let spec = Self::new_unchecked(
            horz_parent_cells,
            vert_parent_cells,
            horz_child_cells,
            vert_child_cells,
            horz_shift,
            vert_shift,
        );
        if spec.is_well_formed() {
            Ok(spec)
        } else {
            Err(Error::InvalidChildSpec {
                parent_cells: (horz_parent_cells, vert_parent_cells),
                child_cells: (horz_child_cells, vert_child_cells),
                shift: (horz_shift, vert_shift),
            })
        }
    }

    /// A `cells × cells` grid of single-cell children.
    pub fn grid(cells: u32) -> Result<Self> {
        Self::new(cells, cells, 1, 1, 1, 1)
    }

    pub(crate) const fn new_unchecked(
        horz_parent_cells: u32,
        vert_parent_cells: u32,
        horz_child_cells: u32,
        vert_child_cells: u32,
        horz_shift: u32,
        vert_shift: u32,
    ) -> Self {
        Self {
            horz_parent_cells,
            vert_parent_cells,
            horz_child_cells,
            vert_child_cells,
            horz_shift,
            vert_shift,
        }
    }

    pub(crate) const fn is_well_formed(&self) -> bool {
        self.horz_parent_cells >= 1
            && self.vert_parent_cells >= 1
            && self.horz_child_cells >= 1
            && self.vert_child_cells >= 1
            && self.horz_shift >= 1
            && self.vert_shift >= 1
            && self.horz_child_cells <= self.horz_parent_cells
            && self.vert_child_cells <= self.vert_parent_cells
            && (self.horz_child_cells < self.horz_parent_cells
                || self.vert_child_cells < self.vert_parent_cells)
    }

    /// Horizontal and vertical parent cell counts.
    pub fn parent_cells(&self) -> (u32, u32) {
        (self.horz_parent_cells, self.vert_parent_cells)
    }

    /// Horizontal and vertical child cell counts.
    pub fn child_cells(&self) -> (u32, u32) {
        (self.horz_child_cells, self.vert_child_cells)
    }

    /// Horizontal and vertical shift in cells.
    pub fn shift(&self) -> (u32, u32) {
        (self.horz_shift, self.vert_shift)
    }

    /// Total number of parent cells.
    pub fn parent_cell_count(&self) -> u64 {
        u64::from(self.horz_parent_cells) * u64::from(self.vert_parent_cells)
    }

    /// Number of children generated for a large enough parent.
    pub fn child_count(&self) -> usize {
        let cols = (self.horz_parent_cells - self.horz_child_cells) / self.horz_shift + 1;
        let rows = (self.vert_parent_cells - self.vert_child_cells) / self.vert_shift + 1;
        cols as usize * rows as usize
    }

    /// Compare nominal child-to-parent area ratios.
    pub fn area_ratio_cmp(&self, other: &Self) -> Ordering {
        // a/b < c/d  <=>  a*d < c*b with positive denominators.
        let lhs = self.child_cell_count() * other.parent_cell_count();
        let rhs = other.child_cell_count() * self.parent_cell_count();
        lhs.cmp(&rhs)
    }

    fn child_cell_count(&self) -> u64 {
        u64::from(self.horz_child_cells) * u64::from(self.vert_child_cells)
    }

    /// Whether `parent` is large enough for every cell to be at least one pixel.
    pub fn fits(&self, parent: &Rect) -> bool {
        i64::from(parent.width) >= i64::from(self.horz_parent_cells)
            && i64::from(parent.height) >= i64::from(self.vert_parent_cells)
    }

    /// Child rectangles of `parent`, row by row.
    ///
    /// Yields nothing if `parent` is smaller than the parent cell counts.
    pub fn enumerate(&self, parent: Rect) -> impl Iterator<Item = Rect> + use<> {
        let spec = *self;
        let (cols, rows) = if spec.fits(&parent) {
            (
                (spec.horz_parent_cells - spec.horz_child_cells) / spec.horz_shift + 1,
                (spec.vert_parent_cells - spec.vert_child_cells) / spec.vert_shift + 1,
            )
        } else {
            (0, 0)
        };
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| {
                let x0 = col * spec.horz_shift;
                let y0 = row * spec.vert_shift;
                let left = band_edge(parent.x, parent.width, spec.horz_parent_cells, x0);
                let right = band_edge(
                    parent.x,
                    parent.width,
                    spec.horz_parent_cells,
                    x0 + spec.horz_child_cells,
                );
                let top = band_edge(parent.y, parent.height, spec.vert_parent_cells, y0);
                let bottom = band_edge(
                    parent.y,
                    parent.height,
                    spec.vert_parent_cells,
                    y0 + spec.vert_child_cells,
                );
                Rect::from_ltrb(left, top, right, bottom)
            })
        })
    }
}

impl Ord for FastRectNodeChildSpec {
    /// Most specific first: smaller area ratio, then fewer parent cells.
    fn cmp(&self, other: &Self) -> Ordering {
        self.area_ratio_cmp(other)
            .then_with(|| self.parent_cell_count().cmp(&other.parent_cell_count()))
            .then_with(|| {
                (
                    self.horz_parent_cells,
                    self.vert_parent_cells,
                    self.horz_child_cells,
                    self.vert_child_cells,
                    self.horz_shift,
                    self.vert_shift,
                )
                    .cmp(&(
                        other.horz_parent_cells,
                        other.vert_parent_cells,
                        other.horz_child_cells,
                        other.vert_child_cells,
                        other.horz_shift,
                        other.vert_shift,
                    ))
            })
    }
}

impl PartialOrd for FastRectNodeChildSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pixel coordinate of band edge `band` when `size` pixels starting at `origin` are cut
/// into `cells` bands, rounded to the nearest pixel.
#[allow(
    clippy::cast_possible_truncation,
    reason = "The offset is at most `size`, so the edge stays within the parent."
)]
fn band_edge(origin: i32, size: i32, cells: u32, band: u32) -> i32 {
    let num = i64::from(band) * i64::from(size);
    let den = i64::from(cells);
    let offset = (2 * num + den) / (2 * den);
    (i64::from(origin) + offset) as i32
}

/// Sorted, duplicate-free union of several child specs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FastRectNodeChildFactory {
    specs: Vec<FastRectNodeChildSpec>,
}

impl FastRectNodeChildFactory {
    /// Create a factory; specs are sorted most specific first and deduplicated.
    pub fn new(specs: impl IntoIterator<Item = FastRectNodeChildSpec>) -> Self {
        let mut specs: Vec<_> = specs.into_iter().collect();
        specs.sort();
        specs.dedup();
        Self { specs }
    }

    /// The specs in generation order.
    pub fn specs(&self) -> &[FastRectNodeChildSpec] {
        &self.specs
    }

    /// Child rectangles of `parent` in spec order with duplicates removed.
    ///
    /// When two specs produce the same rectangle, the more specific spec keeps it.
    pub fn child_rects(&self, parent: Rect) -> Vec<Rect> {
        let mut seen = BTreeSet::new();
        self.specs
            .iter()
            .flat_map(|spec| spec.enumerate(parent))
            .filter(|r| seen.insert(*r))
            .collect()
    }
}
