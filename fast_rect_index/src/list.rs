// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat rectangle list with per-item masks.
//!
//! Queries scan every item, but each item's mask is checked against the query's mask
//! before any coordinates are compared, so most non-matching items are rejected with a
//! couple of bit operations.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::ControlFlow;

use crate::encoder::RectBoundBitEncoder;
use crate::error::Result;
use crate::mask::{RectMask128, RectMaskArith};
use crate::relations::RectMaskRelation;
use crate::rect::Rect;

/// Append-only list of rectangles with masks encoded against a fixed bound.
///
/// Ids are assigned sequentially from `0` and stay stable until [`clear`](Self::clear).
/// Rectangles outside the bound are accepted; their out-of-range axes get a full mask so
/// they are always tested exactly.
#[derive(Clone)]
pub struct FastRectList<M: RectMaskArith = RectMask128> {
    encoder: RectBoundBitEncoder<M>,
    rects: Vec<Rect>,
    masks: Vec<M>,
}

impl<M: RectMaskArith> FastRectList<M> {
    /// Create an empty list for rectangles mostly inside `bound`.
    ///
    /// The band step is derived from the longer side of `bound` so that it spans all
    /// bands of `M`.
    pub fn new(bound: Rect) -> Result<Self> {
        Ok(Self::with_encoder(RectBoundBitEncoder::for_bound(bound)?))
    }

    /// Create an empty list using a preconfigured encoder.
    pub fn with_encoder(encoder: RectBoundBitEncoder<M>) -> Self {
        Self {
            encoder,
            rects: Vec::new(),
            masks: Vec::new(),
        }
    }

    /// Create a list for a bound already known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is trivial.
    pub(crate) fn for_valid_bound(bound: Rect) -> Self {
        match Self::new(bound) {
            Ok(list) => list,
            Err(err) => panic!("internal bound must be valid: {err}"),
        }
    }

    /// The bounding rectangle masks are encoded against.
    pub fn bound(&self) -> Rect {
        self.encoder.bound()
    }

    /// The encoder used for items and queries.
    pub fn encoder(&self) -> &RectBoundBitEncoder<M> {
        &self.encoder
    }

    /// Number of stored rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Reserve space for at least `n` more rectangles.
    pub fn reserve(&mut self, n: usize) {
        self.rects.reserve(n);
        self.masks.reserve(n);
    }

    /// Append a rectangle and return its id.
    pub fn add(&mut self, rect: Rect) -> usize {
        let id = self.rects.len();
        self.rects.push(rect);
        self.masks.push(self.encoder.encode(rect));
        self.assert_invariants();
        id
    }

    /// Remove every rectangle. Ids restart at `0`.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.masks.clear();
    }

    /// Move all rectangles out, leaving the list empty.
    pub fn take_rects(&mut self) -> Vec<Rect> {
        self.masks.clear();
        core::mem::take(&mut self.rects)
    }

    /// The rectangle with the given id.
    pub fn get(&self, id: usize) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    /// The mask of the rectangle with the given id.
    pub fn mask(&self, id: usize) -> Option<M> {
        self.masks.get(id).copied()
    }

    /// All rectangles in id order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Iterate `(id, rect)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.rects.iter().copied().enumerate()
    }

    /// Lazily yield the ids of items `item` for which `relation.test(query, item)` holds.
    pub fn enumerate<R: RectMaskRelation<M>>(
        &self,
        relation: R,
        query: Rect,
    ) -> ListMatches<'_, R, M> {
        ListMatches {
            rects: &self.rects,
            masks: &self.masks,
            relation,
            query,
            query_mask: self.encoder.encode(query),
            pos: 0,
        }
    }

    /// The first id matching `relation` against `query`.
    pub fn find_first<R: RectMaskRelation<M>>(&self, relation: R, query: Rect) -> Option<usize> {
        self.enumerate(relation, query).next()
    }

    /// Visit matching ids in order until the visitor breaks.
    ///
    /// Returns the visitor's break value, or `Continue` if every match was visited.
    pub fn for_each<R, B>(
        &self,
        relation: R,
        query: Rect,
        mut visit: impl FnMut(usize) -> ControlFlow<B>,
    ) -> ControlFlow<B>
    where
        R: RectMaskRelation<M>,
    {
        for id in self.enumerate(relation, query) {
            visit(id)?;
        }
        ControlFlow::Continue(())
    }

    /// Check that the rect and mask columns line up.
    ///
    /// # Panics
    ///
    /// Panics if the columns have different lengths, which would be a bug in this type.
    #[inline]
    pub(crate) fn assert_invariants(&self) {
        debug_assert_eq!(
            self.rects.len(),
            self.masks.len(),
            "rect and mask columns out of sync"
        );
    }
}

impl<M: RectMaskArith> core::ops::Index<usize> for FastRectList<M> {
    type Output = Rect;

    fn index(&self, id: usize) -> &Rect {
        &self.rects[id]
    }
}

impl<M: RectMaskArith> Debug for FastRectList<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FastRectList")
            .field("bound", &self.encoder.bound())
            .field("step", &self.encoder.step())
            .field("len", &self.rects.len())
            .finish_non_exhaustive()
    }
}

/// Lazy iterator over list ids matching a relation. See [`FastRectList::enumerate`].
#[derive(Clone, Debug)]
pub struct ListMatches<'a, R, M> {
    rects: &'a [Rect],
    masks: &'a [M],
    relation: R,
    query: Rect,
    query_mask: M,
    pos: usize,
}

impl<R: RectMaskRelation<M>, M: RectMaskArith> Iterator for ListMatches<'_, R, M> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pos < self.rects.len() {
            let id = self.pos;
            self.pos += 1;
            if self.relation.test_maybe(self.query_mask, self.masks[id])
                && self.relation.test(&self.query, &self.rects[id])
            {
                return Some(id);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.rects.len() - self.pos))
    }
}
