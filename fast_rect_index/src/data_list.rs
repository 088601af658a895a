// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`FastRectList`] with a payload column.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::Result;
use crate::list::{FastRectList, ListMatches};
use crate::mask::{RectMask128, RectMaskArith};
use crate::relations::{Intersect, RectMaskRelation};
use crate::rect::Rect;

/// Flat list of `(Rect, T)` pairs with mask-accelerated queries.
///
/// This is the default per-level collection of a [`FastRectPyramid`](crate::FastRectPyramid)
/// and the bucket type inside [`FastRectNode`](crate::FastRectNode).
#[derive(Clone)]
pub struct FastRectDataList<T, M: RectMaskArith = RectMask128> {
    list: FastRectList<M>,
    data: Vec<T>,
}

impl<T, M: RectMaskArith> FastRectDataList<T, M> {
    /// Create an empty list for rectangles mostly inside `bound`.
    pub fn new(bound: Rect) -> Result<Self> {
        Ok(Self {
            list: FastRectList::new(bound)?,
            data: Vec::new(),
        })
    }

    pub(crate) fn for_valid_bound(bound: Rect) -> Self {
        Self {
            list: FastRectList::for_valid_bound(bound),
            data: Vec::new(),
        }
    }

    /// The bounding rectangle masks are encoded against.
    pub fn bound(&self) -> Rect {
        self.list.bound()
    }

    /// The underlying rectangle list.
    pub fn rects(&self) -> &FastRectList<M> {
        &self.list
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append an item and return its id.
    pub fn add(&mut self, rect: Rect, data: T) -> usize {
        let id = self.list.add(rect);
        self.data.push(data);
        self.assert_invariants();
        id
    }

    /// Remove every item. Ids restart at `0`.
    pub fn clear(&mut self) {
        self.list.clear();
        self.data.clear();
    }

    /// Move every item out, leaving the list empty.
    pub fn drain(&mut self) -> impl Iterator<Item = (Rect, T)> + '_ {
        let rects = self.list.take_rects();
        rects.into_iter().zip(self.data.drain(..))
    }

    /// The item with the given id.
    pub fn get(&self, id: usize) -> Option<(Rect, &T)> {
        Some((self.list.get(id)?, self.data.get(id)?))
    }

    /// Iterate all items in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Rect, &T)> + '_ {
        self.list.rects().iter().copied().zip(self.data.iter())
    }

    /// Lazily yield items overlapping `query`.
    pub fn enumerate(&self, query: Rect) -> DataMatches<'_, T, Intersect, M> {
        self.enumerate_with(Intersect, query)
    }

    /// Lazily yield items `item` for which `relation.test(query, item)` holds.
    pub fn enumerate_with<R: RectMaskRelation<M>>(
        &self,
        relation: R,
        query: Rect,
    ) -> DataMatches<'_, T, R, M> {
        DataMatches {
            ids: self.list.enumerate(relation, query),
            rects: self.list.rects(),
            data: &self.data,
        }
    }

    #[inline]
    fn assert_invariants(&self) {
        self.list.assert_invariants();
        debug_assert_eq!(
            self.list.len(),
            self.data.len(),
            "rect and data columns out of sync"
        );
    }
}

impl<T, M: RectMaskArith> Debug for FastRectDataList<T, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FastRectDataList")
            .field("bound", &self.list.bound())
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

/// Lazy iterator over matching `(Rect, &T)` pairs. See [`FastRectDataList::enumerate`].
#[derive(Debug)]
pub struct DataMatches<'a, T, R, M> {
    ids: ListMatches<'a, R, M>,
    rects: &'a [Rect],
    data: &'a [T],
}

impl<'a, T, R: RectMaskRelation<M>, M: RectMaskArith> Iterator for DataMatches<'a, T, R, M> {
    type Item = (Rect, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some((self.rects[id], &self.data[id]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}
