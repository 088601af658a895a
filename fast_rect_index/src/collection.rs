// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query and collection traits for `(Rect, T)` stores.
//!
//! Consumers that store rectangles with payloads and ask which of them overlap a query
//! rectangle should depend on these traits rather than a concrete structure.
//! [`FastRectPyramid`](crate::FastRectPyramid) uses them to host pluggable per-level
//! collections.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::data_list::FastRectDataList;
use crate::error::{Error, Result};
use crate::mask::RectMaskArith;
use crate::rect::Rect;

/// Overlap queries over stored `(Rect, T)` items.
///
/// Results borrow the collection, so it cannot be mutated while a query is alive.
pub trait RectQuery<T> {
    /// Items whose rectangle overlaps `query` with positive area.
    fn query_rect<'a>(&'a self, query: Rect) -> Box<dyn Iterator<Item = (Rect, &'a T)> + 'a>;
}

/// A growable store of `(Rect, T)` items.
pub trait RectCollection<T>: RectQuery<T> {
    /// Insert an item.
    ///
    /// A trivial `rect` could never be returned by a query, so it is rejected with
    /// [`Error::TrivialRect`] and the collection is left unchanged.
    fn add(&mut self, rect: Rect, data: T) -> Result<()>;

    /// Remove every item.
    fn clear(&mut self);

    /// Number of stored items.
    fn len(&self) -> usize;

    /// Whether the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, M: RectMaskArith> RectQuery<T> for FastRectDataList<T, M> {
    fn query_rect<'a>(&'a self, query: Rect) -> Box<dyn Iterator<Item = (Rect, &'a T)> + 'a> {
        Box::new(self.enumerate(query))
    }
}

impl<T, M: RectMaskArith> RectCollection<T> for FastRectDataList<T, M> {
    fn add(&mut self, rect: Rect, data: T) -> Result<()> {
        if rect.is_trivial() {
            return Err(Error::TrivialRect(rect));
        }
        let _ = Self::add(self, rect, data);
        Ok(())
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

/// A plain vector is a collection without acceleration: queries test every item.
impl<T> RectQuery<T> for Vec<(Rect, T)> {
    fn query_rect<'a>(&'a self, query: Rect) -> Box<dyn Iterator<Item = (Rect, &'a T)> + 'a> {
        Box::new(
            self.iter()
                .filter(move |(r, _)| r.intersects(&query))
                .map(|(r, d)| (*r, d)),
        )
    }
}

impl<T> RectCollection<T> for Vec<(Rect, T)> {
    fn add(&mut self, rect: Rect, data: T) -> Result<()> {
        if rect.is_trivial() {
            return Err(Error::TrivialRect(rect));
        }
        self.push((rect, data));
        Ok(())
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}
