// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive hierarchy of rectangle buckets.
//!
//! A [`FastRectNode`] starts as a single flat bucket. Inserts are buffered; once the
//! buffer reaches the split threshold it is routed in one batch: each item moves into the
//! first (most specific) child rectangle that fully contains it, or stays in the node's
//! straddle bucket if no child does. Children are created only when an item first lands
//! in them and split the same way once their own buffer fills up.
//!
//! Nodes live in an arena and refer to their children by index.

pub mod child_spec;
pub mod settings;

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::Chain;

use crate::collection::{RectCollection, RectQuery};
use crate::data_list::{DataMatches, FastRectDataList};
use crate::error::{Error, Result};
use crate::list::FastRectList;
use crate::mask::RectMask128;
use crate::relations::{EncompassedByNt, Intersect};
use crate::rect::Rect;

pub use settings::FastRectNodeSettings;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
struct NodeData<T> {
    bound: Rect,
    /// Items added since the last routing pass.
    fresh: FastRectDataList<T>,
    /// Items no child rect fully contains.
    straddle: FastRectDataList<T>,
    /// Candidate child bounds, most specific first.
    child_rects: FastRectList,
    /// Materialized children, parallel to `child_rects`.
    children: Vec<Option<NodeIdx>>,
    child_rects_computed: bool,
}

impl<T> NodeData<T> {
    fn new(bound: Rect) -> Self {
        Self {
            bound,
            fresh: FastRectDataList::for_valid_bound(bound),
            straddle: FastRectDataList::for_valid_bound(bound),
            child_rects: FastRectList::for_valid_bound(bound),
            children: Vec::new(),
            child_rects_computed: false,
        }
    }
}

/// Adaptive rectangle index over a fixed bound.
///
/// Rectangles outside the bound are accepted and kept at the root. Trivial rectangles
/// are rejected.
///
/// ```
/// use fast_rect_index::{FastRectNode, FastRectNodeSettings, Rect};
///
/// let settings = FastRectNodeSettings::default().with_split_threshold(4);
/// let mut node = FastRectNode::new(Rect::new(0, 0, 256, 256), settings).unwrap();
/// for i in 0..16 {
///     node.add(Rect::new(i * 16, i * 16, 8, 8), i).unwrap();
/// }
/// assert!(node.node_count() > 1);
///
/// let hits: Vec<_> = node.enumerate(Rect::new(0, 0, 40, 40)).map(|(_, i)| *i).collect();
/// assert_eq!(hits.len(), 3);
/// ```
#[derive(Clone)]
pub struct FastRectNode<T> {
    settings: FastRectNodeSettings,
    arena: Vec<NodeData<T>>,
    len: usize,
}

impl<T> FastRectNode<T> {
    /// Create an empty node.
    ///
    /// Fails if `bound` is trivial or the settings don't validate.
    pub fn new(bound: Rect, settings: FastRectNodeSettings) -> Result<Self> {
        if bound.is_trivial() {
            return Err(Error::InvalidBound(bound));
        }
        settings.validate()?;
        Ok(Self {
            settings,
            arena: vec![NodeData::new(bound)],
            len: 0,
        })
    }

    /// Create an empty node with default settings.
    pub fn with_bound(bound: Rect) -> Result<Self> {
        Self::new(bound, FastRectNodeSettings::default())
    }

    /// The root bound.
    pub fn bound(&self) -> Rect {
        self.arena[NodeIdx::ROOT.get()].bound
    }

    /// The settings shared by every node in the hierarchy.
    pub fn settings(&self) -> &FastRectNodeSettings {
        &self.settings
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no items are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of materialized nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Insert an item.
    ///
    /// Fails with [`Error::TrivialRect`] if `rect` has no area, since no query could
    /// ever return it.
    pub fn add(&mut self, rect: Rect, data: T) -> Result<()> {
        if rect.is_trivial() {
            return Err(Error::TrivialRect(rect));
        }
        let root = &mut self.arena[NodeIdx::ROOT.get()];
        let _ = root.fresh.add(rect, data);
        self.len += 1;
        if root.fresh.len() >= self.settings.split_threshold {
            self.route(NodeIdx::ROOT);
        }
        Ok(())
    }

    /// Remove every item and every child node.
    pub fn clear(&mut self) {
        let bound = self.bound();
        self.arena.clear();
        self.arena.push(NodeData::new(bound));
        self.len = 0;
    }

    /// Lazily yield items overlapping `query` with positive area.
    pub fn enumerate(&self, query: Rect) -> NodeMatches<'_, T> {
        NodeMatches {
            arena: &self.arena,
            query,
            pending: vec![NodeIdx::ROOT],
            bucket: None,
        }
    }

    /// Route the buffered items of `start`, then of every child that fills up on the way.
    fn route(&mut self, start: NodeIdx) {
        let mut pending = vec![start];
        while let Some(idx) = pending.pop() {
            self.ensure_child_rects(idx);
            let batch: Vec<(Rect, T)> = self.arena[idx.get()].fresh.drain().collect();
            tracing::trace!(node = idx.get(), items = batch.len(), "routing batch");
            for (rect, data) in batch {
                match self.arena[idx.get()].child_rects.find_first(EncompassedByNt, rect) {
                    Some(slot) => {
                        let child = self.child_or_insert(idx, slot);
                        let fresh = &mut self.arena[child.get()].fresh;
                        let _ = fresh.add(rect, data);
                        if fresh.len() == self.settings.split_threshold {
                            pending.push(child);
                        }
                    }
                    None => {
                        let _ = self.arena[idx.get()].straddle.add(rect, data);
                    }
                }
            }
        }
    }

    fn ensure_child_rects(&mut self, idx: NodeIdx) {
        let node = &mut self.arena[idx.get()];
        if node.child_rects_computed {
            return;
        }
        node.child_rects_computed = true;
        let rects = self.settings.child_rects(node.bound);
        tracing::debug!(bound = ?node.bound, children = rects.len(), "computed child rects");
        node.child_rects.reserve(rects.len());
        node.children = vec![None; rects.len()];
        for r in rects {
            let _ = node.child_rects.add(r);
        }
        assert_eq!(
            node.child_rects.len(),
            node.children.len(),
            "child rects and child slots out of sync"
        );
    }

    fn child_or_insert(&mut self, parent: NodeIdx, slot: usize) -> NodeIdx {
        if let Some(child) = self.arena[parent.get()].children[slot] {
            return child;
        }
        let bound = self.arena[parent.get()].child_rects[slot];
        let child = NodeIdx::new(self.arena.len());
        self.arena.push(NodeData::new(bound));
        self.arena[parent.get()].children[slot] = Some(child);
        child
    }
}

impl<T> Debug for FastRectNode<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FastRectNode")
            .field("bound", &self.bound())
            .field("settings", &self.settings)
            .field("len", &self.len)
            .field("node_count", &self.arena.len())
            .finish_non_exhaustive()
    }
}

type BucketMatches<'a, T> =
    Chain<DataMatches<'a, T, Intersect, RectMask128>, DataMatches<'a, T, Intersect, RectMask128>>;

/// Lazy iterator over node items overlapping a query. See [`FastRectNode::enumerate`].
pub struct NodeMatches<'a, T> {
    arena: &'a [NodeData<T>],
    query: Rect,
    pending: Vec<NodeIdx>,
    bucket: Option<BucketMatches<'a, T>>,
}

impl<'a, T> Iterator for NodeMatches<'a, T> {
    type Item = (Rect, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bucket) = &mut self.bucket {
                if let Some(hit) = bucket.next() {
                    return Some(hit);
                }
                self.bucket = None;
            }
            let idx = self.pending.pop()?;
            let arena = self.arena;
            let node = &arena[idx.get()];
            let clip = node.bound.intersect(&self.query);
            // Only the root holds items outside its bound.
            let local = if idx == NodeIdx::ROOT {
                self.query
            } else {
                clip
            };
            self.bucket = Some(
                node.fresh
                    .enumerate(local)
                    .chain(node.straddle.enumerate(local)),
            );
            if clip.is_valid() {
                let first = self.pending.len();
                for slot in node.child_rects.enumerate(Intersect, clip) {
                    if let Some(child) = node.children[slot] {
                        self.pending.push(child);
                    }
                }
                self.pending[first..].reverse();
            }
        }
    }
}

impl<T> Debug for NodeMatches<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeMatches")
            .field("query", &self.query)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<T> RectQuery<T> for FastRectNode<T> {
    fn query_rect<'a>(&'a self, query: Rect) -> Box<dyn Iterator<Item = (Rect, &'a T)> + 'a> {
        Box::new(self.enumerate(query))
    }
}

impl<T> RectCollection<T> for FastRectNode<T> {
    fn add(&mut self, rect: Rect, data: T) -> Result<()> {
        Self::add(self, rect, data)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}
