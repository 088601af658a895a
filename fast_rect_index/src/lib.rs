// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=fast_rect_index --heading-base-level=0

//! Fast Rect Index: mask-accelerated spatial indexing of integer rectangles.
//!
//! Every stored rectangle carries a small bitmask that records which bands of a bounding
//! rectangle it touches on each axis. Queries compare masks first and only look at
//! coordinates when the masks say a match is possible, so most candidates are rejected
//! with a couple of bit operations.
//!
//! - [`FastRectList`] / [`FastRectDataList`]: flat lists with mask pre-filtering.
//! - [`FastRectNode`]: an adaptive hierarchy that splits full buckets into child
//!   rectangles, from a built-in menu ([`ChildGrids`]) or a [`FastRectNodeChildFactory`].
//! - [`FastRectPyramid`]: an unbounded root of nested origin-centred squares that picks a
//!   level per item by scale. Levels are flat lists by default and pluggable through
//!   [`RectCollection`].
//!
//! Queries are lazy iterators and borrow the index, so it cannot change mid-query.
//!
//! # Example
//!
//! ```rust
//! use fast_rect_index::{FastRectPyramid, Rect};
//!
//! let mut pyramid: FastRectPyramid<u32> = FastRectPyramid::default();
//! pyramid.add(Rect::new(10, 10, 50, 50), 1).unwrap();
//! pyramid.add(Rect::new(5000, -300, 20, 20), 2).unwrap();
//!
//! let hits: Vec<_> = pyramid.enumerate(Rect::new(0, 0, 100, 100)).collect();
//! assert_eq!(hits, [(Rect::new(10, 10, 50, 50), &1)]);
//! ```
//!
//! Relations other than overlap are available on the flat lists:
//!
//! ```rust
//! use fast_rect_index::{EncompassedByNt, FastRectList, Rect};
//!
//! let mut list: FastRectList = FastRectList::new(Rect::new(0, 0, 1024, 1024)).unwrap();
//! let outer = list.add(Rect::new(0, 0, 512, 512));
//! let _inner = list.add(Rect::new(100, 100, 10, 10));
//!
//! // Which stored rects fully contain this one?
//! let holders: Vec<_> = list.enumerate(EncompassedByNt, Rect::new(50, 50, 20, 20)).collect();
//! assert_eq!(holders, [outer]);
//! ```
//!
//! ## Trivial rectangles
//!
//! A rectangle with a non-positive width or height covers no pixels. It never overlaps
//! anything, but the triviality-allowing containment relations ([`Encompassing`],
//! [`EncompassedBy`]) treat it as contained in every rectangle. Use the `Nt` forms when
//! that matters. [`FastRectPyramid::add`] rejects trivial rectangles.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.

#![no_std]

extern crate alloc;

pub mod collection;
pub mod data_list;
pub mod encoder;
pub mod error;
pub mod list;
pub mod mask;
pub mod node;
pub mod pyramid;
pub mod rect;
pub mod relations;

pub use collection::{RectCollection, RectQuery};
pub use data_list::{DataMatches, FastRectDataList};
pub use encoder::{AxisBands, RectBoundBitEncoder};
pub use error::{Error, Result};
pub use list::{FastRectList, ListMatches};
pub use mask::{RectMask8, RectMask16, RectMask32, RectMask64, RectMask128, RectMaskArith};
pub use node::child_spec::{FastRectNodeChildFactory, FastRectNodeChildSpec};
pub use node::settings::{ChildGrids, FastRectNodeSettings};
pub use node::{FastRectNode, NodeMatches};
pub use pyramid::{FastRectPyramid, LevelFactory, PyramidMatches};
pub use rect::Rect;
pub use relations::{
    EncompassedBy, EncompassedByNt, Encompassing, EncompassingNt, Identical, IdenticalNt,
    Intersect, RectMaskRelation, RectRelation,
};
