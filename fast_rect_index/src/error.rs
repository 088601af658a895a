// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-facing errors.
//!
//! Only invalid caller input is reported through [`Error`]. Broken internal invariants
//! (mismatched columns, duplicate child rectangles) panic instead, since they indicate a
//! bug in the index rather than in its inputs.

use crate::rect::Rect;

/// Errors reported for invalid construction arguments or invalid items.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A bounding rectangle had a non-positive width or height.
    #[error("bounding rect {0:?} must have positive width and height")]
    InvalidBound(Rect),
    /// A band step size was not positive.
    #[error("band step size must be positive, got {0}")]
    InvalidStepSize(i32),
    /// A bounding rectangle needs more bands per axis than the mask type provides.
    #[error("bound {bound:?} needs {bands} bands per axis at step {step}, mask holds {capacity}")]
    TooManyBands {
        /// The bounding rectangle being encoded against.
        bound: Rect,
        /// Band step size in pixels.
        step: i32,
        /// Bands required on the longer axis.
        bands: u64,
        /// Bands available per axis in the mask type.
        capacity: u32,
    },
    /// An item rectangle had a non-positive width or height.
    #[error("rect {0:?} has no area")]
    TrivialRect(Rect),
    /// An item lies outside the largest pyramid level.
    #[error("rect {rect:?} exceeds the pyramid bounds (max radius {max_radius})")]
    BoundsExceeded {
        /// The rejected rectangle.
        rect: Rect,
        /// Radius of the largest level.
        max_radius: i32,
    },
    /// Pyramid radii were out of range.
    #[error("invalid pyramid radii: min {min}, max {max} (need 1 <= min <= max <= {limit})")]
    InvalidRadius {
        /// Requested minimum radius.
        min: i32,
        /// Requested maximum radius.
        max: i32,
        /// Largest supported radius.
        limit: i32,
    },
    /// The pyramid growth ratio was out of range.
    #[error("pyramid ratio {ratio} outside [{floor}, {ceiling}]")]
    InvalidRatio {
        /// Requested ratio.
        ratio: f64,
        /// Smallest accepted ratio for the requested minimum radius.
        floor: f64,
        /// Largest accepted ratio.
        ceiling: f64,
    },
    /// A child spec had inconsistent cell counts or shifts.
    #[error(
        "invalid child spec: parent {parent_cells:?} cells, child {child_cells:?} cells, shift {shift:?}"
    )]
    InvalidChildSpec {
        /// Horizontal and vertical parent cell counts.
        parent_cells: (u32, u32),
        /// Horizontal and vertical child cell counts.
        child_cells: (u32, u32),
        /// Horizontal and vertical shift in cells.
        shift: (u32, u32),
    },
    /// A node split threshold of zero.
    #[error("node split threshold must be at least 1")]
    InvalidThreshold,
}

/// Result alias for fallible index operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
