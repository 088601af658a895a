// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoding rectangles into band masks relative to a bounding rectangle.
//!
//! The bounding rectangle is cut into square bands of `step` pixels per axis. A
//! rectangle's mask has every band from the one holding its first pixel through the one
//! holding its last pixel set, per axis. When a rectangle reaches outside the banded
//! area on some axis, that axis cannot be encoded: [`try_encode_rect`] reports the
//! failure and [`AxisBands::to_mask`] fills the axis with ones, so queries fall back to
//! exact tests for that item instead of missing it.

use core::marker::PhantomData;

use crate::error::{Error, Result};
use crate::mask::{RectMaskArith, band_range};
use crate::rect::Rect;

/// Per-axis encoding outcome. `None` marks an axis that needs brute-force testing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisBands {
    /// X band bits, or `None` if the rectangle leaves the banded area horizontally.
    pub x: Option<u64>,
    /// Y band bits, or `None` if the rectangle leaves the banded area vertically.
    pub y: Option<u64>,
}

impl AxisBands {
    /// Whether the x axis could not be encoded.
    pub fn needs_brute_force_x(&self) -> bool {
        self.x.is_none()
    }

    /// Whether the y axis could not be encoded.
    pub fn needs_brute_force_y(&self) -> bool {
        self.y.is_none()
    }

    /// Build a mask, substituting all bits for axes that could not be encoded.
    pub fn to_mask<M: RectMaskArith>(self) -> M {
        let x = self.x.unwrap_or(M::ALL.x_bits());
        let y = self.y.unwrap_or(M::ALL.y_bits());
        M::from_axes(x, y)
    }
}

/// Bands of one axis covering the pixels `start..end`, relative to `origin`.
///
/// Returns `None` if any covered pixel lies outside `origin..origin + band_count * step`.
/// `end` must be greater than `start`, `step` positive, and `band_count` at most 64.
/// The span is taken in `i64` so that far edges past `i32::MAX` encode exactly.
pub fn try_encode_axis(
    origin: i32,
    band_count: u32,
    step: i32,
    start: i64,
    end: i64,
) -> Option<u64> {
    debug_assert!(end > start, "axis span must be non-empty");
    debug_assert!(step > 0, "step must be positive");
    debug_assert!(band_count <= 64, "at most 64 bands fit in one axis");
    let extent = i64::from(band_count) * i64::from(step);
    let first_px = start - i64::from(origin);
    let last_px = end - 1 - i64::from(origin);
    if first_px < 0 || last_px >= extent {
        return None;
    }
    let step = i64::from(step);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Band indices are below band_count, which is at most 64."
    )]
    let (first, last) = ((first_px / step) as u32, (last_px / step) as u32);
    Some(band_range(first, last))
}

/// Number of `step`-sized bands needed to cover `extent` pixels.
fn bands_for(extent: i32, step: i32) -> u64 {
    let extent = u64::try_from(extent).unwrap_or(0);
    let step = u64::try_from(step).unwrap_or(1);
    extent.div_ceil(step)
}

/// Encode `rect` against `bound` with bands of `step` pixels.
///
/// Bands beyond the mask capacity count as out of range. A trivial `rect` encodes to
/// no bands on both axes, so it never intersects anything at the mask level.
pub fn try_encode_rect<M: RectMaskArith>(bound: Rect, step: i32, rect: Rect) -> AxisBands {
    debug_assert!(step > 0, "step must be positive");
    if rect.is_trivial() {
        return AxisBands {
            x: Some(0),
            y: Some(0),
        };
    }
    let cap = u64::from(M::AXIS_BITS);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Clamped to AXIS_BITS, which is at most 64."
    )]
    let (x_bands, y_bands) = (
        bands_for(bound.width, step).min(cap) as u32,
        bands_for(bound.height, step).min(cap) as u32,
    );
    AxisBands {
        x: try_encode_axis(
            bound.left(),
            x_bands,
            step,
            i64::from(rect.left()),
            rect.right_wide(),
        ),
        y: try_encode_axis(
            bound.top(),
            y_bands,
            step,
            i64::from(rect.top()),
            rect.bottom_wide(),
        ),
    }
}

/// Encode `rect` against `bound`, filling unencodable axes with ones.
pub fn encode_rect<M: RectMaskArith>(bound: Rect, step: i32, rect: Rect) -> M {
    try_encode_rect::<M>(bound, step, rect).to_mask()
}

/// Band step that fits `bound`'s longer side into `axis_bits` bands.
pub fn step_size_for(bound: Rect, axis_bits: u32) -> i32 {
    let longest = u64::try_from(bound.width.max(bound.height)).unwrap_or(0).max(1);
    let step = longest.div_ceil(u64::from(axis_bits.max(1)));
    i32::try_from(step).unwrap_or(i32::MAX)
}

/// Encoder bound to one bounding rectangle and step size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RectBoundBitEncoder<M> {
    bound: Rect,
    step: i32,
    _mask: PhantomData<M>,
}

impl<M: RectMaskArith> RectBoundBitEncoder<M> {
    /// Create an encoder for `bound` with bands of `step` pixels.
    ///
    /// Fails if `bound` is trivial, `step` is not positive, or `bound` needs more bands
    /// per axis than `M` holds.
    pub fn new(bound: Rect, step: i32) -> Result<Self> {
        if !bound.is_valid() {
            return Err(Error::InvalidBound(bound));
        }
        if step <= 0 {
            return Err(Error::InvalidStepSize(step));
        }
        let bands = bands_for(bound.width.max(bound.height), step);
        if bands > u64::from(M::AXIS_BITS) {
            return Err(Error::TooManyBands {
                bound,
                step,
                bands,
                capacity: M::AXIS_BITS,
            });
        }
        Ok(Self {
            bound,
            step,
            _mask: PhantomData,
        })
    }

    /// Create an encoder for `bound` with the smallest step that fits the mask.
    pub fn for_bound(bound: Rect) -> Result<Self> {
        if !bound.is_valid() {
            return Err(Error::InvalidBound(bound));
        }
        Self::new(bound, step_size_for(bound, M::AXIS_BITS))
    }

    /// The bounding rectangle.
    pub fn bound(&self) -> Rect {
        self.bound
    }

    /// Band step in pixels.
    pub fn step(&self) -> i32 {
        self.step
    }

    /// Encode `rect`, reporting axes that fall outside the bound.
    pub fn try_encode(&self, rect: Rect) -> AxisBands {
        try_encode_rect::<M>(self.bound, self.step, rect)
    }

    /// Encode `rect`, filling axes outside the bound with ones.
    #[inline]
    pub fn encode(&self, rect: Rect) -> M {
        self.try_encode(rect).to_mask()
    }
}
