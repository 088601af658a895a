// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangle type and helpers.

/// Axis-aligned integer rectangle in pixel space.
///
/// The rectangle covers the pixels `x..x + width` horizontally and `y..y + height`
/// vertically. A rectangle with a non-positive width or height is *trivial*: it covers
/// no pixels. Relations treat trivial rectangles specially (see [`crate::relations`]),
/// so triviality is a queryable property rather than an error.
///
/// Far edges may lie past `i32::MAX`. Overlap and containment tests compute edges in
/// `i64`, so any rectangle on the `i32` plane can be stored and queried.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// The trivial rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from left/top (inclusive) and right/bottom (exclusive) edges.
    ///
    /// The size saturates at the `i32` range.
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }

    /// Left edge (inclusive).
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (inclusive).
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Right edge (exclusive) without saturation.
    #[inline]
    pub const fn right_wide(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Bottom edge (exclusive) without saturation.
    #[inline]
    pub const fn bottom_wide(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Whether the rectangle covers at least one pixel.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Whether the rectangle covers no pixels (non-positive width or height).
    #[inline]
    pub const fn is_trivial(&self) -> bool {
        !self.is_valid()
    }

    /// Area in pixels; zero for trivial rectangles.
    pub fn area(&self) -> i64 {
        if self.is_trivial() {
            return 0;
        }
        i64::from(self.width) * i64::from(self.height)
    }

    /// The overlap of two rectangles.
    ///
    /// The result is trivial when the inputs do not overlap. Its size saturates at the
    /// `i32` range.
    pub fn intersect(&self, other: &Self) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right_wide().min(other.right_wide());
        let bottom = self.bottom_wide().min(other.bottom_wide());
        let span = |near: i32, far: i64| {
            let span = far - i64::from(near);
            i32::try_from(span).unwrap_or(if span > 0 { i32::MAX } else { i32::MIN })
        };
        Self::new(left, top, span(left, right), span(top, bottom))
    }

    /// Whether the overlap of two rectangles has positive width and height.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        i64::from(self.left().max(other.left())) < self.right_wide().min(other.right_wide())
            && i64::from(self.top().max(other.top()))
                < self.bottom_wide().min(other.bottom_wide())
    }

    /// Whether the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.left() <= x
            && i64::from(x) < self.right_wide()
            && self.top() <= y
            && i64::from(y) < self.bottom_wide()
    }

    /// Whether `other` lies entirely within `self`.
    ///
    /// Both rectangles must be valid; relation dispatch in [`crate::relations`] handles
    /// the trivial cases before reaching this check.
    #[inline]
    pub(crate) fn encompasses_valid(&self, other: &Self) -> bool {
        debug_assert!(
            self.is_valid() && other.is_valid(),
            "containment check requires valid rects: {self:?} vs {other:?}"
        );
        self.left() <= other.left()
            && self.top() <= other.top()
            && other.right_wide() <= self.right_wide()
            && other.bottom_wide() <= self.bottom_wide()
    }

    /// Smallest integer rectangle covering a Kurbo rectangle.
    ///
    /// Fractional edges are rounded outward and coordinates saturate at the `i32` range.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to i32 casts saturate, which is the intended clamping."
    )]
    pub fn from_kurbo_outer(rect: kurbo::Rect) -> Self {
        let r = rect.abs().expand();
        Self::from_ltrb(r.x0 as i32, r.y0 as i32, r.x1 as i32, r.y1 as i32)
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(
            f64::from(r.left()),
            f64::from(r.top()),
            r.right_wide() as f64,
            r.bottom_wide() as f64,
        )
    }
}
