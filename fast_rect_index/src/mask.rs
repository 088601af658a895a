// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-width rectangle masks.
//!
//! A mask records which coarse coordinate bands a rectangle touches, one bit per band
//! and axis. Each mask type packs its x bits into the low half of one unsigned integer
//! and its y bits into the high half, so an `N`-bit mask has `N / 2` bands per axis.
//!
//! Masks are conservative: two rectangles that overlap always produce masks that
//! [maybe intersect](RectMaskArith::maybe_intersecting), but overlapping masks do not
//! imply overlapping rectangles. Axes that could not be encoded are filled with ones so
//! that the exact geometric test always runs for them.

use core::fmt::Debug;

/// Bit arithmetic shared by all mask widths.
pub trait RectMaskArith: Copy + Eq + Debug {
    /// Bands per axis.
    const AXIS_BITS: u32;
    /// No band set on either axis. This is the mask of a trivial rectangle.
    const EMPTY: Self;
    /// Every band set on both axes. This forces exact tests.
    const ALL: Self;

    /// Pack per-axis band bits. Bits above [`Self::AXIS_BITS`] are dropped.
    fn from_axes(x: u64, y: u64) -> Self;

    /// Band bits of the x axis.
    fn x_bits(self) -> u64;

    /// Band bits of the y axis.
    fn y_bits(self) -> u64;

    /// Whether the two masks share a band on both axes.
    ///
    /// This is a necessary condition for the underlying rectangles to overlap.
    fn maybe_intersecting(self, other: Self) -> bool;

    /// Whether every band of `other` is also a band of `self`, on both axes.
    ///
    /// This is a necessary condition for `self`'s rectangle to encompass `other`'s.
    /// An empty `other` is trivially encompassed.
    fn maybe_encompassing(self, other: Self) -> bool;

    /// Whether either axis has no band set.
    fn is_degenerate(self) -> bool {
        self.x_bits() == 0 || self.y_bits() == 0
    }

    /// Like [`maybe_encompassing`](Self::maybe_encompassing), but degenerate masks never match.
    fn maybe_encompassing_nt(self, other: Self) -> bool {
        !self.is_degenerate() && !other.is_degenerate() && self.maybe_encompassing(other)
    }
}

macro_rules! rect_mask {
    ($(#[$meta:meta])* $name:ident, $int:ty, $axis_bits:expr) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name($int);

        impl $name {
            const X_MASK: $int = <$int>::MAX >> $axis_bits;
            const Y_MASK: $int = !Self::X_MASK;

            /// The packed bits: x bands in the low half, y bands in the high half.
            pub const fn bits(self) -> $int {
                self.0
            }

            /// Wrap packed bits.
            pub const fn from_bits(bits: $int) -> Self {
                Self(bits)
            }
        }

        impl RectMaskArith for $name {
            const AXIS_BITS: u32 = $axis_bits;
            const EMPTY: Self = Self(0);
            const ALL: Self = Self(<$int>::MAX);

            #[allow(
                clippy::cast_possible_truncation,
                trivial_numeric_casts,
                reason = "Bits beyond AXIS_BITS are masked off; the 64-bit mask casts to itself."
            )]
            #[inline]
            fn from_axes(x: u64, y: u64) -> Self {
                let x = (x as $int) & Self::X_MASK;
                let y = ((y as $int) << $axis_bits) & Self::Y_MASK;
                Self(x | y)
            }

            #[allow(
                clippy::cast_possible_truncation,
                trivial_numeric_casts,
                reason = "The x half is at most 64 bits wide."
            )]
            #[inline]
            fn x_bits(self) -> u64 {
                (self.0 & Self::X_MASK) as u64
            }

            #[allow(
                clippy::cast_possible_truncation,
                trivial_numeric_casts,
                reason = "The y half is at most 64 bits wide."
            )]
            #[inline]
            fn y_bits(self) -> u64 {
                (self.0 >> $axis_bits) as u64
            }

            #[inline]
            fn maybe_intersecting(self, other: Self) -> bool {
                let both = self.0 & other.0;
                // Non-short-circuiting `&` keeps this branch free.
                ((both & Self::X_MASK) != 0) & ((both & Self::Y_MASK) != 0)
            }

            #[inline]
            fn maybe_encompassing(self, other: Self) -> bool {
                other.0 & !self.0 == 0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("x", &format_args!("{:#b}", self.x_bits()))
                    .field("y", &format_args!("{:#b}", self.y_bits()))
                    .finish()
            }
        }
    };
}

rect_mask!(
    /// Mask with 4 bands per axis.
    RectMask8,
    u8,
    4
);
rect_mask!(
    /// Mask with 8 bands per axis.
    RectMask16,
    u16,
    8
);
rect_mask!(
    /// Mask with 16 bands per axis.
    RectMask32,
    u32,
    16
);
rect_mask!(
    /// Mask with 32 bands per axis.
    RectMask64,
    u64,
    32
);
rect_mask!(
    /// Mask with 64 bands per axis. This is the default for lists and nodes.
    RectMask128,
    u128,
    64
);

/// Set `bit` and every bit above it. `bit` must have exactly one bit set.
#[inline]
pub const fn set_all_above(bit: u64) -> u64 {
    debug_assert!(bit.is_power_of_two(), "expected a single set bit");
    !(bit - 1)
}

/// Set `bit` and every bit below it. `bit` must have exactly one bit set.
#[inline]
pub const fn set_all_below(bit: u64) -> u64 {
    debug_assert!(bit.is_power_of_two(), "expected a single set bit");
    bit | (bit - 1)
}

/// Bits `first..=last` set. Both must be below 64 and `first <= last`.
#[inline]
pub const fn band_range(first: u32, last: u32) -> u64 {
    debug_assert!(first <= last && last < 64, "band range out of order or too wide");
    set_all_above(1 << first) & set_all_below(1 << last)
}
