// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle relations: an exact test paired with a mask pre-filter.
//!
//! Every relation answers [`RectRelation::test`] exactly and
//! [`RectMaskRelation::test_maybe`] conservatively: when the mask test says `false`, the
//! exact test is `false` too. Queries run the cheap mask test first and only touch
//! coordinates for candidates that survive it.
//!
//! | Relation | Symmetric | Trivial rects |
//! |---|---|---|
//! | [`Identical`] | yes | any two trivial rects are identical |
//! | [`IdenticalNt`] | yes | never match |
//! | [`Intersect`] | yes | never match |
//! | [`Encompassing`] (`first ⊇ second`) | no | a trivial `second` is encompassed |
//! | [`EncompassingNt`] | no | never match |
//! | [`EncompassedBy`] (`first ⊆ second`) | no | a trivial `first` is encompassed |
//! | [`EncompassedByNt`] | no | never match |
//!
//! The triviality-allowing and `Nt` ("non-trivial") forms are separate types on purpose:
//! picking one is a decision at the call site.
//!
//! ## Trivial containment
//!
//! [`Encompassing`] reports a trivial rectangle as encompassed by every rectangle,
//! including ones it is nowhere near, while [`Intersect`] reports that the same pair
//! does not overlap. Code that uses containment as a stronger form of overlap should use
//! the `Nt` forms.

use crate::mask::RectMaskArith;
use crate::rect::Rect;

/// Exact relation between two rectangles.
pub trait RectRelation {
    /// Whether `first` and `second` are in this relation.
    fn test(&self, first: &Rect, second: &Rect) -> bool;
}

/// Relation with a conservative mask pre-filter.
pub trait RectMaskRelation<M: RectMaskArith>: RectRelation {
    /// Returns `false` only if [`test`](RectRelation::test) is `false` for every pair of
    /// rectangles with these masks.
    fn test_maybe(&self, first: M, second: M) -> bool;
}

/// Both rectangles are equal, and any two trivial rectangles are considered equal.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identical;

/// Both rectangles are equal and valid.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdenticalNt;

/// The rectangles overlap with positive area.
#[derive(Copy, Clone, Debug, Default)]
pub struct Intersect;

/// `first` contains `second`; a trivial `second` is always contained.
#[derive(Copy, Clone, Debug, Default)]
pub struct Encompassing;

/// `first` contains `second`, and both are valid.
#[derive(Copy, Clone, Debug, Default)]
pub struct EncompassingNt;

/// `first` is contained in `second`; a trivial `first` is always contained.
#[derive(Copy, Clone, Debug, Default)]
pub struct EncompassedBy;

/// `first` is contained in `second`, and both are valid.
#[derive(Copy, Clone, Debug, Default)]
pub struct EncompassedByNt;

impl RectRelation for Identical {
    #[inline]
    fn test(&self, first: &Rect, second: &Rect) -> bool {
        if first.is_trivial() || second.is_trivial() {
            return first.is_trivial() && second.is_trivial();
        }
        first == second
    }
}

impl<M: RectMaskArith> RectMaskRelation<M> for Identical {
    #[inline]
    fn test_maybe(&self, first: M, second: M) -> bool {
        first == second
    }
}

impl RectRelation for IdenticalNt {
    #[inline]
    fn test(&self, first: &Rect, second: &Rect) -> bool {
        first.is_valid() && first == second
    }
}

impl<M: RectMaskArith> RectMaskRelation<M> for IdenticalNt {
    #[inline]
    fn test_maybe(&self, first: M, second: M) -> bool {
        !first.is_degenerate() && first == second
    }
}

impl RectRelation for Intersect {
    #[inline]
    fn test(&self, first: &Rect, second: &Rect) -> bool {
        first.intersects(second)
    }
}

impl<M: RectMaskArith> RectMaskRelation<M> for Intersect {
    #[inline]
    fn test_maybe(&self, first: M, second: M) -> bool {
        first.maybe_intersecting(second)
    }
}

impl RectRelation for Encompassing {
    #[inline]
    fn test(&self, first: &Rect, second: &Rect) -> bool {
        if second.is_trivial() {
            return true;
        }
        first.is_valid() && first.encompasses_valid(second)
    }
}

impl<M: RectMaskArith> RectMaskRelation<M> for Encompassing {
    #[inline]
    fn test_maybe(&self, first: M, second: M) -> bool {
        first.maybe_encompassing(second)
    }
}

impl RectRelation for EncompassingNt {
    #[inline]
    fn test(&self, first: &Rect, second: &Rect) -> bool {
        first.is_valid() && second.is_valid() && first.encompasses_valid(second)
    }
}

impl<M: RectMaskArith> RectMaskRelation<M> for EncompassingNt {
    #[inline]
    fn test_maybe(&self, first: M, second: M) -> bool {
        first.maybe_encompassing_nt(second)
    }
}

impl RectRelation for EncompassedBy {
    #[inline]
    fn test(&self, first: &Rect, second: &Rect) -> bool {
        Encompassing.test(second, first)
    }
}

impl<M: RectMaskArith> RectMaskRelation<M> for EncompassedBy {
    #[inline]
    fn test_maybe(&self, first: M, second: M) -> bool {
        Encompassing.test_maybe(second, first)
    }
}

impl RectRelation for EncompassedByNt {
    #[inline]
    fn test(&self, first: &Rect, second: &Rect) -> bool {
        EncompassingNt.test(second, first)
    }
}

impl<M: RectMaskArith> RectMaskRelation<M> for EncompassedByNt {
    #[inline]
    fn test_maybe(&self, first: M, second: M) -> bool {
        EncompassingNt.test_maybe(second, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_rect;
    use crate::mask::{RectMask16, RectMask128};
    use alloc::vec::Vec;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const BOUND: Rect = Rect::new(0, 0, 64, 64);

    fn mask16(r: Rect) -> RectMask16 {
        encode_rect(BOUND, 8, r)
    }

    fn random_rects(rng: &mut StdRng, n: usize) -> Vec<Rect> {
        (0..n)
            .map(|_| {
                // Some rects reach outside the bound, some are trivial.
                Rect::new(
                    rng.random_range(-16..72),
                    rng.random_range(-16..72),
                    rng.random_range(-2..40),
                    rng.random_range(-2..40),
                )
            })
            .collect()
    }

    fn check_no_false_negatives<R: RectMaskRelation<RectMask16> + RectMaskRelation<RectMask128>>(
        rel: R,
    ) {
        let mut rng = StdRng::seed_from_u64(0x5EED_0001);
        let rects = random_rects(&mut rng, 120);
        for a in &rects {
            for b in &rects {
                if rel.test(a, b) {
                    assert!(
                        RectMaskRelation::<RectMask16>::test_maybe(&rel, mask16(*a), mask16(*b)),
                        "16-bit mask rejected {a:?} vs {b:?}"
                    );
                    let ma: RectMask128 = encode_rect(BOUND, 1, *a);
                    let mb: RectMask128 = encode_rect(BOUND, 1, *b);
                    assert!(
                        RectMaskRelation::<RectMask128>::test_maybe(&rel, ma, mb),
                        "128-bit mask rejected {a:?} vs {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn masks_never_reject_true_matches() {
        check_no_false_negatives(Identical);
        check_no_false_negatives(IdenticalNt);
        check_no_false_negatives(Intersect);
        check_no_false_negatives(Encompassing);
        check_no_false_negatives(EncompassingNt);
        check_no_false_negatives(EncompassedBy);
        check_no_false_negatives(EncompassedByNt);
    }

    #[test]
    fn encompassed_by_swaps_arguments() {
        let outer = Rect::new(0, 0, 10, 10);
        let inner = Rect::new(2, 2, 3, 3);
        assert!(Encompassing.test(&outer, &inner));
        assert!(!Encompassing.test(&inner, &outer));
        assert!(EncompassedBy.test(&inner, &outer));
        assert!(!EncompassedBy.test(&outer, &inner));
        let (mo, mi) = (mask16(outer), mask16(inner));
        assert_eq!(
            Encompassing.test_maybe(mo, mi),
            EncompassedBy.test_maybe(mi, mo)
        );
        assert_eq!(
            EncompassingNt.test_maybe(mi, mo),
            EncompassedByNt.test_maybe(mo, mi)
        );
    }

    #[test]
    fn triviality_split() {
        let trivial = Rect::new(5, 5, 0, 3);
        let other_trivial = Rect::new(-40, 2, 4, -1);
        let valid = Rect::new(0, 0, 10, 10);

        assert!(Identical.test(&trivial, &other_trivial));
        assert!(!IdenticalNt.test(&trivial, &trivial));
        assert!(IdenticalNt.test(&valid, &valid));

        assert!(Encompassing.test(&valid, &trivial));
        assert!(!EncompassingNt.test(&valid, &trivial));
        assert!(!Encompassing.test(&trivial, &valid));

        assert!(EncompassedBy.test(&trivial, &valid));
        assert!(!EncompassedByNt.test(&trivial, &valid));

        assert!(!Intersect.test(&trivial, &valid));
        assert!(!Intersect.test(&trivial, &trivial));
    }

    #[test]
    fn trivial_containment_disagrees_with_intersection() {
        // A trivial rect far away from `valid` is still "encompassed" by it.
        let valid = Rect::new(0, 0, 8, 8);
        let far_trivial = Rect::new(60, 60, 0, 0);
        let (mv, mt) = (mask16(valid), mask16(far_trivial));

        assert!(Encompassing.test(&valid, &far_trivial));
        assert!(Encompassing.test_maybe(mv, mt));
        assert!(!Intersect.test(&valid, &far_trivial));
        assert!(!Intersect.test_maybe(mv, mt));

        // The non-trivial forms keep containment a subset of intersection.
        assert!(!EncompassingNt.test(&valid, &far_trivial));
        assert!(!EncompassingNt.test_maybe(mv, mt));
    }
}
