// Copyright 2025 the Fast Rect Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unbounded root made of nested, origin-centred squares.
//!
//! Level `i` covers the square `Rect(-r, -r, 2r, 2r)` for radius `r = radii[i]`; radii grow
//! roughly geometrically from the minimum to the maximum radius. Each item goes to the
//! smallest level whose square contains it, so every level holds items of a similar scale
//! relative to its bound and its masks stay selective.
//!
//! Level collections are created on first insert through a [`LevelFactory`].

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter;
use core::marker::PhantomData;

use crate::collection::{RectCollection, RectQuery};
use crate::data_list::FastRectDataList;
use crate::error::{Error, Result};
use crate::node::{FastRectNode, FastRectNodeSettings};
use crate::rect::Rect;

/// Largest supported radius.
pub const MAX_RADIUS: i32 = (1 << 30) - 1;

/// Largest accepted growth ratio between consecutive radii.
pub const MAX_RATIO: f64 = 64.0;

/// Most levels a pyramid will have; the ratio is raised until the radii fit.
pub const MAX_LEVELS: usize = 64;

/// Default minimum radius.
pub const DEFAULT_MIN_RADIUS: i32 = 32;

/// Default growth ratio.
pub const DEFAULT_RATIO: f64 = 32.0;

/// Creates the collection for a level from the level's bounding square.
pub trait LevelFactory<C> {
    /// Build an empty collection for `bound`.
    fn create_level(&self, bound: Rect) -> Result<C>;
}

impl<C, F> LevelFactory<C> for F
where
    F: Fn(Rect) -> Result<C>,
{
    fn create_level(&self, bound: Rect) -> Result<C> {
        self(bound)
    }
}

impl<T> LevelFactory<FastRectNode<T>> for FastRectNodeSettings {
    fn create_level(&self, bound: Rect) -> Result<FastRectNode<T>> {
        FastRectNode::new(bound, self.clone())
    }
}

/// Spatial index over the whole `i32` plane (within [`MAX_RADIUS`] of the origin).
///
/// ```
/// use fast_rect_index::{Error, FastRectPyramid, Rect};
///
/// let mut pyramid: FastRectPyramid<&str> = FastRectPyramid::new(32, 1024, 32.0).unwrap();
/// assert_eq!(pyramid.radii(), [32, 1024]);
///
/// pyramid.add(Rect::new(-1, -1, 2, 2), "small").unwrap();
/// pyramid.add(Rect::new(100, -600, 20, 20), "far").unwrap();
/// assert!(matches!(
///     pyramid.add(Rect::new(-2000, -2000, 4000, 4000), "huge"),
///     Err(Error::BoundsExceeded { .. })
/// ));
///
/// let hits: Vec<_> = pyramid.enumerate(Rect::new(0, -1000, 200, 1000)).map(|(_, d)| *d).collect();
/// assert_eq!(hits, ["small", "far"]);
/// ```
pub struct FastRectPyramid<T, C = FastRectDataList<T>, F = fn(Rect) -> Result<C>> {
    radii: Vec<i32>,
    levels: Vec<Option<C>>,
    factory: F,
    len: usize,
    _data: PhantomData<fn() -> T>,
}

impl<T> FastRectPyramid<T> {
    /// Create a pyramid with flat list levels.
    ///
    /// Requires `1 <= min_radius <= max_radius <= MAX_RADIUS` and
    /// `(min_radius + 1) / min_radius <= ratio <= MAX_RATIO`.
    pub fn new(min_radius: i32, max_radius: i32, ratio: f64) -> Result<Self> {
        Self::with_factory(
            min_radius,
            max_radius,
            ratio,
            FastRectDataList::new as fn(Rect) -> Result<FastRectDataList<T>>,
        )
    }
}

impl<T> Default for FastRectPyramid<T> {
    fn default() -> Self {
        match Self::new(DEFAULT_MIN_RADIUS, MAX_RADIUS, DEFAULT_RATIO) {
            Ok(pyramid) => pyramid,
            Err(err) => unreachable!("default pyramid parameters are valid: {err}"),
        }
    }
}

impl<T> FastRectPyramid<T, FastRectNode<T>, FastRectNodeSettings> {
    /// Create a pyramid whose levels are [`FastRectNode`]s sharing `settings`.
    pub fn with_nodes(
        min_radius: i32,
        max_radius: i32,
        ratio: f64,
        settings: FastRectNodeSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Self::with_factory(min_radius, max_radius, ratio, settings)
    }
}

impl<T, C, F> FastRectPyramid<T, C, F>
where
    C: RectCollection<T>,
    F: LevelFactory<C>,
{
    /// Create a pyramid whose levels are built by `factory`.
    pub fn with_factory(min_radius: i32, max_radius: i32, ratio: f64, factory: F) -> Result<Self> {
        let radii = pyramid_radii(min_radius, max_radius, ratio)?;
        let levels = iter::repeat_with(|| None).take(radii.len()).collect();
        Ok(Self {
            radii,
            levels,
            factory,
            len: 0,
            _data: PhantomData,
        })
    }

    /// Level radii, strictly increasing; the last one is the maximum radius.
    pub fn radii(&self) -> &[i32] {
        &self.radii
    }

    /// Number of levels.
    pub fn level_count(&self) -> usize {
        self.radii.len()
    }

    /// Bounding square of a level.
    pub fn level_bound(&self, level: usize) -> Option<Rect> {
        self.radii.get(level).map(|&r| level_square(r))
    }

    /// The collection of a level, if any item has been stored there.
    pub fn level(&self, level: usize) -> Option<&C> {
        self.levels.get(level)?.as_ref()
    }

    /// Indices of levels whose collection has been created.
    pub fn materialized_levels(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.as_ref().map(|_| i))
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no items are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The smallest level whose square contains `rect`.
    pub fn level_of(&self, rect: Rect) -> Result<usize> {
        if rect.is_trivial() {
            return Err(Error::TrivialRect(rect));
        }
        // Last covered pixels; i64 so `right - 1` can't overflow.
        let last_x = i64::from(rect.x) + i64::from(rect.width) - 1;
        let last_y = i64::from(rect.y) + i64::from(rect.height) - 1;
        let reach = [i64::from(rect.x), i64::from(rect.y), last_x, last_y]
            .into_iter()
            .map(pixel_distance)
            .max()
            .unwrap_or(0);
        let level = self.radii.partition_point(|&r| i64::from(r) < reach);
        if level == self.radii.len() {
            return Err(Error::BoundsExceeded {
                rect,
                max_radius: self.radii[self.radii.len() - 1],
            });
        }
        Ok(level)
    }

    /// Insert an item into its level, creating the level's collection if needed.
    pub fn add(&mut self, rect: Rect, data: T) -> Result<()> {
        let level = self.level_of(rect)?;
        let collection = match self.levels[level].take() {
            Some(collection) => collection,
            None => {
                let bound = level_square(self.radii[level]);
                tracing::debug!(level, ?bound, "materializing pyramid level");
                self.factory.create_level(bound)?
            }
        };
        self.levels[level].insert(collection).add(rect, data)?;
        self.len += 1;
        Ok(())
    }

    /// Lazily yield items overlapping `query` with positive area.
    ///
    /// Every level whose square meets the query is searched, since a level above the
    /// query's own can hold large items reaching into it.
    pub fn enumerate(&self, query: Rect) -> PyramidMatches<'_, T, C> {
        PyramidMatches {
            radii: &self.radii,
            levels: &self.levels,
            query,
            pos: 0,
            current: None,
        }
    }

    /// Remove every item and release every level collection.
    pub fn clear(&mut self) {
        for level in &mut self.levels {
            *level = None;
        }
        self.len = 0;
    }
}

impl<T, C, F> Debug for FastRectPyramid<T, C, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FastRectPyramid")
            .field("radii", &self.radii)
            .field("materialized", &self.levels.iter().filter(|l| l.is_some()).count())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<T, C, F> RectQuery<T> for FastRectPyramid<T, C, F>
where
    C: RectCollection<T>,
    F: LevelFactory<C>,
{
    fn query_rect<'a>(&'a self, query: Rect) -> Box<dyn Iterator<Item = (Rect, &'a T)> + 'a> {
        Box::new(self.enumerate(query))
    }
}

/// Lazy iterator over pyramid items overlapping a query. See [`FastRectPyramid::enumerate`].
pub struct PyramidMatches<'a, T, C> {
    radii: &'a [i32],
    levels: &'a [Option<C>],
    query: Rect,
    pos: usize,
    current: Option<Box<dyn Iterator<Item = (Rect, &'a T)> + 'a>>,
}

impl<'a, T, C: RectQuery<T>> PyramidMatches<'a, T, C> {
    fn advance_level(&mut self) -> bool {
        let levels = self.levels;
        while let Some(level) = levels.get(self.pos) {
            let radius = self.radii[self.pos];
            self.pos += 1;
            if let Some(collection) = level {
                if level_square(radius).intersects(&self.query) {
                    self.current = Some(collection.query_rect(self.query));
                    return true;
                }
            }
        }
        false
    }
}

impl<'a, T, C: RectQuery<T>> Iterator for PyramidMatches<'a, T, C> {
    type Item = (Rect, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some(hit) = current.next() {
                    return Some(hit);
                }
                self.current = None;
            }
            if !self.advance_level() {
                return None;
            }
        }
    }
}

impl<T, C> Debug for PyramidMatches<'_, T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PyramidMatches")
            .field("query", &self.query)
            .field("pos", &self.pos)
            .finish_non_exhaustive()
    }
}

fn level_square(radius: i32) -> Rect {
    Rect::new(-radius, -radius, 2 * radius, 2 * radius)
}

/// Distance of pixel `v` from the centre `-0.5`, rounded up.
fn pixel_distance(v: i64) -> i64 {
    if v < 0 { -v } else { v + 1 }
}

/// Validate pyramid parameters and build the radii.
fn pyramid_radii(min_radius: i32, max_radius: i32, ratio: f64) -> Result<Vec<i32>> {
    if min_radius < 1 || min_radius > max_radius || max_radius > MAX_RADIUS {
        return Err(Error::InvalidRadius {
            min: min_radius,
            max: max_radius,
            limit: MAX_RADIUS,
        });
    }
    let floor = f64::from(min_radius + 1) / f64::from(min_radius);
    if !ratio.is_finite() || ratio < floor || ratio > MAX_RATIO {
        return Err(Error::InvalidRatio {
            ratio,
            floor,
            ceiling: MAX_RATIO,
        });
    }
    let mut ratio = ratio;
    loop {
        if let Some(radii) = grow_radii(min_radius, max_radius, ratio) {
            return Ok(radii);
        }
        let raised = (ratio * 1.25).min(MAX_RATIO);
        tracing::debug!(ratio, raised, "too many pyramid levels, raising ratio");
        ratio = raised;
    }
}

/// Radii from `min` to `max`, or `None` if that takes more than [`MAX_LEVELS`].
fn grow_radii(min: i32, max: i32, ratio: f64) -> Option<Vec<i32>> {
    let mut radii = Vec::with_capacity(8);
    radii.push(min);
    let mut r = min;
    while r < max {
        if radii.len() == MAX_LEVELS {
            return None;
        }
        let scaled = f64::from(r) * ratio;
        r = if scaled >= f64::from(max) {
            max
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "`scaled` is below `max`, which fits in i32."
            )]
            let truncated = scaled as i32;
            truncated.max(r + 1)
        };
        radii.push(r);
    }
    Some(radii)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn level_selection_and_bounds() {
        let pyramid: FastRectPyramid<()> = FastRectPyramid::new(32, 1024, 32.0).unwrap();
        assert_eq!(pyramid.radii(), [32, 1024]);
        assert_eq!(pyramid.level_of(Rect::new(-1, -1, 2, 2)), Ok(0));
        assert_eq!(pyramid.level_of(Rect::new(-32, -32, 64, 64)), Ok(0));
        assert_eq!(pyramid.level_of(Rect::new(-33, 0, 1, 1)), Ok(1));
        assert_eq!(pyramid.level_of(Rect::new(0, 31, 1, 2)), Ok(1));
        assert_eq!(
            pyramid.level_of(Rect::new(-2000, -2000, 4000, 4000)),
            Err(Error::BoundsExceeded {
                rect: Rect::new(-2000, -2000, 4000, 4000),
                max_radius: 1024,
            })
        );
        assert_eq!(
            pyramid.level_of(Rect::new(0, 0, 0, 3)),
            Err(Error::TrivialRect(Rect::new(0, 0, 0, 3)))
        );
    }

    #[test]
    fn parameter_validation() {
        assert!(matches!(
            FastRectPyramid::<()>::new(0, 10, 2.0),
            Err(Error::InvalidRadius { .. })
        ));
        assert!(matches!(
            FastRectPyramid::<()>::new(20, 10, 2.0),
            Err(Error::InvalidRadius { .. })
        ));
        assert!(matches!(
            FastRectPyramid::<()>::new(1, 1 << 30, 2.0),
            Err(Error::InvalidRadius { .. })
        ));
        assert!(matches!(
            FastRectPyramid::<()>::new(4, 100, 1.2),
            Err(Error::InvalidRatio { .. })
        ));
        assert!(matches!(
            FastRectPyramid::<()>::new(4, 100, 65.0),
            Err(Error::InvalidRatio { .. })
        ));
        assert!(matches!(
            FastRectPyramid::<()>::new(4, 100, f64::NAN),
            Err(Error::InvalidRatio { .. })
        ));
        assert_eq!(FastRectPyramid::<()>::new(7, 7, 2.0).unwrap().radii(), [7]);
    }

    #[test]
    fn radii_grow_and_squares_nest() {
        for (min, max, ratio) in [
            (32, MAX_RADIUS, 32.0),
            (1, MAX_RADIUS, 2.0),
            (3, 1000, 1.5),
            (100, 100_000, 64.0),
        ] {
            let pyramid: FastRectPyramid<()> = FastRectPyramid::new(min, max, ratio).unwrap();
            let radii = pyramid.radii();
            assert_eq!(radii[0], min);
            assert_eq!(radii[radii.len() - 1], max);
            assert!(radii.len() <= MAX_LEVELS);
            assert!(radii.windows(2).all(|w| w[0] < w[1]));
            for i in 1..pyramid.level_count() {
                let inner = pyramid.level_bound(i - 1).unwrap();
                let outer = pyramid.level_bound(i).unwrap();
                assert_eq!(inner.intersect(&outer), inner);
            }
        }
    }

    #[test]
    fn slow_ratio_is_raised_to_fit_the_level_cap() {
        let pyramid: FastRectPyramid<()> =
            FastRectPyramid::new(1 << 20, MAX_RADIUS, 1.000_001).unwrap();
        assert!(pyramid.level_count() <= MAX_LEVELS);
        assert_eq!(pyramid.radii()[pyramid.level_count() - 1], MAX_RADIUS);
    }

    #[test]
    fn default_pyramid() {
        let pyramid: FastRectPyramid<u8> = FastRectPyramid::default();
        assert_eq!(
            pyramid.radii(),
            [32, 1024, 32_768, 1_048_576, 33_554_432, MAX_RADIUS]
        );
        assert!(pyramid.is_empty());
        assert_eq!(pyramid.materialized_levels().count(), 0);
    }

    #[test]
    fn levels_are_created_lazily_and_released_by_clear() {
        let mut pyramid: FastRectPyramid<u32> = FastRectPyramid::default();
        pyramid.add(Rect::new(5000, 5000, 10, 10), 1).unwrap();
        assert_eq!(pyramid.materialized_levels().collect::<Vec<_>>(), [2]);
        assert_eq!(pyramid.level(2).map(|l| l.len()), Some(1));
        assert!(pyramid.add(Rect::new(0, 0, -1, 5), 2).is_err());
        assert_eq!(pyramid.len(), 1);

        pyramid.clear();
        assert!(pyramid.is_empty());
        assert_eq!(pyramid.materialized_levels().count(), 0);
        assert_eq!(pyramid.enumerate(Rect::new(0, 0, 10_000, 10_000)).count(), 0);
        pyramid.clear();
        assert!(pyramid.is_empty());
    }

    #[test]
    fn large_items_in_higher_levels_are_found_by_small_queries() {
        let mut pyramid: FastRectPyramid<&str> = FastRectPyramid::new(16, 1 << 20, 16.0).unwrap();
        pyramid.add(Rect::new(-5000, -5000, 10_000, 10_000), "big").unwrap();
        pyramid.add(Rect::new(1, 1, 2, 2), "small").unwrap();
        let hits: Vec<_> = pyramid.enumerate(Rect::new(0, 0, 4, 4)).map(|(_, d)| *d).collect();
        assert_eq!(hits, ["small", "big"]);
    }

    #[test]
    fn queries_reaching_past_i32_max_do_not_overflow() {
        let settings = FastRectNodeSettings::default().with_split_threshold(2);
        let mut flat: FastRectPyramid<u8> = FastRectPyramid::default();
        let mut nodes = FastRectPyramid::with_nodes(32, MAX_RADIUS, 32.0, settings).unwrap();
        for i in 0..4 {
            let rect = Rect::new(MAX_RADIUS - 10 * (i + 1), 0, 10, 10);
            flat.add(rect, i as u8).unwrap();
            nodes.add(rect, i as u8).unwrap();
        }
        let beyond = Rect::new(i32::MAX - 5, 0, 10, 10);
        let across = Rect::new(MAX_RADIUS - 15, 0, i32::MAX, 5);
        let corner = Rect::new(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX);
        assert_eq!(flat.enumerate(beyond).count(), 0);
        assert_eq!(nodes.enumerate(beyond).count(), 0);
        assert_eq!(flat.enumerate(corner).count(), 0);
        assert_eq!(nodes.enumerate(corner).count(), 0);
        let mut hits: Vec<u8> = flat.enumerate(across).map(|(_, d)| *d).collect();
        hits.sort_unstable();
        assert_eq!(hits, [0, 1]);
        let mut hits: Vec<u8> = nodes.enumerate(across).map(|(_, d)| *d).collect();
        hits.sort_unstable();
        assert_eq!(hits, [0, 1]);
    }

    fn check_against_brute_force<C, F>(mut pyramid: FastRectPyramid<usize, C, F>, seed: u64)
    where
        C: RectCollection<usize>,
        F: LevelFactory<C>,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut items = Vec::new();
        for id in 0..2000 {
            let scale = [8, 200, 5000, 100_000][rng.random_range(0..4)];
            let r = Rect::new(
                rng.random_range(-scale..scale),
                rng.random_range(-scale..scale),
                rng.random_range(1..=scale / 4 + 1),
                rng.random_range(1..=scale / 4 + 1),
            );
            pyramid.add(r, id).unwrap();
            items.push(r);
        }
        assert_eq!(pyramid.len(), items.len());
        for _ in 0..200 {
            let scale = [16, 1000, 200_000][rng.random_range(0..3)];
            let q = Rect::new(
                rng.random_range(-scale..scale),
                rng.random_range(-scale..scale),
                rng.random_range(-2..scale),
                rng.random_range(-2..scale),
            );
            let mut got: Vec<usize> = pyramid.enumerate(q).map(|(_, id)| *id).collect();
            got.sort_unstable();
            let want: Vec<usize> = (0..items.len()).filter(|&i| items[i].intersects(&q)).collect();
            assert_eq!(got, want, "{q:?}");
        }
    }

    #[test]
    fn flat_levels_match_brute_force() {
        check_against_brute_force(FastRectPyramid::new(32, 1 << 20, 8.0).unwrap(), 1);
    }

    #[test]
    fn node_levels_match_brute_force() {
        let settings = FastRectNodeSettings::default().with_split_threshold(32);
        check_against_brute_force(
            FastRectPyramid::with_nodes(32, 1 << 20, 8.0, settings).unwrap(),
            2,
        );
    }

    #[test]
    fn plain_vector_levels_match_brute_force() {
        let pyramid = FastRectPyramid::with_factory(
            32,
            1 << 20,
            8.0,
            |_: Rect| -> Result<Vec<(Rect, usize)>> { Ok(Vec::new()) },
        )
        .unwrap();
        check_against_brute_force(pyramid, 3);
    }

    #[test]
    fn failing_factory_surfaces_its_error() {
        let broken = FastRectNodeSettings::default().with_split_threshold(0);
        let mut pyramid: FastRectPyramid<u8, _, _> =
            FastRectPyramid::with_factory(32, 1024, 32.0, |bound: Rect| {
                FastRectNode::<u8>::new(bound, broken.clone())
            })
            .unwrap();
        assert_eq!(
            pyramid.add(Rect::new(0, 0, 1, 1), 0),
            Err(Error::InvalidThreshold)
        );
        assert!(pyramid.is_empty());
        assert_eq!(pyramid.materialized_levels().count(), 0);
    }
}
