//! A de-duplicating point accumulator.

use crate::tolerance::EPSILON;
use crate::utils::square_distance;
use crate::Point;

/// Collects points, merging any two whose squared distance is below a tolerance.
///
/// Independent algebraic branches (both signs of a square root, several
/// degenerate members of a pencil of conics) commonly find the same geometric
/// point; routing results through a `PointSet` absorbs those duplicates.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
    tolerance: f64,
}

impl PointSet {
    /// A set merging points closer than `sqrt(EPSILON)`.
    pub fn new() -> Self {
        Self::with_tolerance(EPSILON)
    }

    /// A set merging points whose squared distance is below `tolerance`.
    pub fn with_tolerance(tolerance: f64) -> Self {
        PointSet {
            points: Vec::new(),
            tolerance,
        }
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Adds a point unless an equivalent one is already present.
    ///
    /// Points with non-finite coordinates are ignored. Returns true if the
    /// point was added.
    pub fn insert(&mut self, p: Point) -> bool {
        if !p.x.is_finite() || !p.y.is_finite() || self.contains(p) {
            return false;
        }

        self.points.push(p);
        true
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points
            .iter()
            .any(|q| square_distance(*q, p) < self.tolerance)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<Point> {
        self.points.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for PointSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point> for PointSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

impl<'l> IntoIterator for &'l PointSet {
    type Item = &'l Point;
    type IntoIter = core::slice::Iter<'l, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for PointSet {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(set: PointSet) -> Self {
        set.points
    }
}

#[test]
fn merges_close_points() {
    use crate::point;

    let mut set = PointSet::new();
    assert!(set.insert(point(1.0, 2.0)));
    assert!(!set.insert(point(1.0 + 1e-7, 2.0 - 1e-7)));
    assert!(set.insert(point(1.0, 2.1)));
    assert!(!set.insert(point(f64::NAN, 0.0)));
    assert_eq!(set.len(), 2);

    let mut coarse = PointSet::with_tolerance(0.25);
    coarse.extend([point(0.0, 0.0), point(0.4, 0.0), point(0.6, 0.0)]);
    assert_eq!(coarse.as_slice(), &[point(0.0, 0.0), point(0.6, 0.0)]);
}
