use super::LineExtent;
use crate::geom::roots;
use crate::geom::tolerance::EPSILON;
use crate::geom::utils::perp_dot;
use crate::geom::{GeneralConic, Line, PointSet};
use crate::math::Point;

/// Tangency threshold on the discriminant of the line/conic quadratic,
/// relative to its terms.
const TANGENT_EPSILON: f64 = 1e-9;

/// Intersection of two lines, each restricted to its extent.
///
/// Parallel and degenerate lines have no intersection, collinear ones
/// included.
pub fn line_line(l1: &Line, e1: LineExtent, l2: &Line, e2: LineExtent) -> Option<Point> {
    if l1.is_degenerate() || l2.is_degenerate() {
        return None;
    }

    let v1 = l1.to_vector();
    let v2 = l2.to_vector();
    let denom = perp_dot(v1, v2);
    if denom.abs() <= EPSILON * v1.length() * v2.length() {
        return None;
    }

    let w = l2.start - l1.start;
    let t1 = perp_dot(w, v2) / denom;
    let t2 = perp_dot(w, v1) / denom;
    if !e1.contains(t1) || !e2.contains(t2) {
        return None;
    }

    Some(l1.sample(t1))
}

/// Intersections of a line, restricted to its extent, and a conic.
///
/// The parameterization of the line is substituted into the normalized
/// implicit equation, leaving a quadratic in the line parameter. A line lying
/// on the conic (a component of a line pair) has no isolated intersection and
/// gives nothing.
pub fn line_conic(line: &Line, extent: LineExtent, conic: &GeneralConic) -> Vec<Point> {
    let mut result = PointSet::new();
    line_conic_into(line, extent, conic, &mut result);

    result.into_vec()
}

pub(crate) fn line_conic_into(
    line: &Line,
    extent: LineExtent,
    conic: &GeneralConic,
    output: &mut PointSet,
) {
    if line.is_degenerate() {
        log::trace!("degenerate line");
        return;
    }

    let n = conic.normalized();
    let (x0, y0) = (line.start.x, line.start.y);
    let v = line.to_vector();
    let (dx, dy) = (v.x, v.y);

    let qa = n.a * dx * dx + n.b * dx * dy + n.c * dy * dy;
    let qb = 2.0 * n.a * x0 * dx + n.b * (x0 * dy + y0 * dx) + 2.0 * n.c * y0 * dy + n.d * dx + n.e * dy;
    let qc = n.eval(line.start);

    for t in roots::quadratic_with_tolerance(qa, qb, qc, TANGENT_EPSILON) {
        if extent.contains(t) {
            output.insert(line.sample(t));
        }
    }
}

#[cfg(test)]
use super::assert_same_points;
#[cfg(test)]
use crate::geom::{Conic, Ellipse, Hyperbola, Parabola};
#[cfg(test)]
use crate::math::point;

#[test]
fn crossing_lines() {
    let l1 = Line::new(point(0.0, 0.0), point(2.0, 2.0));
    let l2 = Line::new(point(0.0, 2.0), point(2.0, 0.0));
    let p = line_line(&l1, LineExtent::Segment, &l2, LineExtent::Segment).unwrap();
    assert!((p - point(1.0, 1.0)).length() < 1e-12);

    let short = Line::new(point(0.0, 2.0), point(0.5, 1.5));
    assert!(line_line(&l1, LineExtent::Segment, &short, LineExtent::Segment).is_none());
    assert!(line_line(&l1, LineExtent::Segment, &short, LineExtent::Ray).is_some());
    assert!(line_line(&short, LineExtent::Ray, &l1, LineExtent::Segment).is_some());
}

#[test]
fn parallel_lines() {
    let l1 = Line::new(point(0.0, 0.0), point(1.0, 1.0));
    let l2 = Line::new(point(0.0, 1.0), point(1.0, 2.0));
    assert!(line_line(&l1, LineExtent::Infinite, &l2, LineExtent::Infinite).is_none());
    assert!(line_line(&l1, LineExtent::Infinite, &l1, LineExtent::Infinite).is_none());

    let degenerate = Line::new(point(0.5, 0.5), point(0.5, 0.5));
    assert!(line_line(&l1, LineExtent::Infinite, &degenerate, LineExtent::Infinite).is_none());
}

#[test]
fn line_and_ellipse() {
    let ellipse = Ellipse::new(point(0.0, 0.0), 2.0, 1.0, 0.0, true);
    let line = Line::new(point(-5.0, 0.0), point(5.0, 0.0));
    let points = line_conic(&line, LineExtent::Segment, &ellipse.to_general_conic());
    assert_same_points(&points, &[point(-2.0, 0.0), point(2.0, 0.0)], 1e-9);

    let tangent = Line::new(point(-5.0, 1.0), point(5.0, 1.0));
    let points = line_conic(&tangent, LineExtent::Infinite, &ellipse.to_general_conic());
    assert_same_points(&points, &[point(0.0, 1.0)], 1e-6);
}

#[test]
fn line_and_open_conics() {
    // y = x²
    let parabola = Parabola::new(point(0.0, 0.0), 0.0, 0.25).unwrap();
    let line = Line::new(point(0.0, 4.0), point(1.0, 4.0));
    let points = line_conic(&line, LineExtent::Infinite, &parabola.to_general_conic());
    assert_same_points(&points, &[point(-2.0, 4.0), point(2.0, 4.0)], 1e-9);
    assert_same_points(
        &line_conic(&line, LineExtent::Ray, &parabola.to_general_conic()),
        &[point(2.0, 4.0)],
        1e-9,
    );

    // The axis of the parabola crosses it once.
    let axis = Line::new(point(0.0, -1.0), point(0.0, 1.0));
    let points = line_conic(&axis, LineExtent::Infinite, &parabola.to_general_conic());
    assert_same_points(&points, &[point(0.0, 0.0)], 1e-9);

    // x² - y² = 1 meets both branches.
    let hyperbola = Hyperbola::new(point(0.0, 0.0), 1.0, 1.0, 0.0).unwrap();
    let points = line_conic(&line, LineExtent::Infinite, &hyperbola.to_general_conic());
    let x = 17.0f64.sqrt();
    assert_same_points(&points, &[point(-x, 4.0), point(x, 4.0)], 1e-9);
}

#[test]
fn line_on_a_line_pair() {
    let l1 = Line::new(point(0.0, 0.0), point(1.0, 0.0));
    let l2 = Line::new(point(0.0, 0.0), point(0.0, 1.0));
    let pair = GeneralConic::from_lines(&l1, &l2).unwrap();
    let crossing = Line::new(point(-1.0, 1.0), point(1.0, -1.0));
    assert_same_points(
        &line_conic(&crossing, LineExtent::Infinite, &pair),
        &[point(0.0, 0.0)],
        1e-9,
    );
    assert!(line_conic(&l1, LineExtent::Infinite, &pair).is_empty());
}
