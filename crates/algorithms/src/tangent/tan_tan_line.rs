//! Lines tangent to two objects.

use super::side;
use crate::geom::tolerance::EPSILON;
use crate::geom::transform::Frame;
use crate::geom::utils::rotate_90;
use crate::geom::{Circle, Line};
use crate::intersect::circle_circle as intersect_circle_circle;
use crate::math::{vector, Point, Vector};

use arrayvec::ArrayVec;

/// Lines through `p` tangent to `circle`.
///
/// The tangency points are on the circle having the segment between `p` and
/// the center as a diameter. Each line goes from `p` to its tangency point.
/// A point on the circle gives the tangent at that point, a point inside
/// gives nothing.
pub fn circle_point(circle: &Circle, p: Point) -> Vec<Line> {
    let d = circle.center.distance_to(p);
    let r = circle.radius;
    if r <= EPSILON || d < r - EPSILON * r {
        return Vec::new();
    }

    if (d - r).abs() <= EPSILON * r {
        let radial = p - circle.center;
        return vec![Line::with_direction(p, rotate_90(radial / d))];
    }

    let thales = Circle::from_two_points(circle.center, p);
    intersect_circle_circle(circle, &thales)
        .into_iter()
        .map(|t| Line::new(p, t))
        .collect()
}

/// Lines tangent to two circles.
///
/// With the first circle at the origin and the second one at `(D, 0)`, a line
/// of unit normal `n` and offset `c` is tangent to both when `c = s1·r1` and
/// `n.x·D + c = s2·r2`, for each choice of sides `s1`, `s2`. It gives
/// `n.x = (s2·r2 - s1·r1) / D`, a solution only when `|n.x| ≤ 1`. The four
/// cases are the two outer and the two inner tangents.
///
/// Each line goes from its tangency point on the first circle to its
/// tangency point on the second one, or runs along the common tangent when
/// both points coincide. Concentric circles give nothing.
pub fn circle_circle(c1: &Circle, c2: &Circle) -> Vec<Line> {
    let dist = c1.center.distance_to(c2.center);
    let scale = c1.radius + c2.radius;
    let frame = match Frame::new(c1.center, c2.center - c1.center) {
        Some(frame) if dist > EPSILON * scale => frame,
        _ => return Vec::new(),
    };

    // Normal and offset of each solution, in the frame.
    let mut found: ArrayVec<(Vector, f64), 4> = ArrayVec::new();
    let mut result = Vec::new();
    for case in 0..4 {
        let r1 = side(case, 0) * c1.radius;
        let r2 = side(case, 1) * c2.radius;
        let nx = (r2 - r1) / dist;
        let disc = 1.0 - nx * nx;
        if disc < -EPSILON {
            continue;
        }
        let n = vector(nx, disc.max(0.0).sqrt());

        // The same line with an opposite normal is the same solution.
        let duplicate = found.iter().any(|(m, c)| {
            let same = (*m - n).length() + (c - r1).abs() / scale;
            let opposite = (*m + n).length() + (c + r1).abs() / scale;
            same.min(opposite) <= EPSILON
        });
        if duplicate {
            continue;
        }
        found.push((n, r1));

        let normal = frame.vector_to_world(n);
        // Signed distance of a center q is n·q + c.
        let t1 = c1.center - normal * r1;
        let t2 = c2.center - normal * r2;
        if t1.distance_to(t2) <= EPSILON * scale {
            result.push(Line::with_direction(t1, rotate_90(normal)));
        } else {
            result.push(Line::new(t1, t2));
        }
    }

    result
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn assert_tangent(line: &Line, circle: &Circle) {
    let d = line.signed_distance(circle.center).unwrap();
    assert!((d.abs() - circle.radius).abs() < 1e-9, "{:?} {:?}", line, circle);
}

#[test]
fn from_a_point() {
    let circle = Circle::new(point(0.0, 0.0), 1.0);
    let lines = circle_point(&circle, point(2.0, 0.0));
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(line.start, point(2.0, 0.0));
        assert!((line.end.x - 0.5).abs() < 1e-12);
        assert!((line.end.y.abs() - 0.75f64.sqrt()).abs() < 1e-12);
        assert_tangent(line, &circle);
    }

    let on_circle = circle_point(&circle, point(0.0, 1.0));
    assert_eq!(on_circle.len(), 1);
    assert_tangent(&on_circle[0], &circle);

    assert!(circle_point(&circle, point(0.5, 0.0)).is_empty());
}

#[test]
fn common_tangents() {
    let c1 = Circle::new(point(0.0, 0.0), 1.0);
    let c2 = Circle::new(point(5.0, 0.0), 1.0);
    let lines = circle_circle(&c1, &c2);
    assert_eq!(lines.len(), 4);
    for line in &lines {
        assert_tangent(line, &c1);
        assert_tangent(line, &c2);
    }
    // Inner tangents cross at the middle.
    let crossing = lines
        .iter()
        .filter(|l| l.signed_distance(point(2.5, 0.0)).unwrap().abs() < 1e-9)
        .count();
    assert_eq!(crossing, 2);
}

#[test]
fn touching_and_nested_circles() {
    let c1 = Circle::new(point(0.0, 0.0), 1.0);
    let c2 = Circle::new(point(0.0, 3.0), 2.0);
    let lines = circle_circle(&c1, &c2);
    // Two outer tangents and the tangent at the contact point.
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert_tangent(line, &c1);
        assert_tangent(line, &c2);
    }

    let inner = Circle::new(point(0.5, 0.0), 0.2);
    assert!(circle_circle(&c1, &inner).is_empty());
    assert!(circle_circle(&c1, &c1).is_empty());
}
