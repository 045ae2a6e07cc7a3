use super::LineExtent;
use crate::geom::tolerance::EPSILON;
use crate::geom::transform::Frame;
use crate::geom::{Circle, Line, PointSet};
use crate::math::{point, Point};

/// Intersections of two circles.
///
/// The problem is reduced to the intersection of the first circle with the
/// radical line of both. Concentric circles have no intersection, coincident
/// ones included.
pub fn circle_circle(c1: &Circle, c2: &Circle) -> Vec<Point> {
    let scale = c1.radius + c2.radius;
    let frame = match Frame::new(c1.center, c2.center - c1.center) {
        Some(frame) if c1.center.distance_to(c2.center) > EPSILON * scale => frame,
        _ => {
            log::trace!("concentric circles");
            return Vec::new();
        }
    };

    let d = c1.center.distance_to(c2.center);
    let (r1, r2) = (c1.radius, c2.radius);
    // Abscissa of the radical line in the frame of the first circle.
    let x = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let radical = Line::with_direction(frame.to_world(point(x, 0.0)), frame.y_axis());

    circle_line(c1, &radical, LineExtent::Infinite)
}

/// Intersections of a circle and a line.
///
/// A line at a distance to the center within `EPSILON · radius` of the radius
/// is tangent and gives a single point. Degenerate lines give nothing.
pub fn circle_line(circle: &Circle, line: &Line, extent: LineExtent) -> Vec<Point> {
    let mut result = PointSet::new();
    if line.is_degenerate() {
        log::trace!("degenerate line");
        return result.into_vec();
    }

    let v = line.to_vector();
    let len2 = v.square_length();
    // Foot of the perpendicular from the center, as a line parameter.
    let t0 = (circle.center - line.start).dot(v) / len2;
    let foot = line.sample(t0);
    let dist = foot.distance_to(circle.center);
    let r = circle.radius;
    let tolerance = EPSILON * r;

    if dist > r + tolerance {
        return result.into_vec();
    }

    if (dist - r).abs() <= tolerance {
        if extent.contains(t0) {
            result.insert(foot);
        }
        return result.into_vec();
    }

    let dt = ((r - dist) * (r + dist)).sqrt() / len2.sqrt();
    for t in [t0 - dt, t0 + dt] {
        if extent.contains(t) {
            result.insert(line.sample(t));
        }
    }

    result.into_vec()
}

#[cfg(test)]
use super::assert_same_points;

#[test]
fn two_circles() {
    let c1 = Circle::new(point(0.0, 0.0), 5.0);
    let c2 = Circle::new(point(8.0, 0.0), 5.0);
    let points = circle_circle(&c1, &c2);
    assert_same_points(&points, &[point(4.0, 3.0), point(4.0, -3.0)], 1e-12);
    for p in &points {
        assert!((p.distance_to(c1.center) - 5.0).abs() < 1e-12);
        assert!((p.distance_to(c2.center) - 5.0).abs() < 1e-12);
    }
}

#[test]
fn tangent_and_disjoint_circles() {
    let c1 = Circle::new(point(1.0, 1.0), 2.0);
    let outside = Circle::new(point(1.0, 5.0), 2.0);
    assert_same_points(&circle_circle(&c1, &outside), &[point(1.0, 3.0)], 1e-12);

    let inside = Circle::new(point(2.0, 1.0), 1.0);
    assert_same_points(&circle_circle(&c1, &inside), &[point(3.0, 1.0)], 1e-12);

    assert!(circle_circle(&c1, &Circle::new(point(10.0, 0.0), 1.0)).is_empty());
    assert!(circle_circle(&c1, &Circle::new(point(1.5, 1.0), 0.2)).is_empty());
    assert!(circle_circle(&c1, &c1).is_empty());
    assert!(circle_circle(&c1, &Circle::new(point(1.0, 1.0), 3.0)).is_empty());
}

#[test]
fn line_through_circle() {
    let circle = Circle::new(point(5.0, 0.0), 3.0);
    let line = Line::new(point(0.0, 0.0), point(10.0, 0.0));
    let expected = [point(2.0, 0.0), point(8.0, 0.0)];
    assert_same_points(&circle_line(&circle, &line, LineExtent::Infinite), &expected, 1e-12);
    assert_same_points(&circle_line(&circle, &line, LineExtent::Segment), &expected, 1e-12);

    let short = Line::new(point(0.0, 0.0), point(1.0, 0.0));
    assert_same_points(&circle_line(&circle, &short, LineExtent::Infinite), &expected, 1e-12);
    assert_same_points(&circle_line(&circle, &short, LineExtent::Ray), &expected, 1e-12);
    assert!(circle_line(&circle, &short, LineExtent::Segment).is_empty());

    let backwards = Line::new(point(5.0, 0.0), point(4.0, 0.0));
    assert_same_points(
        &circle_line(&circle, &backwards, LineExtent::Ray),
        &[point(2.0, 0.0)],
        1e-12,
    );
}

#[test]
fn tangent_and_missing_lines() {
    let circle = Circle::new(point(0.0, 0.0), 1.0);
    let tangent = Line::new(point(-2.0, 1.0), point(2.0, 1.0));
    assert_same_points(
        &circle_line(&circle, &tangent, LineExtent::Segment),
        &[point(0.0, 1.0)],
        1e-12,
    );

    let away = Line::new(point(-2.0, 1.5), point(2.0, 1.5));
    assert!(circle_line(&circle, &away, LineExtent::Infinite).is_empty());

    let degenerate = Line::new(point(1.0, 0.0), point(1.0, 0.0));
    assert!(circle_line(&circle, &degenerate, LineExtent::Infinite).is_empty());
}

#[test]
fn tangency_at_any_scale() {
    for scale in [1.0, 1e-5] {
        let circle = Circle::new(point(0.0, 0.0), scale);
        let tangent = Line::new(point(-2.0 * scale, scale), point(2.0 * scale, scale));
        assert_same_points(
            &circle_line(&circle, &tangent, LineExtent::Infinite),
            &[point(0.0, scale)],
            1e-12 * scale,
        );

        let near = 1.0 + 1e-6;
        let away = Line::new(point(-2.0 * scale, near * scale), point(2.0 * scale, near * scale));
        assert!(circle_line(&circle, &away, LineExtent::Infinite).is_empty(), "scale {}", scale);

        let c2 = Circle::new(point(1.5 * scale, 0.0), scale);
        assert_eq!(circle_circle(&circle, &c2).len(), 2, "scale {}", scale);
    }
}
