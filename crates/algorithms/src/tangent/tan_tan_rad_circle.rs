//! Circles of a given radius tangent to two objects.
//!
//! Every solver works in a frame where the first object is at the origin and
//! enumerates the sides of both objects the solution can touch.

use super::{circle_circle_points, side, CircleSet, Primitive};
use crate::geom::tolerance::EPSILON;
use crate::geom::transform::Frame;
use crate::geom::{Circle, Line};
use crate::math::{point, Point};

/// Circles of radius `radius` tangent to two objects, in any order.
pub fn tan_tan_rad_circle(a: &Primitive, b: &Primitive, radius: f64) -> Vec<Circle> {
    match (a, b) {
        (Primitive::Circle(c1), Primitive::Circle(c2)) => circle_circle(c1, c2, radius),
        (Primitive::Circle(c), Primitive::Line(l)) | (Primitive::Line(l), Primitive::Circle(c)) => {
            circle_line(c, l, radius)
        }
        (Primitive::Circle(c), Primitive::Point(p)) | (Primitive::Point(p), Primitive::Circle(c)) => {
            circle_point(c, *p, radius)
        }
        (Primitive::Line(l1), Primitive::Line(l2)) => line_line(l1, l2, radius),
        (Primitive::Line(l), Primitive::Point(p)) | (Primitive::Point(p), Primitive::Line(l)) => {
            line_point(l, *p, radius)
        }
        (Primitive::Point(p1), Primitive::Point(p2)) => point_point(*p1, *p2, radius),
    }
}

fn valid_radius(radius: f64) -> bool {
    radius > EPSILON && radius.is_finite()
}

/// Circles of radius `radius` through two points.
///
/// The centers are on the perpendicular bisector at a height `h` with
/// `h² = radius² - (d/2)²`. Only strictly positive `h²` gives solutions, so
/// points exactly one diameter apart give nothing.
pub fn point_point(p1: Point, p2: Point, radius: f64) -> Vec<Circle> {
    let mut result = CircleSet::new();
    let d = p1.distance_to(p2);
    let frame = match Frame::new(p1, p2 - p1) {
        Some(frame) if valid_radius(radius) && d > EPSILON * radius => frame,
        _ => return result.into_vec(),
    };

    let h2 = radius * radius - 0.25 * d * d;
    if h2 <= EPSILON * radius * radius {
        return result.into_vec();
    }

    let h = h2.sqrt();
    for case in 0..2 {
        result.add_local(&frame, point(0.5 * d, side(case, 0) * h), radius);
    }

    result.into_vec()
}

/// Circles of radius `radius` tangent to a line and through a point.
///
/// In the frame of the line, the center is at a height `s·radius` for each
/// side `s` and at a distance `radius` from the point.
pub fn line_point(line: &Line, p: Point, radius: f64) -> Vec<Circle> {
    let mut result = CircleSet::new();
    let frame = match Frame::new(line.start, line.to_vector()) {
        Some(frame) if valid_radius(radius) && !line.is_degenerate() => frame,
        _ => return result.into_vec(),
    };

    let local = frame.to_local(p);
    for case in 0..4 {
        let cy = side(case, 0) * radius;
        let dy = cy - local.y;
        let q = radius * radius - dy * dy;
        if q < -EPSILON * radius * radius {
            continue;
        }
        let cx = local.x + side(case, 1) * q.max(0.0).sqrt();
        result.add_local(&frame, point(cx, cy), radius);
    }

    result.into_vec()
}

/// Circles of radius `radius` tangent to two lines.
///
/// In the frame of the first line, the center is at a height `s1·radius` and
/// at a signed distance `s2·radius` from the second line. Parallel lines have
/// either no solution or infinitely many, and give nothing.
pub fn line_line(l1: &Line, l2: &Line, radius: f64) -> Vec<Circle> {
    let mut result = CircleSet::new();
    let frame = match Frame::new(l1.start, l1.to_vector()) {
        Some(frame) if valid_radius(radius) && !l1.is_degenerate() => frame,
        _ => return result.into_vec(),
    };
    let local = Line::new(frame.to_local(l2.start), frame.to_local(l2.end));
    let (a, b, c) = match local.equation() {
        Some(eq) => eq,
        None => return result.into_vec(),
    };
    if a.abs() <= EPSILON {
        log::trace!("parallel lines");
        return result.into_vec();
    }

    for case in 0..4 {
        let cy = side(case, 0) * radius;
        // a·cx + b·cy + c = s2·radius
        let cx = (side(case, 1) * radius - b * cy - c) / a;
        result.add_local(&frame, point(cx, cy), radius);
    }

    result.into_vec()
}

/// Circles of radius `radius` tangent to a circle and through a point.
///
/// The center is at a distance `radius` from the point and `|r ± radius|`
/// from the center of the circle.
pub fn circle_point(circle: &Circle, p: Point, radius: f64) -> Vec<Circle> {
    let mut result = CircleSet::new();
    let d = circle.center.distance_to(p);
    let frame = match Frame::new(circle.center, p - circle.center) {
        Some(frame) if valid_radius(radius) && d > EPSILON * (circle.radius + radius) => frame,
        _ => return result.into_vec(),
    };

    for case in 0..2 {
        let rho = (circle.radius + side(case, 0) * radius).abs();
        for center in circle_circle_points(d, rho, radius) {
            result.add_local(&frame, center, radius);
        }
    }

    result.into_vec()
}

/// Circles of radius `radius` tangent to a circle and a line.
///
/// In a frame centered on the circle with the x axis along the line, the
/// center is at a height `y0 + s1·radius`, `y0` being the height of the line,
/// and at a distance `|r + s2·radius|` from the origin.
pub fn circle_line(circle: &Circle, line: &Line, radius: f64) -> Vec<Circle> {
    let mut result = CircleSet::new();
    let frame = match Frame::new(circle.center, line.to_vector()) {
        Some(frame) if valid_radius(radius) && !line.is_degenerate() => frame,
        _ => return result.into_vec(),
    };
    let y0 = frame.to_local(line.start).y;

    for case in 0..8 {
        let cy = y0 + side(case, 0) * radius;
        let rho = (circle.radius + side(case, 1) * radius).abs();
        let q = rho * rho - cy * cy;
        if q < -EPSILON * (rho * rho + cy * cy) {
            continue;
        }
        let cx = side(case, 2) * q.max(0.0).sqrt();
        result.add_local(&frame, point(cx, cy), radius);
    }

    result.into_vec()
}

/// Circles of radius `radius` tangent to two circles.
///
/// The center is at a distance `|r1 ± radius|` from the first center and
/// `|r2 ± radius|` from the second one. Concentric circles give nothing.
pub fn circle_circle(c1: &Circle, c2: &Circle, radius: f64) -> Vec<Circle> {
    let mut result = CircleSet::new();
    let d = c1.center.distance_to(c2.center);
    let scale = c1.radius + c2.radius + radius;
    let frame = match Frame::new(c1.center, c2.center - c1.center) {
        Some(frame) if valid_radius(radius) && d > EPSILON * scale => frame,
        _ => return result.into_vec(),
    };

    for case in 0..4 {
        let rho1 = (c1.radius + side(case, 0) * radius).abs();
        let rho2 = (c2.radius + side(case, 1) * radius).abs();
        for center in circle_circle_points(d, rho1, rho2) {
            result.add_local(&frame, center, radius);
        }
    }

    result.into_vec()
}

#[cfg(test)]
use super::is_tangent;

#[cfg(test)]
fn assert_solutions(circles: &[Circle], primitives: &[Primitive], radius: f64) {
    for circle in circles {
        assert!((circle.radius - radius).abs() < 1e-12);
        for primitive in primitives {
            assert!(is_tangent(circle, primitive, 1e-9), "{:?} {:?}", circle, primitive);
        }
    }
}

#[test]
fn through_two_points() {
    // One diameter apart: rejected.
    assert!(point_point(point(0.0, 0.0), point(4.0, 0.0), 2.0).is_empty());

    let circles = point_point(point(0.0, 0.0), point(4.0, 0.0), 2.5);
    assert_eq!(circles.len(), 2);
    assert_solutions(
        &circles,
        &[Primitive::Point(point(0.0, 0.0)), Primitive::Point(point(4.0, 0.0))],
        2.5,
    );
    assert!(circles.iter().any(|c| (c.center - point(2.0, 1.5)).length() < 1e-12));

    assert!(point_point(point(0.0, 0.0), point(0.0, 0.0), 1.0).is_empty());
    assert!(point_point(point(0.0, 0.0), point(1.0, 0.0), 0.0).is_empty());
}

#[test]
fn line_and_point() {
    let line = Line::new(point(0.0, 0.0), point(1.0, 0.0));
    let p = point(0.0, 1.0);
    let circles = line_point(&line, p, 1.0);
    // Both circles above the line, and none below since the point is above.
    assert_eq!(circles.len(), 2);
    assert_solutions(&circles, &[Primitive::Line(line), Primitive::Point(p)], 1.0);

    assert!(line_point(&line, point(0.0, 3.0), 1.0).is_empty());
}

#[test]
fn two_lines() {
    let l1 = Line::new(point(0.0, 0.0), point(1.0, 0.0));
    let l2 = Line::new(point(0.0, 0.0), point(1.0, 1.0));
    let circles = line_line(&l1, &l2, 0.5);
    assert_eq!(circles.len(), 4);
    assert_solutions(&circles, &[Primitive::Line(l1), Primitive::Line(l2)], 0.5);

    let parallel = Line::new(point(0.0, 1.0), point(1.0, 1.0));
    assert!(line_line(&l1, &parallel, 0.5).is_empty());
}

#[test]
fn circle_and_point() {
    let circle = Circle::new(point(0.0, 0.0), 2.0);
    let p = point(3.0, 0.0);
    let circles = circle_point(&circle, p, 1.0);
    // Only external tangency: a circle of radius 1 through p cannot reach the
    // inner side of the circle.
    assert_eq!(circles.len(), 2);
    assert_solutions(&circles, &[Primitive::Circle(circle), Primitive::Point(p)], 1.0);
    for c in &circles {
        assert!((c.center.distance_to(circle.center) - 3.0).abs() < 1e-12);
    }

    assert!(circle_point(&circle, circle.center, 1.0).is_empty());
}

#[test]
fn circle_and_line() {
    let circle = Circle::new(point(0.0, 0.0), 1.0);
    let line = Line::new(point(-5.0, -2.0), point(5.0, -2.0));
    let circles = circle_line(&circle, &line, 1.0);
    // Resting on the line on each side of the circle.
    assert_eq!(circles.len(), 2);
    assert_solutions(&circles, &[Primitive::Circle(circle), Primitive::Line(line)], 1.0);
    let x = 3.0f64.sqrt();
    assert!(circles.iter().any(|c| (c.center - point(x, -1.0)).length() < 1e-12));
    assert!(circles.iter().any(|c| (c.center - point(-x, -1.0)).length() < 1e-12));

    // With a radius of 2, the centers are on the x axis, around the circle or
    // containing it.
    let circles = circle_line(&circle, &line, 2.0);
    assert_eq!(circles.len(), 4);
    assert_solutions(&circles, &[Primitive::Circle(circle), Primitive::Line(line)], 2.0);
    assert!(circles.iter().all(|c| c.center.y.abs() < 1e-12));
}

#[test]
fn two_circles() {
    let c1 = Circle::new(point(0.0, 0.0), 1.0);
    let c2 = Circle::new(point(4.0, 0.0), 1.0);
    let circles = circle_circle(&c1, &c2, 2.0);
    assert_solutions(&circles, &[Primitive::Circle(c1), Primitive::Circle(c2)], 2.0);
    assert!(circles.iter().any(|c| (c.center - point(2.0, 5.0f64.sqrt())).length() < 1e-9));

    // Concentric.
    assert!(circle_circle(&c1, &Circle::new(point(0.0, 0.0), 3.0), 1.0).is_empty());
}

#[test]
fn same_solutions_at_any_scale() {
    for scale in [1.0, 1e-5] {
        let at = |x: f64, y: f64| point(x * scale, y * scale);
        let check = |circles: Vec<Circle>, primitives: &[Primitive], count: usize| {
            assert_eq!(circles.len(), count, "scale {}", scale);
            for circle in &circles {
                for primitive in primitives {
                    assert!(is_tangent(circle, primitive, 1e-9 * scale), "{:?} {:?}", circle, primitive);
                }
            }
        };

        let (p1, p2) = (at(0.0, 0.0), at(2.0, 0.0));
        check(
            point_point(p1, p2, 1.2 * scale),
            &[Primitive::Point(p1), Primitive::Point(p2)],
            2,
        );

        let line = Line::new(at(0.0, 0.0), at(1.0, 0.0));
        let p = at(0.0, 1.0);
        check(line_point(&line, p, scale), &[Primitive::Line(line), Primitive::Point(p)], 2);

        let circle = Circle::new(at(0.0, 0.0), 2.0 * scale);
        let p = at(3.0, 0.0);
        check(circle_point(&circle, p, scale), &[Primitive::Circle(circle), Primitive::Point(p)], 2);

        let circle = Circle::new(at(0.0, 0.0), scale);
        let line = Line::new(at(-5.0, -2.0), at(5.0, -2.0));
        check(circle_line(&circle, &line, scale), &[Primitive::Circle(circle), Primitive::Line(line)], 2);

        // Two regular solutions and two that touch both circles on the axis.
        let c2 = Circle::new(at(4.0, 0.0), scale);
        check(
            circle_circle(&circle, &c2, 2.0 * scale),
            &[Primitive::Circle(circle), Primitive::Circle(c2)],
            4,
        );
    }
}

#[test]
fn dispatch_in_any_order() {
    let p = Primitive::Point(point(0.0, 1.0));
    let l = Primitive::Line(Line::new(point(0.0, 0.0), point(1.0, 0.0)));
    let a = tan_tan_rad_circle(&p, &l, 1.0);
    let b = tan_tan_rad_circle(&l, &p, 1.0);
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}
