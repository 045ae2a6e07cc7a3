use super::{residual_is_small, IntersectOptions};
use crate::geom::{roots, Circle, Conic, Ellipse, GeneralConic, PointSet};
use crate::math::{point, Point, Transform};

use arrayvec::ArrayVec;

/// Intersections of two ellipses.
pub fn ellipse_ellipse(e1: &Ellipse, e2: &Ellipse, options: &IntersectOptions) -> Vec<Point> {
    ellipse_conic(e1, &e2.to_general_conic(), options)
}

/// Intersections of an ellipse and a circle.
pub fn ellipse_circle(ellipse: &Ellipse, circle: &Circle, options: &IntersectOptions) -> Vec<Point> {
    ellipse_conic(ellipse, &circle.to_general_conic(), options)
}

/// Intersections of an ellipse and any conic.
///
/// The ellipse is moved to its standard position, the unit circle, and the
/// conic is expressed in the same frame. Eliminating `y` with `y² = 1 - x²`
/// leaves a quartic in `x`. Squaring introduces spurious roots, so every
/// candidate is checked against both equations in the standard frame: the
/// unit circle with `circle_tolerance` and the conic with `ellipse_tolerance`.
///
/// Coincident curves have no isolated intersection and give nothing.
pub fn ellipse_conic(ellipse: &Ellipse, conic: &GeneralConic, options: &IntersectOptions) -> Vec<Point> {
    let frame = unit_circle_frame(ellipse);
    let local = conic.pulled_back(&frame).normalized();

    let mut result = options.point_set();
    for p in on_unit_circle(&local, options) {
        result.insert(frame.transform_point(p));
    }

    result.into_vec()
}

/// Maps the unit circle onto the ellipse.
fn unit_circle_frame(ellipse: &Ellipse) -> Transform {
    let x = ellipse.major_axis;
    let y = ellipse.minor_axis();
    let c = ellipse.center;

    Transform::new(x.x, x.y, y.x, y.y, c.x, c.y)
}

/// Points of the unit circle on the normalized conic `q`.
fn on_unit_circle(q: &GeneralConic, options: &IntersectOptions) -> ArrayVec<Point, 8> {
    let mut candidates: ArrayVec<Point, 8> = ArrayVec::new();

    //  P(x) + y·S(x) = 0 on the circle, with
    //  P = (A - C)·x² + D·x + (C + F) and S = B·x + E.
    let (a, b, c, d, e, f) = (q.a, q.b, q.c, q.d, q.e, q.f);
    let (p2, p1, p0) = (a - c, d, c + f);

    let xs: ArrayVec<f64, 4> = if b.abs() <= options.circle_tolerance && e.abs() <= options.circle_tolerance {
        // Symmetric about the x axis: P(x) = 0 directly, its roots would be
        // double in the quartic.
        roots::quadratic(p2, p1, p0).into_iter().collect()
    } else {
        // P² = (1 - x²)·S²
        roots::quartic(
            p2 * p2 + b * b,
            2.0 * p2 * p1 + 2.0 * b * e,
            p1 * p1 + 2.0 * p2 * p0 - b * b + e * e,
            2.0 * p1 * p0 - 2.0 * b * e,
            p0 * p0 - e * e,
        )
    };

    for x in xs {
        let y2 = 1.0 - x * x;
        if y2 < -options.circle_tolerance {
            log::trace!("rejected root x = {} outside of the unit circle", x);
            continue;
        }
        let y = y2.max(0.0).sqrt();
        for p in [point(x, y), point(x, -y)] {
            if residual_is_small(q, p, options.ellipse_tolerance) && !candidates.is_full() {
                candidates.push(p);
            }
        }
    }

    candidates
}

#[cfg(test)]
use super::assert_same_points;

#[test]
fn ellipse_and_circle() {
    let ellipse = Ellipse::new(point(0.0, 0.0), 2.0, 1.0, 0.0, true);
    let circle = Circle::new(point(0.0, 0.0), 1.5);
    let points = ellipse_circle(&ellipse, &circle, &IntersectOptions::DEFAULT);
    // x²/4 + y² = 1 and x² + y² = 9/4
    let x = (5.0f64 / 3.0).sqrt();
    let y = (2.25 - x * x).sqrt();
    assert_same_points(
        &points,
        &[point(x, y), point(x, -y), point(-x, y), point(-x, -y)],
        1e-9,
    );

    let far = Circle::new(point(10.0, 0.0), 1.0);
    assert!(ellipse_circle(&ellipse, &far, &IntersectOptions::DEFAULT).is_empty());
}

#[test]
fn two_ellipses() {
    let e1 = Ellipse::new(point(0.0, 0.0), 2.0, 1.0, 0.0, true);
    let e2 = Ellipse::new(point(0.0, 0.0), 1.0, 2.0, 0.0, true);
    let points = ellipse_ellipse(&e1, &e2, &IntersectOptions::DEFAULT);
    let v = (0.8f64).sqrt();
    assert_same_points(
        &points,
        &[point(v, v), point(v, -v), point(-v, v), point(-v, -v)],
        1e-9,
    );

    // Tilted and moved: every point must lie on both curves.
    let e3 = Ellipse::new(point(1.0, 0.5), 2.5, 0.7, 0.6, false);
    let points = ellipse_ellipse(&e1, &e3, &IntersectOptions::DEFAULT);
    assert_eq!(points.len(), 4);
    for p in &points {
        assert!(e1.to_general_conic().normalized().eval(*p).abs() < 1e-7);
        assert!(e3.to_general_conic().normalized().eval(*p).abs() < 1e-7);
    }
}

#[test]
fn coincident_ellipses() {
    let e = Ellipse::new(point(1.0, 2.0), 2.0, 1.0, 0.3, true);
    assert!(ellipse_ellipse(&e, &e, &IntersectOptions::DEFAULT).is_empty());
}
