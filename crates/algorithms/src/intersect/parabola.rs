use super::{residual_is_small, IntersectOptions};
use crate::geom::tolerance::EPSILON;
use crate::geom::utils::{rotate_90, unit_vector};
use crate::geom::{roots, GeneralConic, Parabola};
use crate::math::{point, Point, Transform};

/// Intersections of a parabola and any conic.
///
/// In the standard position of the parabola, `Y = X²`, the conic
/// `A·X² + B·XY + C·Y² + D·X + E·Y + F` becomes the quartic
/// `C·X⁴ + B·X³ + (A + E)·X² + D·X + F`.
pub fn parabola_conic(parabola: &Parabola, conic: &GeneralConic, options: &IntersectOptions) -> Vec<Point> {
    let mut result = options.point_set();
    if parabola.a.abs() <= EPSILON || !parabola.a.is_finite() {
        log::trace!("degenerate parabola {:?}", parabola);
        return result.into_vec();
    }

    // Local `y = a·x²` scaled by `a`.
    let s = 1.0 / parabola.a;
    let x_axis = unit_vector(parabola.tilt) * s;
    let y_axis = rotate_90(unit_vector(parabola.tilt)) * s;
    let v = parabola.vertex;
    let frame = Transform::new(x_axis.x, x_axis.y, y_axis.x, y_axis.y, v.x, v.y);
    let q = conic.pulled_back(&frame).normalized();

    for x in roots::quartic(q.c, q.b, q.a + q.e, q.d, q.f) {
        let local = point(x, x * x);
        if residual_is_small(&q, local, options.ellipse_tolerance) {
            result.insert(frame.transform_point(local));
        } else {
            log::trace!("rejected parabola root x = {}", x);
        }
    }

    result.into_vec()
}

#[cfg(test)]
use super::assert_same_points;
#[cfg(test)]
use crate::geom::{Circle, Conic};

#[test]
fn parabola_and_circle() {
    // y = x² and x² + (y - 1)² = 1 meet at the origin and at y = 1.
    let parabola = Parabola::new(point(0.0, 0.0), 0.0, 0.25).unwrap();
    let circle = Circle::new(point(0.0, 1.0), 1.0);
    let points = parabola_conic(&parabola, &circle.to_general_conic(), &IntersectOptions::DEFAULT);
    assert!(points.len() >= 2);
    for p in &points {
        assert!((p.distance_to(circle.center) - 1.0).abs() < 1e-6);
        assert!((p.y - p.x * p.x).abs() < 1e-6);
    }
    assert!(points.iter().any(|p| (*p - point(1.0, 1.0)).length() < 1e-9));
    assert!(points.iter().any(|p| (*p - point(-1.0, 1.0)).length() < 1e-9));
}

#[test]
fn two_parabolas() {
    // y = x² and x = y² meet at the origin and at (1, 1).
    let p1 = Parabola::new(point(0.0, 0.0), 0.0, 0.25).unwrap();
    let p2 = Parabola::new(point(0.0, 0.0), -core::f64::consts::FRAC_PI_2, 0.25).unwrap();
    let points = parabola_conic(&p1, &p2.to_general_conic(), &IntersectOptions::DEFAULT);
    assert_same_points(&points, &[point(0.0, 0.0), point(1.0, 1.0)], 1e-9);
}

#[test]
fn opening_downwards() {
    // y = -x²/2 to y = -8 on the moved and flipped parabola.
    let parabola = Parabola::new(point(1.0, 0.0), 0.0, -0.5).unwrap();
    let circle = Circle::new(point(1.0, -8.0), 4.0);
    let points = parabola_conic(&parabola, &circle.to_general_conic(), &IntersectOptions::DEFAULT);
    assert!(!points.is_empty());
    for p in &points {
        let x = p.x - 1.0;
        assert!((p.y + 0.5 * x * x).abs() < 1e-9);
        assert!((p.distance_to(circle.center) - 4.0).abs() < 1e-9);
    }
}
