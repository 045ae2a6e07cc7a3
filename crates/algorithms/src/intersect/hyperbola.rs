use super::{residual_is_small, IntersectOptions};
use crate::geom::tolerance::EPSILON;
use crate::geom::utils::rotate_90;
use crate::geom::{roots, GeneralConic, Hyperbola};
use crate::math::{point, Point, Transform};

/// Intersections of a hyperbola and any conic, on both branches.
///
/// In the standard position of the hyperbola, `x² - y²/k² = 1` with `k` the
/// ratio of the axes, both branches are `x = (w² + 1) / 2w` and
/// `y = k·(w² - 1) / 2w` for `w ≠ 0` (`w = eᵘ` on the main branch, `-eᵘ` on
/// the other one). Substituting them in the conic gives a quartic in `w`.
pub fn hyperbola_conic(hyperbola: &Hyperbola, conic: &GeneralConic, options: &IntersectOptions) -> Vec<Point> {
    let mut result = options.point_set();

    let x_axis = hyperbola.major_axis;
    let y_axis = rotate_90(x_axis);
    let c = hyperbola.center;
    let frame = Transform::new(x_axis.x, x_axis.y, y_axis.x, y_axis.y, c.x, c.y);
    let q = conic.pulled_back(&frame).normalized();
    let k = hyperbola.ratio;

    let ws = roots::quartic(
        q.a + q.b * k + q.c * k * k,
        2.0 * q.d + 2.0 * q.e * k,
        2.0 * q.a - 2.0 * q.c * k * k + 4.0 * q.f,
        2.0 * q.d - 2.0 * q.e * k,
        q.a - q.b * k + q.c * k * k,
    );

    for w in ws {
        if w.abs() <= EPSILON {
            continue;
        }
        let local = point((w * w + 1.0) / (2.0 * w), k * (w * w - 1.0) / (2.0 * w));
        if residual_is_small(&q, local, options.ellipse_tolerance) {
            result.insert(frame.transform_point(local));
        } else {
            log::trace!("rejected hyperbola root w = {}", w);
        }
    }

    result.into_vec()
}

#[cfg(test)]
use super::assert_same_points;
#[cfg(test)]
use crate::geom::{Circle, Conic};

#[test]
fn hyperbola_and_circle() {
    // x² - y² = 1 and x² + y² = 3 meet at x² = 2, y² = 1.
    let h = Hyperbola::new(point(0.0, 0.0), 1.0, 1.0, 0.0).unwrap();
    let circle = Circle::new(point(0.0, 0.0), 3.0f64.sqrt());
    let points = hyperbola_conic(&h, &circle.to_general_conic(), &IntersectOptions::DEFAULT);
    let x = 2.0f64.sqrt();
    assert_same_points(
        &points,
        &[point(x, 1.0), point(x, -1.0), point(-x, 1.0), point(-x, -1.0)],
        1e-9,
    );
}

#[test]
fn moved_hyperbola() {
    let h = Hyperbola::new(point(1.0, 2.0), 2.0, 1.0, 0.5).unwrap();
    let circle = Circle::new(point(1.0, 2.0), 3.0);
    let points = hyperbola_conic(&h, &circle.to_general_conic(), &IntersectOptions::DEFAULT);
    assert_eq!(points.len(), 4);
    for p in &points {
        assert!((p.distance_to(circle.center) - 3.0).abs() < 1e-9);
        assert!(h.to_general_conic().normalized().eval(*p).abs() < 1e-9);
    }

    let small = Circle::new(point(1.0, 2.0), 1.0);
    assert!(hyperbola_conic(&h, &small.to_general_conic(), &IntersectOptions::DEFAULT).is_empty());
}
