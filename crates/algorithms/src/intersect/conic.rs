use super::line::line_conic_into;
use super::{IntersectOptions, LineExtent};
use crate::geom::tolerance::EPSILON;
use crate::geom::{roots, GeneralConic, PointSet};
use crate::math::Point;

use arrayvec::ArrayVec;

/// Intersections of two general conics, by the pencil of conics.
///
/// Every member `C1 + λ·C2` of the pencil goes through the intersection
/// points, and the members for which `det(C1 + λ·C2) = 0` are pairs of lines.
/// Each line of a degenerate member is then intersected with one of the two
/// conics.
///
/// Candidates are accepted if they satisfy both original equations within
/// `pencil_tolerance` and lie within `pencil_distance_tolerance` of both
/// conics.
pub fn conic_conic(c1: &GeneralConic, c2: &GeneralConic, options: &IntersectOptions) -> Vec<Point> {
    let n1 = c1.normalized();
    let n2 = c2.normalized();

    // Degenerate members, and the conic their lines are intersected with.
    let mut members: ArrayVec<(GeneralConic, GeneralConic), 4> = ArrayVec::new();
    let [k3, k2, k1, k0] = n1.pencil_determinant(&n2);
    for lambda in roots::cubic(k3, k2, k1, k0) {
        members.push((n1.pencil(&n2, lambda), n2));
    }
    // λ = ∞
    if k3.abs() <= EPSILON * (1.0 + k2.abs()) {
        members.push((n2, n1));
    }
    if members.is_empty() {
        // All members are degenerate, the first conic included.
        members.push((n1, n2));
    }

    let mut candidates = PointSet::with_tolerance(options.dedup_tolerance);
    for (member, other) in &members {
        for line in member.degenerate_components() {
            if line.is_degenerate() {
                candidates.insert(line.start);
            } else {
                line_conic_into(&line, LineExtent::Infinite, other, &mut candidates);
            }
        }
    }

    let mut result = options.point_set();
    for p in candidates {
        let on_both = [(c1, &n1), (c2, &n2)].iter().all(|(original, normalized)| {
            original.eval(p).abs() <= options.pencil_tolerance
                && distance_estimate(normalized, p) <= options.pencil_distance_tolerance
        });
        if on_both {
            result.insert(p);
        } else {
            log::trace!("rejected pencil candidate {:?}", p);
        }
    }

    result.into_vec()
}

/// First order estimate of the distance from `p` to the conic.
fn distance_estimate(conic: &GeneralConic, p: Point) -> f64 {
    let value = conic.eval(p).abs();
    let gradient = conic.gradient(p).length();
    if gradient <= EPSILON {
        // Singular point of a line pair, or far from anything.
        return if value <= EPSILON { 0.0 } else { f64::INFINITY };
    }

    value / gradient
}

#[cfg(test)]
use super::assert_same_points;
#[cfg(test)]
use crate::geom::{Conic, Line};
#[cfg(test)]
use crate::math::point;

#[test]
fn two_circles_as_conics() {
    let c1 = GeneralConic::from_circle(point(0.0, 0.0), 5.0);
    let c2 = GeneralConic::from_circle(point(8.0, 0.0), 5.0);
    let points = conic_conic(&c1, &c2, &IntersectOptions::DEFAULT);
    assert_same_points(&points, &[point(4.0, 3.0), point(4.0, -3.0)], 1e-9);
}

#[test]
fn four_points() {
    let c1 = GeneralConic::from_ellipse_axes(point(0.0, 0.0), 2.0, 1.0, 0.0);
    let c2 = GeneralConic::from_ellipse_axes(point(0.0, 0.0), 1.0, 2.0, 0.0);
    let points = conic_conic(&c1, &c2, &IntersectOptions::DEFAULT);
    let v = (0.8f64).sqrt();
    assert_same_points(
        &points,
        &[point(v, v), point(v, -v), point(-v, v), point(-v, -v)],
        1e-9,
    );
}

#[test]
fn generic_conics() {
    let c1 = GeneralConic::from_ellipse_axes(point(0.3, -0.2), 3.0, 1.0, 0.4);
    let c2 = GeneralConic::from_hyperbola_axes(point(-0.5, 0.5), 1.0, 0.7, -0.3);
    let points = conic_conic(&c1, &c2, &IntersectOptions::DEFAULT);
    assert!(!points.is_empty());
    for p in &points {
        assert!(c1.normalized().eval(*p).abs() < 1e-6);
        assert!(c2.normalized().eval(*p).abs() < 1e-6);
    }
    let swapped = conic_conic(&c2, &c1, &IntersectOptions::DEFAULT);
    assert_same_points(&points, &swapped, 1e-6);
}

#[test]
fn conic_and_line_pair() {
    let circle = crate::geom::Circle::new(point(0.0, 0.0), 1.0).to_general_conic();
    let pair = GeneralConic::from_lines(
        &Line::new(point(0.0, 0.0), point(1.0, 0.0)),
        &Line::new(point(0.0, 0.0), point(0.0, 1.0)),
    )
    .unwrap();
    let points = conic_conic(&circle, &pair, &IntersectOptions::DEFAULT);
    assert_same_points(
        &points,
        &[point(1.0, 0.0), point(-1.0, 0.0), point(0.0, 1.0), point(0.0, -1.0)],
        1e-9,
    );
}

#[test]
fn disjoint_conics() {
    let c1 = GeneralConic::from_circle(point(0.0, 0.0), 1.0);
    let c2 = GeneralConic::from_circle(point(5.0, 0.0), 1.0);
    assert!(conic_conic(&c1, &c2, &IntersectOptions::DEFAULT).is_empty());
}
