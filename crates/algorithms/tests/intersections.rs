use apollo_algorithms::geom::{AnyCurve, Arc, Circle, Ellipse, GeneralConic, Hyperbola, Line, Parabola};
use apollo_algorithms::intersect::{circle_circle, circle_line, intersect, LineExtent};
use apollo_algorithms::math::{point, vector, Point, Vector};

use core::f64::consts::PI;
use proptest::prelude::*;

fn same_points(a: &[Point], b: &[Point], tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().all(|p| b.iter().any(|q| p.distance_to(*q) <= tolerance))
}

/// A normal of `curve` at a point `p` of the curve.
fn normal_at(curve: &AnyCurve, p: Point) -> Vector {
    let chord_normal = |line: &Line| {
        let v = line.to_vector();
        vector(-v.y, v.x)
    };
    match curve {
        AnyCurve::Line(line) => chord_normal(line),
        AnyCurve::Arc(arc) => match arc.center() {
            Some(center) => p - center,
            None => chord_normal(&arc.chord()),
        },
        other => other.to_general_conic().gradient(p),
    }
}

fn any_point(range: f64) -> impl Strategy<Value = Point> {
    (-range..range, -range..range).prop_map(|(x, y)| point(x, y))
}

#[test]
fn two_circles_on_the_x_axis() {
    let c1 = Circle::new(point(0.0, 0.0), 5.0);
    let c2 = Circle::new(point(8.0, 0.0), 5.0);
    let points = circle_circle(&c1, &c2);
    assert_eq!(points.len(), 2);
    for p in &points {
        assert!((p.distance_to(c1.center) - 5.0).abs() < 1e-12);
        assert!((p.distance_to(c2.center) - 5.0).abs() < 1e-12);
        assert!((p.x - 4.0).abs() < 1e-12);
    }
    assert!((points[0].y + points[1].y).abs() < 1e-12);
}

#[test]
fn infinite_line_through_a_circle() {
    let line = Line::new(point(0.0, 0.0), point(10.0, 0.0));
    let circle = Circle::new(point(5.0, 0.0), 3.0);
    let points = circle_line(&circle, &line, LineExtent::Infinite);
    assert!(same_points(&points, &[point(2.0, 0.0), point(8.0, 0.0)], 1e-12));
}

#[test]
fn degenerate_inputs() {
    let circle = AnyCurve::Circle(Circle::new(point(0.0, 0.0), 1.0));
    let dot = AnyCurve::Line(Line::new(point(1.0, 0.0), point(1.0, 0.0)));
    assert!(intersect(&circle, &dot).is_empty());
    assert!(intersect(&circle, &circle).is_empty());

    let flat = AnyCurve::Arc(Arc::new(point(-2.0, 0.0), point(2.0, 0.0), 0.0));
    let points = intersect(&circle, &flat);
    assert!(same_points(&points, &[point(-1.0, 0.0), point(1.0, 0.0)], 1e-12));
}

proptest! {
    #[test]
    fn circle_pairs_are_symmetric(c1 in any_point(10.0), c2 in any_point(10.0), r1 in 0.5..8.0f64, r2 in 0.5..8.0f64) {
        let d = c1.distance_to(c2);
        // Away from tangency, where either order can see a double root.
        prop_assume!((d - (r1 + r2)).abs() > 1e-3 && (d - (r1 - r2).abs()).abs() > 1e-3);

        let a = AnyCurve::Circle(Circle::new(c1, r1));
        let b = AnyCurve::Circle(Circle::new(c2, r2));
        let ab = intersect(&a, &b);
        let ba = intersect(&b, &a);
        prop_assert!(same_points(&ab, &ba, 1e-9), "{:?} {:?}", ab, ba);
        for p in &ab {
            prop_assert!((p.distance_to(c1) - r1).abs() < 1e-9);
            prop_assert!((p.distance_to(c2) - r2).abs() < 1e-9);
        }
    }

    #[test]
    fn mixed_pairs_are_symmetric(
        center in any_point(5.0),
        a in any_point(10.0),
        b in any_point(10.0),
        radius in 0.5..5.0f64,
        ratio in 0.3..0.9f64,
        tilt in -PI..PI,
        bulge in 0.2..2.0f64,
        turn in -PI..PI,
    ) {
        let pair = GeneralConic::from_lines(
            &Line::new(center, center + vector(tilt.cos(), tilt.sin())),
            &Line::new(b, b + vector(turn.cos(), turn.sin())),
        );
        prop_assume!(pair.is_some());

        let curves = [
            AnyCurve::Line(Line::new(a, b)),
            AnyCurve::Arc(Arc::new(b, center, bulge)),
            AnyCurve::Circle(Circle::new(a, radius)),
            AnyCurve::Ellipse(Ellipse::new(center, radius, radius * ratio, tilt, true)),
            AnyCurve::Hyperbola(Hyperbola::new(b, radius, radius * ratio, tilt).unwrap()),
            AnyCurve::Parabola(Parabola::new(center, -tilt, radius).unwrap()),
            AnyCurve::Conic(GeneralConic::from_ellipse_axes(a, radius, radius * ratio, turn)),
            AnyCurve::Conic(pair.unwrap()),
        ];
        for (i, first) in curves.iter().enumerate() {
            for second in &curves[i + 1..] {
                let ab = intersect(first, second);
                let ba = intersect(second, first);
                // Skip grazing contacts, where either order can see a double root.
                let grazing = ab.iter().chain(&ba).any(|p| {
                    let (n1, n2) = (normal_at(first, *p), normal_at(second, *p));
                    n1.cross(n2).abs() <= 1e-3 * n1.length() * n2.length()
                });
                if grazing {
                    continue;
                }
                prop_assert!(same_points(&ab, &ba, 1e-6), "{:?} {:?}: {:?} {:?}", first, second, ab, ba);
            }
        }
    }
}
