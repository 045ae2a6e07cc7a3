use apollo_geom::tolerance::EPSILON;
use apollo_geom::{
    point, Arc, Circle, ConicType, Conic, Curve, Ellipse, GeneralConic, Hyperbola, Line, Parabola, Point,
    Reduced, Transform,
};

use core::f64::consts::{FRAC_PI_2, PI, TAU};
use proptest::prelude::*;

fn close(a: Point, b: Point, tolerance: f64) -> bool {
    a.distance_to(b) <= tolerance * (1.0 + a.to_vector().length())
}

fn any_point(range: f64) -> impl Strategy<Value = Point> {
    (-range..range, -range..range).prop_map(|(x, y)| point(x, y))
}

proptest! {
    #[test]
    fn identity_leaves_curves_unchanged(
        a in any_point(50.0),
        b in any_point(50.0),
        bulge in -3.0..3.0f64,
        radius in 0.1..20.0f64,
        ratio in 0.1..1.0f64,
        tilt in -PI..PI,
    ) {
        let identity = Transform::identity();

        let line = Line::new(a, b);
        prop_assert_eq!(line.transformed(&identity), Some(line));

        let arc = Arc::new(a, b, bulge);
        let moved = arc.transformed(&identity).unwrap();
        prop_assert!(close(moved.start, arc.start, 1e-12));
        prop_assert!(close(moved.end, arc.end, 1e-12));
        prop_assert!((moved.bulge - arc.bulge).abs() < 1e-12);

        let circle = Circle::new(a, radius);
        let moved = circle.transformed(&identity).unwrap();
        prop_assert!(close(moved.center, circle.center, 1e-12));
        prop_assert!((moved.radius - radius).abs() < 1e-12);

        let ellipse = Ellipse::new(a, radius, radius * ratio, tilt, true);
        let moved = ellipse.transformed(&identity).unwrap();
        for i in 0..8 {
            let angle = i as f64 * TAU / 8.0;
            prop_assert!(close(moved.sample(angle), ellipse.sample(angle), 1e-12));
        }

        let hyperbola = Hyperbola::new(a, radius, radius * ratio, tilt).unwrap();
        let moved = hyperbola.transformed(&identity).unwrap();
        for u in [-1.5, 0.0, 0.5, 2.0] {
            prop_assert!(close(moved.sample(u), hyperbola.sample(u), 1e-9));
        }

        let parabola = Parabola::new(a, tilt, radius).unwrap();
        let moved = parabola.transformed(&identity).unwrap();
        for x in [-3.0, 0.0, 1.0, 4.0] {
            prop_assert!(close(moved.sample(x), parabola.sample(x), 1e-9));
        }
    }

    #[test]
    fn reversing_twice(a in any_point(50.0), b in any_point(50.0), bulge in -3.0..3.0f64, ratio in -1.0..1.0f64) {
        let line = Line::new(a, b);
        prop_assert_eq!(line.reversed().reversed(), line);

        let arc = Arc::new(a, b, bulge);
        prop_assert_eq!(arc.reversed().reversed(), arc);

        let ellipse = Ellipse::from_major_axis(a, b.to_vector(), ratio);
        prop_assert_eq!(ellipse.reversed().reversed(), ellipse);
    }

    #[test]
    fn reduce_circles(center in any_point(50.0), radius in 0.1..20.0f64) {
        match Circle::new(center, radius).to_general_conic().reduce() {
            Ok(Reduced::Circle(c)) => {
                prop_assert!(close(c.center, center, 1e-9));
                prop_assert!((c.radius - radius).abs() < 1e-9 * (1.0 + radius));
            }
            other => prop_assert!(false, "{:?}", other),
        }
    }

    #[test]
    fn reduce_ellipses(center in any_point(20.0), rx in 0.5..10.0f64, ratio in 0.2..0.8f64, tilt in -PI..PI) {
        let ellipse = Ellipse::new(center, rx, rx * ratio, tilt, true);
        match ellipse.to_general_conic().reduce() {
            Ok(Reduced::Ellipse(e)) => {
                prop_assert!(close(e.center, center, 1e-7));
                prop_assert!((e.major_radius() - rx).abs() < 1e-7 * rx);
                prop_assert!((e.minor_radius() - rx * ratio).abs() < 1e-7 * rx);
                // Same axis, up to its orientation.
                let cross = e.major_axis.cross(ellipse.major_axis) / (rx * rx);
                prop_assert!(cross.abs() < 1e-6);
            }
            other => prop_assert!(false, "{:?}", other),
        }
    }

    #[test]
    fn reduce_parabolas(vertex in any_point(20.0), tilt in -PI..PI, focal_distance in 0.1..5.0f64, flip in any::<bool>()) {
        let focal_distance = if flip { -focal_distance } else { focal_distance };
        let parabola = Parabola::new(vertex, tilt, focal_distance).unwrap();
        match parabola.to_general_conic().reduce() {
            Ok(Reduced::Parabola(p)) => {
                prop_assert!(close(p.vertex, vertex, 1e-7));
                prop_assert!((p.focal_distance().abs() - focal_distance.abs()).abs() < 1e-7);
                prop_assert!(close(p.focus(), parabola.focus(), 1e-7));
            }
            other => prop_assert!(false, "{:?}", other),
        }
    }

    #[test]
    fn closest_points_are_closest(center in any_point(10.0), p in any_point(30.0), radius in 0.5..10.0f64, ratio in 0.3..1.0f64, tilt in -PI..PI) {
        let circle = Circle::new(center, radius);
        let ellipse = Ellipse::new(center, radius, radius * ratio, tilt, true);
        let arc = Arc::from_center(center, radius, tilt, 2.0);
        let line = Line::new(center, center + apollo_geom::vector(radius, radius * ratio));

        let samples: Vec<(&dyn Curve, Vec<Point>)> = vec![
            (&circle, (0..64).map(|i| circle.point_at_angle(i as f64 * TAU / 64.0)).collect()),
            (&ellipse, (0..64).map(|i| ellipse.sample(i as f64 * TAU / 64.0)).collect()),
            (&arc, (0..=32).map(|i| arc.sample(i as f64 / 32.0)).collect()),
            (&line, (0..=32).map(|i| line.sample(i as f64 / 32.0)).collect()),
        ];
        for (curve, points) in &samples {
            let closest = curve.closest_point(p).unwrap();
            let distance = curve.distance(p).unwrap();
            prop_assert!((distance - closest.distance_to(p)).abs() < 1e-9 * (1.0 + distance));
            for q in points {
                prop_assert!(distance <= q.distance_to(p) + 1e-7, "{} {:?}", curve.name(), q);
            }
        }
    }
}

#[test]
fn conic_from_circle() {
    let conic = GeneralConic::from_circle(point(2.0, 3.0), 4.0);
    assert_eq!(conic.conic_type(), ConicType::Circle);
    let center = conic.center().unwrap();
    assert!(center.distance_to(point(2.0, 3.0)) <= EPSILON);
}

#[test]
fn arc_from_bulge() {
    let arc = Arc::new(point(0.0, 0.0), point(10.0, 0.0), 1.0);
    // 4·atan(1)
    assert!((arc.sweep_angle() - PI).abs() < 1e-12);
    let center = arc.center().unwrap();
    assert!((center.distance_to(arc.start) - center.distance_to(arc.end)).abs() < 1e-12);
    assert!((arc.radius() - 5.0).abs() < 1e-12);

    let quarter = Arc::new(point(0.0, 0.0), point(10.0, 0.0), (PI / 8.0).tan());
    assert!((quarter.sweep_angle() - FRAC_PI_2).abs() < 1e-12);
    assert!((quarter.radius() - 5.0 * 2.0f64.sqrt()).abs() < 1e-12);
}
