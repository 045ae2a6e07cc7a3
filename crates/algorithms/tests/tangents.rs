use apollo_algorithms::geom::{Circle, Line};
use apollo_algorithms::math::{point, Point};
use apollo_algorithms::tangent::{
    is_tangent, tan_tan_line, tan_tan_rad_circle, tan_tan_tan_circle, Primitive,
};

use proptest::prelude::*;

#[test]
fn two_points_one_diameter_apart() {
    let circles = tan_tan_rad_circle::point_point(point(0.0, 0.0), point(4.0, 0.0), 2.0);
    assert!(circles.is_empty());
}

#[test]
fn ten_problems() {
    let c1 = Primitive::Circle(Circle::new(point(0.0, 0.0), 1.0));
    let c2 = Primitive::Circle(Circle::new(point(6.0, 0.0), 1.5));
    let c3 = Primitive::Circle(Circle::new(point(2.0, 5.0), 0.5));
    let l1 = Primitive::Line(Line::new(point(-10.0, -4.0), point(10.0, -4.0)));
    let l2 = Primitive::Line(Line::new(point(9.0, -10.0), point(8.0, 10.0)));
    let l3 = Primitive::Line(Line::new(point(-3.0, 0.0), point(2.0, 8.0)));
    let p1 = Primitive::Point(point(3.0, 2.0));
    let p2 = Primitive::Point(point(1.0, 3.0));
    let p3 = Primitive::Point(point(4.0, 1.0));

    let problems = [
        [p1, p2, p3],
        [l1, p1, p2],
        [c1, p1, p2],
        [l1, l2, p1],
        [c1, l1, p1],
        [c1, c2, p1],
        [l1, l2, l3],
        [c1, l1, l2],
        [c1, c2, l1],
        [c1, c2, c3],
    ];
    for [a, b, c] in &problems {
        let circles = tan_tan_tan_circle(a, b, c);
        assert!(!circles.is_empty(), "{:?} {:?} {:?}", a, b, c);
        for circle in &circles {
            for primitive in [a, b, c] {
                assert!(is_tangent(circle, primitive, 1e-7), "{:?} {:?}", circle, primitive);
            }
        }
    }
}

fn any_point(range: f64) -> impl Strategy<Value = Point> {
    (-range..range, -range..range).prop_map(|(x, y)| point(x, y))
}

fn any_primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        any_point(10.0).prop_map(Primitive::Point),
        (any_point(10.0), any_point(10.0)).prop_map(|(a, b)| Primitive::Line(Line::new(a, b))),
        (any_point(10.0), 0.5..5.0f64).prop_map(|(c, r)| Primitive::Circle(Circle::new(c, r))),
    ]
}

fn scale(primitive: &Primitive) -> f64 {
    match primitive {
        Primitive::Point(p) => p.to_vector().length(),
        Primitive::Line(l) => l.start.to_vector().length().max(l.end.to_vector().length()),
        Primitive::Circle(c) => c.center.to_vector().length() + c.radius,
    }
}

proptest! {
    #[test]
    fn tangent_circles_touch_everything(a in any_primitive(), b in any_primitive(), c in any_primitive()) {
        let circles = tan_tan_tan_circle(&a, &b, &c);
        prop_assert!(circles.len() <= 8);
        for circle in &circles {
            let tolerance = 1e-6 * (1.0 + circle.radius + scale(&a) + scale(&b) + scale(&c));
            for primitive in [&a, &b, &c] {
                prop_assert!(is_tangent(circle, primitive, tolerance), "{:?} {:?}", circle, primitive);
            }
        }
    }

    #[test]
    fn circles_of_a_given_radius(a in any_primitive(), b in any_primitive(), radius in 0.1..10.0f64) {
        let circles = tan_tan_rad_circle(&a, &b, radius);
        prop_assert!(circles.len() <= 8);
        for circle in &circles {
            prop_assert!((circle.radius - radius).abs() < 1e-12);
            let tolerance = 1e-7 * (1.0 + radius + scale(&a) + scale(&b));
            prop_assert!(is_tangent(circle, &a, tolerance));
            prop_assert!(is_tangent(circle, &b, tolerance));
        }
    }

    #[test]
    fn common_tangent_lines(c1 in any_point(10.0), c2 in any_point(10.0), r1 in 0.5..5.0f64, r2 in 0.5..5.0f64) {
        let circle1 = Circle::new(c1, r1);
        let circle2 = Circle::new(c2, r2);
        let lines = tan_tan_line::circle_circle(&circle1, &circle2);
        prop_assert!(lines.len() <= 4);
        for line in &lines {
            for circle in [&circle1, &circle2] {
                let d = line.signed_distance(circle.center).unwrap();
                prop_assert!((d.abs() - circle.radius).abs() < 1e-9 * (1.0 + scale(&Primitive::Circle(*circle))));
            }
        }
    }
}
