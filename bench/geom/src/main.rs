#[macro_use]
extern crate bencher;

use bencher::Bencher;

use apollo::algorithms::intersect::{conic_conic, intersect, IntersectOptions};
use apollo::algorithms::tangent::{tan_tan_tan_circle, Primitive};
use apollo::geom::{AnyCurve, Circle, Ellipse, GeneralConic, Hyperbola, Line};
use apollo::math::*;

const N: usize = 10;

fn ellipse_ellipse(bench: &mut Bencher) {
    let e1 = AnyCurve::Ellipse(Ellipse::new(point(0.0, 0.0), 3.0, 1.0, 0.3, true));
    let e2 = AnyCurve::Ellipse(Ellipse::new(point(0.5, 0.2), 2.0, 1.5, -0.8, true));

    bench.iter(|| {
        for _ in 0..N {
            intersect(&e1, &e2);
        }
    });
}

fn hyperbola_circle(bench: &mut Bencher) {
    let h = AnyCurve::Hyperbola(Hyperbola::new(point(0.0, 0.0), 1.0, 0.5, 0.2).unwrap());
    let c = AnyCurve::Circle(Circle::new(point(0.3, 0.1), 2.0));

    bench.iter(|| {
        for _ in 0..N {
            intersect(&h, &c);
        }
    });
}

fn pencil_of_conics(bench: &mut Bencher) {
    let c1 = GeneralConic::from_ellipse_axes(point(0.3, -0.2), 3.0, 1.0, 0.4);
    let c2 = GeneralConic::from_hyperbola_axes(point(-0.5, 0.5), 1.0, 0.7, -0.3);
    let options = IntersectOptions::DEFAULT;

    bench.iter(|| {
        for _ in 0..N {
            conic_conic(&c1, &c2, &options);
        }
    });
}

fn three_circles(bench: &mut Bencher) {
    let c1 = Primitive::Circle(Circle::new(point(0.0, 0.0), 1.0));
    let c2 = Primitive::Circle(Circle::new(point(6.0, 0.0), 1.5));
    let c3 = Primitive::Circle(Circle::new(point(2.0, 5.0), 0.5));

    bench.iter(|| {
        for _ in 0..N {
            tan_tan_tan_circle(&c1, &c2, &c3);
        }
    });
}

fn circle_line_point(bench: &mut Bencher) {
    let c = Primitive::Circle(Circle::new(point(0.0, 0.0), 1.0));
    let l = Primitive::Line(Line::new(point(-10.0, -4.0), point(10.0, -4.0)));
    let p = Primitive::Point(point(3.0, 2.0));

    bench.iter(|| {
        for _ in 0..N {
            tan_tan_tan_circle(&c, &l, &p);
        }
    });
}

benchmark_group!(intersections, ellipse_ellipse, hyperbola_circle, pencil_of_conics);
benchmark_group!(tangents, three_circles, circle_line_point);

benchmark_main!(intersections, tangents);
