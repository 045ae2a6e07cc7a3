//! Circles tangent to three objects: the ten problems of Apollonius.
//!
//! A circle of center `(x, y)` and radius `r` is tangent to
//!
//! - a circle `(xi, yi, ri)` when `(x - xi)² + (y - yi)² = (r + σ·ri)²`,
//! - a line of unit normal `n` and offset `c` when `n·(x, y) + c = τ·r`,
//!
//! for a choice of sides `σ, τ = ±1`. A point is a circle of radius zero.
//! Each of the up to eight sign cases is solved in the `(x, y, r)` space:
//! line constraints and differences of circle constraints are planes, which
//! leaves either a single point (three lines) or a line that is substituted
//! into one of the circle equations, a quadratic.
//!
//! A solution of the case `σ` with a negative radius is the solution of the
//! case `-σ` with a positive one, so only positive radii are kept.

use super::{side, CircleSet, Primitive};
use crate::geom::tolerance::EPSILON;
use crate::geom::transform::Frame;
use crate::geom::{roots, Circle, Line};
use crate::math::{Point, Vector};

use arrayvec::ArrayVec;

/// Circles tangent to three objects, in any order.
pub fn tan_tan_tan_circle(a: &Primitive, b: &Primitive, c: &Primitive) -> Vec<Circle> {
    use Primitive::{Circle as C, Line as L, Point as P};
    match (*a, *b, *c) {
        (C(c1), C(c2), C(c3)) => circle_circle_circle(&c1, &c2, &c3),
        (C(c1), C(c2), L(l)) | (C(c1), L(l), C(c2)) | (L(l), C(c1), C(c2)) => {
            circle_circle_line(&c1, &c2, &l)
        }
        (C(c1), C(c2), P(p)) | (C(c1), P(p), C(c2)) | (P(p), C(c1), C(c2)) => {
            circle_circle_point(&c1, &c2, p)
        }
        (C(c), L(l1), L(l2)) | (L(l1), C(c), L(l2)) | (L(l1), L(l2), C(c)) => {
            circle_line_line(&c, &l1, &l2)
        }
        (C(c), L(l), P(p))
        | (C(c), P(p), L(l))
        | (L(l), C(c), P(p))
        | (L(l), P(p), C(c))
        | (P(p), C(c), L(l))
        | (P(p), L(l), C(c)) => circle_line_point(&c, &l, p),
        (C(c), P(p1), P(p2)) | (P(p1), C(c), P(p2)) | (P(p1), P(p2), C(c)) => {
            circle_point_point(&c, p1, p2)
        }
        (L(l1), L(l2), L(l3)) => line_line_line(&l1, &l2, &l3),
        (L(l1), L(l2), P(p)) | (L(l1), P(p), L(l2)) | (P(p), L(l1), L(l2)) => {
            line_line_point(&l1, &l2, p)
        }
        (L(l), P(p1), P(p2)) | (P(p1), L(l), P(p2)) | (P(p1), P(p2), L(l)) => {
            line_point_point(&l, p1, p2)
        }
        (P(p1), P(p2), P(p3)) => point_point_point(p1, p2, p3),
    }
}

/// The circle through three points, if they are not collinear.
pub fn point_point_point(p1: Point, p2: Point, p3: Point) -> Vec<Circle> {
    let mut result = CircleSet::new();
    if let Some(circle) = Circle::from_three_points(p1, p2, p3) {
        result.add(circle);
    }

    result.into_vec()
}

pub fn line_point_point(line: &Line, p1: Point, p2: Point) -> Vec<Circle> {
    circle_circle_line(&Circle::new(p1, 0.0), &Circle::new(p2, 0.0), line)
}

pub fn circle_point_point(circle: &Circle, p1: Point, p2: Point) -> Vec<Circle> {
    circle_circle_circle(circle, &Circle::new(p1, 0.0), &Circle::new(p2, 0.0))
}

pub fn line_line_point(l1: &Line, l2: &Line, p: Point) -> Vec<Circle> {
    circle_line_line(&Circle::new(p, 0.0), l1, l2)
}

pub fn circle_line_point(circle: &Circle, line: &Line, p: Point) -> Vec<Circle> {
    circle_circle_line(circle, &Circle::new(p, 0.0), line)
}

pub fn circle_circle_point(c1: &Circle, c2: &Circle, p: Point) -> Vec<Circle> {
    circle_circle_circle(c1, c2, &Circle::new(p, 0.0))
}

/// The incircle and the three excircles of the triangle formed by the lines.
///
/// Two parallel lines leave at most two solutions, three give none.
pub fn line_line_line(l1: &Line, l2: &Line, l3: &Line) -> Vec<Circle> {
    solve(&[Primitive::Line(*l1), Primitive::Line(*l2), Primitive::Line(*l3)])
}

pub fn circle_line_line(circle: &Circle, l1: &Line, l2: &Line) -> Vec<Circle> {
    solve(&[Primitive::Circle(*circle), Primitive::Line(*l1), Primitive::Line(*l2)])
}

pub fn circle_circle_line(c1: &Circle, c2: &Circle, line: &Line) -> Vec<Circle> {
    solve(&[Primitive::Circle(*c1), Primitive::Circle(*c2), Primitive::Line(*line)])
}

/// Up to eight circles tangent to three circles.
pub fn circle_circle_circle(c1: &Circle, c2: &Circle, c3: &Circle) -> Vec<Circle> {
    solve(&[Primitive::Circle(*c1), Primitive::Circle(*c2), Primitive::Circle(*c3)])
}

/// A tangency constraint in the frame of the problem.
#[derive(Copy, Clone, Debug)]
enum Constraint {
    Circle { center: Point, radius: f64 },
    Line { normal: Vector, offset: f64 },
}

impl Constraint {
    fn is_point(&self) -> bool {
        match self {
            Constraint::Circle { radius, .. } => *radius == 0.0,
            Constraint::Line { .. } => false,
        }
    }
}

/// `[a, b, c, d]` for `a·x + b·y + c·r = d`.
type Plane = [f64; 4];

/// Origin at the first object, x axis toward the second one, or along the
/// first object if it is a line.
fn canonical_frame(primitives: &[Primitive; 3]) -> Frame {
    let origin = primitives[0].anchor();
    let direction = match primitives[0] {
        Primitive::Line(line) => line.to_vector(),
        _ => primitives[1].anchor() - origin,
    };

    Frame::new(origin, direction).unwrap_or_else(|| Frame::at(origin))
}

fn solve(primitives: &[Primitive; 3]) -> Vec<Circle> {
    let mut result = CircleSet::new();
    let frame = canonical_frame(primitives);

    let mut constraints: ArrayVec<Constraint, 3> = ArrayVec::new();
    for primitive in primitives {
        let constraint = match primitive {
            Primitive::Point(p) => Constraint::Circle {
                center: frame.to_local(*p),
                radius: 0.0,
            },
            Primitive::Circle(c) if c.radius >= 0.0 && c.radius.is_finite() => Constraint::Circle {
                center: frame.to_local(c.center),
                radius: c.radius,
            },
            Primitive::Line(l) => {
                let local = Line::new(frame.to_local(l.start), frame.to_local(l.end));
                match local.equation() {
                    Some((a, b, c)) => Constraint::Line {
                        normal: Vector::new(a, b),
                        offset: c,
                    },
                    None => {
                        log::trace!("degenerate line {:?}", l);
                        return result.into_vec();
                    }
                }
            }
            Primitive::Circle(c) => {
                log::trace!("invalid circle {:?}", c);
                return result.into_vec();
            }
        };
        constraints.push(constraint);
    }

    for case in 0..8 {
        // A point has a single side.
        let redundant = constraints
            .iter()
            .enumerate()
            .any(|(i, c)| c.is_point() && side(case, i as u32) < 0.0);
        if redundant {
            continue;
        }

        // The first circle, with its signed radius.
        let mut reference: Option<(Point, f64)> = None;
        let mut planes: ArrayVec<Plane, 3> = ArrayVec::new();
        for (i, constraint) in constraints.iter().enumerate() {
            let s = side(case, i as u32);
            match *constraint {
                Constraint::Line { normal, offset } => {
                    planes.push([normal.x, normal.y, -s, -offset]);
                }
                Constraint::Circle { center, radius } => match reference {
                    None => reference = Some((center, s * radius)),
                    Some((first, first_radius)) => {
                        planes.push(circle_difference(center, s * radius, first, first_radius));
                    }
                },
            }
        }

        match reference {
            None => {
                if let Some([x, y, r]) = intersect_planes(&planes[0], &planes[1], &planes[2]) {
                    if r > EPSILON {
                        result.add_local(&frame, Point::new(x, y), r);
                    }
                }
            }
            Some((center, signed_radius)) => {
                let (origin, direction) = match plane_line(&planes[0], &planes[1]) {
                    Some(line) => line,
                    None => continue,
                };

                // (x - xi)² + (y - yi)² - (r + σ·ri)² along the line.
                let dx = origin[0] - center.x;
                let dy = origin[1] - center.y;
                let dr = origin[2] + signed_radius;
                let [ux, uy, ur] = direction;
                let a = ux * ux + uy * uy - ur * ur;
                let b = 2.0 * (dx * ux + dy * uy - dr * ur);
                let c = dx * dx + dy * dy - dr * dr;
                for t in roots::quadratic_with_tolerance(a, b, c, EPSILON) {
                    let r = origin[2] + t * ur;
                    if r > EPSILON {
                        let center = Point::new(origin[0] + t * ux, origin[1] + t * uy);
                        result.add_local(&frame, center, r);
                    }
                }
            }
        }
    }

    result.into_vec()
}

/// The plane obtained by subtracting the constraint of the circle `(j, rj)`
/// from the one of the circle `(i, ri)`, radii signed.
fn circle_difference(i: Point, ri: f64, j: Point, rj: f64) -> Plane {
    let ki = i.x * i.x + i.y * i.y - ri * ri;
    let kj = j.x * j.x + j.y * j.y - rj * rj;
    [
        -2.0 * (i.x - j.x),
        -2.0 * (i.y - j.y),
        -2.0 * (ri - rj),
        -(ki - kj),
    ]
}

fn cross(u: [f64; 3], v: [f64; 3]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

fn dot(u: [f64; 3], v: [f64; 3]) -> f64 {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

fn normal(plane: &Plane) -> [f64; 3] {
    [plane[0], plane[1], plane[2]]
}

/// A point and the direction of the intersection of two planes, `None` if
/// they are parallel.
fn plane_line(p1: &Plane, p2: &Plane) -> Option<([f64; 3], [f64; 3])> {
    let n1 = normal(p1);
    let n2 = normal(p2);
    let direction = cross(n1, n2);
    let square_length = dot(direction, direction);
    if square_length.sqrt() <= EPSILON * (dot(n1, n1) * dot(n2, n2)).sqrt() {
        return None;
    }

    let a = cross(n2, direction);
    let b = cross(direction, n1);
    let origin = [
        (p1[3] * a[0] + p2[3] * b[0]) / square_length,
        (p1[3] * a[1] + p2[3] * b[1]) / square_length,
        (p1[3] * a[2] + p2[3] * b[2]) / square_length,
    ];

    Some((origin, direction))
}

/// The common point of three planes, by Cramer's rule.
fn intersect_planes(p1: &Plane, p2: &Plane, p3: &Plane) -> Option<[f64; 3]> {
    let (n1, n2, n3) = (normal(p1), normal(p2), normal(p3));
    let det = dot(n1, cross(n2, n3));
    if det.abs() <= EPSILON {
        return None;
    }

    // Columns replaced by the right hand side.
    let d = [p1[3], p2[3], p3[3]];
    let mut solution = [0.0; 3];
    for (k, value) in solution.iter_mut().enumerate() {
        let mut rows = [n1, n2, n3];
        for (row, rhs) in rows.iter_mut().zip(d.iter()) {
            row[k] = *rhs;
        }
        *value = dot(rows[0], cross(rows[1], rows[2])) / det;
    }

    Some(solution)
}

#[cfg(test)]
use super::is_tangent;
#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn assert_solutions(circles: &[Circle], primitives: &[Primitive]) {
    for circle in circles {
        assert!(circle.radius > 0.0);
        for primitive in primitives {
            assert!(is_tangent(circle, primitive, 1e-7), "{:?} {:?}", circle, primitive);
        }
    }
}

#[cfg(test)]
fn has_circle(circles: &[Circle], center: Point, radius: f64) -> bool {
    circles
        .iter()
        .any(|c| c.center.distance_to(center) < 1e-9 && (c.radius - radius).abs() < 1e-9)
}

#[test]
fn three_circles() {
    let c1 = Circle::new(point(0.0, 0.0), 1.0);
    let c2 = Circle::new(point(6.0, 0.0), 1.0);
    let c3 = Circle::new(point(3.0, 5.0), 1.0);
    let circles = circle_circle_circle(&c1, &c2, &c3);
    assert_eq!(circles.len(), 8);
    assert_solutions(&circles, &[c1.into(), c2.into(), c3.into()]);

    // Outside all three and around all three.
    let circumcircle = Circle::from_three_points(c1.center, c2.center, c3.center).unwrap();
    assert!(has_circle(&circles, circumcircle.center, circumcircle.radius - 1.0));
    assert!(has_circle(&circles, circumcircle.center, circumcircle.radius + 1.0));
}

#[test]
fn concentric_circles() {
    let c1 = Circle::new(point(0.0, 0.0), 1.0);
    let c2 = Circle::new(point(0.0, 0.0), 3.0);
    let c3 = Circle::new(point(0.0, 2.0), 1.0);
    let circles = circle_circle_circle(&c1, &c2, &c3);
    assert_solutions(&circles, &[c1.into(), c2.into(), c3.into()]);
}

#[test]
fn triangle() {
    let a = point(0.0, 0.0);
    let b = point(4.0, 0.0);
    let c = point(0.0, 3.0);
    let (l1, l2, l3) = (Line::new(a, b), Line::new(b, c), Line::new(c, a));
    let circles = line_line_line(&l1, &l2, &l3);
    assert_eq!(circles.len(), 4);
    assert_solutions(&circles, &[l1.into(), l2.into(), l3.into()]);
    assert!(has_circle(&circles, point(1.0, 1.0), 1.0));
    assert!(has_circle(&circles, point(6.0, 6.0), 6.0));

    let parallel = Line::new(point(0.0, 5.0), point(4.0, 5.0));
    let circles = line_line_line(&l1, &parallel, &l3);
    assert_eq!(circles.len(), 2);
    assert_solutions(&circles, &[l1.into(), parallel.into(), l3.into()]);
    assert!(circles.iter().all(|c| (c.radius - 2.5).abs() < 1e-9));

    let other = Line::new(point(0.0, -2.0), point(4.0, -2.0));
    assert!(line_line_line(&l1, &parallel, &other).is_empty());
}

#[test]
fn three_points() {
    let circles = point_point_point(point(1.0, 0.0), point(0.0, 1.0), point(-1.0, 0.0));
    assert_eq!(circles.len(), 1);
    assert!(has_circle(&circles, point(0.0, 0.0), 1.0));

    assert!(point_point_point(point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0)).is_empty());
}

#[test]
fn with_points() {
    let circle = Circle::new(point(0.0, 0.0), 1.0);
    let x_axis = Line::new(point(0.0, 0.0), point(1.0, 0.0));
    let y_axis = Line::new(point(0.0, 0.0), point(0.0, 1.0));

    let p = point(1.0, 2.0);
    let circles = line_line_point(&x_axis, &y_axis, p);
    assert_eq!(circles.len(), 2);
    assert_solutions(&circles, &[x_axis.into(), y_axis.into(), p.into()]);
    assert!(has_circle(&circles, point(1.0, 1.0), 1.0));
    assert!(has_circle(&circles, point(5.0, 5.0), 5.0));

    let (p1, p2) = (point(1.0, 1.0), point(2.0, 3.0));
    let circles = line_point_point(&x_axis, p1, p2);
    assert_eq!(circles.len(), 2);
    assert_solutions(&circles, &[x_axis.into(), p1.into(), p2.into()]);

    let (p1, p2) = (point(3.0, 0.0), point(0.0, 3.0));
    let circles = circle_point_point(&circle, p1, p2);
    assert_eq!(circles.len(), 2);
    assert_solutions(&circles, &[circle.into(), p1.into(), p2.into()]);

    let line = Line::new(point(-10.0, -3.0), point(10.0, -3.0));
    let p = point(3.0, 0.0);
    let circles = circle_line_point(&circle, &line, p);
    assert!(!circles.is_empty());
    assert_solutions(&circles, &[circle.into(), line.into(), p.into()]);

    let c2 = Circle::new(point(6.0, 0.0), 1.0);
    let p = point(3.0, 4.0);
    let circles = circle_circle_point(&circle, &c2, p);
    assert!(!circles.is_empty());
    assert_solutions(&circles, &[circle.into(), c2.into(), p.into()]);
}

#[test]
fn with_lines() {
    let circle = Circle::new(point(0.0, 0.0), 1.0);
    let below = Line::new(point(-10.0, -3.0), point(10.0, -3.0));
    let right = Line::new(point(4.0, -10.0), point(4.0, 10.0));

    let circles = circle_line_line(&circle, &below, &right);
    assert!(!circles.is_empty());
    assert_solutions(&circles, &[circle.into(), below.into(), right.into()]);

    let c2 = Circle::new(point(5.0, 0.0), 1.0);
    let circles = circle_circle_line(&circle, &c2, &below);
    assert!(!circles.is_empty());
    assert_solutions(&circles, &[circle.into(), c2.into(), below.into()]);
}

#[test]
fn dispatch_in_any_order() {
    let circle = Primitive::Circle(Circle::new(point(0.0, 0.0), 1.0));
    let line = Primitive::Line(Line::new(point(-10.0, -3.0), point(10.0, -3.0)));
    let p = Primitive::Point(point(3.0, 0.0));

    let expected = tan_tan_tan_circle(&circle, &line, &p);
    assert!(!expected.is_empty());
    assert_eq!(tan_tan_tan_circle(&p, &line, &circle), expected);
    assert_eq!(tan_tan_tan_circle(&line, &p, &circle), expected);

    let degenerate = Primitive::Line(Line::new(point(1.0, 1.0), point(1.0, 1.0)));
    assert!(tan_tan_tan_circle(&circle, &degenerate, &p).is_empty());
}

#[test]
fn every_permutation_is_dispatched() {
    let c1 = Primitive::Circle(Circle::new(point(0.0, 0.0), 1.0));
    let c2 = Primitive::Circle(Circle::new(point(5.0, 1.0), 1.5));
    let line = Primitive::Line(Line::new(point(-10.0, -3.0), point(10.0, -3.5)));
    let p = Primitive::Point(point(2.0, 2.0));
    let q = Primitive::Point(point(-1.0, 3.0));
    let steep = Primitive::Line(Line::new(point(-3.0, -10.0), point(-2.0, 10.0)));

    let permutations = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    for inputs in [[c1, line, p], [c1, c2, line], [c1, c2, p], [c1, line, steep], [line, p, q], [c1, p, q]] {
        let expected = tan_tan_tan_circle(&inputs[0], &inputs[1], &inputs[2]);
        assert!(!expected.is_empty(), "{:?}", inputs);
        for [i, j, k] in permutations {
            let circles = tan_tan_tan_circle(&inputs[i], &inputs[j], &inputs[k]);
            assert_eq!(circles.len(), expected.len(), "{:?}", inputs);
            for circle in &circles {
                assert!(
                    expected.iter().any(|e| (e.center - circle.center).length() < 1e-9
                        && (e.radius - circle.radius).abs() < 1e-9),
                    "{:?} {:?}",
                    inputs,
                    circle
                );
            }
        }
    }
}
