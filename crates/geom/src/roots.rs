//! Real roots of low degree polynomials.
//!
//! Coefficients are given highest degree first. The actual root finding is
//! done by `kurbo`; this module normalizes the coefficients, demotes the degree
//! when the leading coefficient vanishes relative to the others (quadratics that
//! look like quartics are common after a change of frame), drops non-finite
//! roots and polishes the rest with a few Newton steps.

use crate::utils::max_abs;

use arrayvec::ArrayVec;
use kurbo::common::{solve_cubic, solve_quadratic, solve_quartic};

/// A leading coefficient smaller than this, relative to the largest one, is zero.
const LEADING_EPSILON: f64 = 1e-12;

const NEWTON_STEPS: usize = 3;

fn eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, c| acc * x + c)
}

fn eval_derivative(coeffs: &[f64], x: f64) -> f64 {
    let n = coeffs.len() - 1;
    coeffs[..n]
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, c)| acc * x + c * (n - i) as f64)
}

fn polish(coeffs: &[f64], mut x: f64) -> f64 {
    let mut fx = eval(coeffs, x).abs();
    for _ in 0..NEWTON_STEPS {
        if fx == 0.0 {
            break;
        }
        let d = eval_derivative(coeffs, x);
        if d == 0.0 {
            break;
        }
        let next = x - eval(coeffs, x) / d;
        let f_next = eval(coeffs, next).abs();
        if !next.is_finite() || f_next >= fx {
            break;
        }
        x = next;
        fx = f_next;
    }

    x
}

/// Scales the coefficients so that the largest one is 1 and strips vanishing
/// leading coefficients.
fn normalize<const N: usize>(coeffs: [f64; N]) -> ArrayVec<f64, N> {
    let mut result = ArrayVec::new();
    let scale = max_abs(&coeffs);
    if scale == 0.0 || !scale.is_finite() {
        return result;
    }

    let mut leading = true;
    for c in coeffs {
        let c = c / scale;
        if leading && c.abs() <= LEADING_EPSILON {
            continue;
        }
        leading = false;
        result.push(c);
    }

    result
}

fn solve<const N: usize>(coeffs: [f64; N]) -> ArrayVec<f64, 4> {
    let c = normalize(coeffs);
    let raw: ArrayVec<f64, 4> = match c.len() {
        0 | 1 => ArrayVec::new(),
        2 => {
            let mut r = ArrayVec::new();
            r.push(-c[1] / c[0]);
            r
        }
        3 => solve_quadratic(c[2], c[1], c[0]).into_iter().collect(),
        4 => solve_cubic(c[3], c[2], c[1], c[0]).into_iter().collect(),
        _ => solve_quartic(c[4], c[3], c[2], c[1], c[0]).into_iter().collect(),
    };

    let mut roots: ArrayVec<f64, 4> = raw
        .into_iter()
        .filter(|r| r.is_finite())
        .map(|r| polish(&c, r))
        .collect();
    roots.sort_by(|a, b| a.total_cmp(b));

    roots
}

/// Real roots of `a·x² + b·x + c`.
pub fn quadratic(a: f64, b: f64, c: f64) -> ArrayVec<f64, 2> {
    solve([a, b, c]).into_iter().take(2).collect()
}

/// Real roots of `a·x² + b·x + c`, counting a discriminant within `epsilon`
/// (relative to `b²`) of zero as a double root.
///
/// Tangent configurations produce a discriminant that is zero up to rounding,
/// and would otherwise randomly report zero or two roots.
pub fn quadratic_with_tolerance(a: f64, b: f64, c: f64, epsilon: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let scale = max_abs(&[a, b, c]);
    if scale == 0.0 || !scale.is_finite() {
        return result;
    }
    let (a, b, c) = (a / scale, b / scale, c / scale);

    if a.abs() <= LEADING_EPSILON {
        if b != 0.0 {
            result.push(-c / b);
        }
        return result;
    }

    let disc = b * b - 4.0 * a * c;
    let reference = (b * b).max((4.0 * a * c).abs());
    if disc.abs() <= epsilon * reference {
        result.push(-b / (2.0 * a));
        return result;
    }
    if disc < 0.0 {
        return result;
    }

    // Stable form: never subtract two numbers of similar magnitude.
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let (r1, r2) = if q == 0.0 { (0.0, 0.0) } else { (q / a, c / q) };
    let (r1, r2) = if r1 < r2 { (r1, r2) } else { (r2, r1) };
    result.push(r1);
    result.push(r2);

    result
}

/// Real roots of `a·x³ + b·x² + c·x + d`.
pub fn cubic(a: f64, b: f64, c: f64, d: f64) -> ArrayVec<f64, 3> {
    solve([a, b, c, d]).into_iter().take(3).collect()
}

/// Real roots of `a·x⁴ + b·x³ + c·x² + d·x + e`.
pub fn quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> ArrayVec<f64, 4> {
    solve([a, b, c, d, e])
}

/// Merges sorted roots closer than `tolerance`.
pub fn dedup_roots<const N: usize>(roots: &mut ArrayVec<f64, N>, tolerance: f64) {
    let mut i = 1;
    while i < roots.len() {
        if (roots[i] - roots[i - 1]).abs() <= tolerance {
            roots.remove(i);
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
fn assert_roots(actual: &[f64], expected: &[f64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "{:?} != {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() <= epsilon, "{:?} != {:?}", actual, expected);
    }
}

#[test]
fn quadratic_roots() {
    assert_roots(&quadratic(1.0, -3.0, 2.0), &[1.0, 2.0], 1e-12);
    assert_roots(&quadratic(1.0, 0.0, 1.0), &[], 0.0);
    // Vanishing leading coefficient degrades to a linear equation.
    assert_roots(&quadratic(1e-20, 2.0, -4.0), &[2.0], 1e-12);
}

#[test]
fn tangent_quadratic() {
    // (x - 1)² with a little noise on the constant term.
    assert_roots(&quadratic_with_tolerance(1.0, -2.0, 1.0 + 1e-14, 1e-10), &[1.0], 1e-12);
    assert_roots(&quadratic_with_tolerance(1.0, -2.0, 1.1, 1e-10), &[], 0.0);
    assert_roots(&quadratic_with_tolerance(2.0, 0.0, -8.0, 1e-10), &[-2.0, 2.0], 1e-12);
}

#[test]
fn cubic_roots() {
    assert_roots(&cubic(1.0, -6.0, 11.0, -6.0), &[1.0, 2.0, 3.0], 1e-9);
    assert_roots(&cubic(-1.0, 1.0, -1.0, 1.0), &[1.0], 1e-9);
}

#[test]
fn quartic_roots() {
    // (x² - 1)(x² - 4)
    assert_roots(&quartic(1.0, 0.0, -5.0, 0.0, 4.0), &[-2.0, -1.0, 1.0, 2.0], 1e-9);
    // A quadratic in disguise.
    assert_roots(&quartic(0.0, 0.0, 1.0, 0.0, -9.0), &[-3.0, 3.0], 1e-9);
}

#[test]
fn dedup() {
    let mut roots: ArrayVec<f64, 4> = [1.0, 1.0 + 1e-12, 2.0].into_iter().collect();
    dedup_roots(&mut roots, 1e-9);
    assert_roots(&roots, &[1.0, 2.0], 0.0);
}
