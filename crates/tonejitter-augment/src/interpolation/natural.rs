use crate::control_points::ControlPoint;

use super::secants;

/// Second derivatives of the natural cubic spline, zero at both ends.
///
/// Solves the tridiagonal system with the Thomas algorithm.
pub(crate) fn second_derivatives(points: &[ControlPoint]) -> Vec<f32> {
    let n = points.len();
    let mut m = vec![0.0f32; n];
    if n < 3 {
        return m;
    }

    let delta = secants(points);
    let mut c_prime = vec![0.0f32; n];
    let mut d_prime = vec![0.0f32; n];

    for i in 1..n - 1 {
        let h0 = points[i].x - points[i - 1].x;
        let h1 = points[i + 1].x - points[i].x;
        let rhs = 6.0 * (delta[i] - delta[i - 1]);
        let denom = 2.0 * (h0 + h1) - h0 * c_prime[i - 1];
        c_prime[i] = h1 / denom;
        d_prime[i] = (rhs - h0 * d_prime[i - 1]) / denom;
    }

    for i in (1..n - 1).rev() {
        m[i] = d_prime[i] - c_prime[i] * m[i + 1];
    }

    m
}

pub(crate) fn evaluate(p0: &ControlPoint, p1: &ControlPoint, m0: f32, m1: f32, x: f32) -> f32 {
    let h = p1.x - p0.x;
    let a = (p1.x - x) / h;
    let b = (x - p0.x) / h;
    a * p0.y + b * p1.y + ((a * a * a - a) * m0 + (b * b * b - b) * m1) * h * h / 6.0
}
