//! Curve interpolation through control points.
//!
//! All methods pass exactly through the control points and hold the endpoint
//! values outside of them.
//!
//! # Interpolation Modes
//!
//! - **Linear**: piecewise linear, cheapest, kinks at the control points
//! - **MonotoneCubic**: Fritsch-Carlson cubic Hermite, smooth and free of
//!   overshoot between monotone control points
//! - **NaturalCubic**: C2 natural cubic spline, smoothest, may overshoot

mod linear;
mod monotone;
mod natural;

use crate::control_points::ControlPoint;

/// Interpolation method used to fit a tone curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveInterpolation {
    /// Piecewise linear interpolation.
    Linear,
    /// Monotonicity preserving cubic Hermite interpolation.
    #[default]
    MonotoneCubic,
    /// Natural cubic spline interpolation.
    NaturalCubic,
}

impl std::fmt::Display for CurveInterpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            CurveInterpolation::Linear => "linear",
            CurveInterpolation::MonotoneCubic => "monotone-cubic",
            CurveInterpolation::NaturalCubic => "natural-cubic",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for CurveInterpolation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(CurveInterpolation::Linear),
            "monotone-cubic" => Ok(CurveInterpolation::MonotoneCubic),
            "natural-cubic" => Ok(CurveInterpolation::NaturalCubic),
            other => Err(format!("unknown interpolation: {other}")),
        }
    }
}

/// Precomputed coefficients of a fitted curve.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Interpolant {
    Linear,
    /// Tangents at each control point.
    Hermite(Vec<f32>),
    /// Second derivatives at each control point.
    Spline(Vec<f32>),
}

impl Interpolant {
    pub fn fit(points: &[ControlPoint], mode: CurveInterpolation) -> Self {
        match mode {
            CurveInterpolation::Linear => Interpolant::Linear,
            CurveInterpolation::MonotoneCubic => {
                Interpolant::Hermite(monotone::fritsch_carlson_tangents(points))
            }
            CurveInterpolation::NaturalCubic => {
                Interpolant::Spline(natural::second_derivatives(points))
            }
        }
    }

    /// Evaluate the curve on segment `k` (between points `k` and `k + 1`).
    pub fn evaluate_segment(&self, points: &[ControlPoint], k: usize, x: f32) -> f32 {
        match self {
            Interpolant::Linear => linear::evaluate(&points[k], &points[k + 1], x),
            Interpolant::Hermite(tangents) => monotone::evaluate(
                &points[k],
                &points[k + 1],
                tangents[k],
                tangents[k + 1],
                x,
            ),
            Interpolant::Spline(m) => {
                natural::evaluate(&points[k], &points[k + 1], m[k], m[k + 1], x)
            }
        }
    }
}

/// Finite differences `(y[k+1] - y[k]) / (x[k+1] - x[k])`.
fn secants(points: &[ControlPoint]) -> Vec<f32> {
    points
        .windows(2)
        .map(|w| (w[1].y - w[0].y) / (w[1].x - w[0].x))
        .collect()
}
