use crate::control_points::ControlPoints;
use crate::error::AugmentError;
use crate::interpolation::{CurveInterpolation, Interpolant};

/// A tone curve mapping normalized intensities `[0, 1]` to new intensities.
///
/// The curve passes through its control points. Outside of the first and
/// last control point it holds the endpoint value. Results are not clipped;
/// callers clip to `[0, 1]` when remapping pixels.
///
/// # Examples
///
/// ```
/// use tonejitter_augment::control_points::{ControlPoint, ControlPoints};
/// use tonejitter_augment::curve::ToneCurve;
/// use tonejitter_augment::interpolation::CurveInterpolation;
///
/// let points = ControlPoints::new(vec![
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(0.5, 0.7),
///     ControlPoint::new(1.0, 1.0),
/// ]).unwrap();
///
/// let curve = ToneCurve::new(points, CurveInterpolation::Linear);
/// assert!((curve.evaluate(0.25) - 0.35).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    points: ControlPoints,
    interpolation: CurveInterpolation,
    interpolant: Interpolant,
}

impl ToneCurve {
    /// Fit a curve through the control points.
    pub fn new(points: ControlPoints, interpolation: CurveInterpolation) -> Self {
        let interpolant = Interpolant::fit(points.as_slice(), interpolation);
        Self {
            points,
            interpolation,
            interpolant,
        }
    }

    /// Fit a curve through `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Fails if the pairs do not form valid [`ControlPoints`].
    pub fn from_pairs(
        pairs: &[(f32, f32)],
        interpolation: CurveInterpolation,
    ) -> Result<Self, AugmentError> {
        let points = pairs
            .iter()
            .map(|&(x, y)| crate::control_points::ControlPoint::new(x, y))
            .collect();
        Ok(Self::new(ControlPoints::new(points)?, interpolation))
    }

    /// The identity curve.
    pub fn identity() -> Self {
        Self::new(ControlPoints::identity(), CurveInterpolation::Linear)
    }

    /// The control points of the curve.
    pub fn control_points(&self) -> &ControlPoints {
        &self.points
    }

    /// The interpolation method of the curve.
    pub fn interpolation(&self) -> CurveInterpolation {
        self.interpolation
    }

    /// Evaluate the curve at `x`.
    pub fn evaluate(&self, x: f32) -> f32 {
        let points = self.points.as_slice();
        let (first, last) = (self.points.first(), self.points.last());

        if x.is_nan() || x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // index of the first point strictly right of x, in 1..len
        let right = points.partition_point(|p| p.x <= x);
        let k = right.saturating_sub(1).min(points.len() - 2);

        self.interpolant.evaluate_segment(points, k, x)
    }

    /// Sample the curve into a lookup table with `levels` entries.
    ///
    /// Entry `i` holds the curve at `i / levels`, so a table of 256 levels
    /// maps 8-bit values `v` through `table[v]`. Entries are not clipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonejitter_augment::curve::ToneCurve;
    ///
    /// let table = ToneCurve::identity().lookup_table(4);
    /// assert_eq!(table, vec![0.0, 0.25, 0.5, 0.75]);
    /// ```
    pub fn lookup_table(&self, levels: usize) -> Vec<f32> {
        (0..levels)
            .map(|i| self.evaluate(i as f32 / levels as f32))
            .collect()
    }
}
