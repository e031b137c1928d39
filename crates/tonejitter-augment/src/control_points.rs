use std::collections::VecDeque;

use rand::Rng;

use crate::error::AugmentError;
use crate::range::JitterRange;

/// Largest number of sampled control points.
///
/// Breadth-first midpoint insertion halves the gaps at every level; past a
/// few thousand points the f32 midpoints would start to collide.
pub const MAX_SAMPLED_POINTS: usize = 4097;

/// A point `(x, y)` of a tone curve in the normalized `[0, 1]` domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Input intensity.
    pub x: f32,
    /// Output intensity.
    pub y: f32,
}

impl ControlPoint {
    /// Create a new control point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An ordered set of control points with strictly increasing `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoints(Vec<ControlPoint>);

impl ControlPoints {
    /// Create a set of control points.
    ///
    /// # Errors
    ///
    /// Fails if there are fewer than two points, any coordinate is not finite,
    /// or the x-coordinates are not strictly increasing. Colliding points are
    /// rejected rather than merged.
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, AugmentError> {
        if points.len() < 2 {
            return Err(AugmentError::TooFewControlPoints(points.len()));
        }

        if let Some(p) = points
            .iter()
            .find(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(AugmentError::InvalidControlPoints(format!(
                "non finite point ({}, {})",
                p.x, p.y
            )));
        }

        if let Some(w) = points.windows(2).find(|w| w[0].x >= w[1].x) {
            return Err(AugmentError::InvalidControlPoints(format!(
                "x must be strictly increasing, got {} before {}",
                w[0].x, w[1].x
            )));
        }

        Ok(Self(points))
    }

    /// The identity mapping `0 -> 0`, `1 -> 1`.
    pub fn identity() -> Self {
        Self(vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(1.0, 1.0)])
    }

    /// Sample a random monotonic-ish tone curve skeleton.
    ///
    /// The black point (at `x = 0`) and white point (at `x = 1`) are drawn from
    /// their ranges. Interior points are then inserted at the midpoint of the
    /// widest remaining gap, breadth first, with `y` drawn such that the slope
    /// to both neighbours stays within `slope`.
    ///
    /// # Arguments
    ///
    /// * `num_points` - Total number of points, endpoints included.
    /// * `black_point` - Range of the output value at `x = 0`.
    /// * `white_point` - Range of the output value at `x = 1`.
    /// * `slope` - Allowed slope between neighbouring points.
    /// * `rng` - The random source.
    ///
    /// # Errors
    ///
    /// Fails if `num_points` is below 2 or above [`MAX_SAMPLED_POINTS`], or if a
    /// sampled value leaves the finite range.
    pub fn sample<R: Rng>(
        num_points: usize,
        black_point: &JitterRange,
        white_point: &JitterRange,
        slope: &JitterRange,
        rng: &mut R,
    ) -> Result<Self, AugmentError> {
        if num_points < 2 {
            return Err(AugmentError::TooFewControlPoints(num_points));
        }

        if num_points > MAX_SAMPLED_POINTS {
            return Err(AugmentError::TooManyControlPoints(
                num_points,
                MAX_SAMPLED_POINTS,
            ));
        }

        let black = ControlPoint::new(0.0, black_point.sample(rng)?);
        let white = ControlPoint::new(1.0, white_point.sample(rng)?);

        let mut points = Vec::with_capacity(num_points);
        points.push(black);
        points.push(white);

        let mut gaps = VecDeque::from([(black, white)]);
        while points.len() < num_points {
            let Some((left, right)) = gaps.pop_front() else {
                break;
            };
            let middle = between_neighbours(&left, &right, slope, rng)?;
            points.push(middle);
            gaps.push_back((left, middle));
            gaps.push_back((middle, right));
        }

        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        log::trace!("sampled control points: {points:?}");

        Self::new(points)
    }

    /// The points, sorted by `x`.
    pub fn as_slice(&self) -> &[ControlPoint] {
        &self.0
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, a valid set holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first point.
    pub fn first(&self) -> ControlPoint {
        self.0[0]
    }

    /// The last point.
    pub fn last(&self) -> ControlPoint {
        self.0[self.0.len() - 1]
    }
}

/// Insert a new control point halfway between `left` and `right`.
fn between_neighbours<R: Rng>(
    left: &ControlPoint,
    right: &ControlPoint,
    slope: &JitterRange,
    rng: &mut R,
) -> Result<ControlPoint, AugmentError> {
    let half = (right.x - left.x) / 2.0;

    let max_y = (left.y + slope.max * half).min(right.y - slope.min * half);
    let min_y = (left.y + slope.min * half).max(right.y - slope.max * half);

    // the endpoints may be jittered so far apart that no y satisfies both slopes
    let (min_y, max_y) = if min_y <= max_y {
        (min_y, max_y)
    } else {
        log::debug!("infeasible slope bounds [{min_y}, {max_y}], sampling the swapped interval");
        (max_y, min_y)
    };

    let y = JitterRange {
        min: min_y,
        max: max_y,
    }
    .sample(rng)?;
    Ok(ControlPoint::new(left.x + half, y))
}
