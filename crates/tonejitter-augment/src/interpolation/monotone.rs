use crate::control_points::ControlPoint;

use super::secants;

/// Tangents of the Fritsch-Carlson monotone cubic Hermite interpolant.
pub(crate) fn fritsch_carlson_tangents(points: &[ControlPoint]) -> Vec<f32> {
    let n = points.len();
    let delta = secants(points);

    let mut m = vec![0.0f32; n];
    m[0] = delta[0];
    m[n - 1] = delta[n - 2];
    for k in 1..n - 1 {
        // local extrema get a flat tangent
        if delta[k - 1] * delta[k] > 0.0 {
            m[k] = (delta[k - 1] + delta[k]) / 2.0;
        }
    }

    for k in 0..n - 1 {
        if delta[k] == 0.0 {
            m[k] = 0.0;
            m[k + 1] = 0.0;
            continue;
        }
        let a = m[k] / delta[k];
        let b = m[k + 1] / delta[k];
        let s = a * a + b * b;
        if s > 9.0 {
            let tau = 3.0 / s.sqrt();
            m[k] = tau * a * delta[k];
            m[k + 1] = tau * b * delta[k];
        }
    }

    m
}

/// Cubic Hermite basis evaluation on `[p0.x, p1.x]`.
pub(crate) fn evaluate(p0: &ControlPoint, p1: &ControlPoint, m0: f32, m1: f32, x: f32) -> f32 {
    let h = p1.x - p0.x;
    let t = (x - p0.x) / h;
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * p0.y + h10 * h * m0 + h01 * p1.y + h11 * h * m1
}

#[cfg(test)]
mod tests {
    use crate::control_points::ControlPoint;

    #[test]
    fn tangents_of_a_line() {
        let points = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(0.5, 0.5),
            ControlPoint::new(1.0, 1.0),
        ];
        let m = super::fritsch_carlson_tangents(&points);
        assert_eq!(m, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn flat_segment_has_flat_tangents() {
        let points = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(0.5, 0.5),
            ControlPoint::new(0.75, 0.5),
            ControlPoint::new(1.0, 1.0),
        ];
        let m = super::fritsch_carlson_tangents(&points);
        assert_eq!(m[1], 0.0);
        assert_eq!(m[2], 0.0);
    }

    #[test]
    fn no_overshoot_on_step() {
        let points = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(0.4, 0.05),
            ControlPoint::new(0.6, 0.95),
            ControlPoint::new(1.0, 1.0),
        ];
        let m = super::fritsch_carlson_tangents(&points);
        for k in 0..points.len() - 1 {
            for i in 0..=20 {
                let x = points[k].x + (points[k + 1].x - points[k].x) * i as f32 / 20.0;
                let y = super::evaluate(&points[k], &points[k + 1], m[k], m[k + 1], x);
                assert!(y >= points[k].y - 1e-6 && y <= points[k + 1].y + 1e-6);
            }
        }
    }
}
