use crate::control_points::ControlPoint;

pub(crate) fn evaluate(p0: &ControlPoint, p1: &ControlPoint, x: f32) -> f32 {
    let t = (x - p0.x) / (p1.x - p0.x);
    p0.y + t * (p1.y - p0.y)
}
