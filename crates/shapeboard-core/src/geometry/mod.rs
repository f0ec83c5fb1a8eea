//! Planar geometry kernel.
//!
//! Points, vectors and rectangles are plain `kurbo` values. The segment,
//! circle and arc types here carry the conventions the editing surface
//! relies on (tolerant containment, three-point fits, directed arcs).

mod arc;
mod circle;
mod line;
mod point;
mod select;

pub use arc::Arc;
pub use circle::Circle;
pub use line::{IntersectionType, Line};
pub use point::PointExt;
pub use select::RectSelect;

use kurbo::Point;
use std::f64::consts::{PI, TAU};

/// Convert radians to degrees.
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians / PI * 180.0
}

/// Convert degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Angle at `vertex` between the arms towards `a` and `b`, by the law of cosines.
///
/// Returns `None` when either arm has zero length.
pub fn calc_angle(vertex: Point, a: Point, b: Point) -> Option<f64> {
    let len1 = Line::new(vertex, a).distance();
    let len2 = Line::new(vertex, b).distance();
    let len3 = Line::new(a, b).distance();
    let numerator = len1 * len1 + len2 * len2 - len3 * len3;
    let denominator = len1 * len2 * 2.0;
    if denominator == 0.0 {
        return None;
    }
    Some((numerator / denominator).clamp(-1.0, 1.0).acos())
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Wrap an angle into `(-π, π]`.
pub fn signed_angle(angle: f64) -> f64 {
    let wrapped = normalize_angle(angle);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
