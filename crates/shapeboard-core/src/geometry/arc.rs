use super::{Line, normalize_angle, signed_angle};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A directed circular arc.
///
/// A counter-clockwise arc sweeps from `start_angle` towards increasing
/// angles until it reaches `end_angle`; a clockwise arc sweeps towards
/// decreasing angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// Build the arc spanned at `vertex` by the arms towards `p1` and `p2`.
    ///
    /// The arc turns the short way from the first arm to the second, so
    /// `clockwise` is set when the signed angle between them is negative.
    pub fn vertex(vertex: Point, p1: Point, p2: Point, radius: f64) -> Self {
        let start = Line::new(vertex, p1).angle();
        let end = Line::new(vertex, p2).angle();
        let clockwise = signed_angle(end - start) < 0.0;
        Self::new(vertex, radius, start, end, clockwise)
    }

    /// Angular extent of the arc in `[0, 2π)`.
    pub fn sweep(&self) -> f64 {
        if self.clockwise {
            normalize_angle(self.start_angle - self.end_angle)
        } else {
            normalize_angle(self.end_angle - self.start_angle)
        }
    }

    /// Signed sweep, negative for clockwise arcs.
    pub fn signed_sweep(&self) -> f64 {
        if self.clockwise { -self.sweep() } else { self.sweep() }
    }

    /// Whether the direction `angle` falls inside the arc's sweep.
    pub fn contains_angle(&self, angle: f64) -> bool {
        let delta = if self.clockwise {
            normalize_angle(self.start_angle - angle)
        } else {
            normalize_angle(angle - self.start_angle)
        };
        delta <= self.sweep()
    }

    /// Whether `point` lies in the circular sector bounded by the arc.
    pub fn contains(&self, point: Point) -> bool {
        let line = Line::new(self.center, point);
        line.distance() <= self.radius && self.contains_angle(line.angle())
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    fn point_at(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    /// Equivalent `kurbo::Arc`, for flattening into render paths.
    pub fn to_kurbo(&self) -> kurbo::Arc {
        kurbo::Arc {
            center: self.center,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: self.start_angle,
            sweep_angle: self.signed_sweep(),
            x_rotation: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_vertex_counter_clockwise() {
        let arc = Arc::vertex(
            Point::ZERO,
            Point::new(10.0, 0.0),
            Point::new(0.0, 5.0),
            10.0,
        );
        assert!(!arc.clockwise);
        assert!((arc.sweep() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertex_clockwise() {
        let arc = Arc::vertex(
            Point::ZERO,
            Point::new(0.0, 5.0),
            Point::new(10.0, 0.0),
            10.0,
        );
        assert!(arc.clockwise);
        assert!((arc.sweep() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_contains_angle_wraps() {
        let arc = Arc::new(Point::ZERO, 10.0, PI / 4.0, -PI / 4.0, true);
        assert!(arc.contains_angle(0.0));
        assert!(!arc.contains_angle(PI));
        assert!(!arc.contains_angle(PI / 2.0));
    }

    #[test]
    fn test_contains_point() {
        let arc = Arc::new(Point::ZERO, 10.0, 0.0, PI / 2.0, false);
        assert!(arc.contains(Point::new(3.0, 3.0)));
        assert!(!arc.contains(Point::new(-3.0, 3.0)));
        assert!(!arc.contains(Point::new(9.0, 9.0)));
    }

    #[test]
    fn test_kurbo_arc_sweep_sign() {
        let arc = Arc::new(Point::ZERO, 10.0, PI / 4.0, -PI / 4.0, true);
        let k = arc.to_kurbo();
        assert!((k.sweep_angle + PI / 2.0).abs() < 1e-12);
    }
}
