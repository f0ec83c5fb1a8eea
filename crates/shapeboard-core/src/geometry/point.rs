use kurbo::Point;

/// Helpers on `kurbo::Point` used by shapes and hit tests.
pub trait PointExt {
    /// Rotate around `origin` by `angle` radians.
    fn rotated(self, origin: Point, angle: f64) -> Point;

    /// The point at `length` from `self` in direction `angle`.
    fn extended(self, length: f64, angle: f64) -> Point;

    /// Whether `other` lies within `range` of `self`.
    fn is_within(self, other: Point, range: f64) -> bool;

    /// Scale both coordinates independently.
    fn scaled(self, mx: f64, my: f64) -> Point;
}

impl PointExt for Point {
    fn rotated(self, origin: Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point::new(
            origin.x + dx * cos - dy * sin,
            origin.y + dx * sin + dy * cos,
        )
    }

    fn extended(self, length: f64, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x + length * cos, self.y + length * sin)
    }

    fn is_within(self, other: Point, range: f64) -> bool {
        self.distance_squared(other) <= range * range
    }

    fn scaled(self, mx: f64, my: f64) -> Point {
        Point::new(self.x * mx, self.y * my)
    }
}
