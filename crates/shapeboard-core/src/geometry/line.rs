use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Tolerance used when classifying near-parallel lines.
const INTERSECTION_EPSILON: f64 = 1e-5;

/// How two lines meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntersectionType {
    /// The lines cross at a single point.
    Intersect(Point),
    /// The lines lie on top of each other.
    Coincident,
    /// The lines never meet.
    Parallel,
}

/// A directed segment from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn dx(&self) -> f64 {
        self.to.x - self.from.x
    }

    pub fn dy(&self) -> f64 {
        self.to.y - self.from.y
    }

    /// Displacement from `from` to `to`.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.dx(), self.dy())
    }

    pub fn distance(&self) -> f64 {
        self.dx().hypot(self.dy())
    }

    /// Direction in radians, `atan2(dy, dx)`.
    pub fn angle(&self) -> f64 {
        self.dy().atan2(self.dx())
    }

    pub fn mid(&self) -> Point {
        self.from.midpoint(self.to)
    }

    /// Whether `point` lies on the segment, allowing roughly one unit² of slack.
    ///
    /// With `a` and `b` the squared distances to the endpoints and `c` the
    /// squared length, the point is on the segment when `(√a + √b)² ≈ c`.
    pub fn contains(&self, point: Point) -> bool {
        let a = self.from.distance_squared(point);
        let b = self.to.distance_squared(point);
        let c = self.from.distance_squared(self.to);
        a + b + 2.0 * (a * b).sqrt() - c < 1.0
    }

    /// Classify how the infinite lines through `self` and `other` meet.
    pub fn intersection(&self, other: &Line) -> IntersectionType {
        let eq = |x: f64, y: f64| (x - y).abs() < INTERSECTION_EPSILON;

        let a1 = self.to.y - self.from.y;
        let b1 = self.from.x - self.to.x;
        let c1 = self.to.x * self.from.y - self.from.x * self.to.y;
        let a2 = other.to.y - other.from.y;
        let b2 = other.from.x - other.to.x;
        let c2 = other.to.x * other.from.y - other.from.x * other.to.y;

        if eq(a1 * b2, b1 * a2) {
            return if eq((a1 + b1) * c2, (a2 + b2) * c1) {
                IntersectionType::Coincident
            } else {
                IntersectionType::Parallel
            };
        }

        let denominator = a2 * b1 - a1 * b2;
        IntersectionType::Intersect(Point::new(
            (b2 * c1 - b1 * c2) / denominator,
            (a1 * c2 - a2 * c1) / denominator,
        ))
    }

    /// Orthogonal projection of `point` onto the infinite line.
    ///
    /// Undefined for a zero-length line.
    pub fn projection(&self, point: Point) -> Option<Point> {
        let length = self.distance();
        if length == 0.0 {
            return None;
        }
        let ab = self.offset();
        let ac = point - self.from;
        let m = ac.dot(ab) / (length * length);
        Some(self.from + ab * m)
    }

    /// Whether the two bounded segments touch.
    pub fn collides(&self, other: &Line) -> bool {
        let denominator = other.dy() * self.dx() - other.dx() * self.dy();
        let ua = (other.dx() * (self.from.y - other.from.y)
            - other.dy() * (self.from.x - other.from.x))
            / denominator;
        let ub = (self.dx() * (self.from.y - other.from.y)
            - self.dy() * (self.from.x - other.from.x))
            / denominator;
        (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn test_basic_measurements() {
        let l = line(0.0, 0.0, 3.0, 4.0);
        assert_eq!(l.dx(), 3.0);
        assert_eq!(l.dy(), 4.0);
        assert_eq!(l.distance(), 5.0);
        assert_eq!(l.mid(), Point::new(1.5, 2.0));
        assert!((l.angle() - (4.0f64).atan2(3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_contains() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        assert!(l.contains(Point::new(5.0, 0.0)));
        assert!(l.contains(Point::new(5.0, 0.1)));
        assert!(!l.contains(Point::new(5.0, 3.0)));
        assert!(!l.contains(Point::new(12.0, 0.0)));
    }

    #[test]
    fn test_intersection_crossing() {
        let a = line(0.0, 0.0, 10.0, 10.0);
        let b = line(0.0, 10.0, 10.0, 0.0);
        match a.intersection(&b) {
            IntersectionType::Intersect(p) => {
                assert!((p.x - 5.0).abs() < 1e-9);
                assert!((p.y - 5.0).abs() < 1e-9);
            }
            other => panic!("expected intersection, got {other:?}"),
        }
    }

    #[test]
    fn test_intersection_parallel_and_coincident() {
        let a = line(0.0, 0.0, 10.0, 0.0);
        assert_eq!(
            a.intersection(&line(0.0, 5.0, 10.0, 5.0)),
            IntersectionType::Parallel
        );
        assert_eq!(
            a.intersection(&line(2.0, 0.0, 20.0, 0.0)),
            IntersectionType::Coincident
        );
    }

    #[test]
    fn test_projection() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        let p = l.projection(Point::new(4.0, 7.0)).unwrap();
        assert!((p.x - 4.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn test_projection_zero_length() {
        let l = line(1.0, 1.0, 1.0, 1.0);
        assert!(l.projection(Point::new(4.0, 7.0)).is_none());
    }

    #[test]
    fn test_collides() {
        let a = line(0.0, 0.0, 10.0, 10.0);
        assert!(a.collides(&line(0.0, 10.0, 10.0, 0.0)));
        assert!(!a.collides(&line(20.0, 0.0, 30.0, -10.0)));
        // Parallel segments never collide.
        assert!(!a.collides(&line(0.0, 1.0, 10.0, 11.0)));
    }
}
