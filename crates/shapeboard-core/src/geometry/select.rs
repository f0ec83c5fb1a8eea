//! Rubber-band selection tests between a rectangle and geometric primitives.

use super::{Arc, Circle, Line, PointExt};
use kurbo::{Point, Rect};
use std::f64::consts::PI;

/// "Can this selector pick up that primitive" tests on `kurbo::Rect`.
///
/// Every test normalizes the rectangle first, so a selector dragged up or
/// to the left behaves the same as one dragged down and to the right.
pub trait RectSelect {
    /// Overlaps `other` without lying entirely inside it.
    fn can_select_rect(&self, other: Rect) -> bool;

    /// Any segment of the polyline through `points` is selectable.
    fn can_select_points(&self, points: &[Point], closed: bool) -> bool;

    /// The segment's midpoint is inside, or the segment crosses an edge.
    fn can_select_line(&self, line: &Line) -> bool;

    fn can_select_circle(&self, circle: &Circle) -> bool;

    /// Corner counting with a sampled fallback along the axis directions.
    ///
    /// Only the directions 0, π/2, π and -π/2 are sampled, so a thin arc
    /// lying entirely between two of them can be missed.
    fn can_select_arc(&self, arc: &Arc) -> bool;
}

fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
}

fn edges(rect: Rect) -> [Line; 4] {
    [
        Line::new(Point::new(rect.x0, rect.y0), Point::new(rect.x0, rect.y1)),
        Line::new(Point::new(rect.x1, rect.y0), Point::new(rect.x1, rect.y1)),
        Line::new(Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y0)),
        Line::new(Point::new(rect.x0, rect.y1), Point::new(rect.x1, rect.y1)),
    ]
}

fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

impl RectSelect for Rect {
    fn can_select_rect(&self, other: Rect) -> bool {
        let this = self.abs();
        let other = other.abs();
        this.overlaps(other) && !contains_rect(other, this)
    }

    fn can_select_points(&self, points: &[Point], closed: bool) -> bool {
        let count = points.len();
        points.iter().enumerate().any(|(i, &point)| {
            if !closed && i == count - 1 {
                return false;
            }
            let next = points[(i + 1) % count];
            self.can_select_line(&Line::new(point, next))
        })
    }

    fn can_select_line(&self, line: &Line) -> bool {
        let rect = self.abs();
        rect.contains(line.mid()) || edges(rect).iter().any(|edge| line.collides(edge))
    }

    fn can_select_circle(&self, circle: &Circle) -> bool {
        let rect = self.abs();
        if corners(rect).iter().all(|&corner| circle.contains(corner)) {
            return false;
        }
        let x = circle.center.x.clamp(rect.x0, rect.x1);
        let y = circle.center.y.clamp(rect.y0, rect.y1);
        let dx = circle.center.x - x;
        let dy = circle.center.y - y;
        dx * dx + dy * dy <= circle.radius * circle.radius
    }

    fn can_select_arc(&self, arc: &Arc) -> bool {
        let rect = self.abs();
        let rect_corners = corners(rect);
        let inside = rect_corners.iter().filter(|&&c| arc.contains(c)).count();
        if inside != 0 {
            return inside != rect_corners.len();
        }

        let samples: Vec<Point> = [0.0, PI / 2.0, PI, -PI / 2.0]
            .into_iter()
            .filter(|&angle| arc.contains_angle(angle))
            .map(|angle| arc.center.extended(arc.radius, angle))
            .collect();
        if samples.iter().any(|&p| rect.contains(p)) {
            return true;
        }

        let arms = [
            Line::new(arc.center, arc.center.extended(arc.radius, arc.start_angle)),
            Line::new(arc.center, arc.center.extended(arc.radius, arc.end_angle)),
        ];
        if arms.iter().any(|arm| rect.can_select_line(arm)) {
            return true;
        }

        samples
            .iter()
            .any(|&p| rect.can_select_line(&Line::new(arc.center, p)))
    }
}
