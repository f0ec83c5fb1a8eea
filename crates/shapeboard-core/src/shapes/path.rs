//! Render geometry produced by shapes and canvas adornments.

use crate::geometry::{Arc, Circle, Line, PointExt};
use crate::render::RenderSink;
use crate::shapes::SerializableColor;
use kurbo::{BezPath, Point, Shape as _, Stroke};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Flattening tolerance for circles and arcs.
const CURVE_TOLERANCE: f64 = 0.1;

/// How a [`ShapePath`] is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintMethod {
    Stroke(f64),
    Dash {
        width: f64,
        phase: f64,
        lengths: Vec<f64>,
    },
    Fill,
}

impl PaintMethod {
    /// Dashes and gaps twice as long as the line is wide.
    pub fn default_dash(width: f64) -> Self {
        let dv = width * 2.0;
        PaintMethod::Dash {
            width,
            phase: dv,
            lengths: vec![dv, dv],
        }
    }

    /// Stroke parameters, or `None` for fills.
    pub fn stroke(&self) -> Option<Stroke> {
        match self {
            PaintMethod::Stroke(width) => Some(Stroke::new(*width)),
            PaintMethod::Dash {
                width,
                phase,
                lengths,
            } => Some(Stroke::new(*width).with_dashes(*phase, lengths.iter().copied())),
            PaintMethod::Fill => None,
        }
    }
}

/// One painted path of a shape's structure or body.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePath {
    pub path: BezPath,
    pub method: PaintMethod,
    pub color: SerializableColor,
}

impl ShapePath {
    pub fn new(method: PaintMethod, color: SerializableColor, path: BezPath) -> Self {
        Self {
            path,
            method,
            color,
        }
    }

    /// Build the path in place with `make`.
    pub fn build(method: PaintMethod, color: SerializableColor, make: impl FnOnce(&mut BezPath)) -> Self {
        let mut path = BezPath::new();
        make(&mut path);
        Self::new(method, color, path)
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        match self.method.stroke() {
            Some(stroke) => sink.stroke_path(&self.path, &stroke, self.color.into()),
            None => sink.fill_path(&self.path, self.color.into()),
        }
    }
}

/// Open polyline through `points`.
pub fn add_lines(path: &mut BezPath, points: &[Point]) {
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(first);
        for &p in iter {
            path.line_to(p);
        }
    }
}

pub fn add_line(path: &mut BezPath, line: &Line) {
    add_lines(path, &[line.from, line.to]);
}

pub fn add_circle(path: &mut BezPath, circle: &Circle) {
    path.extend(kurbo::Circle::new(circle.center, circle.radius).path_elements(CURVE_TOLERANCE));
}

pub fn add_arc(path: &mut BezPath, arc: &Arc) {
    path.extend(arc.to_kurbo().path_elements(CURVE_TOLERANCE));
}

/// Closed square of half-width `width` rotated by `rotation`.
pub fn add_square(path: &mut BezPath, center: Point, width: f64, rotation: f64) {
    let d = width * 2f64.sqrt();
    let points: Vec<Point> = (0..4)
        .map(|i| center.extended(d, FRAC_PI_4 + rotation + f64::from(i) * FRAC_PI_2))
        .collect();
    add_lines(path, &points);
    path.close_path();
}

/// Two perpendicular strokes of `length` crossing at `center`.
pub fn add_crosshair(path: &mut BezPath, center: Point, length: f64, angle: f64) {
    let half = length / 2.0;
    add_lines(
        path,
        &[
            center.extended(half, FRAC_PI_2 + angle),
            center.extended(half, PI * 1.5 + angle),
        ],
    );
    add_lines(path, &[center.extended(half, angle), center.extended(half, PI + angle)]);
}

/// Arrow of `body` length from `origin` pointing along `angle`, with a
/// two-stroke head of `head` length.
pub fn add_arrow(path: &mut BezPath, body: f64, head: f64, angle: f64, origin: Point) {
    let tip = origin.extended(body, angle);
    add_lines(path, &[origin, tip]);
    add_lines(
        path,
        &[
            tip.extended(head, angle + PI - FRAC_PI_4),
            tip,
            tip.extended(head, angle + PI + FRAC_PI_4),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape as _};

    #[test]
    fn test_add_lines() {
        let mut path = BezPath::new();
        add_lines(&mut path, &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
        let els = path.elements();
        assert_eq!(els.len(), 3);
        assert!(matches!(els[0], PathEl::MoveTo(_)));
        assert!(matches!(els[2], PathEl::LineTo(_)));
    }

    #[test]
    fn test_add_lines_empty() {
        let mut path = BezPath::new();
        add_lines(&mut path, &[]);
        assert!(path.elements().is_empty());
    }

    #[test]
    fn test_square_is_closed() {
        let mut path = BezPath::new();
        add_square(&mut path, Point::ZERO, 5.0, 0.0);
        assert!(matches!(path.elements().last(), Some(PathEl::ClosePath)));
        let bbox = path.bounding_box();
        assert!((bbox.width() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_dash_stroke() {
        let stroke = PaintMethod::default_dash(1.5).stroke().unwrap();
        assert_eq!(stroke.width, 1.5);
        assert_eq!(stroke.dash_offset, 3.0);
        assert_eq!(stroke.dash_pattern.as_slice(), &[3.0, 3.0]);
        assert!(PaintMethod::Fill.stroke().is_none());
    }
}
