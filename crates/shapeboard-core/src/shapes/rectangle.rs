//! Rectangle shape spanned by two opposite corners.

use super::{BuildContext, PaintMethod, ShapeBehavior, ShapePath, path};
use crate::geometry::{PointExt, RectSelect};
use crate::layout::{IndexPath, Layout};
use kurbo::{Point, Rect};

/// A box whose edges follow the shape's rotation angle.
///
/// The layout holds the anchor corner and the opposite corner. The other two
/// corners are derived by un-rotating the opposite corner around the anchor,
/// completing the axis-aligned box there, and rotating the result back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectangleShape {
    corners: Option<[Point; 4]>,
}

impl RectangleShape {
    /// Corners in drawing order, once both are placed.
    pub fn corners(&self) -> Option<[Point; 4]> {
        self.corners
    }

    fn derive_corners(a: Point, c: Point, rotation: f64) -> [Point; 4] {
        let local = c.rotated(a, -rotation);
        let b = Point::new(local.x, a.y).rotated(a, rotation);
        let d = Point::new(a.x, local.y).rotated(a, rotation);
        [a, b, c, d]
    }
}

impl ShapeBehavior for RectangleShape {
    fn identifier(&self) -> i64 {
        1
    }

    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn can_finish(&self, layout: &Layout) -> bool {
        layout.first_len() == 2
    }

    fn should_finish(&self, layout: &Layout) -> bool {
        self.can_finish(layout)
    }

    fn accepts_push(&self, layout: &Layout) -> bool {
        !self.can_finish(layout)
    }

    fn is_locked(&self, _index: IndexPath) -> bool {
        true
    }

    fn layout_did_update(&mut self, layout: &Layout, rotation_angle: f64) {
        self.corners = match layout.first() {
            Some(&[a, c]) => Some(Self::derive_corners(a, c, rotation_angle)),
            _ => None,
        };
    }

    fn update_body(&self, ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        let Some(corners) = self.corners else {
            return Vec::new();
        };
        vec![ShapePath::build(
            PaintMethod::Stroke(ctx.style.line_width),
            ctx.style.stroke_color,
            |p| {
                path::add_lines(p, &corners);
                p.close_path();
            },
        )]
    }

    fn select_test(&self, _layout: &Layout, rect: Rect) -> bool {
        self.corners
            .is_some_and(|corners| rect.can_select_points(&corners, true))
    }
}
