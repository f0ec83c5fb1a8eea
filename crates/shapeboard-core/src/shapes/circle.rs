//! Circle through three placed points.

use super::{BuildContext, PaintMethod, ShapeBehavior, ShapePath, path};
use crate::geometry::{Circle, RectSelect};
use crate::layout::Layout;
use kurbo::Rect;

/// Length of the crosshair marking the center.
const CENTER_MARK: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircleShape {
    circle: Option<Circle>,
}

impl CircleShape {
    /// The fitted circle, `None` until three non-collinear points exist.
    pub fn circle(&self) -> Option<Circle> {
        self.circle
    }
}

impl ShapeBehavior for CircleShape {
    fn identifier(&self) -> i64 {
        3
    }

    fn name(&self) -> &'static str {
        "Circle"
    }

    fn can_finish(&self, layout: &Layout) -> bool {
        layout.first_len() == 3
    }

    fn should_finish(&self, layout: &Layout) -> bool {
        self.can_finish(layout)
    }

    fn accepts_push(&self, layout: &Layout) -> bool {
        !self.can_finish(layout)
    }

    fn layout_did_update(&mut self, layout: &Layout, _rotation_angle: f64) {
        self.circle = match layout.first() {
            Some(&[a, b, c]) => Circle::from_three_points(a, b, c),
            _ => None,
        };
    }

    fn update_body(&self, ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        let Some(circle) = self.circle else {
            return Vec::new();
        };
        vec![ShapePath::build(
            PaintMethod::Stroke(ctx.style.line_width),
            ctx.style.stroke_color,
            |p| {
                path::add_circle(p, &circle);
                path::add_crosshair(p, circle.center, CENTER_MARK, ctx.rotation_angle);
            },
        )]
    }

    fn select_test(&self, _layout: &Layout, rect: Rect) -> bool {
        self.circle.is_some_and(|circle| {
            rect.can_select_circle(&circle) || rect.abs().contains(circle.center)
        })
    }
}
