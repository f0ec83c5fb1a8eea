//! Protractor shape: measures the angle between two arms.

use super::{BuildContext, PaintMethod, ShapeBehavior, ShapePath, path};
use crate::geometry::{Arc, Line, PointExt, RectSelect, degrees_to_radians, radians_to_degrees};
use crate::layout::Layout;
use kurbo::Rect;

const TICK_STEP_DEGREES: f64 = 2.0;
const LONG_TICK_EVERY: usize = 5;
const LONG_TICK: f64 = 15.0;
const SHORT_TICK: f64 = 7.0;

/// Layout is `[first arm end, vertex, second arm end]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Protractor {
    arc: Option<Arc>,
}

impl Protractor {
    /// The measured arc, reaching as far as the longer arm.
    pub fn arc(&self) -> Option<Arc> {
        self.arc
    }

    /// Measured angle in degrees.
    pub fn angle_degrees(&self) -> Option<f64> {
        self.arc.map(|arc| radians_to_degrees(arc.sweep()))
    }
}

impl ShapeBehavior for Protractor {
    fn identifier(&self) -> i64 {
        4
    }

    fn name(&self) -> &'static str {
        "Protractor"
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
        self.arc = match layout.first() {
            Some(&[v1, vertex, v2]) => {
                let radius = Line::new(vertex, v1)
                    .distance()
                    .max(Line::new(vertex, v2).distance());
                Some(Arc::vertex(vertex, v1, v2, radius))
            }
            _ => None,
        };
    }

    fn update_body(&self, ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        let Some(arc) = self.arc else {
            return Vec::new();
        };
        let step = degrees_to_radians(TICK_STEP_DEGREES);
        let ticks = (arc.sweep() / step + 1e-9).floor() as usize;
        let from = if arc.clockwise { arc.end_angle } else { arc.start_angle };
        let long = LONG_TICK.min(arc.radius);
        let short = SHORT_TICK.min(arc.radius);

        vec![ShapePath::build(
            PaintMethod::Stroke(ctx.style.line_width),
            ctx.style.stroke_color,
            |p| {
                path::add_arc(p, &arc);
                path::add_lines(p, &[arc.center, arc.start_point()]);
                path::add_lines(p, &[arc.center, arc.end_point()]);
                for i in 0..=ticks {
                    let angle = from + step * i as f64;
                    let len = if i % LONG_TICK_EVERY == 0 { long } else { short };
                    path::add_lines(
                        p,
                        &[
                            arc.center.extended(arc.radius, angle),
                            arc.center.extended(arc.radius - len, angle),
                        ],
                    );
                }
            },
        )]
    }

    fn select_test(&self, _layout: &Layout, rect: Rect) -> bool {
        self.arc.is_some_and(|arc| rect.can_select_arc(&arc))
    }
}
