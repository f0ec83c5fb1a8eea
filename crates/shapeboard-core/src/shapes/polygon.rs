//! Polygon shape, open or closed.

use super::{BuildContext, PaintMethod, ShapeBehavior, ShapePath, path};
use crate::codec::CodecError;
use crate::geometry::{Line, RectSelect};
use crate::layout::{IndexPath, Layout};
use kurbo::Rect;

/// Arrow head length marking the pending closing edge.
const CLOSING_ARROW_HEAD: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    closed: bool,
    lines: Vec<Line>,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Polygon {
    pub fn new(closed: bool) -> Self {
        Self {
            closed,
            lines: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Edges between consecutive points, wrapping around when closed.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn min_points(&self) -> usize {
        if self.closed { 3 } else { 2 }
    }
}

impl ShapeBehavior for Polygon {
    fn identifier(&self) -> i64 {
        2
    }

    fn name(&self) -> &'static str {
        "Polygon"
    }

    fn can_finish(&self, layout: &Layout) -> bool {
        layout.first_len() >= self.min_points()
    }

    fn is_locked(&self, _index: IndexPath) -> bool {
        true
    }

    fn layout_did_update(&mut self, layout: &Layout, _rotation_angle: f64) {
        self.lines.clear();
        if !self.can_finish(layout) {
            return;
        }
        let Some(points) = layout.first() else {
            return;
        };
        let count = points.len();
        let edges = if self.closed { count } else { count - 1 };
        self.lines.extend((0..edges).map(|i| Line::new(points[i], points[(i + 1) % count])));
    }

    fn update_body(&self, ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        let points = match ctx.layout.first() {
            Some(points) if self.closed && self.can_finish(ctx.layout) => points,
            _ => return ctx.section_paths(PaintMethod::Stroke(ctx.style.line_width)),
        };

        let mut body = vec![ShapePath::build(
            PaintMethod::Stroke(ctx.style.line_width),
            ctx.style.stroke_color,
            |p| {
                path::add_lines(p, points);
                if ctx.is_finished {
                    p.close_path();
                }
            },
        )];

        if !ctx.is_finished {
            if let (Some(end), Some(&first)) = (ctx.layout.end_index_path(), points.first()) {
                let closing = Line::new(ctx.layout[end], first);
                body.push(ShapePath::build(
                    PaintMethod::default_dash(ctx.style.line_width),
                    ctx.style.stroke_color,
                    |p| path::add_line(p, &closing),
                ));
                body.push(ShapePath::build(PaintMethod::Fill, ctx.style.fill_color, |p| {
                    path::add_arrow(p, 0.0, CLOSING_ARROW_HEAD, closing.angle(), closing.mid())
                }));
            }
        }

        body
    }

    fn select_test(&self, _layout: &Layout, rect: Rect) -> bool {
        self.lines.iter().any(|line| rect.can_select_line(line))
    }

    fn user_info(&self) -> Option<Vec<u8>> {
        serde_json::to_vec(&self.closed).ok()
    }

    fn apply_user_info(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.closed = serde_json::from_slice(data).map_err(|e| {
            CodecError::CorruptPayload(format!("polygon closed flag: {e}"))
        })?;
        Ok(())
    }
}
