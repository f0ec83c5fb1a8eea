//! Rendering of shapes and interaction adornments.

use super::hit_test::label_point;
use super::{Canvas, InteractionState};
use crate::config::PointStyle;
use crate::geometry::{Circle, Line, PointExt};
use crate::input::MouseAction;
use crate::layout::IndexPath;
use crate::selection::{self, ROTATOR_ARROW_HEAD};
use crate::shapes::path::{add_arc, add_arrow, add_circle, add_crosshair, add_line, add_lines, add_square};
use crate::shapes::{SerializableColor, Shape, ShapeId};
use crate::render::RenderSink;
use kurbo::{BezPath, Point, Rect, RoundedRect, Shape as _, Size, Stroke};
use peniko::Color;
use std::f64::consts::{FRAC_PI_2, PI};

const MAGNET_CROSSHAIR_LENGTH: f64 = 13.0;
const MAGNET_CROSSHAIR_WIDTH: f64 = 2.0;

fn color(c: SerializableColor) -> Color {
    c.into()
}

impl Canvas {
    /// Draw shapes and the adornments of the current interaction.
    ///
    /// Only the background fill is clipped to `dirty`; shapes are emitted
    /// whole and the sink decides what to cull.
    pub fn draw(&self, sink: &mut dyn RenderSink, dirty: Rect) {
        sink.fill_rect(dirty, color(self.config.appearance.background));

        let ordered = self.draw_order();
        for shape in &ordered {
            shape.draw(sink);
        }
        if let Some(shape) = self.shape_in_session() {
            shape.draw(sink);
        }

        match &self.state {
            InteractionState::MovingItem { .. } => {}
            InteractionState::Drawing(shape) => {
                if self.mouse_action == MouseAction::Drag
                    && self.config.draws_auxiliary_line
                    && shape.supports_aux_tool()
                {
                    if let Some(index) = shape.end_index_path() {
                        draw_aux_tool(sink, shape, index, false);
                    }
                }
                if self.config.magnet_enabled {
                    self.draw_magnets(sink, shape.id());
                }
            }
            InteractionState::MovingPoint { id, index, .. } => {
                if let Some(shape) = self.shape(*id) {
                    if self.config.draws_auxiliary_line && shape.supports_aux_tool() {
                        draw_aux_tool(sink, shape, *index, true);
                    }
                }
                if self.config.magnet_enabled {
                    self.draw_magnets(sink, *id);
                }
            }
            _ => self.draw_selection(sink),
        }

        if self.config.shows_item_description {
            let single = self.single_selection().map(Shape::id);
            let highlighted = matches!(
                self.state,
                InteractionState::OnDescription { .. } | InteractionState::MovingDescription { .. }
            );
            for shape in &ordered {
                let marked = single == Some(shape.id());
                self.draw_label(sink, shape, marked, marked && highlighted);
            }
            if let Some(shape) = self.shape_in_session().filter(|s| s.can_finish()) {
                self.draw_label(sink, shape, false, false);
            }
        }

        if let InteractionState::Selecting(selector) = &self.state {
            let appearance = &self.config.appearance;
            let path = selector.abs().to_path(0.1);
            sink.fill_path(&path, color(appearance.selector_fill));
            sink.stroke_path(&path, &Stroke::new(1.0), color(appearance.selector_border));
        }
    }

    /// Draw shapes and, if enabled, their labels without any adornment.
    pub fn draw_snapshot(&self, sink: &mut dyn RenderSink, dirty: Rect) {
        sink.fill_rect(dirty, color(self.config.appearance.background));
        let session = self.shape_in_session().filter(|s| s.can_finish());
        for shape in self.draw_order().into_iter().chain(session) {
            shape.draw(sink);
            if self.config.shows_item_description {
                self.draw_label(sink, shape, false, false);
            }
        }
    }

    /// Unselected shapes, then selected shapes, each back to front.
    fn draw_order(&self) -> Vec<&Shape> {
        let (selected, mut ordered): (Vec<&Shape>, Vec<&Shape>) =
            self.shapes.iter().partition(|s| s.is_selected());
        ordered.extend(selected);
        ordered
    }

    /// Crosshairs on every magnet other shapes offer to `editing`.
    fn draw_magnets(&self, sink: &mut dyn RenderSink, editing: ShapeId) {
        let mut path = BezPath::new();
        for shape in self.shapes.iter().filter(|s| s.id() != editing) {
            let Some(magnets) = shape.as_magnetizable() else {
                continue;
            };
            for point in magnets.magnets().into_iter().filter_map(|m| magnets.resolve(m)) {
                add_crosshair(&mut path, point, MAGNET_CROSSHAIR_LENGTH, 0.0);
            }
        }
        if !path.elements().is_empty() {
            sink.stroke_path(
                &path,
                &Stroke::new(MAGNET_CROSSHAIR_WIDTH),
                color(self.config.appearance.highlight),
            );
        }
    }

    fn draw_selection(&self, sink: &mut dyn RenderSink) {
        let single = self.single_selection().is_some();
        let hide_anchor = single && self.config.rotation_enabled;
        for shape in self.draw_order().into_iter().filter(|s| s.is_selected()) {
            if shape.push_continuously() {
                self.draw_bounding_box(sink, shape);
            } else {
                let marked = match self.state {
                    InteractionState::OnPoint { id, index, .. } if id == shape.id() => Some(index),
                    _ => None,
                };
                for handle in selection::point_handles(shape, hide_anchor) {
                    let highlighted = matches!(handle.kind, selection::HandleKind::Point(index) if Some(index) == marked);
                    self.draw_point(sink, handle.position, shape.rotation_angle(), highlighted);
                }
            }

            if hide_anchor {
                let (anchor, rotator) = match self.state {
                    InteractionState::OnRotator { .. } | InteractionState::MovingRotator { .. } => (false, true),
                    InteractionState::OnAnchor { .. } | InteractionState::MovingAnchor { .. } => (true, false),
                    _ => (false, false),
                };
                self.draw_anchor(sink, shape, anchor);
                self.draw_rotator(sink, shape, rotator);
            }
        }
    }

    /// One point handle, a circle or a square depending on the point style.
    fn draw_point(&self, sink: &mut dyn RenderSink, point: Point, rotation: f64, highlighted: bool) {
        let len = self.config.selection_range;
        let mut path = BezPath::new();
        match self.config.point_style {
            PointStyle::Circle => add_circle(&mut path, &Circle::new(point, len)),
            PointStyle::Square => add_square(&mut path, point, len, rotation),
        }
        let fill = if highlighted {
            self.config.appearance.highlight
        } else {
            SerializableColor::white()
        };
        sink.fill_path(&path, color(fill));
        sink.stroke_path(&path, &Stroke::new(1.0), color(SerializableColor::black()));
    }

    /// Dashed rounded box around shapes without point handles.
    fn draw_bounding_box(&self, sink: &mut dyn RenderSink, shape: &Shape) {
        let Some(body) = shape.body_path() else {
            return;
        };
        let range = self.config.selection_range;
        let bounds = body.bounding_box().inflate(range, range);
        let origin = Point::new(bounds.x0.round() + 0.5, bounds.y0.round() + 0.5);
        let size = Size::new(bounds.width().round(), bounds.height().round());
        let rect = Rect::from_origin_size(origin, size);
        let path = RoundedRect::from_rect(rect, range).to_path(0.1);
        let stroke = Stroke::new(1.0).with_dashes(2.0, [2.0, 2.0]);
        sink.stroke_path(&path, &stroke, color(self.config.appearance.highlight));
    }

    fn draw_anchor(&self, sink: &mut dyn RenderSink, shape: &Shape, highlighted: bool) {
        let Some(center) = shape.rotation_center() else {
            return;
        };
        self.draw_point(sink, center, shape.rotation_angle(), highlighted);
        let mut path = BezPath::new();
        add_crosshair(&mut path, center, self.config.selection_range, shape.rotation_angle());
        sink.stroke_path(&path, &Stroke::new(1.0), color(SerializableColor::black()));
    }

    /// Quarter-turn arc with an arrow head at each end.
    fn draw_rotator(&self, sink: &mut dyn RenderSink, shape: &Shape, highlighted: bool) {
        let Some(center) = shape.rotation_center() else {
            return;
        };
        let rotation = shape.rotation_angle();
        let arc = selection::rotator_arc(center, rotation, self.config.rotator_radius());
        let ink = if highlighted {
            color(self.config.appearance.highlight)
        } else {
            color(SerializableColor::black())
        };

        let mut path = BezPath::new();
        add_arc(&mut path, &arc);
        sink.stroke_path(&path, &Stroke::new(1.0), ink);

        let mut heads = BezPath::new();
        add_arrow(&mut heads, 0.0, ROTATOR_ARROW_HEAD, rotation + PI / 1.4, arc.end_point());
        add_arrow(&mut heads, 0.0, ROTATOR_ARROW_HEAD, rotation - PI / 1.4, arc.start_point());
        sink.fill_path(&heads, ink);
    }

    /// Label bubble of `shape`, kept inside the canvas bounds.
    fn draw_label(&self, sink: &mut dyn RenderSink, shape: &Shape, draws_point: bool, highlighted: bool) {
        let Some(text) = self.data_source().and_then(|source| source.description(shape)) else {
            return;
        };
        let Some(origin) = label_point(shape, self.label_offset(shape.id())) else {
            return;
        };
        let appearance = &self.config.appearance;
        let margin = self.config.selection_range;

        if draws_point {
            self.draw_point(sink, origin, 0.0, highlighted);
            let mut dot = BezPath::new();
            add_circle(&mut dot, &Circle::new(origin, margin / 2.0));
            sink.fill_path(&dot, color(SerializableColor::black()));
        }

        let text_size = sink.measure_text(&text, appearance.label_font_size);
        let bubble = label_rect(origin, text_size, margin, self.current_size);
        let path = RoundedRect::from_rect(bubble, appearance.label_corner_radius).to_path(0.1);
        sink.fill_path(&path, color(appearance.label_background));
        sink.stroke_path(&path, &Stroke::new(1.0), color(appearance.label_border));
        sink.draw_text(
            &text,
            Point::new(bubble.x0 + margin, bubble.y0 + margin),
            appearance.label_font_size,
            color(appearance.label_border),
        );
    }
}

/// Bubble around a label of `text_size` attached at `point`.
///
/// The bubble sits below and to the right of the point, and flips to the
/// other side of an axis when it would leave `bounds` there.
fn label_rect(point: Point, text_size: Size, margin: f64, bounds: Size) -> Rect {
    let origin = Point::new(point.x + margin * 2.0, point.y + margin * 2.0);
    let rect = Rect::from_origin_size(origin, text_size).inflate(margin, margin);
    let x = fit_axis(rect.x0, rect.x1, point.x, text_size.width, margin, bounds.width);
    let y = fit_axis(rect.y0, rect.y1, point.y, text_size.height, margin, bounds.height);
    Rect::from_origin_size(Point::new(x, y), rect.size())
}

fn fit_axis(min: f64, max: f64, anchor: f64, extent: f64, margin: f64, bound: f64) -> f64 {
    let limit = bound - margin;
    if max > limit {
        (anchor - (extent + margin * 3.0)).min(limit - extent)
    } else if min < margin {
        margin
    } else {
        min
    }
}

/// Guides through the point at `index` and its neighbor, perpendicular to
/// the segment joining them, plus that segment when `connected`.
fn draw_aux_tool(sink: &mut dyn RenderSink, shape: &Shape, index: IndexPath, connected: bool) {
    let Some(section) = shape.layout().section(index.section) else {
        return;
    };
    if section.len() < 2 {
        return;
    }
    let neighbor = if index.item == 0 { 1 } else { index.item - 1 };
    let (Some(&p1), Some(&p2)) = (section.get(index.item), section.get(neighbor)) else {
        return;
    };
    let line = Line::new(p1, p2);
    let half = line.distance() / 2.0;
    let angle = line.angle();

    let mut path = BezPath::new();
    if connected {
        add_line(&mut path, &line);
    }
    for point in [p1, p2] {
        add_lines(
            &mut path,
            &[
                point.extended(half, angle + FRAC_PI_2),
                point.extended(half, angle - FRAC_PI_2),
            ],
        );
    }
    let style = shape.style();
    let dv = style.line_width * 2.0;
    let stroke = Stroke::new(style.line_width).with_dashes(dv, [dv, dv]);
    sink.stroke_path(&path, &stroke, style.stroke());
}
