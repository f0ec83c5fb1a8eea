//! Recorded drawing commands for replay by a host toolkit.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{BezPath, Point, Rect, Shape as _, Size, Stroke};
use peniko::Color;
use shapeboard_core::render::{RenderSink, estimate_text_size};

/// One recorded drawing operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        stroke: Stroke,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f64,
        color: Color,
        size: Size,
    },
}

impl DrawCommand {
    /// Area touched by the command, ignoring stroke width.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => path.bounding_box(),
            DrawCommand::Text { origin, size, .. } => Rect::from_origin_size(*origin, *size),
        }
    }
}

/// Text metrics used while recording.
pub type TextMeasure = fn(&str, f64) -> Size;

/// A [`RenderSink`] that records commands instead of painting them.
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    measure: TextMeasure,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    /// Create an empty display list measuring text with a fixed-advance estimate.
    pub fn new() -> Self {
        Self::with_measure(estimate_text_size)
    }

    /// Create an empty display list measuring text with the host's font engine.
    pub fn with_measure(measure: TextMeasure) -> Self {
        Self {
            commands: Vec::new(),
            measure,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Union of the bounds of every command.
    pub fn bounds(&self) -> Option<Rect> {
        self.commands
            .iter()
            .map(DrawCommand::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Replay the recorded commands into another sink, in order.
    pub fn replay(&self, sink: &mut dyn RenderSink) {
        for command in &self.commands {
            match command {
                DrawCommand::Fill { path, color } => sink.fill_path(path, *color),
                DrawCommand::Stroke {
                    path,
                    stroke,
                    color,
                } => sink.stroke_path(path, stroke, *color),
                DrawCommand::Text {
                    text,
                    origin,
                    font_size,
                    color,
                    ..
                } => sink.draw_text(text, *origin, *font_size, *color),
            }
        }
    }
}

impl RenderSink for DisplayList {
    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        let size = self.measure_text(text, font_size);
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font_size,
            color,
            size,
        });
    }

    fn measure_text(&self, text: &str, font_size: f64) -> Size {
        (self.measure)(text, font_size)
    }
}

impl Renderer for DisplayList {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.clear();
        ctx.draw_into(self);
        log::trace!("Recorded {} draw commands", self.commands.len());
    }
}
