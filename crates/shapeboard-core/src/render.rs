//! Render sink abstraction.
//!
//! The canvas never talks to a graphics toolkit directly. It emits filled and
//! stroked `kurbo` paths plus text runs into a [`RenderSink`], which a host
//! replays onto its own surface.

use kurbo::{BezPath, Point, Rect, Shape as _, Size, Stroke};
use peniko::Color;

/// Receiver for the drawing operations produced by the canvas.
pub trait RenderSink {
    /// Fill the interior of `path`.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke the outline of `path`.
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color);

    /// Size of `text` once laid out at `font_size`.
    fn measure_text(&self, text: &str, font_size: f64) -> Size;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_path(&rect.to_path(0.1), color);
    }
}

/// Rough text metrics for sinks without a font engine.
///
/// Uses an average glyph width of 0.6em and a line height of 1.2em.
pub fn estimate_text_size(text: &str, font_size: f64) -> Size {
    let chars = text.chars().count() as f64;
    Size::new(chars * font_size * 0.6, font_size * 1.2)
}
