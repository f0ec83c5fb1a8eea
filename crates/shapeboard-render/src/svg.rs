//! SVG export.

use crate::renderer::{RenderContext, RenderMode, RenderResult, Renderer};
use kurbo::{BezPath, Point, Size, Stroke};
use peniko::Color;
use shapeboard_core::render::{RenderSink, estimate_text_size};
use std::io::Write;
use svg::Document;
use svg::node::element as svg_element;

const FONT_FAMILY: &str = "sans-serif";

/// Paint as an SVG color plus an opacity in `0..=1`.
fn paint(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    (
        format!("rgb({},{},{})", rgba.r, rgba.g, rgba.b),
        f64::from(rgba.a) / 255.0,
    )
}

/// A [`RenderSink`] that builds an SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    size: Size,
    nodes: Vec<Box<dyn svg::Node>>,
}

impl SvgRenderer {
    /// Create an empty renderer for a canvas of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            nodes: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of elements emitted so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The document holding every element emitted so far.
    pub fn document(&self) -> Document {
        let doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", self.size.width, self.size.height))
            .set("width", self.size.width)
            .set("height", self.size.height);
        self.nodes.iter().cloned().fold(doc, |doc, node| doc.add(node))
    }

    /// Write the document to `writer`.
    pub fn write_to(&self, writer: impl Write) -> RenderResult<()> {
        svg::write(writer, &self.document())?;
        log::debug!("Wrote SVG with {} elements", self.nodes.len());
        Ok(())
    }

    /// Render a snapshot of `canvas` as an SVG string.
    pub fn snapshot(canvas: &shapeboard_core::Canvas) -> String {
        let mut renderer = Self::new(canvas.current_size());
        renderer.build_scene(&RenderContext::new(canvas).with_mode(RenderMode::Snapshot));
        renderer.document().to_string()
    }
}

impl RenderSink for SvgRenderer {
    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let (fill, opacity) = paint(color);
        let node = svg_element::Path::new()
            .set("d", path.to_svg())
            .set("fill", fill)
            .set("fill-opacity", opacity)
            .set("stroke", "none");
        self.nodes.push(Box::new(node));
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        let (ink, opacity) = paint(color);
        let mut node = svg_element::Path::new()
            .set("d", path.to_svg())
            .set("fill", "none")
            .set("stroke", ink)
            .set("stroke-opacity", opacity)
            .set("stroke-width", stroke.width);
        if !stroke.dash_pattern.is_empty() {
            let dashes: Vec<String> = stroke.dash_pattern.iter().map(f64::to_string).collect();
            node = node
                .set("stroke-dasharray", dashes.join(" "))
                .set("stroke-dashoffset", stroke.dash_offset);
        }
        self.nodes.push(Box::new(node));
    }

    fn draw_text(&mut self, text: &str, origin: Point, font_size: f64, color: Color) {
        let (fill, opacity) = paint(color);
        let node = svg_element::Text::new(text)
            .set("x", origin.x)
            .set("y", origin.y)
            .set("dominant-baseline", "hanging")
            .set("font-family", FONT_FAMILY)
            .set("font-size", font_size)
            .set("fill", fill)
            .set("fill-opacity", opacity);
        self.nodes.push(Box::new(node));
    }

    fn measure_text(&self, text: &str, font_size: f64) -> Size {
        estimate_text_size(text, font_size)
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.nodes.clear();
        self.size = ctx.size();
        ctx.draw_into(self);
    }
}
