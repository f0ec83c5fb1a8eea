//! Shapeboard render library
//!
//! Backends for the canvas' [`RenderSink`](shapeboard_core::RenderSink):
//! a replayable display list for host toolkits and an SVG writer for export.

mod display_list;
mod renderer;
mod svg;

pub use display_list::{DisplayList, DrawCommand};
pub use renderer::{RenderContext, RenderMode, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
