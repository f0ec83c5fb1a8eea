//! Renderer trait abstraction.

use kurbo::{Rect, Size};
use shapeboard_core::canvas::Canvas;
use shapeboard_core::render::RenderSink;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// What a frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Shapes plus handles, guides and the rubber band of the current gesture.
    #[default]
    Interactive,
    /// Shapes and labels only, for export.
    Snapshot,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Region to repaint, in canvas coordinates.
    pub dirty: Rect,
    pub mode: RenderMode,
}

impl<'a> RenderContext<'a> {
    /// Context repainting the whole canvas interactively.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            dirty: canvas.current_size().to_rect(),
            mode: RenderMode::Interactive,
        }
    }

    /// Limit the repaint to `dirty`.
    pub fn with_dirty(mut self, dirty: Rect) -> Self {
        self.dirty = dirty;
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn size(&self) -> Size {
        self.canvas.current_size()
    }

    /// Emit the frame into `sink`.
    pub fn draw_into(&self, sink: &mut dyn RenderSink) {
        match self.mode {
            RenderMode::Interactive => self.canvas.draw(sink, self.dirty),
            RenderMode::Snapshot => self.canvas.draw_snapshot(sink, self.dirty),
        }
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Rebuild the backend's output for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);
}
