//! Shapeboard core library
//!
//! Geometry, shape model and the canvas controller of an interactive vector
//! shape editor. Rendering goes through the [`RenderSink`] trait so the
//! crate has no windowing or graphics dependency.

pub mod canvas;
pub mod codec;
pub mod config;
pub mod delegate;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layout;
pub mod loader;
pub mod render;
pub mod selection;
pub mod shapes;
pub mod snap;
pub mod storage;

pub use canvas::{Canvas, InteractionState};
pub use codec::{CodecError, ShapeRecord, ShapeRegistry};
pub use config::{Appearance, CanvasConfig, ItemScaling, PointStyle};
pub use delegate::{CanvasDataSource, CanvasDelegate, ContextMenu};
pub use history::{UndoAction, UndoCommand, UndoManager, UndoStack};
pub use input::{Modifiers, MouseAction, MouseButton, PointerEvent};
pub use layout::{IndexPath, Layout};
pub use loader::{SavedCanvas, ShapeLoader};
pub use render::RenderSink;
pub use shapes::{PointDescriptor, SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
