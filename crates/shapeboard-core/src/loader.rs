//! Saving and restoring whole canvases.

use crate::canvas::Canvas;
use crate::codec::{CodecError, ShapeRegistry, encode_shapes};
use crate::config::ItemScaling;
use crate::shapes::{Shape, ShapeId};
use base64::engine::general_purpose::STANDARD as BASE64;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Encoded shapes together with the canvas size they were encoded against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCanvas {
    pub size: Size,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl SavedCanvas {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

mod base64_bytes {
    use super::BASE64;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Encodes shapes and decodes them back at a new canvas size.
#[derive(Debug, Clone, Default)]
pub struct ShapeLoader {
    registry: ShapeRegistry,
    scaling: ItemScaling,
}

impl ShapeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader resolving identifiers through `registry`.
    pub fn with_registry(registry: ShapeRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Axes that drive rescaling on load.
    pub fn scaling(mut self, scaling: ItemScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ShapeRegistry {
        &mut self.registry
    }

    /// Encode `shapes` drawn on a canvas of `size`.
    pub fn save(&self, shapes: &[Shape], size: Size) -> Result<SavedCanvas, CodecError> {
        let data = encode_shapes(shapes)?;
        log::info!("Saved {} shape(s) at {}x{}", shapes.len(), size.width, size.height);
        Ok(SavedCanvas { size, data })
    }

    /// Decode `saved` and rescale it from its own size to `size`.
    ///
    /// Records with an unknown identifier are dropped. When either size has
    /// a zero dimension the shapes keep their saved coordinates.
    pub fn load(&self, saved: &SavedCanvas, size: Size) -> Result<Vec<Shape>, CodecError> {
        let mut shapes = self.registry.decode_shapes(&saved.data)?;
        if let Some((mx, my)) = self.scaling.multipliers(saved.size, size) {
            for shape in &mut shapes {
                shape.scale(mx, my);
            }
        }
        log::info!("Loaded {} shape(s) at {}x{}", shapes.len(), size.width, size.height);
        Ok(shapes)
    }
}

impl Canvas {
    /// Encode every committed shape against the current canvas size.
    pub fn save(&self, loader: &ShapeLoader) -> Result<SavedCanvas, CodecError> {
        loader.save(self.shapes(), self.current_size())
    }

    /// Replace the collection with the shapes of `saved`.
    ///
    /// The current collection is left untouched when decoding fails. Any
    /// gesture or drawing session in progress is dropped, and undo history
    /// is cleared since it refers to the replaced shapes.
    pub fn load(&mut self, saved: &SavedCanvas, loader: &ShapeLoader) -> Result<Vec<ShapeId>, CodecError> {
        let shapes = loader.load(saved, self.current_size())?;
        self.reset_interaction();
        self.remove_all();
        let ids = self.add_shapes(shapes);
        self.clear_undo_history();
        Ok(ids)
    }
}
