//! Identifier-driven encoding and decoding of committed shapes.
//!
//! Every shape is persisted as a flat [`ShapeRecord`] carrying its type
//! identifier. Decoding resolves that identifier through a [`ShapeRegistry`]
//! and rebuilds the kind-specific state from the shared fields plus the
//! optional opaque `userInfo` payload.

use crate::layout::Layout;
use crate::shapes::{
    CircleShape, Freehand, PointDescriptor, Polygon, Protractor, RectangleShape, Ruler,
    SerializableColor, Shape, ShapeKind, ShapeStyle,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Undefined shape identifier: {0}")]
    UndefinedIdentifier(i64),
    #[error("Cannot encode an unfinished shape")]
    UnfinishedShape,
    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted form of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    pub layout: Layout,
    pub rotation_angle: f64,
    pub rotation_anchor: PointDescriptor,
    pub stroke_color: SerializableColor,
    pub fill_color: SerializableColor,
    pub line_width: f64,
    pub identifier: i64,
    /// Base64 of the kind-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<String>,
}

impl ShapeRecord {
    /// Capture a committed shape. Unfinished shapes are rejected.
    pub fn from_shape(shape: &Shape) -> Result<Self, CodecError> {
        if !shape.is_finished() {
            return Err(CodecError::UnfinishedShape);
        }
        let style = shape.style();
        Ok(Self {
            layout: shape.layout().clone(),
            rotation_angle: shape.rotation_angle(),
            rotation_anchor: shape.rotation_anchor(),
            stroke_color: style.stroke_color,
            fill_color: style.fill_color,
            line_width: style.line_width,
            identifier: shape.identifier(),
            user_info: shape.user_info().map(|data| BASE64.encode(data)),
        })
    }
}

/// Encode shapes as a JSON array of records.
pub fn encode_shapes(shapes: &[Shape]) -> Result<Vec<u8>, CodecError> {
    let records = shapes
        .iter()
        .map(ShapeRecord::from_shape)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_vec(&records)?)
}

/// Constructor for the empty kind state behind an identifier.
pub type KindFactory = fn() -> ShapeKind;

/// Maps persisted type identifiers to shape kinds.
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    factories: BTreeMap<i64, KindFactory>,
}

impl Default for ShapeRegistry {
    /// Registry of the built-in kinds, identifiers 0 through 5.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(0, || ShapeKind::Ruler(Ruler::default()));
        registry.register(1, || ShapeKind::Rectangle(RectangleShape::default()));
        registry.register(2, || ShapeKind::Polygon(Polygon::default()));
        registry.register(3, || ShapeKind::Circle(CircleShape::default()));
        registry.register(4, || ShapeKind::Protractor(Protractor::default()));
        registry.register(5, || ShapeKind::Freehand(Freehand));
        registry
    }
}

impl ShapeRegistry {
    /// A registry that resolves nothing.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Bind `identifier` to `factory`, replacing any previous binding.
    pub fn register(&mut self, identifier: i64, factory: KindFactory) {
        self.factories.insert(identifier, factory);
    }

    pub fn unregister(&mut self, identifier: i64) {
        self.factories.remove(&identifier);
    }

    pub fn resolve(&self, identifier: i64) -> Result<ShapeKind, CodecError> {
        self.factories
            .get(&identifier)
            .map(|factory| factory())
            .ok_or(CodecError::UndefinedIdentifier(identifier))
    }

    /// Rebuild one committed shape from its record.
    pub fn decode_record(&self, record: ShapeRecord) -> Result<Shape, CodecError> {
        let kind = self.resolve(record.identifier)?;
        let user_info = record
            .user_info
            .as_deref()
            .map(|encoded| {
                BASE64
                    .decode(encoded)
                    .map_err(|e| CodecError::CorruptPayload(format!("userInfo: {e}")))
            })
            .transpose()?;
        let style = ShapeStyle {
            stroke_color: record.stroke_color,
            fill_color: record.fill_color,
            line_width: record.line_width,
        };
        Shape::restore(
            kind,
            record.layout,
            record.rotation_angle,
            record.rotation_anchor,
            style,
            user_info.as_deref(),
        )
    }

    /// Decode a JSON array of records.
    ///
    /// A malformed container fails as a whole. Individual records that fail
    /// to decode are dropped and logged.
    pub fn decode_shapes(&self, data: &[u8]) -> Result<Vec<Shape>, CodecError> {
        let values: Vec<serde_json::Value> = serde_json::from_slice(data)?;
        let total = values.len();
        let shapes: Vec<Shape> = values
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| {
                let decoded = serde_json::from_value::<ShapeRecord>(value)
                    .map_err(CodecError::from)
                    .and_then(|record| self.decode_record(record));
                match decoded {
                    Ok(shape) => Some(shape),
                    Err(e) => {
                        log::warn!("Dropping shape record {i}: {e}");
                        None
                    }
                }
            })
            .collect();
        log::debug!("Decoded {} of {} shape records", shapes.len(), total);
        Ok(shapes)
    }
}
