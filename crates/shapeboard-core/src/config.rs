//! Canvas controller settings.

use crate::shapes::{SerializableColor, ShapeStyle};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Which canvas axes drive shape rescaling when the canvas is resized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemScaling {
    None,
    #[default]
    Width,
    Height,
    Both,
}

impl ItemScaling {
    /// Per-axis scale factors taking `from` to `to`.
    ///
    /// `None` when either size has a zero dimension or scaling is off.
    /// Single-axis scaling applies that axis' ratio to both axes, keeping
    /// proportions.
    pub fn multipliers(self, from: Size, to: Size) -> Option<(f64, f64)> {
        let degenerate = |s: Size| s.width == 0.0 || s.height == 0.0;
        if degenerate(from) || degenerate(to) {
            return None;
        }
        let mx = to.width / from.width;
        let my = to.height / from.height;
        match self {
            ItemScaling::None => None,
            ItemScaling::Width => Some((mx, mx)),
            ItemScaling::Height => Some((my, my)),
            ItemScaling::Both => Some((mx, my)),
        }
    }
}

/// How layout points of selected shapes are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStyle {
    #[default]
    Circle,
    Square,
}

/// Colors and metrics of canvas adornments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub background: SerializableColor,
    pub selector_border: SerializableColor,
    pub selector_fill: SerializableColor,
    /// Handles under the pointer, magnet crosshairs.
    pub highlight: SerializableColor,
    pub label_border: SerializableColor,
    pub label_background: SerializableColor,
    pub label_corner_radius: f64,
    pub label_font_size: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background: SerializableColor::transparent(),
            selector_border: SerializableColor::new(170, 170, 170, 255),
            selector_fill: SerializableColor::new(128, 128, 128, 128),
            highlight: SerializableColor::new(0, 99, 225, 255),
            label_border: SerializableColor::black(),
            label_background: SerializableColor::new(255, 255, 255, 178),
            label_corner_radius: 5.0,
            label_font_size: 13.0,
        }
    }
}

/// Tunables of the canvas controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Pointer tolerance in pixels for every hit test.
    pub selection_range: f64,
    pub undo_enabled: bool,
    pub item_scaling: ItemScaling,
    /// Snap edited points to the horizontal or vertical of their neighbor.
    pub is_locked: bool,
    pub is_selectable: bool,
    pub rotation_enabled: bool,
    pub magnet_enabled: bool,
    pub shows_item_description: bool,
    pub draws_auxiliary_line: bool,
    pub point_style: PointStyle,
    /// Style given to every new drawing session.
    pub default_style: ShapeStyle,
    pub appearance: Appearance,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            selection_range: 5.0,
            undo_enabled: true,
            item_scaling: ItemScaling::Width,
            is_locked: false,
            is_selectable: true,
            rotation_enabled: false,
            magnet_enabled: false,
            shows_item_description: false,
            draws_auxiliary_line: true,
            point_style: PointStyle::Circle,
            default_style: ShapeStyle::default(),
            appearance: Appearance::default(),
        }
    }
}

impl CanvasConfig {
    /// Parse a config, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Radius of the rotation handle arc.
    pub fn rotator_radius(&self) -> f64 {
        self.selection_range * 2.5
    }
}
