//! Pointer input delivered to the canvas controller.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Pointer moved with the primary button held.
    Drag { position: Point, modifiers: Modifiers },
    Up { position: Point, modifiers: Modifiers },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Drag { position, .. }
            | PointerEvent::Up { position, .. } => position,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match *self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Drag { modifiers, .. }
            | PointerEvent::Up { modifiers, .. } => modifiers,
        }
    }
}

/// Phase of the primary button, tracked across events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseAction {
    #[default]
    Idle,
    Down,
    Drag,
}
