//! Undo/redo history.
//!
//! Mutations register an [`UndoCommand`] describing how to revert them.
//! Performing a command registers its own freshly built inverse, so the same
//! linear stack serves both undo and redo: registrations made while an undo
//! is being replayed land on the redo side and vice versa.

use crate::layout::IndexPath;
use crate::shapes::{PointDescriptor, Shape, ShapeId};
use kurbo::{Size, Vec2};

/// Maximum number of undo entries kept by [`UndoManager::default`].
pub const MAX_UNDO_HISTORY: usize = 100;

/// User-facing kind of an undoable mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UndoAction {
    Add,
    Remove,
    Move,
    Edit,
    Anchor,
    Rotate,
}

impl UndoAction {
    pub fn verb(self) -> &'static str {
        match self {
            UndoAction::Add => "Add",
            UndoAction::Remove => "Remove",
            UndoAction::Move => "Move",
            UndoAction::Edit => "Edit",
            UndoAction::Anchor => "Anchor",
            UndoAction::Rotate => "Rotate",
        }
    }

    /// Verb followed by the affected kinds, e.g. `"Move Ruler, Circle"`.
    pub fn default_name<'a>(self, shapes: impl IntoIterator<Item = &'a Shape>) -> String {
        let kinds: Vec<&str> = shapes.into_iter().map(Shape::name).collect();
        if kinds.is_empty() {
            self.verb().to_string()
        } else {
            format!("{} {}", self.verb(), kinds.join(", "))
        }
    }
}

/// How to revert one mutation.
///
/// Offsets are recorded against `view_size`, the canvas size at the time of
/// registration, and rescaled to the canvas size current at replay.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoCommand {
    /// Revert an addition.
    RemoveShapes { ids: Vec<ShapeId> },
    /// Revert a removal. Each shape is paired with its former index.
    RestoreShapes {
        shapes: Vec<(usize, Shape)>,
        view_size: Size,
    },
    /// Translate shapes back by `offset`.
    MoveShapes {
        ids: Vec<ShapeId>,
        /// The shape that was dragged.
        target: ShapeId,
        offset: Vec2,
        view_size: Size,
    },
    /// Move one point back by `offset`.
    EditPoint {
        id: ShapeId,
        index: IndexPath,
        offset: Vec2,
        view_size: Size,
    },
    SetAnchor { id: ShapeId, anchor: PointDescriptor },
    /// Restore an absolute rotation angle.
    Rotate { id: ShapeId, angle: f64 },
}

impl UndoCommand {
    pub fn action(&self) -> UndoAction {
        match self {
            UndoCommand::RemoveShapes { .. } => UndoAction::Add,
            UndoCommand::RestoreShapes { .. } => UndoAction::Remove,
            UndoCommand::MoveShapes { .. } => UndoAction::Move,
            UndoCommand::EditPoint { .. } => UndoAction::Edit,
            UndoCommand::SetAnchor { .. } => UndoAction::Anchor,
            UndoCommand::Rotate { .. } => UndoAction::Rotate,
        }
    }
}

/// A registered command with its optional action name.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    pub command: UndoCommand,
    pub name: Option<String>,
}

impl UndoEntry {
    pub fn new(command: UndoCommand, name: Option<String>) -> Self {
        Self { command, name }
    }
}

/// What the stack is currently replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplayMode {
    #[default]
    Normal,
    Undoing,
    Redoing,
}

/// Host-provided linear undo stack.
pub trait UndoStack {
    /// Record an entry according to the current [`ReplayMode`].
    fn register(&mut self, entry: UndoEntry);

    /// Pop the next undo entry and enter [`ReplayMode::Undoing`].
    fn begin_undo(&mut self) -> Option<UndoEntry>;

    /// Pop the next redo entry and enter [`ReplayMode::Redoing`].
    fn begin_redo(&mut self) -> Option<UndoEntry>;

    /// Return to [`ReplayMode::Normal`].
    fn end_replay(&mut self);

    fn mode(&self) -> ReplayMode;

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    fn undo_action_name(&self) -> Option<&str>;

    fn redo_action_name(&self) -> Option<&str>;

    fn clear(&mut self);
}

/// In-memory [`UndoStack`] with a bounded undo side.
#[derive(Debug, Clone)]
pub struct UndoManager {
    undo_stack: Vec<UndoEntry>,
    redo_stack: Vec<UndoEntry>,
    mode: ReplayMode,
    limit: Option<usize>,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::with_limit(Some(MAX_UNDO_HISTORY))
    }
}

impl UndoManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` keeps every entry.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            mode: ReplayMode::Normal,
            limit,
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_undo(&mut self, entry: UndoEntry) {
        self.undo_stack.push(entry);
        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
    }
}

impl UndoStack for UndoManager {
    fn register(&mut self, entry: UndoEntry) {
        match self.mode {
            ReplayMode::Normal => {
                self.push_undo(entry);
                self.redo_stack.clear();
            }
            ReplayMode::Undoing => self.redo_stack.push(entry),
            ReplayMode::Redoing => self.push_undo(entry),
        }
    }

    fn begin_undo(&mut self) -> Option<UndoEntry> {
        if self.mode != ReplayMode::Normal {
            return None;
        }
        let entry = self.undo_stack.pop()?;
        self.mode = ReplayMode::Undoing;
        Some(entry)
    }

    fn begin_redo(&mut self) -> Option<UndoEntry> {
        if self.mode != ReplayMode::Normal {
            return None;
        }
        let entry = self.redo_stack.pop()?;
        self.mode = ReplayMode::Redoing;
        Some(entry)
    }

    fn end_replay(&mut self) {
        self.mode = ReplayMode::Normal;
    }

    fn mode(&self) -> ReplayMode {
        self.mode
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn undo_action_name(&self) -> Option<&str> {
        self.undo_stack.last()?.name.as_deref()
    }

    fn redo_action_name(&self) -> Option<&str> {
        self.redo_stack.last()?.name.as_deref()
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.mode = ReplayMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;
    use kurbo::Point;

    fn rotate(angle: f64) -> UndoEntry {
        UndoEntry::new(
            UndoCommand::Rotate {
                id: ShapeId::nil(),
                angle,
            },
            Some(format!("Rotate {angle}")),
        )
    }

    #[test]
    fn test_register_clears_redo() {
        let mut manager = UndoManager::new();
        manager.register(rotate(1.0));

        let entry = manager.begin_undo().unwrap();
        assert_eq!(manager.mode(), ReplayMode::Undoing);
        manager.register(rotate(2.0));
        manager.end_replay();
        assert_eq!(entry, rotate(1.0));
        assert!(manager.can_redo());
        assert!(!manager.can_undo());

        manager.register(rotate(3.0));
        assert!(!manager.can_redo());
        assert_eq!(manager.undo_action_name(), Some("Rotate 3"));
    }

    #[test]
    fn test_redo_registers_on_undo_side() {
        let mut manager = UndoManager::new();
        manager.register(rotate(1.0));
        manager.begin_undo();
        manager.register(rotate(2.0));
        manager.end_replay();

        let entry = manager.begin_redo().unwrap();
        assert_eq!(entry, rotate(2.0));
        manager.register(rotate(1.0));
        manager.end_replay();
        assert_eq!(manager.undo_len(), 1);
        assert_eq!(manager.redo_len(), 0);
    }

    #[test]
    fn test_nested_replay_is_refused() {
        let mut manager = UndoManager::new();
        manager.register(rotate(1.0));
        manager.register(rotate(2.0));
        assert!(manager.begin_undo().is_some());
        assert!(manager.begin_undo().is_none());
        manager.end_replay();
        assert!(manager.begin_undo().is_some());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut manager = UndoManager::with_limit(Some(2));
        for angle in [1.0, 2.0, 3.0] {
            manager.register(rotate(angle));
        }
        assert_eq!(manager.undo_len(), 2);
        assert_eq!(manager.begin_undo(), Some(rotate(3.0)));
        manager.end_replay();
        assert_eq!(manager.begin_undo(), Some(rotate(2.0)));
    }

    #[test]
    fn test_default_action_name() {
        let ruler = Shape::from_line(Line::new(Point::ZERO, Point::new(1.0, 0.0)));
        let mut circle = Shape::circle();
        for p in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)] {
            circle.push(Point::new(p.0, p.1));
        }
        assert_eq!(
            UndoAction::Move.default_name([&ruler, &circle]),
            "Move Ruler, Circle"
        );
        assert_eq!(UndoAction::Remove.default_name(Vec::<&Shape>::new()), "Remove");
    }
}
