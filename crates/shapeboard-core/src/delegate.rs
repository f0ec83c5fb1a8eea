//! Host collaborators notified and queried by the canvas.
//!
//! The canvas holds both collaborators through `Weak` handles, so a host
//! that owns the canvas can implement them without creating a cycle.

use crate::history::UndoAction;
use crate::layout::IndexPath;
use crate::shapes::{Shape, ShapeId};
use kurbo::Rect;

/// Notifications fired synchronously after each mutation completes.
///
/// Every method defaults to a no-op. Implementations must not call back
/// into the canvas mutators from a notification.
#[allow(unused_variables)]
pub trait CanvasDelegate {
    /// The first point of a new session was pushed.
    fn did_start_session(&self, shape: &Shape) {}

    /// The session shape can finish.
    fn will_finish_session(&self, shape: &Shape) {}

    /// The session shape could not finish and was discarded.
    fn did_cancel_session(&self, shape: &Shape) {}

    /// The session shape was committed to the collection.
    fn did_finish_session(&self, shape: &Shape) {}

    fn did_select(&self, ids: &[ShapeId]) {}

    fn did_deselect(&self, ids: &[ShapeId]) {}

    fn did_edit(&self, shape: &Shape, index: IndexPath) {}

    fn did_move(&self, shape: &Shape) {}

    fn did_rotate(&self, shape: &Shape) {}

    fn did_anchor(&self, shape: &Shape) {}

    /// A rubber-band selection ended with `ids` selected inside `rect`.
    fn did_select_in_rect(&self, ids: &[ShapeId], rect: Rect) {}
}

/// A context menu, as a list of entry titles the host turns into widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenu {
    pub items: Vec<String>,
}

impl ContextMenu {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Optional content pulled by the canvas.
#[allow(unused_variables)]
pub trait CanvasDataSource {
    /// Menu for a right click on empty canvas.
    fn menu(&self) -> Option<ContextMenu> {
        None
    }

    /// Menu for a right click on `shape`.
    fn item_menu(&self, shape: &Shape) -> Option<ContextMenu> {
        None
    }

    /// Label text drawn next to `shape` when descriptions are shown.
    fn description(&self, shape: &Shape) -> Option<String> {
        None
    }

    /// Undo menu title for `action` on `shapes`. The canvas falls back to
    /// [`UndoAction::default_name`].
    fn undo_action_name(&self, action: UndoAction, shapes: &[&Shape]) -> Option<String> {
        None
    }
}
