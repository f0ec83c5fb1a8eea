//! The canvas controller.
//!
//! [`Canvas`] owns the shape collection (back to front), the selection flags
//! of those shapes, the shape under construction and the pointer-driven
//! [`InteractionState`]. Every mutation registers its inverse on the undo
//! stack and notifies the delegate once it has completed.

mod draw;
mod events;
mod undo;

use crate::config::{Appearance, CanvasConfig, ItemScaling, PointStyle};
use crate::delegate::{CanvasDataSource, CanvasDelegate};
use crate::history::{UndoCommand, UndoManager, UndoStack};
use crate::input::{Modifiers, MouseAction};
use crate::layout::IndexPath;
use crate::shapes::{PointDescriptor, Shape, ShapeId, ShapeKind, ShapeStyle};
use kurbo::{Point, Rect, Size};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

/// What the pointer is currently doing.
///
/// `On*` states are entered on pointer down; the first drag turns them into
/// the matching `Moving*` state. Releasing the pointer returns to `Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Rubber band anchored at `(x0, y0)`, possibly with a negative extent.
    Selecting(Rect),
    /// A shape under construction, owned here until it is committed.
    Drawing(Box<Shape>),
    OnDescription {
        id: ShapeId,
        origin: Point,
    },
    MovingDescription {
        id: ShapeId,
        origin: Point,
    },
    /// `anchor` is the rotation anchor before the gesture.
    OnAnchor {
        id: ShapeId,
        anchor: PointDescriptor,
    },
    MovingAnchor {
        id: ShapeId,
        anchor: PointDescriptor,
    },
    /// `angle` is the rotation before the gesture, `last` the previous
    /// pointer location.
    OnRotator {
        id: ShapeId,
        angle: f64,
        last: Point,
    },
    MovingRotator {
        id: ShapeId,
        angle: f64,
        last: Point,
    },
    OnItem {
        id: ShapeId,
        last: Point,
        start: Point,
    },
    MovingItem {
        id: ShapeId,
        last: Point,
        start: Point,
    },
    /// `initial` is the point's position before the gesture.
    OnPoint {
        id: ShapeId,
        index: IndexPath,
        initial: Point,
    },
    MovingPoint {
        id: ShapeId,
        index: IndexPath,
        initial: Point,
    },
}

/// Interactive shape editing surface.
pub struct Canvas {
    config: CanvasConfig,
    shapes: Vec<Shape>,
    state: InteractionState,
    mouse_action: MouseAction,
    modifiers: Modifiers,
    current_size: Size,
    label_offsets: HashMap<ShapeId, PointDescriptor>,
    undo_stack: Box<dyn UndoStack>,
    delegate: Option<Weak<dyn CanvasDelegate>>,
    data_source: Option<Weak<dyn CanvasDataSource>>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    /// Create an empty canvas backed by an [`UndoManager`].
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_undo_stack(config, Box::new(UndoManager::default()))
    }

    /// Create an empty canvas registering undo entries on a host stack.
    pub fn with_undo_stack(config: CanvasConfig, undo_stack: Box<dyn UndoStack>) -> Self {
        Self {
            config,
            shapes: Vec::new(),
            state: InteractionState::Idle,
            mouse_action: MouseAction::Idle,
            modifiers: Modifiers::NONE,
            current_size: Size::ZERO,
            label_offsets: HashMap::new(),
            undo_stack,
            delegate: None,
            data_source: None,
        }
    }

    // Collaborators

    /// Observe the canvas. Only a weak handle is kept.
    pub fn set_delegate<D: CanvasDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        let weak: Weak<dyn CanvasDelegate> = weak;
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// Provide menus, labels and undo names. Only a weak handle is kept.
    pub fn set_data_source<S: CanvasDataSource + 'static>(&mut self, data_source: &Rc<S>) {
        let weak: Weak<S> = Rc::downgrade(data_source);
        let weak: Weak<dyn CanvasDataSource> = weak;
        self.data_source = Some(weak);
    }

    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    fn delegate(&self) -> Option<Rc<dyn CanvasDelegate>> {
        self.delegate.as_ref()?.upgrade()
    }

    fn data_source(&self) -> Option<Rc<dyn CanvasDataSource>> {
        self.data_source.as_ref()?.upgrade()
    }

    // Accessors

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mouse_action(&self) -> MouseAction {
        self.mouse_action
    }

    /// Committed shapes, back to front.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Mutable access for restyling. Geometry edits made here bypass undo.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// The canvas size shapes are currently laid out for.
    pub fn current_size(&self) -> Size {
        self.current_size
    }

    /// Selected shapes, back to front.
    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().filter(|s| s.is_selected())
    }

    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.selected_shapes().map(Shape::id).collect()
    }

    pub fn selection_indexes(&self) -> Vec<usize> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    /// The selected shape, if exactly one is selected.
    pub fn single_selection(&self) -> Option<&Shape> {
        let mut selected = self.selected_shapes();
        let first = selected.next()?;
        selected.next().is_none().then_some(first)
    }

    /// The only shape on the canvas, if there is exactly one.
    pub fn single_shape(&self) -> Option<&Shape> {
        match self.shapes.as_slice() {
            [shape] => Some(shape),
            _ => None,
        }
    }

    /// The shape under construction.
    pub fn shape_in_session(&self) -> Option<&Shape> {
        match &self.state {
            InteractionState::Drawing(shape) => Some(shape.as_ref()),
            _ => None,
        }
    }

    /// Where the label of `id` is attached, if it was moved.
    pub fn label_offset(&self, id: ShapeId) -> Option<PointDescriptor> {
        self.label_offsets.get(&id).copied()
    }

    // Flags

    pub fn is_selectable(&self) -> bool {
        self.config.is_selectable
    }

    /// Turning selection off clears the current selection.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.config.is_selectable = selectable;
        self.deselect_all();
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.config.rotation_enabled = enabled;
    }

    pub fn set_magnet_enabled(&mut self, enabled: bool) {
        self.config.magnet_enabled = enabled;
    }

    pub fn set_shows_item_description(&mut self, shows: bool) {
        self.config.shows_item_description = shows;
    }

    pub fn set_draws_auxiliary_line(&mut self, draws: bool) {
        self.config.draws_auxiliary_line = draws;
    }

    pub fn set_undo_enabled(&mut self, enabled: bool) {
        self.config.undo_enabled = enabled;
    }

    pub fn set_item_scaling(&mut self, scaling: ItemScaling) {
        self.config.item_scaling = scaling;
    }

    pub fn set_point_style(&mut self, style: PointStyle) {
        self.config.point_style = style;
    }

    pub fn set_selection_range(&mut self, range: f64) {
        self.config.selection_range = range;
    }

    /// Style applied to shapes created by later sessions.
    pub fn set_default_style(&mut self, style: ShapeStyle) {
        self.config.default_style = style;
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.config.appearance = appearance;
    }

    pub fn is_locked(&self) -> bool {
        self.config.is_locked
    }

    /// Snap edited points to the axes of their neighbors.
    pub fn lock(&mut self) {
        self.config.is_locked = true;
    }

    pub fn unlock(&mut self) {
        self.config.is_locked = false;
    }

    /// Axis locking applies while locked or while shift is held.
    fn axis_locked(&self) -> bool {
        self.config.is_locked || self.modifiers.shift
    }

    // Sessions

    /// Start drawing a new shape of `kind`.
    ///
    /// Finishes any current session and clears the selection first. The new
    /// shape takes the configured default style.
    pub fn start_session(&mut self, kind: ShapeKind) -> ShapeId {
        self.finish_session();
        self.deselect_all();
        let mut shape = Shape::new(kind);
        shape.set_style(self.config.default_style);
        let id = shape.id();
        log::debug!("Started {} session {id}", shape.name());
        self.state = InteractionState::Drawing(Box::new(shape));
        id
    }

    /// Commit the shape under construction, or discard it if it cannot
    /// finish. Returns its id, or `None` when no session was active.
    pub fn finish_session(&mut self) -> Option<ShapeId> {
        let mut shape = match std::mem::take(&mut self.state) {
            InteractionState::Drawing(shape) => *shape,
            other => {
                self.state = other;
                return None;
            }
        };
        let id = shape.id();
        let delegate = self.delegate();
        shape.mark_as_finished();
        if shape.is_finished() {
            log::debug!("Finished {} session {id}", shape.name());
            self.add_shapes(vec![shape]);
            if let (Some(delegate), Some(shape)) = (delegate, self.shape(id)) {
                delegate.did_finish_session(shape);
            }
        } else {
            log::debug!("Cancelled {} session {id}", shape.name());
            if let Some(delegate) = delegate {
                delegate.did_cancel_session(&shape);
            }
        }
        Some(id)
    }

    /// Drop any gesture or session in progress without committing it.
    pub(crate) fn reset_interaction(&mut self) {
        if !matches!(self.state, InteractionState::Idle) {
            log::debug!("Reset interaction state");
        }
        self.state = InteractionState::Idle;
    }

    // Collection

    /// Append shapes to the front of the canvas.
    ///
    /// Each shape is marked as finished first; shapes that cannot finish are
    /// dropped. Returns the ids of the shapes added.
    pub fn add_shapes(&mut self, shapes: Vec<Shape>) -> Vec<ShapeId> {
        let mut added = Vec::new();
        for mut shape in shapes {
            shape.mark_as_finished();
            if !shape.is_finished() {
                log::warn!("Dropped unfinished {} {}", shape.name(), shape.id());
                continue;
            }
            shape.set_selected(false);
            added.push(shape.id());
            self.shapes.push(shape);
        }
        if !added.is_empty() {
            self.register_undo(UndoCommand::RemoveShapes { ids: added.clone() });
        }
        added
    }

    /// Remove the shapes with the given ids, returning them back to front.
    pub fn remove_shapes(&mut self, ids: &[ShapeId]) -> Vec<Shape> {
        let wanted: HashSet<ShapeId> = ids.iter().copied().collect();
        let doomed: Vec<ShapeId> = self
            .shapes
            .iter()
            .map(Shape::id)
            .filter(|id| wanted.contains(id))
            .collect();
        if doomed.is_empty() {
            return Vec::new();
        }
        self.deselect_shapes(&doomed);

        let mut removed = Vec::with_capacity(doomed.len());
        let mut kept = Vec::with_capacity(self.shapes.len() - doomed.len());
        for (index, shape) in std::mem::take(&mut self.shapes).into_iter().enumerate() {
            if wanted.contains(&shape.id()) {
                self.label_offsets.remove(&shape.id());
                removed.push((index, shape));
            } else {
                kept.push(shape);
            }
        }
        self.shapes = kept;
        log::debug!("Removed {} shape(s)", removed.len());

        self.register_undo(UndoCommand::RestoreShapes {
            shapes: removed.clone(),
            view_size: self.current_size,
        });
        removed.into_iter().map(|(_, shape)| shape).collect()
    }

    /// Remove the shapes at `indexes`. Out of range indexes are ignored.
    pub fn remove_at(&mut self, indexes: &[usize]) -> Vec<Shape> {
        let ids: Vec<ShapeId> = indexes
            .iter()
            .filter_map(|&i| self.shapes.get(i).map(Shape::id))
            .collect();
        self.remove_shapes(&ids)
    }

    /// Remove the `k` backmost shapes.
    pub fn remove_first(&mut self, k: usize) -> Vec<Shape> {
        let ids: Vec<ShapeId> = self.shapes.iter().take(k).map(Shape::id).collect();
        self.remove_shapes(&ids)
    }

    /// Remove the `k` frontmost shapes.
    pub fn remove_last(&mut self, k: usize) -> Vec<Shape> {
        let skip = self.shapes.len().saturating_sub(k);
        let ids: Vec<ShapeId> = self.shapes.iter().skip(skip).map(Shape::id).collect();
        self.remove_shapes(&ids)
    }

    pub fn remove_selected(&mut self) -> Vec<Shape> {
        let ids = self.selected_ids();
        self.remove_shapes(&ids)
    }

    pub fn remove_all(&mut self) -> Vec<Shape> {
        let ids: Vec<ShapeId> = self.shapes.iter().map(Shape::id).collect();
        self.remove_shapes(&ids)
    }

    // Selection

    /// Replace (or with `extend`, grow) the selection, notifying the
    /// delegate of shapes leaving and then entering it.
    fn apply_selection(&mut self, selection: &[ShapeId], extend: bool) {
        let target: HashSet<ShapeId> = if extend {
            self.selected_ids()
                .into_iter()
                .chain(selection.iter().copied())
                .collect()
        } else {
            selection.iter().copied().collect()
        };

        let mut deselected = Vec::new();
        let mut selected = Vec::new();
        for shape in &mut self.shapes {
            let wanted = target.contains(&shape.id());
            if shape.is_selected() && !wanted {
                shape.set_selected(false);
                deselected.push(shape.id());
            } else if !shape.is_selected() && wanted {
                shape.set_selected(true);
                selected.push(shape.id());
            }
        }

        let Some(delegate) = self.delegate() else {
            return;
        };
        if !deselected.is_empty() {
            delegate.did_deselect(&deselected);
        }
        if !selected.is_empty() {
            delegate.did_select(&selected);
        }
    }

    /// Select shapes by id. Unknown ids are ignored.
    pub fn select_shapes(&mut self, ids: &[ShapeId], extend: bool) {
        self.apply_selection(ids, extend);
    }

    /// Select shapes by collection index. Out of range indexes are ignored.
    pub fn select_at(&mut self, indexes: &[usize], extend: bool) {
        let ids: Vec<ShapeId> = indexes
            .iter()
            .filter_map(|&i| self.shapes.get(i).map(Shape::id))
            .collect();
        self.apply_selection(&ids, extend);
    }

    /// Select exactly the shapes `rect` can pick up.
    pub fn select_in_rect(&mut self, rect: Rect) {
        let ids: Vec<ShapeId> = self
            .shapes
            .iter()
            .filter(|s| s.select_test(rect))
            .map(Shape::id)
            .collect();
        self.apply_selection(&ids, false);
    }

    pub fn select_all(&mut self) {
        let ids: Vec<ShapeId> = self.shapes.iter().map(Shape::id).collect();
        self.apply_selection(&ids, false);
    }

    pub fn deselect_shapes(&mut self, ids: &[ShapeId]) {
        let keep: Vec<ShapeId> = self
            .selected_shapes()
            .map(Shape::id)
            .filter(|id| !ids.contains(id))
            .collect();
        self.apply_selection(&keep, false);
    }

    pub fn deselect_all(&mut self) {
        self.apply_selection(&[], false);
    }

    // Resizing

    /// Record a new canvas size, rescaling every shape from the previous one
    /// according to [`ItemScaling`].
    pub fn resize(&mut self, size: Size) {
        if let Some((mx, my)) = self
            .config
            .item_scaling
            .multipliers(self.current_size, size)
        {
            log::debug!("Rescaling {} shape(s) by ({mx}, {my})", self.shapes.len());
            for shape in &mut self.shapes {
                shape.scale(mx, my);
            }
        }
        self.current_size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;
    use crate::history::UndoAction;
    use crate::shapes::Ruler;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.events.borrow_mut())
        }
    }

    impl CanvasDelegate for Recorder {
        fn did_finish_session(&self, shape: &Shape) {
            self.events.borrow_mut().push(format!("finish {}", shape.name()));
        }

        fn did_cancel_session(&self, shape: &Shape) {
            self.events.borrow_mut().push(format!("cancel {}", shape.name()));
        }

        fn did_select(&self, ids: &[ShapeId]) {
            self.events.borrow_mut().push(format!("select {}", ids.len()));
        }

        fn did_deselect(&self, ids: &[ShapeId]) {
            self.events.borrow_mut().push(format!("deselect {}", ids.len()));
        }
    }

    fn ruler(x: f64) -> Shape {
        Shape::from_line(Line::new(Point::new(x, 0.0), Point::new(x + 10.0, 0.0)))
    }

    fn canvas_with(count: usize) -> (Canvas, Vec<ShapeId>) {
        let mut canvas = Canvas::default();
        let ids = canvas.add_shapes((0..count).map(|i| ruler(i as f64 * 20.0)).collect());
        (canvas, ids)
    }

    #[test]
    fn test_add_shapes_drops_unfinished() {
        let mut canvas = Canvas::default();
        let mut partial = Shape::ruler();
        partial.push(Point::ZERO);
        let added = canvas.add_shapes(vec![ruler(0.0), partial]);
        assert_eq!(added.len(), 1);
        assert_eq!(canvas.len(), 1);
        assert_eq!(canvas.undo_action_name().as_deref(), Some("Add Ruler"));
    }

    #[test]
    fn test_session_finishes_into_collection() {
        let recorder = Rc::new(Recorder::default());
        let mut canvas = Canvas::default();
        canvas.set_delegate(&recorder);

        let id = canvas.start_session(ShapeKind::Ruler(Ruler::default()));
        assert!(canvas.shape_in_session().is_some());
        assert_eq!(canvas.finish_session(), Some(id));
        assert_eq!(recorder.take(), vec!["cancel Ruler"]);
        assert!(canvas.is_empty());

        canvas.start_session(ShapeKind::Ruler(Ruler::default()));
        if let InteractionState::Drawing(shape) = &mut canvas.state {
            shape.push(Point::ZERO);
            shape.push(Point::new(5.0, 0.0));
        }
        canvas.finish_session();
        assert_eq!(recorder.take(), vec!["finish Ruler"]);
        assert_eq!(canvas.len(), 1);
        assert_eq!(canvas.finish_session(), None);
    }

    #[test]
    fn test_session_uses_default_style() {
        let mut canvas = Canvas::default();
        let mut style = ShapeStyle::default();
        style.line_width = 4.0;
        canvas.set_default_style(style);
        canvas.start_session(ShapeKind::Ruler(Ruler::default()));
        assert_eq!(canvas.shape_in_session().unwrap().style().line_width, 4.0);
    }

    #[test]
    fn test_selection_notifies_changes_only() {
        let recorder = Rc::new(Recorder::default());
        let (mut canvas, ids) = canvas_with(3);
        canvas.set_delegate(&recorder);

        canvas.select_shapes(&ids[..2], false);
        assert_eq!(recorder.take(), vec!["select 2"]);
        canvas.select_shapes(&ids[1..], false);
        assert_eq!(recorder.take(), vec!["deselect 1", "select 1"]);
        canvas.select_shapes(&ids[..1], true);
        assert_eq!(canvas.selection_indexes(), vec![0, 1, 2]);
        canvas.deselect_shapes(&[ids[1]]);
        assert_eq!(canvas.selection_indexes(), vec![0, 2]);
        recorder.take();
        canvas.deselect_all();
        assert_eq!(recorder.take(), vec!["deselect 2"]);
    }

    #[test]
    fn test_single_selection() {
        let (mut canvas, ids) = canvas_with(2);
        assert!(canvas.single_selection().is_none());
        assert!(canvas.single_shape().is_none());
        canvas.select_at(&[1, 9], false);
        assert_eq!(canvas.single_selection().map(Shape::id), Some(ids[1]));
        canvas.select_all();
        assert!(canvas.single_selection().is_none());
    }

    #[test]
    fn test_select_in_rect() {
        let (mut canvas, ids) = canvas_with(3);
        canvas.select_in_rect(Rect::new(15.0, -5.0, 35.0, 5.0));
        assert_eq!(canvas.selected_ids(), vec![ids[1]]);
    }

    #[test]
    fn test_remove_variants() {
        let (mut canvas, ids) = canvas_with(5);
        assert_eq!(canvas.remove_first(1)[0].id(), ids[0]);
        assert_eq!(canvas.remove_last(1)[0].id(), ids[4]);
        assert_eq!(canvas.remove_at(&[1, 7]).len(), 1);
        assert_eq!(canvas.shapes().iter().map(Shape::id).collect::<Vec<_>>(), vec![ids[1], ids[3]]);
        canvas.select_shapes(&[ids[3]], false);
        canvas.remove_selected();
        assert_eq!(canvas.remove_all().len(), 1);
        assert!(canvas.is_empty());
        assert!(canvas.remove_last(3).is_empty());
    }

    #[test]
    fn test_remove_deselects_and_drops_label() {
        let recorder = Rc::new(Recorder::default());
        let (mut canvas, ids) = canvas_with(2);
        canvas.set_delegate(&recorder);
        canvas.select_all();
        canvas
            .label_offsets
            .insert(ids[0], PointDescriptor::fixed(Point::ZERO));
        recorder.take();

        canvas.remove_shapes(&[ids[0]]);
        assert_eq!(recorder.take(), vec!["deselect 1"]);
        assert!(canvas.label_offset(ids[0]).is_none());
        assert_eq!(canvas.selected_ids(), vec![ids[1]]);
    }

    #[test]
    fn test_removal_names_undo_entry() {
        let (mut canvas, ids) = canvas_with(2);
        canvas.remove_shapes(&ids);
        assert_eq!(
            canvas.undo_action_name().as_deref(),
            Some("Remove Ruler, Ruler")
        );
        assert_eq!(UndoAction::Remove.verb(), "Remove");
    }

    #[test]
    fn test_set_selectable_clears_selection() {
        let (mut canvas, _) = canvas_with(2);
        canvas.select_all();
        canvas.set_selectable(false);
        assert!(canvas.selected_ids().is_empty());
        assert!(!canvas.is_selectable());
    }

    #[test]
    fn test_resize_scales_by_width() {
        let (mut canvas, ids) = canvas_with(1);
        canvas.resize(Size::new(100.0, 100.0));
        assert_eq!(canvas.shape(ids[0]).unwrap().point(IndexPath::new(0, 1)), Some(Point::new(10.0, 0.0)));

        canvas.resize(Size::new(200.0, 50.0));
        let shape = canvas.shape(ids[0]).unwrap();
        assert_eq!(shape.point(IndexPath::new(0, 1)), Some(Point::new(20.0, 0.0)));
        assert_eq!(canvas.current_size(), Size::new(200.0, 50.0));
    }

    #[test]
    fn test_resize_without_scaling() {
        let (mut canvas, ids) = canvas_with(1);
        canvas.set_item_scaling(ItemScaling::None);
        canvas.resize(Size::new(100.0, 100.0));
        canvas.resize(Size::new(300.0, 300.0));
        assert_eq!(canvas.shape(ids[0]).unwrap().point(IndexPath::new(0, 1)), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_lock_toggles() {
        let mut canvas = Canvas::default();
        canvas.lock();
        assert!(canvas.is_locked());
        canvas.unlock();
        assert!(!canvas.is_locked());
    }

    #[test]
    fn test_dropped_delegate_is_ignored() {
        let (mut canvas, ids) = canvas_with(1);
        {
            let recorder = Rc::new(Recorder::default());
            canvas.set_delegate(&recorder);
        }
        canvas.select_shapes(&ids, false);
        assert_eq!(canvas.selected_ids(), ids);
    }
}
