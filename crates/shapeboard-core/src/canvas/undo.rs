//! Undo registration and replay.

use super::Canvas;
use crate::history::{UndoCommand, UndoEntry, UndoStack};
use crate::shapes::{Shape, ShapeId};
use kurbo::{Size, Vec2};

impl Canvas {
    /// Record `command` as the inverse of the mutation just applied.
    ///
    /// No-op while undo is disabled. The entry is named by the data source,
    /// falling back to the action verb and the affected kinds.
    pub(super) fn register_undo(&mut self, command: UndoCommand) {
        if !self.config.undo_enabled {
            return;
        }
        let name = self.undo_name(&command);
        log::debug!("Registered undo entry \"{name}\"");
        self.undo_stack.register(UndoEntry::new(command, Some(name)));
    }

    fn shapes_by_id(&self, ids: &[ShapeId]) -> Vec<&Shape> {
        ids.iter().filter_map(|&id| self.shape(id)).collect()
    }

    fn undo_name(&self, command: &UndoCommand) -> String {
        let shapes: Vec<&Shape> = match command {
            UndoCommand::RemoveShapes { ids } | UndoCommand::MoveShapes { ids, .. } => {
                self.shapes_by_id(ids)
            }
            UndoCommand::RestoreShapes { shapes, .. } => shapes.iter().map(|(_, s)| s).collect(),
            UndoCommand::EditPoint { id, .. }
            | UndoCommand::SetAnchor { id, .. }
            | UndoCommand::Rotate { id, .. } => self.shapes_by_id(std::slice::from_ref(id)),
        };
        let action = command.action();
        self.data_source()
            .and_then(|source| source.undo_action_name(action, &shapes))
            .unwrap_or_else(|| action.default_name(shapes.iter().copied()))
    }

    /// Scale factors from `view_size` to the current size, identity when
    /// they are undefined.
    fn replay_multipliers(&self, view_size: Size) -> (f64, f64) {
        self.config
            .item_scaling
            .multipliers(view_size, self.current_size)
            .unwrap_or((1.0, 1.0))
    }

    /// Revert the most recent mutation. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.begin_undo() else {
            return false;
        };
        log::debug!("Undo {:?}", entry.command.action());
        self.perform(entry.command);
        self.undo_stack.end_replay();
        true
    }

    /// Reapply the most recently undone mutation. Returns false if there was
    /// none.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.begin_redo() else {
            return false;
        };
        log::debug!("Redo {:?}", entry.command.action());
        self.perform(entry.command);
        self.undo_stack.end_replay();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    pub fn undo_action_name(&self) -> Option<&str> {
        self.undo_stack.undo_action_name()
    }

    pub fn redo_action_name(&self) -> Option<&str> {
        self.undo_stack.redo_action_name()
    }

    pub fn undo_stack(&self) -> &dyn UndoStack {
        self.undo_stack.as_ref()
    }

    pub fn clear_undo_history(&mut self) {
        self.undo_stack.clear();
    }

    /// Apply `command`, registering its inverse.
    fn perform(&mut self, command: UndoCommand) {
        let delegate = self.delegate();
        match command {
            UndoCommand::RemoveShapes { ids } => {
                self.remove_shapes(&ids);
            }
            UndoCommand::RestoreShapes { shapes, view_size } => {
                let (mx, my) = self.replay_multipliers(view_size);
                let mut ids = Vec::with_capacity(shapes.len());
                for (index, mut shape) in shapes {
                    shape.scale(mx, my);
                    shape.set_selected(false);
                    ids.push(shape.id());
                    let index = index.min(self.shapes.len());
                    self.shapes.insert(index, shape);
                }
                self.register_undo(UndoCommand::RemoveShapes { ids });
            }
            UndoCommand::MoveShapes {
                ids,
                target,
                offset,
                view_size,
            } => {
                let (mx, my) = self.replay_multipliers(view_size);
                let offset = Vec2::new(-offset.x * mx, -offset.y * my);
                for shape in self.shapes.iter_mut().filter(|s| ids.contains(&s.id())) {
                    shape.translate(offset);
                }
                self.register_undo(UndoCommand::MoveShapes {
                    ids,
                    target,
                    offset,
                    view_size: self.current_size,
                });
                if let (Some(delegate), Some(shape)) = (&delegate, self.shape(target)) {
                    delegate.did_move(shape);
                }
            }
            UndoCommand::EditPoint {
                id,
                index,
                offset,
                view_size,
            } => {
                let (mx, my) = self.replay_multipliers(view_size);
                let offset = Vec2::new(-offset.x * mx, -offset.y * my);
                let Some(shape) = self.shape_mut(id) else {
                    log::warn!("Skipped point edit of missing shape {id}");
                    return;
                };
                let Some(point) = shape.point(index) else {
                    log::warn!("Skipped point edit at missing {index:?}");
                    return;
                };
                shape.update_point(point + offset, index);
                self.register_undo(UndoCommand::EditPoint {
                    id,
                    index,
                    offset,
                    view_size: self.current_size,
                });
                if let (Some(delegate), Some(shape)) = (&delegate, self.shape(id)) {
                    delegate.did_edit(shape, index);
                }
            }
            UndoCommand::SetAnchor { id, anchor } => {
                let Some(shape) = self.shape_mut(id) else {
                    log::warn!("Skipped anchor change of missing shape {id}");
                    return;
                };
                let current = shape.rotation_anchor();
                shape.set_anchor(anchor);
                self.register_undo(UndoCommand::SetAnchor { id, anchor: current });
                if let (Some(delegate), Some(shape)) = (&delegate, self.shape(id)) {
                    delegate.did_anchor(shape);
                }
            }
            UndoCommand::Rotate { id, angle } => {
                let Some(shape) = self.shape_mut(id) else {
                    log::warn!("Skipped rotation of missing shape {id}");
                    return;
                };
                let current = shape.rotation_angle();
                shape.rotate(angle);
                self.register_undo(UndoCommand::Rotate { id, angle: current });
                if let (Some(delegate), Some(shape)) = (&delegate, self.shape(id)) {
                    delegate.did_rotate(shape);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CanvasConfig, ItemScaling};
    use crate::delegate::CanvasDataSource;
    use crate::geometry::Line;
    use crate::history::{UndoAction, UndoManager};
    use crate::layout::IndexPath;
    use crate::shapes::PointDescriptor;
    use kurbo::Point;
    use std::f64::consts::FRAC_PI_2;
    use std::rc::Rc;

    fn ruler(x: f64) -> Shape {
        Shape::from_line(Line::new(Point::new(x, 0.0), Point::new(x + 10.0, 0.0)))
    }

    fn ids_of(canvas: &Canvas) -> Vec<ShapeId> {
        canvas.shapes().iter().map(Shape::id).collect()
    }

    #[test]
    fn test_undo_add_then_redo_keeps_position() {
        let mut canvas = Canvas::default();
        let first = canvas.add_shapes(vec![ruler(0.0), ruler(20.0)]);
        let second = canvas.add_shapes(vec![ruler(40.0)]);
        canvas.select_shapes(&first[..1], false);

        assert!(canvas.undo());
        assert_eq!(ids_of(&canvas), first);
        assert_eq!(canvas.selected_ids(), vec![first[0]]);

        assert!(canvas.redo());
        assert_eq!(ids_of(&canvas), vec![first[0], first[1], second[0]]);
        assert!(canvas.can_undo());
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_undo_remove_restores_indexes() {
        let mut canvas = Canvas::default();
        let ids = canvas.add_shapes(vec![ruler(0.0), ruler(20.0), ruler(40.0)]);
        canvas.remove_shapes(&[ids[0], ids[2]]);
        assert_eq!(ids_of(&canvas), vec![ids[1]]);

        canvas.undo();
        assert_eq!(ids_of(&canvas), ids);
        canvas.redo();
        assert_eq!(ids_of(&canvas), vec![ids[1]]);
    }

    #[test]
    fn test_undo_remove_rescales_to_current_size() {
        let mut config = CanvasConfig::default();
        config.item_scaling = ItemScaling::Both;
        let mut canvas = Canvas::new(config);
        canvas.resize(Size::new(100.0, 100.0));
        let ids = canvas.add_shapes(vec![ruler(0.0)]);
        canvas.remove_all();
        canvas.resize(Size::new(200.0, 50.0));

        canvas.undo();
        let shape = canvas.shape(ids[0]).unwrap();
        assert_eq!(shape.point(IndexPath::new(0, 1)), Some(Point::new(20.0, 0.0)));
    }

    #[test]
    fn test_move_undo_redo() {
        let mut canvas = Canvas::default();
        let ids = canvas.add_shapes(vec![ruler(0.0)]);
        canvas.shape_mut(ids[0]).unwrap().translate(Vec2::new(5.0, 5.0));
        canvas.register_undo(UndoCommand::MoveShapes {
            ids: ids.clone(),
            target: ids[0],
            offset: Vec2::new(5.0, 5.0),
            view_size: canvas.current_size(),
        });

        canvas.undo();
        assert_eq!(canvas.shape(ids[0]).unwrap().point(IndexPath::new(0, 0)), Some(Point::ZERO));
        canvas.redo();
        assert_eq!(
            canvas.shape(ids[0]).unwrap().point(IndexPath::new(0, 0)),
            Some(Point::new(5.0, 5.0))
        );
        assert_eq!(canvas.undo_action_name(), Some("Move Ruler"));
    }

    #[test]
    fn test_rotate_and_anchor_swap() {
        let mut canvas = Canvas::default();
        let ids = canvas.add_shapes(vec![ruler(0.0)]);
        let id = ids[0];

        canvas.shape_mut(id).unwrap().rotate(FRAC_PI_2);
        canvas.register_undo(UndoCommand::Rotate { id, angle: 0.0 });
        canvas.undo();
        assert_eq!(canvas.shape(id).unwrap().rotation_angle(), 0.0);
        canvas.redo();
        assert_eq!(canvas.shape(id).unwrap().rotation_angle(), FRAC_PI_2);

        let before = canvas.shape(id).unwrap().rotation_anchor();
        canvas
            .shape_mut(id)
            .unwrap()
            .set_anchor(PointDescriptor::fixed(Point::new(3.0, 3.0)));
        canvas.register_undo(UndoCommand::SetAnchor { id, anchor: before });
        canvas.undo();
        assert_eq!(canvas.shape(id).unwrap().rotation_anchor(), before);
        canvas.redo();
        assert_eq!(
            canvas.shape(id).unwrap().rotation_anchor(),
            PointDescriptor::fixed(Point::new(3.0, 3.0))
        );
    }

    #[test]
    fn test_disabled_undo_registers_nothing() {
        let mut canvas = Canvas::default();
        canvas.set_undo_enabled(false);
        canvas.add_shapes(vec![ruler(0.0)]);
        assert!(!canvas.can_undo());
        assert!(!canvas.undo());
    }

    #[test]
    fn test_data_source_names_entries() {
        struct Names;
        impl CanvasDataSource for Names {
            fn undo_action_name(&self, action: UndoAction, shapes: &[&Shape]) -> Option<String> {
                Some(format!("{} {} item(s)", action.verb(), shapes.len()))
            }
        }

        let names = Rc::new(Names);
        let mut canvas = Canvas::default();
        canvas.set_data_source(&names);
        canvas.add_shapes(vec![ruler(0.0), ruler(20.0)]);
        assert_eq!(canvas.undo_action_name(), Some("Add 2 item(s)"));
        canvas.undo();
        assert_eq!(canvas.redo_action_name(), Some("Remove 2 item(s)"));
    }

    #[test]
    fn test_host_undo_stack() {
        let manager = UndoManager::with_limit(Some(1));
        let mut canvas = Canvas::with_undo_stack(CanvasConfig::default(), Box::new(manager));
        canvas.add_shapes(vec![ruler(0.0)]);
        canvas.add_shapes(vec![ruler(20.0)]);
        assert!(canvas.undo());
        assert!(!canvas.undo());
        assert_eq!(canvas.len(), 1);
        canvas.clear_undo_history();
        assert!(!canvas.undo_stack().can_redo());
    }
}
