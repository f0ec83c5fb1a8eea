//! Pointer event handling.

use super::hit_test::{anchor_descriptor, label_descriptor};
use super::{Canvas, InteractionState};
use crate::delegate::ContextMenu;
use crate::geometry::Line;
use crate::history::UndoCommand;
use crate::input::{Modifiers, MouseAction, MouseButton, PointerEvent};
use crate::selection::{rubber_band, selector_origin};
use crate::shapes::Shape;
use crate::snap::locked_point;
use kurbo::{Point, Rect, Size};

impl Canvas {
    /// Dispatch one pointer event.
    ///
    /// Returns the context menu a right click resolved to, if any.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<ContextMenu> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                modifiers,
            } => {
                self.pointer_down(position, modifiers);
                None
            }
            PointerEvent::Down {
                position,
                button: MouseButton::Right,
                ..
            } => self.right_pointer_down(position),
            PointerEvent::Down {
                button: MouseButton::Middle,
                ..
            } => None,
            PointerEvent::Drag {
                position,
                modifiers,
            } => {
                self.pointer_drag(position, modifiers);
                None
            }
            PointerEvent::Up {
                position,
                modifiers,
            } => {
                self.pointer_up(position, modifiers);
                None
            }
        }
    }

    /// Primary button pressed at `location`.
    pub fn pointer_down(&mut self, location: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.mouse_action = MouseAction::Down;

        self.state = match std::mem::take(&mut self.state) {
            InteractionState::Idle if self.config.is_selectable => self.begin_interaction(location),
            InteractionState::Drawing(mut shape) => {
                self.push_session_point(&mut shape, location);
                InteractionState::Drawing(shape)
            }
            other => other,
        };
        log::debug!("Pointer down -> {}", state_name(&self.state));
    }

    /// Resolve a press on an idle canvas.
    fn begin_interaction(&mut self, location: Point) -> InteractionState {
        if self.config.shows_item_description {
            if let Some(id) = self.label_hit(location) {
                return InteractionState::OnDescription { id, origin: location };
            }
        }
        if self.config.rotation_enabled {
            if let Some(shape) = self.rotator_hit(location).and_then(|id| self.shape(id)) {
                return InteractionState::OnRotator {
                    id: shape.id(),
                    angle: shape.rotation_angle(),
                    last: location,
                };
            }
            if let Some(shape) = self.anchor_hit(location).and_then(|id| self.shape(id)) {
                return InteractionState::OnAnchor {
                    id: shape.id(),
                    anchor: shape.rotation_anchor(),
                };
            }
        }
        if let Some((id, index)) = self.point_hit(location) {
            self.apply_selection(&[id], false);
            if let Some(initial) = self.shape(id).and_then(|s| s.point(index)) {
                return InteractionState::OnPoint { id, index, initial };
            }
        }
        if let Some(id) = self.body_hit(location) {
            if !self.shape(id).is_some_and(Shape::is_selected) {
                self.apply_selection(&[id], false);
            }
            return InteractionState::OnItem {
                id,
                last: location,
                start: location,
            };
        }
        self.deselect_all();
        InteractionState::Selecting(Rect::from_origin_size(selector_origin(location), Size::ZERO))
    }

    /// Push a press into the session shape.
    ///
    /// The first press of a section pushes the point twice so that the
    /// following drag has a free end to move.
    fn push_session_point(&self, shape: &mut Shape, location: Point) {
        let delegate = self.delegate();
        if shape.layout().is_empty() {
            if let Some(delegate) = &delegate {
                delegate.did_start_session(shape);
            }
        }
        if shape.push_continuously() {
            shape.push_to_next_section(location);
        } else {
            let point = self
                .magnet_hit(shape.id(), location)
                .map_or(location, |hit| hit.point);
            shape.push(point);
            if shape.layout().last().is_some_and(|section| section.len() == 1) {
                shape.push(location);
            }
        }
        if shape.can_finish() {
            if let Some(delegate) = &delegate {
                delegate.will_finish_session(shape);
            }
        }
    }

    /// Pointer moved to `location` with the primary button held.
    pub fn pointer_drag(&mut self, location: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.mouse_action = MouseAction::Drag;
        let delegate = self.delegate();
        let range = self.config.selection_range;

        self.state = match std::mem::take(&mut self.state) {
            InteractionState::Selecting(selector) => {
                let selector = rubber_band(selector, location);
                self.select_in_rect(selector);
                InteractionState::Selecting(selector)
            }
            InteractionState::Drawing(mut shape) => {
                self.drag_session_point(&mut shape, location);
                if shape.can_finish() {
                    if let Some(delegate) = &delegate {
                        delegate.will_finish_session(&shape);
                    }
                }
                InteractionState::Drawing(shape)
            }
            InteractionState::OnDescription { id, origin }
            | InteractionState::MovingDescription { id, origin } => {
                let descriptor = self
                    .shape(id)
                    .and_then(|shape| label_descriptor(shape, location, range));
                match descriptor {
                    Some(descriptor) => self.label_offsets.insert(id, descriptor),
                    None => self.label_offsets.remove(&id),
                };
                InteractionState::MovingDescription { id, origin }
            }
            InteractionState::OnRotator { id, angle, last }
                if self.shape(id).and_then(Shape::rotation_center).is_none() =>
            {
                InteractionState::OnRotator { id, angle, last }
            }
            InteractionState::OnRotator { id, angle, last }
            | InteractionState::MovingRotator { id, angle, last } => {
                if let Some(shape) = self.shape_mut(id) {
                    if let Some(center) = shape.rotation_center() {
                        let previous = Line::new(center, last).angle();
                        let current = Line::new(center, location).angle();
                        shape.rotate(shape.rotation_angle() + current - previous);
                        if let Some(delegate) = &delegate {
                            delegate.did_rotate(shape);
                        }
                    }
                }
                InteractionState::MovingRotator {
                    id,
                    angle,
                    last: location,
                }
            }
            InteractionState::OnAnchor { id, anchor }
            | InteractionState::MovingAnchor { id, anchor } => {
                if let Some(shape) = self.shape_mut(id) {
                    shape.set_anchor(anchor_descriptor(shape, location, range));
                    if let Some(delegate) = &delegate {
                        delegate.did_anchor(shape);
                    }
                }
                InteractionState::MovingAnchor { id, anchor }
            }
            InteractionState::OnPoint { id, index, initial }
            | InteractionState::MovingPoint { id, index, initial } => {
                let magnet = self.magnet_hit(id, location).map(|hit| hit.point);
                let locking = self.axis_locked();
                if let Some(shape) = self.shape_mut(id) {
                    let point = magnet
                        .or_else(|| {
                            (locking && shape.is_locked(index))
                                .then(|| locked_point(shape, index, location))
                                .flatten()
                        })
                        .unwrap_or(location);
                    shape.update_point(point, index);
                    if let Some(delegate) = &delegate {
                        delegate.did_edit(shape, index);
                    }
                }
                InteractionState::MovingPoint { id, index, initial }
            }
            InteractionState::OnItem { id, last, start }
            | InteractionState::MovingItem { id, last, start } => {
                let offset = location - last;
                for shape in self.shapes.iter_mut().filter(|s| s.is_selected()) {
                    shape.translate(offset);
                }
                if let (Some(delegate), Some(shape)) = (&delegate, self.shape(id)) {
                    delegate.did_move(shape);
                }
                InteractionState::MovingItem {
                    id,
                    last: location,
                    start,
                }
            }
            other => other,
        };
    }

    /// Move the free end of the session shape, or extend it when it pushes
    /// continuously.
    fn drag_session_point(&self, shape: &mut Shape, location: Point) {
        if shape.push_continuously() {
            shape.push(location);
            return;
        }
        if let Some(hit) = self.magnet_hit(shape.id(), location) {
            shape.update_last(hit.point);
            return;
        }
        let locked = shape
            .end_index_path()
            .filter(|&index| self.axis_locked() && shape.is_locked(index))
            .and_then(|index| locked_point(shape, index, location));
        shape.update_last(locked.unwrap_or(location));
    }

    /// Primary button released.
    ///
    /// Gestures commit the geometry reached by the last drag, so the release
    /// position itself is not applied.
    pub fn pointer_up(&mut self, _location: Point, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.mouse_action = MouseAction::Idle;

        let previous = std::mem::take(&mut self.state);
        log::debug!("Pointer up from {}", state_name(&previous));
        match previous {
            InteractionState::Selecting(selector) => {
                let ids = self.selected_ids();
                if let Some(delegate) = self.delegate() {
                    delegate.did_select_in_rect(&ids, selector.abs());
                }
            }
            InteractionState::Drawing(shape) => {
                let finish = shape.should_finish() && shape.can_finish();
                self.state = InteractionState::Drawing(shape);
                if finish {
                    self.finish_session();
                }
            }
            InteractionState::MovingRotator { id, angle, .. } => {
                self.register_undo(UndoCommand::Rotate { id, angle });
            }
            InteractionState::MovingAnchor { id, anchor } => {
                self.register_undo(UndoCommand::SetAnchor { id, anchor });
            }
            InteractionState::MovingPoint { id, index, initial } => {
                if let Some(point) = self.shape(id).and_then(|s| s.point(index)) {
                    self.register_undo(UndoCommand::EditPoint {
                        id,
                        index,
                        offset: point - initial,
                        view_size: self.current_size,
                    });
                }
            }
            InteractionState::OnItem { id, .. } => {
                self.apply_selection(&[id], false);
            }
            InteractionState::MovingItem { id, last, start } => {
                let ids = self.selected_ids();
                self.register_undo(UndoCommand::MoveShapes {
                    ids,
                    target: id,
                    offset: last - start,
                    view_size: self.current_size,
                });
            }
            _ => {}
        }
    }

    /// Secondary button pressed at `location`.
    ///
    /// While drawing, this finishes the session instead. Otherwise the data
    /// source supplies a menu for the shape under the pointer (selecting it)
    /// or for the empty canvas (clearing the selection).
    pub fn right_pointer_down(&mut self, location: Point) -> Option<ContextMenu> {
        if self.shape_in_session().is_some() {
            self.finish_session();
            return None;
        }
        let data_source = self.data_source()?;
        if let Some(id) = self.body_hit(location) {
            if !self.shape(id).is_some_and(Shape::is_selected) {
                self.apply_selection(&[id], false);
            }
            return self.shape(id).and_then(|shape| data_source.item_menu(shape));
        }
        self.deselect_all();
        data_source.menu()
    }
}

fn state_name(state: &InteractionState) -> &'static str {
    match state {
        InteractionState::Idle => "idle",
        InteractionState::Selecting(_) => "selecting",
        InteractionState::Drawing(_) => "drawing",
        InteractionState::OnDescription { .. } => "on description",
        InteractionState::MovingDescription { .. } => "moving description",
        InteractionState::OnAnchor { .. } => "on anchor",
        InteractionState::MovingAnchor { .. } => "moving anchor",
        InteractionState::OnRotator { .. } => "on rotator",
        InteractionState::MovingRotator { .. } => "moving rotator",
        InteractionState::OnItem { .. } => "on item",
        InteractionState::MovingItem { .. } => "moving item",
        InteractionState::OnPoint { .. } => "on point",
        InteractionState::MovingPoint { .. } => "moving point",
    }
}
