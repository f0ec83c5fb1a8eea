//! End-to-end pointer gestures against a canvas.

use kurbo::{Point, Rect, Size};
use shapeboard_core::geometry::Line;
use shapeboard_core::shapes::{Polygon, Ruler};
use shapeboard_core::{
    Canvas, CanvasDataSource, CanvasDelegate, ContextMenu, IndexPath, InteractionState, Modifiers,
    MouseButton, PointDescriptor, PointerEvent, Shape, ShapeId, ShapeKind,
};
use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

fn down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    }
}

fn right(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Right,
        modifiers: Modifiers::NONE,
    }
}

fn shift_down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Left,
        modifiers: Modifiers::SHIFT,
    }
}

fn shift_drag(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Drag {
        position: Point::new(x, y),
        modifiers: Modifiers::SHIFT,
    }
}

fn drag(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Drag {
        position: Point::new(x, y),
        modifiers: Modifiers::NONE,
    }
}

fn up(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Up {
        position: Point::new(x, y),
        modifiers: Modifiers::NONE,
    }
}

fn gesture(canvas: &mut Canvas, events: impl IntoIterator<Item = PointerEvent>) {
    for event in events {
        canvas.handle_event(event);
    }
}

fn assert_near(actual: Option<Point>, expected: Point) {
    let actual = actual.expect("point exists");
    assert!(
        actual.distance(expected) < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

fn end(canvas: &Canvas, id: ShapeId) -> Option<Point> {
    canvas.shape(id)?.point(IndexPath::new(0, 1))
}

fn board_with_ruler() -> (Canvas, ShapeId) {
    let mut canvas = Canvas::default();
    canvas.resize(Size::new(400.0, 300.0));
    let ids = canvas.add_shapes(vec![Shape::from_line(Line::new(
        Point::new(100.0, 100.0),
        Point::new(200.0, 100.0),
    ))]);
    (canvas, ids[0])
}

#[test]
fn test_draw_ruler_by_dragging() {
    let mut canvas = Canvas::default();
    let id = canvas.start_session(ShapeKind::Ruler(Ruler::default()));
    gesture(&mut canvas, [down(0.0, 0.0), drag(10.0, 0.0), up(10.0, 0.0)]);

    assert_eq!(canvas.state(), &InteractionState::Idle);
    let shape = canvas.shape(id).expect("ruler committed");
    assert!(shape.is_finished());
    assert_eq!(shape.layout().point_count(), 2);

    canvas.shape_mut(id).expect("ruler").rotate(FRAC_PI_2);
    assert_near(end(&canvas, id), Point::new(0.0, 10.0));
}

#[test]
fn test_undo_and_redo_drawn_shape() {
    let mut canvas = Canvas::default();
    let id = canvas.start_session(ShapeKind::Ruler(Ruler::default()));
    gesture(&mut canvas, [down(5.0, 5.0), drag(50.0, 5.0), up(50.0, 5.0)]);
    assert_eq!(canvas.len(), 1);

    assert!(canvas.undo());
    assert!(canvas.is_empty());
    assert!(canvas.redo());
    assert_eq!(canvas.len(), 1);
    assert_eq!(end(&canvas, id), Some(Point::new(50.0, 5.0)));
}

#[test]
fn test_new_ruler_snaps_onto_magnets() {
    let (mut canvas, _) = board_with_ruler();
    canvas.set_magnet_enabled(true);
    let id = canvas.start_session(ShapeKind::Ruler(Ruler::default()));
    gesture(&mut canvas, [down(203.0, 102.0), drag(150.0, 150.0), drag(101.0, 99.0), up(101.0, 99.0)]);

    let shape = canvas.shape(id).expect("ruler committed");
    assert_eq!(shape.point(IndexPath::new(0, 0)), Some(Point::new(200.0, 100.0)));
    assert_eq!(shape.point(IndexPath::new(0, 1)), Some(Point::new(100.0, 100.0)));
}

#[test]
fn test_move_shape_and_undo() {
    let (mut canvas, id) = board_with_ruler();
    gesture(&mut canvas, [down(150.0, 101.0), drag(160.0, 111.0), up(160.0, 111.0)]);

    assert_eq!(end(&canvas, id), Some(Point::new(210.0, 110.0)));
    assert_eq!(canvas.undo_action_name(), Some("Move Ruler"));
    assert!(canvas.undo());
    assert_eq!(end(&canvas, id), Some(Point::new(200.0, 100.0)));
    assert!(canvas.redo());
    assert_eq!(end(&canvas, id), Some(Point::new(210.0, 110.0)));
}

#[test]
fn test_edit_point_of_selected_shape() {
    let (mut canvas, id) = board_with_ruler();
    canvas.select_shapes(&[id], false);
    gesture(&mut canvas, [down(200.0, 100.0), drag(220.0, 130.0), up(220.0, 130.0)]);

    assert_eq!(end(&canvas, id), Some(Point::new(220.0, 130.0)));
    assert!(canvas.undo());
    assert_eq!(end(&canvas, id), Some(Point::new(200.0, 100.0)));
}

#[test]
fn test_rotate_with_handle() {
    let (mut canvas, id) = board_with_ruler();
    canvas.set_rotation_enabled(true);
    canvas.select_shapes(&[id], false);

    let radius = canvas.config().rotator_radius();
    canvas.handle_event(down(100.0 + radius, 100.0));
    assert!(matches!(canvas.state(), InteractionState::OnRotator { .. }));
    gesture(&mut canvas, [drag(100.0, 100.0 + radius), up(100.0, 100.0 + radius)]);

    assert_near(end(&canvas, id), Point::new(100.0, 200.0));
    assert!(canvas.undo());
    assert_near(end(&canvas, id), Point::new(200.0, 100.0));
    assert_eq!(canvas.shape(id).map(Shape::rotation_angle), Some(0.0));
}

#[test]
fn test_shift_drawing_locks_to_horizontal() {
    let mut canvas = Canvas::default();
    let id = canvas.start_session(ShapeKind::Ruler(Ruler::default()));
    gesture(&mut canvas, [shift_down(0.0, 0.0), shift_drag(30.0, 4.0), up(30.0, 4.0)]);
    assert_eq!(end(&canvas, id), Some(Point::new(30.0, 0.0)));
}

#[test]
fn test_locked_canvas_draws_vertical() {
    let mut canvas = Canvas::default();
    canvas.lock();
    let id = canvas.start_session(ShapeKind::Ruler(Ruler::default()));
    gesture(&mut canvas, [down(10.0, 10.0), drag(13.0, 70.0), up(13.0, 70.0)]);
    assert_eq!(end(&canvas, id), Some(Point::new(10.0, 70.0)));

    canvas.unlock();
    let free = canvas.start_session(ShapeKind::Ruler(Ruler::default()));
    gesture(&mut canvas, [down(10.0, 10.0), drag(13.0, 70.0), up(13.0, 70.0)]);
    assert_eq!(end(&canvas, free), Some(Point::new(13.0, 70.0)));
}

#[test]
fn test_shift_point_edit_locks_to_vertical() {
    let (mut canvas, id) = board_with_ruler();
    canvas.select_shapes(&[id], false);
    gesture(
        &mut canvas,
        [shift_down(200.0, 100.0), shift_drag(110.0, 180.0), up(110.0, 180.0)],
    );

    assert_eq!(end(&canvas, id), Some(Point::new(100.0, 180.0)));
    assert!(canvas.undo());
    assert_eq!(end(&canvas, id), Some(Point::new(200.0, 100.0)));
}

#[test]
fn test_rotator_drag_without_center_is_ignored() {
    let (mut canvas, id) = board_with_ruler();
    canvas.set_rotation_enabled(true);
    canvas.select_shapes(&[id], false);

    let radius = canvas.config().rotator_radius();
    canvas.handle_event(down(100.0 + radius, 100.0));
    assert!(matches!(canvas.state(), InteractionState::OnRotator { .. }));
    canvas.remove_all();
    canvas.clear_undo_history();

    canvas.handle_event(drag(100.0, 100.0 + radius));
    assert!(matches!(canvas.state(), InteractionState::OnRotator { .. }));
    canvas.handle_event(up(100.0, 100.0 + radius));
    assert_eq!(canvas.state(), &InteractionState::Idle);
    assert!(!canvas.can_undo());
}

#[derive(Default)]
struct Recorder {
    rects: RefCell<Vec<(Vec<ShapeId>, Rect)>>,
    cancelled: RefCell<Vec<ShapeId>>,
}

impl CanvasDelegate for Recorder {
    fn did_select_in_rect(&self, ids: &[ShapeId], rect: Rect) {
        self.rects.borrow_mut().push((ids.to_vec(), rect));
    }

    fn did_cancel_session(&self, shape: &Shape) {
        self.cancelled.borrow_mut().push(shape.id());
    }
}

#[test]
fn test_right_click_cancels_unfinishable_polygon() {
    let mut canvas = Canvas::default();
    let recorder = Rc::new(Recorder::default());
    canvas.set_delegate(&recorder);
    let id = canvas.start_session(ShapeKind::Polygon(Polygon::new(true)));

    canvas.handle_event(down(10.0, 10.0));
    assert_eq!(canvas.handle_event(right(40.0, 40.0)), None);

    assert!(canvas.shape_in_session().is_none());
    assert!(canvas.is_empty());
    assert!(!canvas.can_undo());
    assert_eq!(*recorder.cancelled.borrow(), vec![id]);
}

#[test]
fn test_rubber_band_selection() {
    let mut canvas = Canvas::default();
    let ids = canvas.add_shapes(vec![
        Shape::from_line(Line::new(Point::new(10.0, 10.0), Point::new(50.0, 10.0))),
        Shape::from_line(Line::new(Point::new(300.0, 300.0), Point::new(350.0, 300.0))),
    ]);
    let recorder = Rc::new(Recorder::default());
    canvas.set_delegate(&recorder);

    gesture(&mut canvas, [down(0.0, 0.0), drag(100.0, 100.0)]);
    assert!(matches!(canvas.state(), InteractionState::Selecting(_)));
    assert_eq!(canvas.selected_ids(), vec![ids[0]]);
    canvas.handle_event(up(100.0, 100.0));

    let rects = recorder.rects.borrow();
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0].0, vec![ids[0]]);
    assert_eq!(rects[0].1, Rect::new(0.5, 0.5, 100.5, 100.5));
}

struct Menus;

impl CanvasDataSource for Menus {
    fn menu(&self) -> Option<ContextMenu> {
        Some(ContextMenu::new(["Paste", "Select All"]))
    }

    fn item_menu(&self, shape: &Shape) -> Option<ContextMenu> {
        Some(ContextMenu::new([format!("Delete {}", shape.name())]))
    }

    fn description(&self, shape: &Shape) -> Option<String> {
        Some(shape.name().to_string())
    }
}

#[test]
fn test_context_menus() {
    let (mut canvas, id) = board_with_ruler();
    assert_eq!(canvas.handle_event(right(150.0, 100.0)), None);

    let menus = Rc::new(Menus);
    canvas.set_data_source(&menus);
    let item = canvas.handle_event(right(150.0, 100.0));
    assert_eq!(item, Some(ContextMenu::new(["Delete Ruler"])));
    assert_eq!(canvas.selected_ids(), vec![id]);

    let empty = canvas.handle_event(right(10.0, 250.0));
    assert_eq!(empty, Some(ContextMenu::new(["Paste", "Select All"])));
    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_drag_label_onto_point() {
    let (mut canvas, id) = board_with_ruler();
    let menus = Rc::new(Menus);
    canvas.set_data_source(&menus);
    canvas.set_shows_item_description(true);
    canvas.select_shapes(&[id], false);

    canvas.handle_event(down(150.0, 100.0));
    assert!(matches!(canvas.state(), InteractionState::OnDescription { .. }));
    gesture(&mut canvas, [drag(199.0, 102.0), up(199.0, 102.0)]);
    assert_eq!(
        canvas.label_offset(id),
        Some(PointDescriptor::index(IndexPath::new(0, 1)))
    );
}
