//! Selection handles and rubber-band geometry.

use crate::geometry::{Arc, Line};
use crate::layout::IndexPath;
use crate::shapes::Shape;
use kurbo::{Point, Rect};
use std::f64::consts::FRAC_PI_4;

/// Head length of the arrows at both ends of the rotator arc.
pub const ROTATOR_ARROW_HEAD: f64 = 6.0;

/// What a handle manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// An editable layout point.
    Point(IndexPath),
    /// The rotation pivot.
    Anchor,
    /// The label anchor of a shape's description bubble.
    Label,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub position: Point,
}

impl Handle {
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Check if `point` lies within `range` of this handle.
    pub fn hit_test(&self, point: Point, range: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= range * range
    }
}

/// Point handles of a selected shape, in layout order.
///
/// With `hide_anchor` set, the point the rotation anchor refers to is left
/// out since the anchor handle is drawn there instead.
pub fn point_handles(shape: &Shape, hide_anchor: bool) -> Vec<Handle> {
    let anchor = shape.rotation_anchor().index_path();
    shape
        .layout()
        .iter()
        .filter(|(index, _)| !(hide_anchor && anchor == Some(*index)))
        .map(|(index, point)| Handle::new(HandleKind::Point(index), point))
        .collect()
}

/// The quarter-turn arc of the rotation handle, centered on `rotation`.
pub fn rotator_arc(center: Point, rotation: f64, radius: f64) -> Arc {
    Arc::new(
        center,
        radius,
        rotation - FRAC_PI_4,
        rotation + FRAC_PI_4,
        false,
    )
}

/// Whether `location` grabs the rotation handle.
///
/// The pointer must be within `range` of the handle's circle and inside the
/// quarter-turn sector it spans.
pub fn rotator_hit(center: Point, rotation: f64, radius: f64, range: f64, location: Point) -> bool {
    let distance = Line::new(center, location).distance();
    if distance < radius - range || distance > radius + range {
        return false;
    }
    rotator_arc(center, rotation, radius + range).contains(location)
}

/// Origin of a new rubber band, snapped to the pixel center.
pub fn selector_origin(location: Point) -> Point {
    Point::new(location.x.round() + 0.5, location.y.round() + 0.5)
}

/// Grow a rubber band from its fixed origin towards `location`.
///
/// The result keeps the origin as `(x0, y0)` and may have a negative
/// extent; normalize with [`Rect::abs`] before testing against it.
pub fn rubber_band(selector: Rect, location: Point) -> Rect {
    let width = (location.x - selector.x0).round();
    let height = (location.y - selector.y0).round();
    Rect::new(selector.x0, selector.y0, selector.x0 + width, selector.y0 + height)
}
