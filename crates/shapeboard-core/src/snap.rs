//! Magnet snapping and axis locking for edited points.

use crate::geometry::Line;
use crate::layout::IndexPath;
use crate::shapes::{PointDescriptor, Shape, ShapeId};
use kurbo::Point;

/// A magnet found near the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetHit {
    /// Shape owning the magnet.
    pub shape: ShapeId,
    pub descriptor: PointDescriptor,
    /// Exact coordinates of the magnet.
    pub point: Point,
}

/// First magnet within `range` of `location` offered by `shapes`, skipping
/// the shape being edited and shapes without the magnet capability.
pub fn magnet_snap<'a>(
    shapes: impl IntoIterator<Item = &'a Shape>,
    editing: ShapeId,
    location: Point,
    range: f64,
) -> Option<MagnetHit> {
    shapes
        .into_iter()
        .filter(|shape| shape.id() != editing)
        .find_map(|shape| {
            let magnets = shape.as_magnetizable()?;
            let descriptor = magnets.magnet(location, range)?;
            let point = magnets.resolve(descriptor)?;
            Some(MagnetHit {
                shape: shape.id(),
                descriptor,
                point,
            })
        })
}

/// Snap `location` onto the horizontal or vertical through the neighbor of
/// the point at `index`.
///
/// The neighbor is the previous point of the same section, or the second
/// point when editing the first. The axis with the larger absolute slope
/// wins; a vertical or degenerate offset locks to the vertical. Returns
/// `None` when the section has no neighbor.
pub fn locked_point(shape: &Shape, index: IndexPath, location: Point) -> Option<Point> {
    let section = shape.layout().section(index.section)?;
    if section.len() < 2 {
        return None;
    }
    let neighbor = if index.item == 0 { 1 } else { index.item - 1 };
    let from = *section.get(neighbor)?;
    let line = Line::new(from, location);
    let slope = (line.dy() / line.dx()).abs();
    if slope > 1.0 || slope.is_nan() {
        Some(Point::new(from.x, location.y))
    } else {
        Some(Point::new(location.x, from.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;

    fn ruler(from: Point, to: Point) -> Shape {
        Shape::from_line(Line::new(from, to))
    }

    #[test]
    fn test_magnet_snap_returns_exact_point() {
        let target = ruler(Point::new(10.25, 20.75), Point::new(50.0, 50.0));
        let editing = ruler(Point::ZERO, Point::new(5.0, 5.0));
        let shapes = [editing.clone(), target.clone()];

        let hit = magnet_snap(&shapes, editing.id(), Point::new(12.0, 22.0), 5.0).unwrap();
        assert_eq!(hit.shape, target.id());
        assert_eq!(hit.point, Point::new(10.25, 20.75));
        assert_eq!(hit.descriptor, PointDescriptor::index(IndexPath::new(0, 0)));
    }

    #[test]
    fn test_magnet_snap_skips_edited_shape() {
        let editing = ruler(Point::ZERO, Point::new(5.0, 5.0));
        let shapes = [editing.clone()];
        assert!(magnet_snap(&shapes, editing.id(), Point::new(1.0, 1.0), 5.0).is_none());
    }

    #[test]
    fn test_magnet_snap_skips_freehand() {
        let mut pencil = Shape::freehand();
        pencil.push_to_next_section(Point::new(1.0, 1.0));
        pencil.mark_as_finished();
        let shapes = [pencil];
        assert!(magnet_snap(&shapes, ShapeId::nil(), Point::new(1.0, 1.0), 5.0).is_none());
    }

    #[test]
    fn test_locked_point_picks_dominant_axis() {
        let shape = ruler(Point::ZERO, Point::new(10.0, 2.0));
        let end = IndexPath::new(0, 1);
        assert_eq!(
            locked_point(&shape, end, Point::new(10.0, 2.0)),
            Some(Point::new(10.0, 0.0))
        );
        assert_eq!(
            locked_point(&shape, end, Point::new(2.0, 10.0)),
            Some(Point::new(0.0, 10.0))
        );
    }

    #[test]
    fn test_locked_point_first_item_uses_second() {
        let shape = ruler(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(
            locked_point(&shape, IndexPath::new(0, 0), Point::new(-5.0, 9.0)),
            Some(Point::new(-5.0, 10.0))
        );
    }

    #[test]
    fn test_locked_point_degenerate_is_vertical() {
        let shape = ruler(Point::new(3.0, 3.0), Point::new(10.0, 10.0));
        assert_eq!(
            locked_point(&shape, IndexPath::new(0, 1), Point::new(3.0, 3.0)),
            Some(Point::new(3.0, 3.0))
        );
    }

    #[test]
    fn test_locked_point_needs_neighbor() {
        let mut shape = Shape::ruler();
        shape.push(Point::ZERO);
        assert_eq!(locked_point(&shape, IndexPath::new(0, 0), Point::new(5.0, 1.0)), None);
    }
}
