//! Freehand strokes.

use super::{BuildContext, ShapeBehavior, ShapePath};
use crate::layout::Layout;

/// Raw pointer samples. Every pointer-down opens a new section, every drag
/// sample extends it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Freehand;

impl ShapeBehavior for Freehand {
    fn identifier(&self) -> i64 {
        5
    }

    fn name(&self) -> &'static str {
        "Freehand"
    }

    fn can_finish(&self, layout: &Layout) -> bool {
        !layout.is_empty()
    }

    fn should_finish(&self, layout: &Layout) -> bool {
        self.can_finish(layout)
    }

    fn push_continuously(&self) -> bool {
        true
    }

    fn is_magnetizable(&self) -> bool {
        false
    }

    fn supports_aux_tool(&self) -> bool {
        false
    }

    fn update_structure(&self, _ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::IndexPath;
    use crate::shapes::Shape;
    use kurbo::Point;

    #[test]
    fn test_strokes_grow_sections() {
        let mut shape = Shape::freehand();
        assert!(!shape.can_finish());

        shape.push_to_next_section(Point::new(0.0, 0.0));
        shape.push(Point::new(1.0, 1.0));
        shape.push(Point::new(2.0, 1.0));
        assert!(shape.should_finish());

        shape.push_to_next_section(Point::new(10.0, 10.0));
        shape.push(Point::new(11.0, 12.0));

        assert_eq!(shape.layout().section_count(), 2);
        assert_eq!(shape.end_index_path(), Some(IndexPath::new(1, 1)));
        assert_eq!(shape.body().len(), 2);
        assert!(shape.structure().is_empty());
    }

    #[test]
    fn test_finish_stops_pushes() {
        let mut shape = Shape::freehand();
        shape.push_to_next_section(Point::new(0.0, 0.0));
        shape.mark_as_finished();
        shape.push(Point::new(5.0, 5.0));
        shape.push_to_next_section(Point::new(5.0, 5.0));
        assert_eq!(shape.layout().point_count(), 1);
        assert!(!shape.supports_aux_tool());
    }
}
