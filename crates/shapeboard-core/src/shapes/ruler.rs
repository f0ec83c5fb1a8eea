//! Ruler shape: a single measured segment.

use super::{BuildContext, ShapeBehavior, ShapePath};
use crate::geometry::Line;
use crate::layout::{IndexPath, Layout};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ruler {
    line: Option<Line>,
}

impl Ruler {
    /// The measured segment, once both ends are placed.
    pub fn line(&self) -> Option<Line> {
        self.line
    }

    /// Length of the measured segment.
    pub fn length(&self) -> Option<f64> {
        self.line.map(|l| l.distance())
    }
}

impl ShapeBehavior for Ruler {
    fn identifier(&self) -> i64 {
        0
    }

    fn name(&self) -> &'static str {
        "Ruler"
    }

    fn can_finish(&self, layout: &Layout) -> bool {
        layout.first_len() == 2
    }

    fn should_finish(&self, layout: &Layout) -> bool {
        self.can_finish(layout)
    }

    fn accepts_push(&self, layout: &Layout) -> bool {
        !self.can_finish(layout)
    }

    fn is_locked(&self, _index: IndexPath) -> bool {
        true
    }

    fn layout_did_update(&mut self, layout: &Layout, _rotation_angle: f64) {
        self.line = match layout.first() {
            Some(&[from, to]) => Some(Line::new(from, to)),
            _ => None,
        };
    }

    fn update_structure(&self, _ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        Vec::new()
    }
}
