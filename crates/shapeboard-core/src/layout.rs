//! Sectioned point storage shared by every shape.

use crate::geometry::PointExt;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Address of a point inside a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Ordered sections of ordered points.
///
/// Sections let one shape group disjoint sub-paths (a freehand drawing made
/// of several strokes) behind a single `(section, item)` addressing scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    sections: Vec<Vec<Point>>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sections(sections: Vec<Vec<Point>>) -> Self {
        Self { sections }
    }

    /// True when there are no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of points across all sections.
    pub fn point_count(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn sections(&self) -> &[Vec<Point>] {
        &self.sections
    }

    pub fn section(&self, section: usize) -> Option<&[Point]> {
        self.sections.get(section).map(Vec::as_slice)
    }

    pub fn first(&self) -> Option<&[Point]> {
        self.section(0)
    }

    pub fn last(&self) -> Option<&[Point]> {
        self.sections.last().map(Vec::as_slice)
    }

    /// Number of points in the first section, zero if there is none.
    pub fn first_len(&self) -> usize {
        self.first().map_or(0, <[Point]>::len)
    }

    pub fn get(&self, index: IndexPath) -> Option<Point> {
        self.sections.get(index.section)?.get(index.item).copied()
    }

    pub fn contains_index(&self, index: IndexPath) -> bool {
        self.get(index).is_some()
    }

    /// Replace the point at `index`. Returns false if the address is invalid.
    pub fn set(&mut self, index: IndexPath, point: Point) -> bool {
        match self
            .sections
            .get_mut(index.section)
            .and_then(|s| s.get_mut(index.item))
        {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    /// Append to the last section, opening the first one if needed.
    pub fn push(&mut self, point: Point) {
        match self.sections.last_mut() {
            Some(section) => section.push(point),
            None => self.sections.push(vec![point]),
        }
    }

    /// Open a new section whose first point is `point`.
    pub fn push_to_next_section(&mut self, point: Point) {
        self.sections.push(vec![point]);
    }

    /// Address of the most recently pushed point.
    pub fn end_index_path(&self) -> Option<IndexPath> {
        let section = self.sections.len().checked_sub(1)?;
        let item = self.sections[section].len().checked_sub(1)?;
        Some(IndexPath::new(section, item))
    }

    /// Every point with its address, in push order.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPath, Point)> + '_ {
        self.sections.iter().enumerate().flat_map(|(s, points)| {
            points
                .iter()
                .enumerate()
                .map(move |(i, &p)| (IndexPath::new(s, i), p))
        })
    }

    /// Apply `f` to every point in place.
    pub fn map_points(&mut self, mut f: impl FnMut(Point) -> Point) {
        for section in &mut self.sections {
            for point in section.iter_mut() {
                *point = f(*point);
            }
        }
    }

    /// First point, in push order, within `range` of `location`.
    pub fn first_within(&self, location: Point, range: f64) -> Option<IndexPath> {
        self.iter()
            .find(|(_, p)| p.is_within(location, range))
            .map(|(index, _)| index)
    }

    /// Point within `range` of `location`.
    ///
    /// The earliest section holding a match wins. Inside that section the
    /// most recently pushed point wins.
    pub fn hit_test(&self, location: Point, range: f64) -> Option<IndexPath> {
        self.sections.iter().enumerate().find_map(|(s, points)| {
            points
                .iter()
                .rposition(|p| p.is_within(location, range))
                .map(|i| IndexPath::new(s, i))
        })
    }
}

impl Index<IndexPath> for Layout {
    type Output = Point;

    fn index(&self, index: IndexPath) -> &Point {
        &self.sections[index.section][index.item]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_push_opens_first_section() {
        let mut layout = Layout::new();
        assert!(layout.is_empty());
        layout.push(p(1.0, 1.0));
        layout.push(p(2.0, 2.0));
        assert_eq!(layout.section_count(), 1);
        assert_eq!(layout.first_len(), 2);
        assert_eq!(layout.end_index_path(), Some(IndexPath::new(0, 1)));
    }

    #[test]
    fn test_push_to_next_section() {
        let mut layout = Layout::new();
        layout.push(p(0.0, 0.0));
        layout.push_to_next_section(p(5.0, 5.0));
        layout.push(p(6.0, 6.0));
        assert_eq!(layout.section_count(), 2);
        assert_eq!(layout[IndexPath::new(1, 1)], p(6.0, 6.0));
        assert_eq!(layout.point_count(), 3);
    }

    #[test]
    fn test_set_rejects_invalid_index() {
        let mut layout = Layout::from_sections(vec![vec![p(0.0, 0.0)]]);
        assert!(layout.set(IndexPath::new(0, 0), p(3.0, 3.0)));
        assert!(!layout.set(IndexPath::new(0, 1), p(3.0, 3.0)));
        assert!(!layout.set(IndexPath::new(2, 0), p(3.0, 3.0)));
        assert_eq!(layout.get(IndexPath::new(0, 0)), Some(p(3.0, 3.0)));
    }

    #[test]
    fn test_iter_order() {
        let layout = Layout::from_sections(vec![vec![p(0.0, 0.0), p(1.0, 0.0)], vec![p(2.0, 0.0)]]);
        let indexes: Vec<_> = layout.iter().map(|(i, _)| i).collect();
        assert_eq!(
            indexes,
            vec![IndexPath::new(0, 0), IndexPath::new(0, 1), IndexPath::new(1, 0)]
        );
    }

    #[test]
    fn test_hit_test_prefers_earliest_section_latest_point() {
        let layout = Layout::from_sections(vec![
            vec![p(0.0, 0.0), p(1.0, 0.0)],
            vec![p(0.5, 0.0)],
        ]);
        assert_eq!(layout.hit_test(p(0.0, 0.0), 2.0), Some(IndexPath::new(0, 1)));
        assert_eq!(layout.hit_test(p(0.5, 5.0), 2.0), None);
        assert_eq!(layout.hit_test(p(1.0, 0.0), 0.6), Some(IndexPath::new(0, 1)));
        assert_eq!(layout.first_within(p(0.0, 0.0), 2.0), Some(IndexPath::new(0, 0)));
        assert_eq!(layout.hit_test(p(50.0, 0.0), 2.0), None);
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let layout = Layout::from_sections(vec![vec![p(1.0, 2.0)]]);
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(json, r#"[[{"x":1.0,"y":2.0}]]"#);
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }
}
