//! Shape definitions for the canvas.
//!
//! A [`Shape`] owns the state every kind shares (layout, rotation, style,
//! finish and selection flags) and caches two lists of render paths:
//! `structure`, the construction preview drawn while unfinished, and `body`,
//! the committed geometry. Both are rebuilt by every mutator before it
//! returns. Kind-specific rules live behind [`ShapeBehavior`], implemented by
//! one struct per variant of [`ShapeKind`].

mod circle;
mod freehand;
pub(crate) mod path;
mod polygon;
mod protractor;
mod rectangle;
mod ruler;
mod style;

pub use circle::CircleShape;
pub use freehand::Freehand;
pub use path::{PaintMethod, ShapePath};
pub use polygon::Polygon;
pub use protractor::Protractor;
pub use rectangle::RectangleShape;
pub use ruler::Ruler;
pub use style::{SerializableColor, ShapeStyle};

use crate::codec::CodecError;
use crate::geometry::{Arc, Circle, Line, PointExt, RectSelect};
use crate::layout::{IndexPath, Layout};
use crate::render::RenderSink;
use kurbo::{BezPath, ParamCurveNearest, Point, Rect, Shape as _, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A symbolic point reference that survives layout edits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointDescriptor {
    /// A point of the shape's own layout.
    IndexPath { item: usize, section: usize },
    /// A coordinate independent of the layout.
    Fixed { x: f64, y: f64 },
}

impl PointDescriptor {
    pub fn index(index: IndexPath) -> Self {
        PointDescriptor::IndexPath {
            item: index.item,
            section: index.section,
        }
    }

    pub fn fixed(point: Point) -> Self {
        PointDescriptor::Fixed {
            x: point.x,
            y: point.y,
        }
    }

    /// The layout address, if this descriptor points into the layout.
    pub fn index_path(&self) -> Option<IndexPath> {
        match *self {
            PointDescriptor::IndexPath { item, section } => Some(IndexPath::new(section, item)),
            PointDescriptor::Fixed { .. } => None,
        }
    }
}

impl Default for PointDescriptor {
    fn default() -> Self {
        PointDescriptor::IndexPath {
            item: 0,
            section: 0,
        }
    }
}

/// Read-only inputs for building a shape's render paths.
pub struct BuildContext<'a> {
    pub layout: &'a Layout,
    pub style: &'a ShapeStyle,
    pub rotation_angle: f64,
    pub is_finished: bool,
}

impl BuildContext<'_> {
    /// One path per layout section, painted with `method`.
    pub fn section_paths(&self, method: PaintMethod) -> Vec<ShapePath> {
        self.layout
            .sections()
            .iter()
            .map(|points| {
                ShapePath::build(method.clone(), self.style.stroke_color, |p| {
                    path::add_lines(p, points)
                })
            })
            .collect()
    }
}

/// Per-kind rules of a shape.
///
/// The defaults describe a generic polyline shape: every section is drawn as
/// a dashed preview while unfinished and as a solid stroke once it can finish.
pub trait ShapeBehavior {
    /// Stable type identifier used by serialization.
    fn identifier(&self) -> i64;

    /// Human-readable kind name.
    fn name(&self) -> &'static str;

    fn can_finish(&self, layout: &Layout) -> bool;

    /// Finish the drawing session as soon as the pointer is released.
    fn should_finish(&self, _layout: &Layout) -> bool {
        false
    }

    /// Extra push guard on top of the shared one.
    fn accepts_push(&self, _layout: &Layout) -> bool {
        true
    }

    /// Every drag sample extends the layout instead of moving the last point.
    fn push_continuously(&self) -> bool {
        false
    }

    /// Whether the point at `index` snaps to an axis while locking is active.
    fn is_locked(&self, _index: IndexPath) -> bool {
        false
    }

    fn is_magnetizable(&self) -> bool {
        true
    }

    /// Whether auxiliary guide lines are drawn while editing points.
    fn supports_aux_tool(&self) -> bool {
        true
    }

    /// Refresh derived geometry after the layout or rotation changed.
    fn layout_did_update(&mut self, _layout: &Layout, _rotation_angle: f64) {}

    fn update_structure(&self, ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        ctx.section_paths(PaintMethod::default_dash(ctx.style.line_width))
    }

    fn update_body(&self, ctx: &BuildContext<'_>) -> Vec<ShapePath> {
        ctx.section_paths(PaintMethod::Stroke(ctx.style.line_width))
    }

    /// Rubber-band selection test.
    fn select_test(&self, layout: &Layout, rect: Rect) -> bool {
        layout
            .sections()
            .iter()
            .any(|points| rect.can_select_points(points, false))
    }

    /// Opaque per-kind payload persisted alongside the shared fields.
    fn user_info(&self) -> Option<Vec<u8>> {
        None
    }

    fn apply_user_info(&mut self, _data: &[u8]) -> Result<(), CodecError> {
        Ok(())
    }
}

/// The closed set of shape kinds, holding each kind's derived geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Ruler(Ruler),
    Rectangle(RectangleShape),
    Polygon(Polygon),
    Circle(CircleShape),
    Protractor(Protractor),
    Freehand(Freehand),
}

impl ShapeKind {
    pub fn behavior(&self) -> &dyn ShapeBehavior {
        match self {
            ShapeKind::Ruler(s) => s,
            ShapeKind::Rectangle(s) => s,
            ShapeKind::Polygon(s) => s,
            ShapeKind::Circle(s) => s,
            ShapeKind::Protractor(s) => s,
            ShapeKind::Freehand(s) => s,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn ShapeBehavior {
        match self {
            ShapeKind::Ruler(s) => s,
            ShapeKind::Rectangle(s) => s,
            ShapeKind::Polygon(s) => s,
            ShapeKind::Circle(s) => s,
            ShapeKind::Protractor(s) => s,
            ShapeKind::Freehand(s) => s,
        }
    }
}

/// Capability of shapes whose points other shapes can snap onto.
pub trait Magnetizable {
    fn magnet_layout(&self) -> &Layout;

    /// Magnets are only offered once the shape is complete.
    fn magnets_ready(&self) -> bool;

    fn resolve(&self, descriptor: PointDescriptor) -> Option<Point>;

    /// Every layout point by default.
    fn magnets(&self) -> Vec<PointDescriptor> {
        self.magnet_layout()
            .iter()
            .map(|(index, _)| PointDescriptor::index(index))
            .collect()
    }

    /// First magnet within `range` of `location`.
    fn magnet(&self, location: Point, range: f64) -> Option<PointDescriptor> {
        if !self.magnets_ready() {
            return None;
        }
        self.magnets().into_iter().find(|&magnet| {
            self.resolve(magnet)
                .is_some_and(|point| point.is_within(location, range))
        })
    }
}

/// A shape on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    layout: Layout,
    rotation_angle: f64,
    rotation_anchor: PointDescriptor,
    style: ShapeStyle,
    is_finished: bool,
    is_selected: bool,
    structure: Vec<ShapePath>,
    body: Vec<ShapePath>,
}

impl Shape {
    /// Create an empty, unfinished shape of the given kind.
    pub fn new(kind: ShapeKind) -> Self {
        let mut shape = Self {
            id: Uuid::new_v4(),
            kind,
            layout: Layout::new(),
            rotation_angle: 0.0,
            rotation_anchor: PointDescriptor::default(),
            style: ShapeStyle::default(),
            is_finished: false,
            is_selected: false,
            structure: Vec::new(),
            body: Vec::new(),
        };
        shape.refresh();
        shape
    }

    pub fn ruler() -> Self {
        Self::new(ShapeKind::Ruler(Ruler::default()))
    }

    pub fn rectangle() -> Self {
        Self::new(ShapeKind::Rectangle(RectangleShape::default()))
    }

    /// A polygon that closes back onto its first point when `closed`.
    pub fn polygon(closed: bool) -> Self {
        Self::new(ShapeKind::Polygon(Polygon::new(closed)))
    }

    pub fn circle() -> Self {
        Self::new(ShapeKind::Circle(CircleShape::default()))
    }

    pub fn protractor() -> Self {
        Self::new(ShapeKind::Protractor(Protractor::default()))
    }

    pub fn freehand() -> Self {
        Self::new(ShapeKind::Freehand(Freehand))
    }

    /// A finished ruler along `line`.
    pub fn from_line(line: Line) -> Self {
        let mut shape = Self::ruler();
        shape.push(line.from);
        shape.push(line.to);
        shape.mark_as_finished();
        shape
    }

    /// A finished circle through three points of `circle`.
    pub fn from_circle(circle: Circle) -> Self {
        let mut shape = Self::circle();
        for angle in [0.0, std::f64::consts::FRAC_PI_2, std::f64::consts::PI] {
            shape.push(circle.center.extended(circle.radius, angle));
        }
        shape.mark_as_finished();
        shape
    }

    /// A finished protractor measuring `arc`.
    pub fn from_arc(arc: Arc) -> Self {
        let mut shape = Self::protractor();
        shape.push(arc.start_point());
        shape.push(arc.center);
        shape.push(arc.end_point());
        shape.mark_as_finished();
        shape
    }

    /// Rebuild a committed shape from persisted parts.
    pub(crate) fn restore(
        mut kind: ShapeKind,
        layout: Layout,
        rotation_angle: f64,
        rotation_anchor: PointDescriptor,
        style: ShapeStyle,
        user_info: Option<&[u8]>,
    ) -> Result<Self, CodecError> {
        if let Some(data) = user_info {
            kind.behavior_mut().apply_user_info(data)?;
        }
        let mut shape = Self {
            id: Uuid::new_v4(),
            kind,
            layout,
            rotation_angle,
            rotation_anchor,
            style,
            is_finished: false,
            is_selected: false,
            structure: Vec::new(),
            body: Vec::new(),
        };
        if let Some(index) = rotation_anchor.index_path() {
            if !shape.layout.contains_index(index) {
                return Err(CodecError::CorruptPayload(format!(
                    "rotation anchor {index:?} is outside the layout"
                )));
            }
        }
        shape.mark_as_finished();
        if !shape.is_finished {
            return Err(CodecError::CorruptPayload(format!(
                "layout does not describe a finished {}",
                shape.name()
            )));
        }
        Ok(shape)
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn identifier(&self) -> i64 {
        self.kind.behavior().identifier()
    }

    pub fn name(&self) -> &'static str {
        self.kind.behavior().name()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn rotation_anchor(&self) -> PointDescriptor {
        self.rotation_anchor
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    /// Construction preview, drawn only while unfinished.
    pub fn structure(&self) -> &[ShapePath] {
        &self.structure
    }

    /// Committed render geometry.
    pub fn body(&self) -> &[ShapePath] {
        &self.body
    }

    /// All body paths merged into one, `None` if the body is empty.
    pub fn body_path(&self) -> Option<BezPath> {
        if self.body.is_empty() {
            return None;
        }
        let mut merged = BezPath::new();
        for part in &self.body {
            merged.extend(part.path.elements().iter().copied());
        }
        Some(merged)
    }

    pub fn can_finish(&self) -> bool {
        self.kind.behavior().can_finish(&self.layout)
    }

    pub fn should_finish(&self) -> bool {
        self.kind.behavior().should_finish(&self.layout)
    }

    pub fn push_continuously(&self) -> bool {
        self.kind.behavior().push_continuously()
    }

    pub fn is_locked(&self, index: IndexPath) -> bool {
        self.kind.behavior().is_locked(index)
    }

    pub fn supports_aux_tool(&self) -> bool {
        self.kind.behavior().supports_aux_tool()
    }

    /// Magnet capability, if this kind offers one.
    pub fn as_magnetizable(&self) -> Option<&dyn Magnetizable> {
        if self.kind.behavior().is_magnetizable() {
            Some(self)
        } else {
            None
        }
    }

    pub fn end_index_path(&self) -> Option<IndexPath> {
        self.layout.end_index_path()
    }

    pub fn point(&self, index: IndexPath) -> Option<Point> {
        self.layout.get(index)
    }

    /// Resolve a descriptor against this shape's layout.
    pub fn point_for(&self, descriptor: PointDescriptor) -> Option<Point> {
        match descriptor {
            PointDescriptor::IndexPath { item, section } => {
                self.layout.get(IndexPath::new(section, item))
            }
            PointDescriptor::Fixed { x, y } => Some(Point::new(x, y)),
        }
    }

    /// Pivot for rotation, defined once the shape can finish.
    pub fn rotation_center(&self) -> Option<Point> {
        if !self.can_finish() {
            return None;
        }
        self.point_for(self.rotation_anchor)
    }

    /// Center of the body's bounding box.
    pub fn center(&self) -> Option<Point> {
        self.body_path().map(|path| path.bounding_box().center())
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
        self.refresh();
    }

    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.style.stroke_color = color;
        self.refresh();
    }

    pub fn set_fill_color(&mut self, color: SerializableColor) {
        self.style.fill_color = color;
        self.refresh();
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.style.line_width = width;
        self.refresh();
    }

    /// Open or close a polygon. Returns false for other kinds.
    pub fn set_closed(&mut self, closed: bool) -> bool {
        let ShapeKind::Polygon(polygon) = &mut self.kind else {
            return false;
        };
        polygon.set_closed(closed);
        self.refresh();
        true
    }

    /// Append a point while under construction.
    ///
    /// Ignored once finished, and once the shape wants to finish unless it
    /// pushes continuously.
    pub fn push(&mut self, point: Point) {
        if self.is_finished || (self.should_finish() && !self.push_continuously()) {
            return;
        }
        if !self.kind.behavior().accepts_push(&self.layout) {
            return;
        }
        self.layout.push(point);
        self.refresh();
    }

    /// Start a new section with `point`.
    pub fn push_to_next_section(&mut self, point: Point) {
        if self.is_finished {
            return;
        }
        self.layout.push_to_next_section(point);
        self.refresh();
    }

    /// Move the point at `index`. Returns false for an invalid address.
    pub fn update_point(&mut self, point: Point, index: IndexPath) -> bool {
        if !self.layout.set(index, point) {
            return false;
        }
        self.refresh();
        true
    }

    /// Move the most recently pushed point.
    pub fn update_last(&mut self, point: Point) {
        if let Some(index) = self.end_index_path() {
            self.update_point(point, index);
        }
    }

    /// Translate every point and a fixed rotation anchor.
    pub fn translate(&mut self, offset: Vec2) {
        if !self.can_finish() {
            return;
        }
        if let PointDescriptor::Fixed { x, y } = self.rotation_anchor {
            self.rotation_anchor = PointDescriptor::Fixed {
                x: x + offset.x,
                y: y + offset.y,
            };
        }
        self.layout.map_points(|p| p + offset);
        self.refresh();
    }

    /// Scale every point and a fixed rotation anchor about the origin.
    pub fn scale(&mut self, mx: f64, my: f64) {
        if let PointDescriptor::Fixed { x, y } = self.rotation_anchor {
            self.set_anchor(PointDescriptor::Fixed {
                x: x * mx,
                y: y * my,
            });
        }
        self.layout.map_points(|p| p.scaled(mx, my));
        self.refresh();
    }

    /// Change the rotation pivot. Rejected until the shape can finish, and
    /// for layout addresses that do not exist.
    pub fn set_anchor(&mut self, anchor: PointDescriptor) -> bool {
        if !self.can_finish() {
            return false;
        }
        if let Some(index) = anchor.index_path() {
            if !self.layout.contains_index(index) {
                log::warn!("Rejected rotation anchor {index:?} outside the layout");
                return false;
            }
        }
        self.rotation_anchor = anchor;
        self.refresh();
        true
    }

    /// Rotate to the absolute `angle` about the rotation center.
    pub fn rotate(&mut self, angle: f64) {
        let Some(center) = self.rotation_center() else {
            return;
        };
        let delta = angle - self.rotation_angle;
        self.layout.map_points(|p| p.rotated(center, delta));
        self.rotation_angle = angle;
        self.refresh();
    }

    /// Commit the shape. Has no effect until it can finish.
    pub fn mark_as_finished(&mut self) {
        if !self.can_finish() {
            return;
        }
        self.is_finished = true;
        self.refresh();
    }

    /// Layout point within `range` of `location`; see [`Layout::hit_test`].
    pub fn hit_test_point(&self, location: Point, range: f64) -> Option<IndexPath> {
        self.layout.hit_test(location, range)
    }

    /// Whether `location` is within `range` of the body outline.
    pub fn hit_test_body(&self, location: Point, range: f64) -> bool {
        let range_sq = range * range;
        self.body.iter().any(|part| {
            part.path
                .segments()
                .any(|seg| seg.nearest(location, 1e-6).distance_sq <= range_sq)
        })
    }

    pub fn select_test(&self, rect: Rect) -> bool {
        self.kind.behavior().select_test(&self.layout, rect)
    }

    /// Persisted per-kind payload.
    pub fn user_info(&self) -> Option<Vec<u8>> {
        self.kind.behavior().user_info()
    }

    /// An independent committed copy with a fresh id.
    ///
    /// # Panics
    ///
    /// Panics if the shape is not finished.
    pub fn duplicate(&self) -> Shape {
        assert!(self.is_finished, "duplicating an unfinished {}", self.name());
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.is_selected = false;
        copy
    }

    /// Draw the preview (while unfinished) and the body.
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        if !self.is_finished {
            for part in &self.structure {
                part.draw(sink);
            }
        }
        for part in &self.body {
            part.draw(sink);
        }
    }

    fn refresh(&mut self) {
        self.kind
            .behavior_mut()
            .layout_did_update(&self.layout, self.rotation_angle);
        let ctx = BuildContext {
            layout: &self.layout,
            style: &self.style,
            rotation_angle: self.rotation_angle,
            is_finished: self.is_finished,
        };
        let behavior = self.kind.behavior();
        self.structure = behavior.update_structure(&ctx);
        self.body = if behavior.can_finish(&self.layout) {
            behavior.update_body(&ctx)
        } else {
            Vec::new()
        };
    }
}

impl Magnetizable for Shape {
    fn magnet_layout(&self) -> &Layout {
        &self.layout
    }

    fn magnets_ready(&self) -> bool {
        self.can_finish()
    }

    fn resolve(&self, descriptor: PointDescriptor) -> Option<Point> {
        self.point_for(descriptor)
    }
}
