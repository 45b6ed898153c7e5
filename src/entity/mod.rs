//! The drafted entity model.
//!
//! `Entity` is a closed tagged union over every drafted kind. Only the
//! geometric subset (line, circle, arc, rect, polyline) participates in
//! intersection/offset/trim math; display-oriented kinds (text, dimension,
//! hatch, image, …) participate in hit-testing and bounding boxes only.
mod bounds;
mod segment;

pub use bounds::BoundingBox;
pub use segment::{outline_of, segments_of, Segment};

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::math::angle_2d::{angle_in_arc, ccw_delta, normalize_angle};
use crate::math::point_2d::{midpoint, polar_point};
use crate::math::Point2;

/// A drafted object, described by a tagged variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Point(PointEntity),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Rect(Rect),
    Polyline(Polyline),
    Ellipse(Ellipse),
    Text(Text),
    Donut(Donut),
    Leader(Leader),
    Dimension(Dimension),
    Hatch(Hatch),
    Image(Image),
    BlockRef(BlockRef),
}

impl Entity {
    /// Returns the kind name of this entity.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Point(_) => "point",
            Entity::Line(_) => "line",
            Entity::Circle(_) => "circle",
            Entity::Arc(_) => "arc",
            Entity::Rect(_) => "rect",
            Entity::Polyline(_) => "polyline",
            Entity::Ellipse(_) => "ellipse",
            Entity::Text(_) => "text",
            Entity::Donut(_) => "donut",
            Entity::Leader(_) => "leader",
            Entity::Dimension(_) => "dimension",
            Entity::Hatch(_) => "hatch",
            Entity::Image(_) => "image",
            Entity::BlockRef(_) => "block-ref",
        }
    }

    /// Grip points for interactive editing: endpoints, centers, vertices.
    ///
    /// Block references expand through `blocks` and collect the grips of the
    /// expanded definition entities.
    #[must_use]
    pub fn grip_points(&self, blocks: &dyn BlockSource) -> Vec<Point2> {
        match self {
            Entity::Point(p) => vec![p.position],
            Entity::Line(l) => vec![l.start, l.midpoint(), l.end],
            Entity::Circle(c) => vec![c.center],
            Entity::Arc(a) => vec![a.start_point(), a.mid_point(), a.end_point(), a.center],
            Entity::Rect(r) => {
                let mut grips = r.corners().to_vec();
                grips.push(r.center());
                grips
            }
            Entity::Polyline(pl) => pl.vertices.clone(),
            Entity::Ellipse(e) => vec![e.center],
            Entity::Text(t) => vec![t.position],
            Entity::Donut(d) => vec![d.center],
            Entity::Leader(l) => l.vertices.clone(),
            Entity::Dimension(d) => vec![d.p1, d.p2, d.location],
            Entity::Hatch(h) => h.boundary.clone(),
            Entity::Image(i) => vec![i.position],
            Entity::BlockRef(b) => {
                let mut grips = vec![b.insert];
                for entity in blocks.block_entities(b) {
                    grips.extend(entity.grip_points(blocks));
                }
                grips
            }
        }
    }
}

/// Supplies expanded block-definition entities for a block reference.
///
/// Implemented by the document/state collaborator; the expansion applies the
/// reference's insertion transform so the returned entities are in drawing
/// coordinates.
pub trait BlockSource {
    fn block_entities(&self, block_ref: &BlockRef) -> Vec<Entity>;
}

/// A [`BlockSource`] with no block definitions. Every reference expands to
/// nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBlocks;

impl BlockSource for NoBlocks {
    fn block_entities(&self, _block_ref: &BlockRef) -> Vec<Entity> {
        Vec::new()
    }
}

/// A point entity (a drafted node).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointEntity {
    pub position: Point2,
}

/// A line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Segment midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        midpoint(&self.start, &self.end)
    }
}

/// A full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Point on the circle at the given angle.
    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        polar_point(&self.center, angle, self.radius)
    }

    /// Circumference.
    #[must_use]
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }
}

/// A circular arc spanning `start_angle → end_angle` counter-clockwise.
///
/// Angles are in radians. `start_angle > end_angle` means the arc wraps
/// through 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    #[must_use]
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: normalize_angle(start_angle),
            end_angle: normalize_angle(end_angle),
        }
    }

    /// Counter-clockwise sweep from start to end, in `[0, 2π)`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        ccw_delta(self.start_angle, self.end_angle)
    }

    /// Arc start point.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        polar_point(&self.center, self.start_angle, self.radius)
    }

    /// Arc end point.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        polar_point(&self.center, self.end_angle, self.radius)
    }

    /// Point halfway along the arc (by angle).
    #[must_use]
    pub fn mid_point(&self) -> Point2 {
        let mid = self.start_angle + self.sweep() * 0.5;
        polar_point(&self.center, mid, self.radius)
    }

    /// Wrap-aware angular membership test.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle_in_arc(angle, self.start_angle, self.end_angle)
    }

    /// Arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.sweep() * self.radius
    }
}

/// An axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub corner1: Point2,
    pub corner2: Point2,
}

impl Rect {
    #[must_use]
    pub fn new(corner1: Point2, corner2: Point2) -> Self {
        Self { corner1, corner2 }
    }

    /// The four corners in counter-clockwise order starting at the
    /// min-x/min-y corner.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        let min_x = self.corner1.x.min(self.corner2.x);
        let max_x = self.corner1.x.max(self.corner2.x);
        let min_y = self.corner1.y.min(self.corner2.y);
        let max_y = self.corner1.y.max(self.corner2.y);
        [
            Point2::new(min_x, min_y),
            Point2::new(max_x, min_y),
            Point2::new(max_x, max_y),
            Point2::new(min_x, max_y),
        ]
    }

    /// Rectangle center.
    #[must_use]
    pub fn center(&self) -> Point2 {
        midpoint(&self.corner1, &self.corner2)
    }

    /// Rectangle width (always ≥ 0).
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.corner2.x - self.corner1.x).abs()
    }

    /// Rectangle height (always ≥ 0).
    #[must_use]
    pub fn height(&self) -> f64 {
        (self.corner2.y - self.corner1.y).abs()
    }
}

/// A polyline of straight segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point2>,
    pub closed: bool,
}

impl Polyline {
    #[must_use]
    pub fn new(vertices: Vec<Point2>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// Number of segments (the closing segment counts when closed).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Endpoints of segment `i`.
    ///
    /// `i` must be below [`Self::segment_count`]; only the closing segment
    /// of a closed polyline wraps back to the first vertex.
    #[must_use]
    pub fn segment(&self, i: usize) -> (Point2, Point2) {
        debug_assert!(i < self.segment_count());
        let end = if self.closed && i + 1 == self.vertices.len() {
            0
        } else {
            i + 1
        };
        (self.vertices[i], self.vertices[end])
    }

    /// Total length across all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        (0..self.segment_count())
            .map(|i| {
                let (a, b) = self.segment(i);
                (b - a).norm()
            })
            .sum()
    }
}

/// An ellipse (or the full ellipse outline; no arc subrange).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Point2,
    pub major_radius: f64,
    pub minor_radius: f64,
    /// Rotation of the major axis from +X, in radians.
    pub rotation: f64,
}

impl Ellipse {
    #[must_use]
    pub fn new(center: Point2, major_radius: f64, minor_radius: f64, rotation: f64) -> Self {
        Self {
            center,
            major_radius,
            minor_radius,
            rotation,
        }
    }

    /// Point on the ellipse at parametric angle `t` (not the geometric
    /// angle), rotation-aware.
    #[must_use]
    pub fn point_at_param(&self, t: f64) -> Point2 {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let x = self.major_radius * t.cos();
        let y = self.minor_radius * t.sin();
        Point2::new(
            self.center.x + x * cos_r - y * sin_r,
            self.center.y + x * sin_r + y * cos_r,
        )
    }
}

/// A text label. Participates in hit-testing and bounds only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub position: Point2,
    pub content: String,
    pub height: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl Text {
    /// Estimated width: 0.6 × height per character.
    #[must_use]
    pub fn estimated_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.height * 0.6
    }
}

/// A filled annulus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Donut {
    pub center: Point2,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// A leader line (annotation pointer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub vertices: Vec<Point2>,
}

/// A linear dimension between two definition points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub p1: Point2,
    pub p2: Point2,
    /// Placement of the dimension line.
    pub location: Point2,
    pub text: Option<String>,
}

impl Dimension {
    /// Measured distance between the definition points.
    #[must_use]
    pub fn measurement(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }
}

/// A hatched region bounded by a point chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hatch {
    pub boundary: Vec<Point2>,
}

/// A raster image placed in the drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Bottom-left corner before rotation.
    pub position: Point2,
    pub width: f64,
    pub height: f64,
    /// Rotation around `position`, in radians.
    pub rotation: f64,
    pub path: String,
}

impl Image {
    /// The four image corners in drawing coordinates (rotation applied).
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        let (sin, cos) = self.rotation.sin_cos();
        let place = |dx: f64, dy: f64| {
            Point2::new(
                self.position.x + dx * cos - dy * sin,
                self.position.y + dx * sin + dy * cos,
            )
        };
        [
            place(0.0, 0.0),
            place(self.width, 0.0),
            place(self.width, self.height),
            place(0.0, self.height),
        ]
    }
}

/// A reference to a named block definition with an insertion transform.
///
/// The reference owns only the transform; the definition entities live in
/// the document and are expanded through [`BlockSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRef {
    pub block: String,
    pub insert: Point2,
    /// Rotation in radians.
    pub rotation: f64,
    pub scale: f64,
}
