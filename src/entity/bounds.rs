//! Axis-aligned bounding boxes for every entity kind.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{BlockSource, Entity};
use crate::math::Point2;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The tight box around a single point.
    #[must_use]
    pub fn from_point(p: &Point2) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// The tight box around a point set. `None` when the set is empty.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self::from_point(first);
        for p in rest {
            bbox.expand_to_include(p);
        }
        Some(bbox)
    }

    /// Grows the box to cover `p`.
    pub fn expand_to_include(&mut self, p: &Point2) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// The smallest box covering both operands.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Overlap test, boundary-inclusive.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Containment test for a point, boundary-inclusive.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// The box grown by `margin` on every side.
    #[must_use]
    pub fn inflated(&self, margin: f64) -> Self {
        Self::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Entity {
    /// Axis-aligned bounding box in drawing coordinates.
    ///
    /// Block references expand through `blocks`; a reference with no
    /// definition collapses to its insertion point.
    #[must_use]
    pub fn bounding_box(&self, blocks: &dyn BlockSource) -> BoundingBox {
        match self {
            Entity::Point(p) => BoundingBox::from_point(&p.position),
            Entity::Line(l) => {
                let mut bbox = BoundingBox::from_point(&l.start);
                bbox.expand_to_include(&l.end);
                bbox
            }
            Entity::Circle(c) => BoundingBox::new(
                c.center.x - c.radius,
                c.center.y - c.radius,
                c.center.x + c.radius,
                c.center.y + c.radius,
            ),
            Entity::Arc(a) => {
                let mut bbox = BoundingBox::from_point(&a.start_point());
                bbox.expand_to_include(&a.end_point());
                // The box reaches a circle extreme only when the arc passes
                // through that quadrant angle.
                for quadrant in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
                    if a.contains_angle(quadrant) {
                        bbox.expand_to_include(&(a.center + a.radius * direction(quadrant)));
                    }
                }
                bbox
            }
            Entity::Rect(r) => {
                let mut bbox = BoundingBox::from_point(&r.corner1);
                bbox.expand_to_include(&r.corner2);
                bbox
            }
            Entity::Polyline(pl) => BoundingBox::from_points(&pl.vertices)
                .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0)),
            Entity::Ellipse(e) => {
                // Extents of a rotated ellipse.
                let (sin_r, cos_r) = e.rotation.sin_cos();
                let dx = ((e.major_radius * cos_r).powi(2) + (e.minor_radius * sin_r).powi(2))
                    .sqrt();
                let dy = ((e.major_radius * sin_r).powi(2) + (e.minor_radius * cos_r).powi(2))
                    .sqrt();
                BoundingBox::new(
                    e.center.x - dx,
                    e.center.y - dy,
                    e.center.x + dx,
                    e.center.y + dy,
                )
            }
            Entity::Text(t) => {
                let width = t.estimated_width();
                let (sin, cos) = t.rotation.sin_cos();
                let mut bbox = BoundingBox::from_point(&t.position);
                for (dx, dy) in [(width, 0.0), (width, t.height), (0.0, t.height)] {
                    bbox.expand_to_include(&Point2::new(
                        t.position.x + dx * cos - dy * sin,
                        t.position.y + dx * sin + dy * cos,
                    ));
                }
                bbox
            }
            Entity::Donut(d) => BoundingBox::new(
                d.center.x - d.outer_radius,
                d.center.y - d.outer_radius,
                d.center.x + d.outer_radius,
                d.center.y + d.outer_radius,
            ),
            Entity::Leader(l) => BoundingBox::from_points(&l.vertices)
                .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0)),
            Entity::Dimension(d) => {
                let mut bbox = BoundingBox::from_point(&d.p1);
                bbox.expand_to_include(&d.p2);
                bbox.expand_to_include(&d.location);
                bbox
            }
            Entity::Hatch(h) => BoundingBox::from_points(&h.boundary)
                .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0)),
            Entity::Image(i) => {
                let corners = i.corners();
                let mut bbox = BoundingBox::from_point(&corners[0]);
                for corner in &corners[1..] {
                    bbox.expand_to_include(corner);
                }
                bbox
            }
            Entity::BlockRef(b) => {
                let expanded = blocks.block_entities(b);
                let mut bbox = BoundingBox::from_point(&b.insert);
                for entity in &expanded {
                    bbox = bbox.union(&entity.bounding_box(blocks));
                }
                bbox
            }
        }
    }
}

fn direction(angle: f64) -> crate::math::Vector2 {
    debug_assert!((0.0..TAU).contains(&angle));
    crate::math::Vector2::new(angle.cos(), angle.sin())
}
