//! Decomposition of entities into primitive curve segments.
//!
//! Intersection, trim and snap all work over this decomposition rather than
//! per entity kind, so a rect and a polyline flow through the same pairwise
//! solvers a line does.

use super::{Arc as ArcEntity, Entity};
use crate::math::Point2;

/// A primitive curve piece of a decomposed entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// A straight segment from `start` to `end`.
    Linear { start: Point2, end: Point2 },
    /// A full circle.
    Circular { center: Point2, radius: f64 },
    /// A circular arc, counter-clockwise from `start_angle` to `end_angle`.
    CircularArc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl Segment {
    /// Start point of the segment. A full circle starts at angle 0.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        match *self {
            Segment::Linear { start, .. } => start,
            Segment::Circular { center, radius } => Point2::new(center.x + radius, center.y),
            Segment::CircularArc {
                center,
                radius,
                start_angle,
                ..
            } => Point2::new(
                center.x + radius * start_angle.cos(),
                center.y + radius * start_angle.sin(),
            ),
        }
    }

    /// End point of the segment. A full circle ends where it starts.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        match *self {
            Segment::Linear { end, .. } => end,
            Segment::Circular { center, radius } => Point2::new(center.x + radius, center.y),
            Segment::CircularArc {
                center,
                radius,
                end_angle,
                ..
            } => Point2::new(
                center.x + radius * end_angle.cos(),
                center.y + radius * end_angle.sin(),
            ),
        }
    }
}

/// Decomposes an entity into its primitive segments.
///
/// Only the geometric subset participates: lines yield one linear segment,
/// rects four, polylines one per edge (plus the closing edge when closed),
/// circles and arcs one circular piece. Display-oriented kinds (text,
/// dimension, hatch, donut, leader, image, …) and ellipses yield nothing —
/// they never enter intersection, trim or snap math.
#[must_use]
pub fn segments_of(entity: &Entity) -> Vec<Segment> {
    match entity {
        Entity::Line(l) => vec![Segment::Linear {
            start: l.start,
            end: l.end,
        }],
        Entity::Circle(c) => vec![Segment::Circular {
            center: c.center,
            radius: c.radius,
        }],
        Entity::Arc(a) => vec![arc_segment(a)],
        Entity::Rect(r) => {
            let c = r.corners();
            (0..4)
                .map(|i| Segment::Linear {
                    start: c[i],
                    end: c[(i + 1) % 4],
                })
                .collect()
        }
        Entity::Polyline(pl) => chain_segments(&pl.vertices, pl.closed),
        Entity::Point(_)
        | Entity::Ellipse(_)
        | Entity::Text(_)
        | Entity::Donut(_)
        | Entity::Leader(_)
        | Entity::Dimension(_)
        | Entity::Hatch(_)
        | Entity::Image(_)
        | Entity::BlockRef(_) => Vec::new(),
    }
}

/// Display outline of a kind excluded from [`segments_of`].
///
/// Narrow-phase hit-testing still needs an exact boundary for donuts,
/// leaders, hatches and dimensions; this decomposition serves that test
/// alone and never feeds the intersection solvers.
#[must_use]
pub fn outline_of(entity: &Entity) -> Vec<Segment> {
    match entity {
        Entity::Donut(d) => vec![
            Segment::Circular {
                center: d.center,
                radius: d.inner_radius,
            },
            Segment::Circular {
                center: d.center,
                radius: d.outer_radius,
            },
        ],
        Entity::Leader(l) => chain_segments(&l.vertices, false),
        Entity::Hatch(h) => chain_segments(&h.boundary, true),
        Entity::Dimension(d) => vec![Segment::Linear {
            start: d.p1,
            end: d.p2,
        }],
        _ => Vec::new(),
    }
}

fn arc_segment(a: &ArcEntity) -> Segment {
    Segment::CircularArc {
        center: a.center,
        radius: a.radius,
        start_angle: a.start_angle,
        end_angle: a.end_angle,
    }
}

fn chain_segments(vertices: &[Point2], closed: bool) -> Vec<Segment> {
    if vertices.len() < 2 {
        return Vec::new();
    }
    let mut out: Vec<Segment> = vertices
        .windows(2)
        .map(|w| Segment::Linear {
            start: w[0],
            end: w[1],
        })
        .collect();
    if closed && vertices.len() > 2 {
        out.push(Segment::Linear {
            start: vertices[vertices.len() - 1],
            end: vertices[0],
        });
    }
    out
}
