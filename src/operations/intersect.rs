//! Pairwise entity intersection.
//!
//! Entities are decomposed into segments and every segment pair is solved by
//! kind. Circle-arc, arc-arc and anything involving an ellipse have no
//! solver and contribute nothing.

use crate::entity::{segments_of, Entity, Segment};
use crate::math::angle_2d::{angle_in_arc, angle_of};
use crate::math::intersect_2d::{circle_circle, line_circle, segment_segment};
use crate::math::point_2d::dedup_points;
use crate::math::{Point2, CHAIN_EPSILON};

/// All real intersection points between two entities, deduplicated by
/// proximity. Empty when the entities do not meet or no solver covers the
/// segment-kind pair.
#[must_use]
pub fn find_intersections(e1: &Entity, e2: &Entity) -> Vec<Point2> {
    let mut points = Vec::new();
    for a in &segments_of(e1) {
        for b in &segments_of(e2) {
            points.extend(segment_pair(a, b));
        }
    }
    dedup_points(&points, CHAIN_EPSILON)
}

/// Intersections of two primitive segments, finite-extent.
#[must_use]
pub fn segment_pair(a: &Segment, b: &Segment) -> Vec<Point2> {
    match (a, b) {
        (
            Segment::Linear { start: p1, end: p2 },
            Segment::Linear { start: p3, end: p4 },
        ) => segment_segment(p1, p2, p3, p4).into_iter().collect(),
        (Segment::Linear { start, end }, Segment::Circular { center, radius })
        | (Segment::Circular { center, radius }, Segment::Linear { start, end }) => {
            line_circle(start, end, center, *radius)
        }
        (
            Segment::Linear { start, end },
            Segment::CircularArc {
                center,
                radius,
                start_angle,
                end_angle,
            },
        )
        | (
            Segment::CircularArc {
                center,
                radius,
                start_angle,
                end_angle,
            },
            Segment::Linear { start, end },
        ) => line_circle(start, end, center, *radius)
            .into_iter()
            .filter(|p| angle_in_arc(angle_of(center, p), *start_angle, *end_angle))
            .collect(),
        (
            Segment::Circular {
                center: c1,
                radius: r1,
            },
            Segment::Circular {
                center: c2,
                radius: r2,
            },
        ) => circle_circle(c1, *r1, c2, *r2),
        // No circle-arc or arc-arc solver.
        (Segment::Circular { .. } | Segment::CircularArc { .. }, Segment::CircularArc { .. })
        | (Segment::CircularArc { .. }, Segment::Circular { .. }) => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::entity::{Arc, Circle, Dimension, Hatch, Line, Polyline, Rect};

    const TOL: f64 = 1e-9;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Entity {
        Entity::Line(Line::new(Point2::new(x1, y1), Point2::new(x2, y2)))
    }

    #[test]
    fn crossing_lines_meet_once() {
        let pts = find_intersections(&line(0.0, 0.0, 10.0, 0.0), &line(5.0, -5.0, 5.0, 5.0));
        assert_eq!(pts.len(), 1);
        assert!((pts[0].x - 5.0).abs() < TOL && pts[0].y.abs() < TOL);
    }

    #[test]
    fn line_through_circle_meets_twice() {
        let c = Entity::Circle(Circle::new(Point2::new(0.0, 0.0), 5.0));
        let pts = find_intersections(&line(-10.0, 0.0, 10.0, 0.0), &c);
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert!((p.x.abs() - 5.0).abs() < TOL && p.y.abs() < TOL);
        }
    }

    #[test]
    fn line_misses_arc_outside_its_range() {
        // Upper half-circle: the +X axis crossing at (5, 0) is the arc start,
        // the -X crossing at (-5, 0) is the end; a horizontal line at y = -1
        // misses entirely.
        let a = Entity::Arc(Arc::new(Point2::new(0.0, 0.0), 5.0, 0.0, PI));
        assert!(find_intersections(&line(-10.0, -1.0, 10.0, -1.0), &a).is_empty());
        let hits = find_intersections(&line(-10.0, 3.0, 10.0, 3.0), &a);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn rect_crossed_by_line_meets_both_edges() {
        let r = Entity::Rect(Rect::new(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)));
        let pts = find_intersections(&line(-1.0, 2.0, 5.0, 2.0), &r);
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn polyline_contributes_each_edge() {
        let pl = Entity::Polyline(Polyline::new(
            vec![
                Point2::new(0.0, -1.0),
                Point2::new(2.0, 1.0),
                Point2::new(4.0, -1.0),
            ],
            false,
        ));
        let pts = find_intersections(&pl, &line(-1.0, 0.0, 5.0, 0.0));
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn tangent_edge_intersections_are_deduplicated() {
        // The line passes exactly through a polyline vertex: both adjacent
        // edges report the same point and dedup keeps one.
        let pl = Entity::Polyline(Polyline::new(
            vec![
                Point2::new(0.0, -1.0),
                Point2::new(2.0, 0.0),
                Point2::new(4.0, -1.0),
            ],
            false,
        ));
        let pts = find_intersections(&pl, &line(-1.0, 0.0, 5.0, 0.0));
        assert_eq!(pts.len(), 1);
    }

    #[test]
    fn display_kinds_never_intersect_geometry() {
        // A dimension's definition line crosses the drawn line, and the
        // hatch boundary does too; neither annotation yields intersections.
        let l = line(-10.0, 0.0, 10.0, 0.0);
        let dim = Entity::Dimension(Dimension {
            p1: Point2::new(0.0, -5.0),
            p2: Point2::new(0.0, 5.0),
            location: Point2::new(2.0, 0.0),
            text: None,
        });
        let hatch = Entity::Hatch(Hatch {
            boundary: vec![
                Point2::new(-1.0, -1.0),
                Point2::new(1.0, -1.0),
                Point2::new(0.0, 1.0),
            ],
        });
        assert!(find_intersections(&l, &dim).is_empty());
        assert!(find_intersections(&l, &hatch).is_empty());
    }

    #[test]
    fn arc_arc_pairs_are_unsupported() {
        let a1 = Entity::Arc(Arc::new(Point2::new(0.0, 0.0), 5.0, 0.0, PI));
        let a2 = Entity::Arc(Arc::new(Point2::new(4.0, 0.0), 5.0, 0.0, PI));
        assert!(find_intersections(&a1, &a2).is_empty());
    }
}
