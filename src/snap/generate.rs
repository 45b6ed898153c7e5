//! Candidate generation, one routine per snap mode.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{SnapContext, SnapMode};
use crate::entity::{segments_of, Entity, Segment};
use crate::math::angle_2d::{angle_in_arc, angle_of};
use crate::math::distance_2d::{closest_point_on_segment, projection_param};
use crate::math::intersect_2d::{line_circle_unbounded, line_line};
use crate::math::point_2d::{midpoint, polar_point, snap_to_grid};
use crate::math::{Point2, CHAIN_EPSILON};
use crate::operations::intersect::find_intersections;

pub(super) fn candidates(
    mode: SnapMode,
    cursor: &Point2,
    entities: &[Entity],
    ctx: &SnapContext,
) -> Vec<Point2> {
    match mode {
        SnapMode::Intersection => intersections(entities),
        SnapMode::Endpoint => per_segment(entities, endpoint_points),
        SnapMode::Midpoint => per_segment(entities, midpoint_points),
        SnapMode::Center => centers(entities),
        SnapMode::Quadrant => quadrants(entities),
        SnapMode::Node => nodes(entities),
        SnapMode::Perpendicular => perpendiculars(cursor, entities, ctx),
        SnapMode::Tangent => tangents(entities, ctx),
        SnapMode::Extension => extensions(cursor, entities),
        SnapMode::ApparentIntersection => apparent_intersections(entities),
        SnapMode::Nearest => nearest_points(cursor, entities),
        SnapMode::Grid => grid_point(cursor, ctx),
    }
}

fn per_segment(entities: &[Entity], f: fn(&Segment, &mut Vec<Point2>)) -> Vec<Point2> {
    let mut out = Vec::new();
    for entity in entities {
        for segment in &segments_of(entity) {
            f(segment, &mut out);
        }
    }
    out
}

fn endpoint_points(segment: &Segment, out: &mut Vec<Point2>) {
    match segment {
        Segment::Linear { .. } | Segment::CircularArc { .. } => {
            out.push(segment.start_point());
            out.push(segment.end_point());
        }
        Segment::Circular { .. } => {}
    }
}

fn midpoint_points(segment: &Segment, out: &mut Vec<Point2>) {
    match *segment {
        Segment::Linear { start, end } => out.push(midpoint(&start, &end)),
        Segment::CircularArc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            let sweep = crate::math::angle_2d::ccw_delta(start_angle, end_angle);
            out.push(polar_point(&center, start_angle + sweep * 0.5, radius));
        }
        Segment::Circular { .. } => {}
    }
}

fn centers(entities: &[Entity]) -> Vec<Point2> {
    entities
        .iter()
        .filter_map(|entity| match entity {
            Entity::Circle(c) => Some(c.center),
            Entity::Arc(a) => Some(a.center),
            Entity::Donut(d) => Some(d.center),
            Entity::Ellipse(e) => Some(e.center),
            _ => None,
        })
        .collect()
}

fn quadrants(entities: &[Entity]) -> Vec<Point2> {
    const QUADRANT_ANGLES: [f64; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];
    let mut out = Vec::new();
    for entity in entities {
        match entity {
            Entity::Circle(c) => {
                out.extend(QUADRANT_ANGLES.iter().map(|&a| c.point_at_angle(a)));
            }
            Entity::Arc(a) => out.extend(
                QUADRANT_ANGLES
                    .iter()
                    .filter(|&&q| a.contains_angle(q))
                    .map(|&q| polar_point(&a.center, q, a.radius)),
            ),
            Entity::Donut(d) => {
                for &a in &QUADRANT_ANGLES {
                    out.push(polar_point(&d.center, a, d.outer_radius));
                    out.push(polar_point(&d.center, a, d.inner_radius));
                }
            }
            // Quadrants of a rotated ellipse are its axis extremes.
            Entity::Ellipse(e) => {
                out.extend(QUADRANT_ANGLES.iter().map(|&t| e.point_at_param(t)));
            }
            _ => {}
        }
    }
    out
}

fn nodes(entities: &[Entity]) -> Vec<Point2> {
    entities
        .iter()
        .filter_map(|entity| match entity {
            Entity::Point(p) => Some(p.position),
            _ => None,
        })
        .collect()
}

/// Foot of the perpendicular from the from-point, generated only for
/// entities the cursor is already hovering within tolerance.
fn perpendiculars(cursor: &Point2, entities: &[Entity], ctx: &SnapContext) -> Vec<Point2> {
    let Some(from) = ctx.from_point else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for entity in entities {
        let segments = segments_of(entity);
        let hovered = segments
            .iter()
            .any(|s| (segment_nearest(cursor, s) - cursor).norm() <= ctx.tolerance);
        if !hovered {
            continue;
        }
        for segment in &segments {
            match *segment {
                Segment::Linear { start, end } => {
                    out.push(closest_point_on_segment(&from, &start, &end));
                }
                Segment::Circular { center, radius } => {
                    if let Some(p) = radial_point(&from, &center, radius) {
                        out.push(p);
                    }
                }
                Segment::CircularArc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    if angle_in_arc(angle_of(&center, &from), start_angle, end_angle) {
                        if let Some(p) = radial_point(&from, &center, radius) {
                            out.push(p);
                        }
                    }
                }
            }
        }
    }
    out
}

/// Tangent touch points on circles and arcs as seen from the from-point;
/// nothing when the from-point lies inside the circle.
fn tangents(entities: &[Entity], ctx: &SnapContext) -> Vec<Point2> {
    let Some(from) = ctx.from_point else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for entity in entities {
        let (center, radius, range) = match entity {
            Entity::Circle(c) => (c.center, c.radius, None),
            Entity::Arc(a) => (a.center, a.radius, Some((a.start_angle, a.end_angle))),
            _ => continue,
        };
        let d = (from - center).norm();
        if d <= radius {
            continue;
        }
        let base = angle_of(&center, &from);
        let half = (radius / d).acos();
        for touch in [base + half, base - half] {
            if range.is_none_or(|(s, e)| angle_in_arc(touch, s, e)) {
                out.push(polar_point(&center, touch, radius));
            }
        }
    }
    out
}

/// Points on a line's carrier strictly beyond its ends, or on an arc's
/// supporting circle strictly outside its angular range. Points on the
/// finite entity itself are excluded.
fn extensions(cursor: &Point2, entities: &[Entity]) -> Vec<Point2> {
    let mut out = Vec::new();
    for entity in entities {
        match entity {
            Entity::Line(l) => {
                if let Some(t) = projection_param(cursor, &l.start, &l.end) {
                    if !(-CHAIN_EPSILON..=1.0 + CHAIN_EPSILON).contains(&t) {
                        out.push(l.start + (l.end - l.start) * t);
                    }
                }
            }
            Entity::Arc(a) => {
                let angle = angle_of(&a.center, cursor);
                if !a.contains_angle(angle) {
                    if let Some(p) = radial_point(cursor, &a.center, a.radius) {
                        out.push(p);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn intersections(entities: &[Entity]) -> Vec<Point2> {
    let mut out = Vec::new();
    for (i, e1) in entities.iter().enumerate() {
        for e2 in &entities[i + 1..] {
            out.extend(find_intersections(e1, e2));
        }
    }
    out
}

/// Pairwise intersections with both segments treated as infinite carriers,
/// kept only when the point genuinely required extending at least one of
/// them beyond its finite range.
fn apparent_intersections(entities: &[Entity]) -> Vec<Point2> {
    let mut out = Vec::new();
    for (i, e1) in entities.iter().enumerate() {
        for e2 in &entities[i + 1..] {
            for a in &segments_of(e1) {
                for b in &segments_of(e2) {
                    apparent_pair(a, b, &mut out);
                }
            }
        }
    }
    out
}

fn apparent_pair(a: &Segment, b: &Segment, out: &mut Vec<Point2>) {
    let outside = |t: f64| !(-CHAIN_EPSILON..=1.0 + CHAIN_EPSILON).contains(&t);
    match (a, b) {
        (
            Segment::Linear { start: p1, end: p2 },
            Segment::Linear { start: p3, end: p4 },
        ) => {
            if let Some(p) = line_line(p1, p2, p3, p4) {
                let t = projection_param(&p, p1, p2);
                let u = projection_param(&p, p3, p4);
                if t.is_some_and(outside) || u.is_some_and(outside) {
                    out.push(p);
                }
            }
        }
        (Segment::Linear { start, end }, Segment::Circular { center, radius })
        | (Segment::Circular { center, radius }, Segment::Linear { start, end }) => {
            for (t, p) in line_circle_unbounded(start, end, center, *radius) {
                if outside(t) {
                    out.push(p);
                }
            }
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
        ) => {
            // Extended line against the arc's supporting circle: apparent
            // when off the segment or off the arc's angular range.
            for (t, p) in line_circle_unbounded(start, end, center, *radius) {
                let off_arc = !angle_in_arc(angle_of(center, &p), *start_angle, *end_angle);
                if outside(t) || off_arc {
                    out.push(p);
                }
            }
        }
        _ => {}
    }
}

fn nearest_points(cursor: &Point2, entities: &[Entity]) -> Vec<Point2> {
    let mut out = Vec::new();
    for entity in entities {
        if let Entity::Ellipse(e) = entity {
            // No closed form; a parametric sampling is close enough for a
            // nearest-boundary snap.
            let best = (0..64)
                .map(|i| e.point_at_param(TAU * f64::from(i) / 64.0))
                .min_by(|a, b| (a - cursor).norm().total_cmp(&(b - cursor).norm()));
            out.extend(best);
            continue;
        }
        for segment in &segments_of(entity) {
            out.push(segment_nearest(cursor, segment));
        }
    }
    out
}

fn grid_point(cursor: &Point2, ctx: &SnapContext) -> Vec<Point2> {
    if ctx.grid_spacing <= 0.0 {
        return Vec::new();
    }
    vec![snap_to_grid(cursor, ctx.grid_spacing)]
}

/// Closest boundary point of one segment.
fn segment_nearest(p: &Point2, segment: &Segment) -> Point2 {
    match *segment {
        Segment::Linear { start, end } => closest_point_on_segment(p, &start, &end),
        Segment::Circular { center, radius } => {
            radial_point(p, &center, radius).unwrap_or_else(|| Point2::new(center.x + radius, center.y))
        }
        Segment::CircularArc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            let angle = angle_of(&center, p);
            if angle_in_arc(angle, start_angle, end_angle) {
                polar_point(&center, angle, radius)
            } else {
                let s = polar_point(&center, start_angle, radius);
                let e = polar_point(&center, end_angle, radius);
                if (p - s).norm() <= (p - e).norm() {
                    s
                } else {
                    e
                }
            }
        }
    }
}

/// Projection of `p` radially onto the circle; `None` at the center.
fn radial_point(p: &Point2, center: &Point2, radius: f64) -> Option<Point2> {
    let dir = (p - center).try_normalize(CHAIN_EPSILON)?;
    Some(center + dir * radius)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entity::{Arc, Circle, Ellipse, Line};
    use crate::snap::SnapModeSet;

    const TOL: f64 = 1e-9;

    fn ctx() -> SnapContext {
        SnapContext::default()
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Entity {
        Entity::Line(Line::new(Point2::new(x1, y1), Point2::new(x2, y2)))
    }

    #[test]
    fn quadrants_of_a_rotated_ellipse_follow_its_axes() {
        let e = Entity::Ellipse(Ellipse::new(
            Point2::new(0.0, 0.0),
            2.0,
            1.0,
            std::f64::consts::FRAC_PI_4,
        ));
        let points = quadrants(&[e]);
        assert_eq!(points.len(), 4);
        // Major-axis extreme along the 45° direction.
        let d = std::f64::consts::SQRT_2;
        assert!((points[0].x - d).abs() < TOL && (points[0].y - d).abs() < TOL);
    }

    #[test]
    fn arc_quadrants_respect_the_angular_range() {
        let a = Entity::Arc(Arc::new(Point2::new(0.0, 0.0), 5.0, 0.0, PI));
        let points = quadrants(&[a]);
        // 0°, 90° and 180° are on the arc; 270° is not.
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn tangent_touch_points_from_an_external_point() {
        let c = Entity::Circle(Circle::new(Point2::new(0.0, 0.0), 3.0));
        let ctx = SnapContext {
            from_point: Some(Point2::new(5.0, 0.0)),
            ..ctx()
        };
        let points = tangents(&[c], &ctx);
        assert_eq!(points.len(), 2);
        for p in &points {
            // Touch point at distance r from the center and tangent there:
            // the touch radius is perpendicular to the sight line.
            assert!((p.coords.norm() - 3.0).abs() < TOL);
            let sight = p - Point2::new(5.0, 0.0);
            assert!(sight.dot(&p.coords).abs() < 1e-6);
        }
    }

    #[test]
    fn no_tangents_from_inside_the_circle() {
        let c = Entity::Circle(Circle::new(Point2::new(0.0, 0.0), 3.0));
        let ctx = SnapContext {
            from_point: Some(Point2::new(1.0, 0.0)),
            ..ctx()
        };
        assert!(tangents(&[c], &ctx).is_empty());
    }

    #[test]
    fn extension_excludes_points_on_the_finite_line() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        // Cursor beyond the right end projects onto the carrier at x = 12.
        let beyond = extensions(&Point2::new(12.0, 0.3), &[l.clone()]);
        assert_eq!(beyond.len(), 1);
        assert!((beyond[0].x - 12.0).abs() < TOL && beyond[0].y.abs() < TOL);
        // Cursor over the segment itself generates nothing.
        assert!(extensions(&Point2::new(5.0, 0.3), &[l]).is_empty());
    }

    #[test]
    fn arc_extension_only_outside_the_angular_range() {
        let a = Entity::Arc(Arc::new(Point2::new(0.0, 0.0), 5.0, 0.0, FRAC_PI_2));
        // Cursor in the fourth quadrant, off the arc range.
        let off = extensions(&Point2::new(3.0, -3.0), &[a.clone()]);
        assert_eq!(off.len(), 1);
        assert!((off[0].coords.norm() - 5.0).abs() < TOL);
        // Cursor within the range generates nothing.
        assert!(extensions(&Point2::new(3.0, 3.0), &[a]).is_empty());
    }

    #[test]
    fn apparent_intersection_requires_actual_extension() {
        // These segments would cross at (5, 0) if extended; neither reaches.
        let l1 = line(0.0, 0.0, 4.0, 0.0);
        let l2 = line(5.0, 1.0, 5.0, 5.0);
        let points = apparent_intersections(&[l1, l2]);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 5.0).abs() < TOL && points[0].y.abs() < TOL);

        // Really crossing segments are not "apparent".
        let l3 = line(0.0, 0.0, 10.0, 0.0);
        let l4 = line(5.0, -1.0, 5.0, 5.0);
        assert!(apparent_intersections(&[l3, l4]).is_empty());
    }

    #[test]
    fn perpendicular_needs_from_point_and_hover() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        let from = Point2::new(3.0, 4.0);
        // Hovering the line: the foot at (3, 0) appears.
        let ctx_from = SnapContext {
            from_point: Some(from),
            ..ctx()
        };
        let feet = perpendiculars(&Point2::new(3.2, 0.1), &[l.clone()], &ctx_from);
        assert_eq!(feet.len(), 1);
        assert!((feet[0].x - 3.0).abs() < TOL && feet[0].y.abs() < TOL);
        // Cursor far from the entity: nothing.
        assert!(perpendiculars(&Point2::new(3.0, 5.0), &[l.clone()], &ctx_from).is_empty());
        // No from-point: nothing.
        assert!(perpendiculars(&Point2::new(3.2, 0.1), &[l], &ctx()).is_empty());
    }

    #[test]
    fn default_mode_set_has_everything() {
        let set = SnapModeSet::default();
        for mode in SnapMode::ALL {
            assert!(set.contains(mode));
        }
    }
}
