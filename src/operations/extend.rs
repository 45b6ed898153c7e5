//! Extending entities to the nearest boundary ahead.

use crate::entity::{Arc, Circle, Entity, Line};
use crate::math::angle_2d::{angle_of, ccw_delta};
use crate::math::{Point2, GAP_EPSILON};
use crate::operations::intersect::find_intersections;

/// How far the probing ray reaches beyond the extended endpoint.
const RAY_LENGTH: f64 = 1e5;

/// Extends the line end nearer `click` to the closest boundary intersection
/// strictly ahead of that end.
///
/// `None` when the line is degenerate or no boundary lies ahead.
#[must_use]
pub fn extend_line(line: &Line, click: &Point2, boundaries: &[Entity]) -> Option<Line> {
    let (anchor, moving) =
        if (click - line.start).norm() < (click - line.end).norm() {
            (line.end, line.start)
        } else {
            (line.start, line.end)
        };
    let dir = (moving - anchor).try_normalize(GAP_EPSILON)?;

    let ray = Entity::Line(Line::new(moving, moving + dir * RAY_LENGTH));
    let target = boundaries
        .iter()
        .flat_map(|boundary| find_intersections(&ray, boundary))
        .filter(|p| {
            let to_candidate = p - moving;
            to_candidate.dot(&dir) > 0.0 && to_candidate.norm() > GAP_EPSILON
        })
        .min_by(|a, b| (a - moving).norm().total_cmp(&(b - moving).norm()))?;

    if (click - line.start).norm() < (click - line.end).norm() {
        Some(Line::new(target, line.end))
    } else {
        Some(Line::new(line.start, target))
    }
}

/// Extends the arc end nearer `click` along its supporting circle to the
/// closest boundary intersection ahead of that end.
///
/// "Ahead" is counter-clockwise past the end angle, or clockwise before the
/// start angle, and never re-enters the existing angular range. `None` when
/// no boundary crosses the supporting circle ahead.
#[must_use]
pub fn extend_arc(arc: &Arc, click: &Point2, boundaries: &[Entity]) -> Option<Arc> {
    let extend_end =
        (click - arc.end_point()).norm() < (click - arc.start_point()).norm();
    let circle = Entity::Circle(Circle::new(arc.center, arc.radius));
    let sweep = arc.sweep();

    // Angular distance ahead of the extended end, wrap-aware, excluding
    // anything inside the current range.
    let ahead = |p: &Point2| -> Option<f64> {
        let angle = angle_of(&arc.center, p);
        let delta = if extend_end {
            ccw_delta(arc.end_angle, angle)
        } else {
            ccw_delta(angle, arc.start_angle)
        };
        let available = std::f64::consts::TAU - sweep;
        (delta * arc.radius > GAP_EPSILON && delta < available).then_some(delta)
    };

    let (_, target) = boundaries
        .iter()
        .flat_map(|boundary| find_intersections(&circle, boundary))
        .filter_map(|p| ahead(&p).map(|d| (d, p)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))?;

    let target_angle = angle_of(&arc.center, &target);
    if extend_end {
        Some(Arc::new(arc.center, arc.radius, arc.start_angle, target_angle))
    } else {
        Some(Arc::new(arc.center, arc.radius, target_angle, arc.end_angle))
    }
}
