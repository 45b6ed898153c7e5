//! Breaking an entity between two points.

use crate::entity::{Arc, Circle, Line};
use crate::math::angle_2d::angle_of;
use crate::math::distance_2d::projection_param;
use crate::math::{Point2, GAP_EPSILON};

/// Breaks a line between the projections of `b1` and `b2`.
///
/// The break points are clamped onto the segment and ordered; each end piece
/// survives only when the break stops short of that end by more than the gap
/// epsilon of normalized range. `None` for a zero-length line.
#[must_use]
pub fn break_line(line: &Line, b1: &Point2, b2: &Point2) -> Option<Vec<Line>> {
    let t1 = projection_param(b1, &line.start, &line.end)?.clamp(0.0, 1.0);
    let t2 = projection_param(b2, &line.start, &line.end)?.clamp(0.0, 1.0);
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

    let dir = line.end - line.start;
    let mut pieces = Vec::new();
    if lo > GAP_EPSILON {
        pieces.push(Line::new(line.start, line.start + dir * lo));
    }
    if hi < 1.0 - GAP_EPSILON {
        pieces.push(Line::new(line.start + dir * hi, line.end));
    }
    Some(pieces)
}

/// Breaks a circle between the angles of `b1` and `b2`, keeping the
/// counter-clockwise remainder from `b2` back around to `b1`.
#[must_use]
pub fn break_circle(circle: &Circle, b1: &Point2, b2: &Point2) -> Option<Arc> {
    if circle.radius <= 0.0 {
        return None;
    }
    let a1 = angle_of(&circle.center, b1);
    let a2 = angle_of(&circle.center, b2);
    let arc = Arc::new(circle.center, circle.radius, a2, a1);
    if arc.sweep() * circle.radius < GAP_EPSILON {
        return None;
    }
    Some(arc)
}
