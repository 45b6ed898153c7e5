//! Fillet and chamfer between two lines.

use std::f64::consts::PI;

use crate::entity::{Arc, Line};
use crate::math::angle_2d::{angle_of, ccw_delta};
use crate::math::distance_2d::closest_point_on_segment;
use crate::math::intersect_2d::line_line;
use crate::math::point_2d::polar_point;
use crate::math::{Point2, DET_EPSILON, GAP_EPSILON};

/// The two trimmed lines plus the connecting geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Corner<J> {
    pub line1: Line,
    pub line2: Line,
    /// `None` when the corner degenerates to a plain trim.
    pub joint: Option<J>,
}

/// Trims two lines to a shared corner and joins them with a tangent arc of
/// the given radius.
///
/// `radius = 0` degenerates to a pure corner trim: each line keeps its
/// endpoint farther from the intersection and moves the near endpoint onto
/// it. `None` when the lines are parallel.
#[must_use]
pub fn fillet_lines(l1: &Line, l2: &Line, radius: f64) -> Option<Corner<Arc>> {
    let x = line_line(&l1.start, &l1.end, &l2.start, &l2.end)?;
    let (keep1, _) = kept_endpoint(l1, &x);
    let (keep2, _) = kept_endpoint(l2, &x);

    if radius <= 0.0 {
        return Some(Corner {
            line1: Line::new(x, keep1),
            line2: Line::new(x, keep2),
            joint: None,
        });
    }

    let a1 = angle_of(&x, &keep1);
    let a2 = angle_of(&x, &keep2);
    let mut bisector = (a1 + a2) * 0.5;
    if (a2 - a1).abs() > PI {
        bisector += PI;
    }
    let between = ccw_delta(a1, a2).min(ccw_delta(a2, a1));
    let half_angle = between * 0.5;
    if half_angle.sin() < DET_EPSILON {
        return None;
    }

    let center = polar_point(&x, bisector, radius / half_angle.sin());
    let t1 = closest_point_on_segment(&center, &l1.start, &l1.end);
    let t2 = closest_point_on_segment(&center, &l2.start, &l2.end);

    let arc_a1 = angle_of(&center, &t1);
    let arc_a2 = angle_of(&center, &t2);
    // Take the short sweep so the arc hugs the corner.
    let arc = if ccw_delta(arc_a1, arc_a2) <= PI {
        Arc::new(center, radius, arc_a1, arc_a2)
    } else {
        Arc::new(center, radius, arc_a2, arc_a1)
    };

    Some(Corner {
        line1: Line::new(t1, keep1),
        line2: Line::new(t2, keep2),
        joint: Some(arc),
    })
}

/// Trims two lines back by `d1` and `d2` from their intersection and joins
/// the cut ends with a chamfer line.
///
/// `d1 = d2 = 0` degenerates to the same corner trim as a zero-radius
/// fillet. `None` when the lines are parallel.
#[must_use]
pub fn chamfer_lines(l1: &Line, l2: &Line, d1: f64, d2: f64) -> Option<Corner<Line>> {
    let x = line_line(&l1.start, &l1.end, &l2.start, &l2.end)?;
    let (keep1, _) = kept_endpoint(l1, &x);
    let (keep2, _) = kept_endpoint(l2, &x);

    if d1 <= 0.0 && d2 <= 0.0 {
        return Some(Corner {
            line1: Line::new(x, keep1),
            line2: Line::new(x, keep2),
            joint: None,
        });
    }

    let q1 = polar_point(&x, angle_of(&x, &keep1), d1.max(0.0));
    let q2 = polar_point(&x, angle_of(&x, &keep2), d2.max(0.0));
    let joint = ((q2 - q1).norm() >= GAP_EPSILON).then(|| Line::new(q1, q2));

    Some(Corner {
        line1: Line::new(q1, keep1),
        line2: Line::new(q2, keep2),
        joint,
    })
}

/// The endpoint farther from the corner is kept; the nearer one is trimmed.
fn kept_endpoint(line: &Line, corner: &Point2) -> (Point2, Point2) {
    if (line.start - corner).norm() >= (line.end - corner).norm() {
        (line.start, line.end)
    } else {
        (line.end, line.start)
    }
}
