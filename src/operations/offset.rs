//! Parallel-curve offsets with corner reconciliation.

use std::f64::consts::{FRAC_PI_8, PI};

use crate::entity::{Circle, Line, Polyline, Rect};
use crate::math::angle_2d::angle_of;
use crate::math::intersect_2d::line_line;
use crate::math::point_2d::{left_normal, polar_point};
use crate::math::polygon_2d::point_in_polygon;
use crate::math::{Point2, CHAIN_EPSILON, GAP_EPSILON};

/// Corner-reconciliation policy for polyline offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Extend the adjacent offset segments to their mutual intersection.
    #[default]
    Extend,
    /// Bridge the corner with a sampled arc around the original vertex.
    Fillet,
    /// Connect the two offset endpoints with a straight chamfer.
    Chamfer,
}

/// Offsets a segment by `dist` to the side given by `side` (`±1.0`).
///
/// `side = +1.0` offsets along the left normal of `p1 → p2`. `None` for a
/// zero-length segment.
#[must_use]
pub fn offset_line(p1: &Point2, p2: &Point2, dist: f64, side: f64) -> Option<Line> {
    let n = left_normal(p1, p2)?;
    let shift = n * (dist * side.signum());
    Some(Line::new(p1 + shift, p2 + shift))
}

/// Picks the offset side from a click point: `+1.0` when the click lies on
/// the left of `p1 → p2`, else `-1.0`.
#[must_use]
pub fn offset_side(p1: &Point2, p2: &Point2, click: &Point2) -> f64 {
    match left_normal(p1, p2) {
        Some(n) if (click - p1).dot(&n) >= 0.0 => 1.0,
        _ => -1.0,
    }
}

/// Offsets a circle toward or away from `click`: a click inside shrinks,
/// outside grows. `None` when the shrunk radius is not positive.
#[must_use]
pub fn offset_circle(circle: &Circle, dist: f64, click: &Point2) -> Option<Circle> {
    let inside = (click - circle.center).norm() < circle.radius;
    let radius = if inside {
        circle.radius - dist
    } else {
        circle.radius + dist
    };
    if radius <= 0.0 {
        return None;
    }
    Some(Circle::new(circle.center, radius))
}

/// Offsets a rectangle toward or away from `click`: a click inside shrinks,
/// outside grows. `None` when the shrunk rectangle degenerates.
#[must_use]
pub fn offset_rect(rect: &Rect, dist: f64, click: &Point2) -> Option<Rect> {
    let inside = point_in_polygon(click, &rect.corners());
    let d = if inside { -dist } else { dist };
    let half_w = rect.width() * 0.5 + d;
    let half_h = rect.height() * 0.5 + d;
    if half_w <= 0.0 || half_h <= 0.0 {
        return None;
    }
    let c = rect.center();
    Some(Rect::new(
        Point2::new(c.x - half_w, c.y - half_h),
        Point2::new(c.x + half_w, c.y + half_h),
    ))
}

/// Offsets every polyline segment independently, then reconciles each corner
/// under `policy`. The offset side is chosen per segment against `click`.
///
/// Closed polylines reconcile the wrap-around corner first, so the result is
/// closed as well. `None` when the polyline has fewer than two vertices or
/// every segment is degenerate.
#[must_use]
pub fn offset_polyline(
    pl: &Polyline,
    dist: f64,
    click: &Point2,
    policy: GapPolicy,
) -> Option<Polyline> {
    let count = pl.segment_count();
    if count == 0 {
        return None;
    }

    // Per-segment raw offsets, with the original corner vertex kept for the
    // fillet policy.
    let mut offsets: Vec<(Line, Point2)> = Vec::with_capacity(count);
    for i in 0..count {
        let (a, b) = pl.segment(i);
        let side = offset_side(&a, &b, click);
        let line = offset_line(&a, &b, dist, side)?;
        offsets.push((line, b));
    }

    if count == 1 {
        let line = offsets[0].0;
        return Some(Polyline::new(vec![line.start, line.end], false));
    }

    // Wrap-around corner first for closed chains: reconcile (last, first)
    // in place so the interior pass below never re-touches moved endpoints.
    let mut head = Vec::new();
    if pl.closed {
        let last = count - 1;
        let corner = offsets[last].1;
        let (a, b) = (offsets[last].0, offsets[0].0);
        let joint = reconcile_corner(&a, &b, &corner, dist, policy);
        if let CornerJoint::Miter(p) = joint {
            offsets[last].0.end = p;
            offsets[0].0.start = p;
        } else {
            head = joint.bridge_points();
        }
    }

    let mut verts = vec![offsets[0].0.start];
    for i in 0..count - 1 {
        let corner = offsets[i].1;
        let (a, b) = (offsets[i].0, offsets[i + 1].0);
        match reconcile_corner(&a, &b, &corner, dist, policy) {
            CornerJoint::Miter(p) => verts.push(p),
            joint => {
                verts.push(a.end);
                verts.extend(joint.bridge_points());
                verts.push(b.start);
            }
        }
    }
    // A mitered wrap-around corner already placed the closing vertex at the
    // front of the chain.
    let closing = offsets[count - 1].0.end;
    if !(pl.closed && (closing - verts[0]).norm() < CHAIN_EPSILON) {
        verts.push(closing);
    }
    if pl.closed && !head.is_empty() {
        verts.extend(head);
    }

    Some(Polyline::new(verts, pl.closed))
}

enum CornerJoint {
    /// Both segments meet at a single miter point.
    Miter(Point2),
    /// Intermediate points bridging the gap (may be empty for a chamfer).
    Bridge(Vec<Point2>),
}

impl CornerJoint {
    fn bridge_points(self) -> Vec<Point2> {
        match self {
            CornerJoint::Miter(p) => vec![p],
            CornerJoint::Bridge(points) => points,
        }
    }
}

fn reconcile_corner(
    a: &Line,
    b: &Line,
    corner: &Point2,
    dist: f64,
    policy: GapPolicy,
) -> CornerJoint {
    // Segments already touching need no bridging geometry.
    if (b.start - a.end).norm() < GAP_EPSILON {
        return CornerJoint::Miter(a.end);
    }
    match policy {
        GapPolicy::Extend => match line_line(&a.start, &a.end, &b.start, &b.end) {
            Some(p) => CornerJoint::Miter(p),
            // Parallel adjacent offsets keep the gap as-is.
            None => CornerJoint::Bridge(Vec::new()),
        },
        GapPolicy::Fillet => CornerJoint::Bridge(fillet_samples(corner, &a.end, &b.start, dist)),
        GapPolicy::Chamfer => CornerJoint::Bridge(Vec::new()),
    }
}

/// Samples the bridging arc around the original `corner` between the two
/// offset endpoints, stepping `π/8` along the shorter angular direction.
/// Excludes the two endpoints themselves.
fn fillet_samples(corner: &Point2, from: &Point2, to: &Point2, dist: f64) -> Vec<Point2> {
    let a0 = angle_of(corner, from);
    let a1 = angle_of(corner, to);
    let mut delta = a1 - a0;
    if delta > PI {
        delta -= 2.0 * PI;
    } else if delta < -PI {
        delta += 2.0 * PI;
    }

    let steps = (delta.abs() / FRAC_PI_8).floor() as usize;
    let radius = dist.abs();
    (1..=steps)
        .map(|i| polar_point(corner, a0 + delta.signum() * FRAC_PI_8 * i as f64, radius))
        .filter(|p| (p - to).norm() > GAP_EPSILON)
        .collect()
}
