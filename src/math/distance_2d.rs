//! Closest-point and distance predicates used by hit-testing and snapping.
use super::angle_2d::{angle_in_arc, angle_of, normalize_angle};
use super::point_2d::polar_point;
use super::Point2;

/// Closest point on the segment `a → b` to `p` (projection clamped to the
/// segment).
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    Point2::new(a.x + t * dx, a.y + t * dy)
}

/// Minimum distance from `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_point_on_segment(p, a, b)).norm()
}

/// Normalized parameter of the projection of `p` onto the infinite line
/// through `a → b`, unclamped. `None` for a zero-length carrier.
#[must_use]
pub fn projection_param(p: &Point2, a: &Point2, b: &Point2) -> Option<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < 1e-20 {
        return None;
    }
    Some(((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq)
}

/// Minimum distance from `p` to the circle boundary with the given center
/// and radius.
#[must_use]
pub fn point_to_circle_dist(p: &Point2, center: &Point2, radius: f64) -> f64 {
    ((p - center).norm() - radius).abs()
}

/// Minimum distance from `p` to a circular arc.
///
/// The arc spans `start → end` counter-clockwise (wrap-aware). If the point's
/// angle falls within the arc range the distance is radial; otherwise it is
/// the distance to the nearer arc endpoint.
#[must_use]
pub fn point_to_arc_dist(
    p: &Point2,
    center: &Point2,
    radius: f64,
    start: f64,
    end: f64,
) -> f64 {
    let angle = angle_of(center, p);
    if angle_in_arc(angle, start, end) {
        return ((p - center).norm() - radius).abs();
    }

    let ep0 = polar_point(center, normalize_angle(start), radius);
    let ep1 = polar_point(center, normalize_angle(end), radius);
    (p - ep0).norm().min((p - ep1).norm())
}
