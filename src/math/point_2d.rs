//! Point construction and transformation helpers.
//!
//! These are the value-level building blocks used by the transform
//! operations and the snap generators. All functions are pure.
use super::{Point2, Vector2, CHAIN_EPSILON};

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Point at polar coordinates `(distance, angle)` from `origin`.
#[must_use]
pub fn polar_point(origin: &Point2, angle: f64, distance: f64) -> Point2 {
    Point2::new(
        origin.x + distance * angle.cos(),
        origin.y + distance * angle.sin(),
    )
}

/// Rotates `p` around `center` by `angle` radians (counter-clockwise).
#[must_use]
pub fn rotate_point(p: &Point2, center: &Point2, angle: f64) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point2::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Scales `p` away from `center` by `factor`.
#[must_use]
pub fn scale_point(p: &Point2, center: &Point2, factor: f64) -> Point2 {
    Point2::new(
        center.x + (p.x - center.x) * factor,
        center.y + (p.y - center.y) * factor,
    )
}

/// Mirrors `p` across the infinite line through `a` and `b`.
///
/// A degenerate axis (`a ≈ b`) reflects through the point `a` instead.
#[must_use]
pub fn mirror_point(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.x * d.x + d.y * d.y;
    if len_sq < CHAIN_EPSILON * CHAIN_EPSILON {
        return Point2::new(2.0 * a.x - p.x, 2.0 * a.y - p.y);
    }
    let t = ((p.x - a.x) * d.x + (p.y - a.y) * d.y) / len_sq;
    let foot = Point2::new(a.x + t * d.x, a.y + t * d.y);
    Point2::new(2.0 * foot.x - p.x, 2.0 * foot.y - p.y)
}

/// Snaps `p` to the nearest grid point for the given spacing.
///
/// A non-positive spacing returns `p` unchanged.
#[must_use]
pub fn snap_to_grid(p: &Point2, spacing: f64) -> Point2 {
    if spacing <= 0.0 {
        return *p;
    }
    Point2::new(
        (p.x / spacing).round() * spacing,
        (p.y / spacing).round() * spacing,
    )
}

/// Left-pointing unit normal of the segment `a → b`, or `None` for a
/// zero-length segment.
#[must_use]
pub fn left_normal(a: &Point2, b: &Point2) -> Option<Vector2> {
    let d = b - a;
    let len = (d.x * d.x + d.y * d.y).sqrt();
    if len < CHAIN_EPSILON {
        return None;
    }
    Some(Vector2::new(-d.y / len, d.x / len))
}

/// Removes points that lie within `eps` of an earlier point, preserving
/// first-seen order.
#[must_use]
pub fn dedup_points(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        let duplicate = out
            .iter()
            .any(|q| (p - q).norm() < eps);
        if !duplicate {
            out.push(*p);
        }
    }
    out
}
