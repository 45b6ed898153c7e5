//! Polygon predicates used by hit-testing and the offset engine.
use super::{Point2, CHAIN_EPSILON};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Tests whether `p` lies inside the polygon (even-odd ray cast).
///
/// Points exactly on an edge may land on either side; callers needing an
/// inclusive boundary should pair this with a distance test.
#[must_use]
pub fn point_in_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let slope_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < slope_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns whether a point chain is closed: first and last points coincide
/// within [`CHAIN_EPSILON`].
#[must_use]
pub fn is_closed_chain(points: &[Point2]) -> bool {
    match (points.first(), points.last()) {
        (Some(a), Some(b)) if points.len() > 2 => (a - b).norm() < CHAIN_EPSILON,
        _ => false,
    }
}
