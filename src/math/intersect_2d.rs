//! Primitive 2D intersection solvers.
//!
//! Every solver signals an ambiguous or infeasible configuration with `None`
//! or an empty vector; the genuinely ambiguous cases (coincident lines,
//! coincident circles) are deliberately left unresolved.
use super::{Point2, DET_EPSILON};

/// Intersection of the two *infinite* lines through `p1 → p2` and `p3 → p4`.
///
/// Solves the 2×2 cross-product system; returns `None` when the determinant
/// magnitude is below [`DET_EPSILON`] (parallel or coincident carriers — the
/// coincident case is ambiguous and is not resolved).
#[must_use]
pub fn line_line(p1: &Point2, p2: &Point2, p3: &Point2, p4: &Point2) -> Option<Point2> {
    let d1x = p2.x - p1.x;
    let d1y = p2.y - p1.y;
    let d2x = p4.x - p3.x;
    let d2y = p4.y - p3.y;

    let det = d1x * d2y - d1y * d2x;
    if det.abs() < DET_EPSILON {
        return None;
    }

    let dx = p3.x - p1.x;
    let dy = p3.y - p1.y;
    let t = (dx * d2y - dy * d2x) / det;
    Some(Point2::new(p1.x + t * d1x, p1.y + t * d1y))
}

/// Bounded segment-segment intersection.
///
/// Same system as [`line_line`] but both parameters must land in `[0, 1]`.
#[must_use]
pub fn segment_segment(p1: &Point2, p2: &Point2, p3: &Point2, p4: &Point2) -> Option<Point2> {
    let d1x = p2.x - p1.x;
    let d1y = p2.y - p1.y;
    let d2x = p4.x - p3.x;
    let d2y = p4.y - p3.y;

    let det = d1x * d2y - d1y * d2x;
    if det.abs() < DET_EPSILON {
        return None;
    }

    let dx = p3.x - p1.x;
    let dy = p3.y - p1.y;
    let t = (dx * d2y - dy * d2x) / det;
    let u = (dx * d1y - dy * d1x) / det;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point2::new(p1.x + t * d1x, p1.y + t * d1y))
    } else {
        None
    }
}

/// Intersection of the segment `p1 → p2` with a circle.
///
/// Substitutes the parametric segment `p(t) = p1 + t·(p2−p1)` into the circle
/// equation and solves the quadratic. Returns up to two points with
/// `t ∈ [0, 1]`; a tangent contact (`|t1 − t2| <` [`DET_EPSILON`]) yields a
/// single point.
#[must_use]
pub fn line_circle(p1: &Point2, p2: &Point2, center: &Point2, radius: f64) -> Vec<Point2> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let fx = p1.x - center.x;
    let fy = p1.y - center.y;

    let a = dx * dx + dy * dy;
    if a < DET_EPSILON {
        // Zero-length segment.
        return Vec::new();
    }
    let b = 2.0 * (fx * dx + fy * dy);
    let c = fx * fx + fy * fy - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    let mut points = Vec::with_capacity(2);
    if (0.0..=1.0).contains(&t1) {
        points.push(Point2::new(p1.x + t1 * dx, p1.y + t1 * dy));
    }
    if (0.0..=1.0).contains(&t2) && (t2 - t1).abs() >= DET_EPSILON {
        points.push(Point2::new(p1.x + t2 * dx, p1.y + t2 * dy));
    }
    points
}

/// Intersection of the infinite carrier line through `p1 → p2` with a
/// circle, keeping the segment parameters.
///
/// Same quadratic as [`line_circle`] without the `t ∈ [0, 1]` clamp; used
/// where the segment must be treated as extended.
#[must_use]
pub fn line_circle_unbounded(
    p1: &Point2,
    p2: &Point2,
    center: &Point2,
    radius: f64,
) -> Vec<(f64, Point2)> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let fx = p1.x - center.x;
    let fy = p1.y - center.y;

    let a = dx * dx + dy * dy;
    if a < DET_EPSILON {
        return Vec::new();
    }
    let b = 2.0 * (fx * dx + fy * dy);
    let c = fx * fx + fy * fy - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    let mut points = vec![(t1, Point2::new(p1.x + t1 * dx, p1.y + t1 * dy))];
    if (t2 - t1).abs() >= DET_EPSILON {
        points.push((t2, Point2::new(p1.x + t2 * dx, p1.y + t2 * dy)));
    }
    points
}

/// Closed-form two-circle intersection.
///
/// Returns empty when the circles are too far apart (`d > r1 + r2`), one lies
/// inside the other (`d < |r1 − r2|`), or they are coincident
/// (`d ≈ 0 ∧ r1 ≈ r2` — infinitely many points, genuinely ambiguous, left
/// unresolved).
#[must_use]
pub fn circle_circle(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let d = (dx * dx + dy * dy).sqrt();

    if d > r1 + r2 || d < (r1 - r2).abs() || d < DET_EPSILON {
        return Vec::new();
    }

    // Distance from c1 along the center line to the radical line.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h_sq = r1 * r1 - a * a;
    let h = h_sq.max(0.0).sqrt();

    let mx = c1.x + a * dx / d;
    let my = c1.y + a * dy / d;

    // Perpendicular to the center line.
    let px = -dy / d;
    let py = dx / d;

    if h < DET_EPSILON {
        // Tangent contact: one point.
        vec![Point2::new(mx, my)]
    } else {
        vec![
            Point2::new(mx + h * px, my + h * py),
            Point2::new(mx - h * px, my - h * py),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn line_line_crossing() {
        let p = line_line(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(5.0, -5.0),
            &Point2::new(5.0, 5.0),
        )
        .unwrap();
        assert!((p.x - 5.0).abs() < TOL && p.y.abs() < TOL, "p={p:?}");
    }

    #[test]
    fn line_line_is_order_invariant() {
        let a0 = Point2::new(0.0, 1.0);
        let a1 = Point2::new(7.0, -2.0);
        let b0 = Point2::new(-3.0, -3.0);
        let b1 = Point2::new(4.0, 6.0);
        let p = line_line(&a0, &a1, &b0, &b1).unwrap();
        let q = line_line(&b0, &b1, &a0, &a1).unwrap();
        assert!((p - q).norm() < TOL, "p={p:?} q={q:?}");
    }

    #[test]
    fn line_line_parallel_returns_none() {
        assert!(line_line(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn line_line_extends_beyond_segments() {
        // Segments do not overlap, infinite carriers still intersect.
        let p = line_line(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(5.0, 1.0),
            &Point2::new(5.0, 2.0),
        )
        .unwrap();
        assert!((p.x - 5.0).abs() < TOL && p.y.abs() < TOL);
    }

    #[test]
    fn segment_segment_crossing() {
        let p = segment_segment(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 2.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(2.0, 0.0),
        )
        .unwrap();
        assert!((p.x - 1.0).abs() < TOL && (p.y - 1.0).abs() < TOL);
    }

    #[test]
    fn segment_segment_out_of_range() {
        assert!(segment_segment(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(5.0, 1.0),
            &Point2::new(5.0, 2.0),
        )
        .is_none());
    }

    #[test]
    fn line_circle_secant() {
        let pts = line_circle(
            &Point2::new(-10.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(0.0, 0.0),
            5.0,
        );
        assert_eq!(pts.len(), 2, "pts={pts:?}");
        assert_relative_eq!(pts[0].x, -5.0, epsilon = TOL);
        assert_relative_eq!(pts[1].x, 5.0, epsilon = TOL);
        assert!(pts[0].y.abs() < TOL && pts[1].y.abs() < TOL);
    }

    #[test]
    fn line_circle_tangent_single_point() {
        let pts = line_circle(
            &Point2::new(-10.0, 5.0),
            &Point2::new(10.0, 5.0),
            &Point2::new(0.0, 0.0),
            5.0,
        );
        assert_eq!(pts.len(), 1, "pts={pts:?}");
        assert!(pts[0].x.abs() < 1e-4 && (pts[0].y - 5.0).abs() < TOL);
    }

    #[test]
    fn line_circle_miss() {
        let pts = line_circle(
            &Point2::new(-10.0, 6.0),
            &Point2::new(10.0, 6.0),
            &Point2::new(0.0, 0.0),
            5.0,
        );
        assert!(pts.is_empty());
    }

    #[test]
    fn line_circle_respects_segment_bounds() {
        // Segment stops short of the circle.
        let pts = line_circle(
            &Point2::new(-10.0, 0.0),
            &Point2::new(-6.0, 0.0),
            &Point2::new(0.0, 0.0),
            5.0,
        );
        assert!(pts.is_empty(), "pts={pts:?}");
    }

    #[test]
    fn circle_circle_two_points() {
        let pts = circle_circle(&Point2::new(0.0, 0.0), 5.0, &Point2::new(8.0, 0.0), 5.0);
        assert_eq!(pts.len(), 2, "pts={pts:?}");
        for p in &pts {
            assert!(((p - Point2::new(0.0, 0.0)).norm() - 5.0).abs() < TOL);
            assert!(((p - Point2::new(8.0, 0.0)).norm() - 5.0).abs() < TOL);
        }
        // Closed form: (4, ±3).
        let (mut lo, mut hi) = (pts[0].y, pts[1].y);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        assert_relative_eq!(pts[0].x, 4.0, epsilon = TOL);
        assert_relative_eq!(lo, -3.0, epsilon = TOL);
        assert_relative_eq!(hi, 3.0, epsilon = TOL);
    }

    #[test]
    fn circle_circle_too_far_apart() {
        let pts = circle_circle(&Point2::new(0.0, 0.0), 1.0, &Point2::new(5.0, 0.0), 1.0);
        assert!(pts.is_empty());
    }

    #[test]
    fn circle_circle_contained() {
        let pts = circle_circle(&Point2::new(0.0, 0.0), 5.0, &Point2::new(1.0, 0.0), 1.0);
        assert!(pts.is_empty());
    }

    #[test]
    fn circle_circle_coincident_is_empty() {
        // Infinitely many intersection points; contract is an empty result.
        let pts = circle_circle(&Point2::new(0.0, 0.0), 3.0, &Point2::new(0.0, 0.0), 3.0);
        assert!(pts.is_empty());
    }

    #[test]
    fn circle_circle_tangent_single_point() {
        let pts = circle_circle(&Point2::new(0.0, 0.0), 1.0, &Point2::new(2.0, 0.0), 1.0);
        assert_eq!(pts.len(), 1, "pts={pts:?}");
        assert!((pts[0].x - 1.0).abs() < TOL && pts[0].y.abs() < TOL);
    }
}
