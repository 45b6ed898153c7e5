//! Angle normalization and wrap-aware arc membership.
use std::f64::consts::TAU;

use super::Point2;

/// Normalizes an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    a
}

/// Returns the angle of the vector `from → to`, normalized to `[0, 2π)`.
#[must_use]
pub fn angle_of(from: &Point2, to: &Point2) -> f64 {
    normalize_angle((to.y - from.y).atan2(to.x - from.x))
}

/// Checks whether `angle` lies on the arc spanning `start → end` counter-
/// clockwise.
///
/// All three angles are normalized into `[0, 2π)` first. When `start > end`
/// the arc wraps through 0 and membership is the disjunction
/// `angle ≥ start ∨ angle ≤ end`.
#[must_use]
pub fn angle_in_arc(angle: f64, start: f64, end: f64) -> bool {
    let a = normalize_angle(angle);
    let s = normalize_angle(start);
    let e = normalize_angle(end);

    if s <= e {
        a >= s && a <= e
    } else {
        a >= s || a <= e
    }
}

/// Counter-clockwise angular distance from `from` to `to`, in `[0, 2π)`.
#[must_use]
pub fn ccw_delta(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Converts degrees to radians.
#[must_use]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[must_use]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn normalize_negative() {
        let a = normalize_angle(-FRAC_PI_2);
        assert!((a - 3.0 * FRAC_PI_2).abs() < TOL, "a={a}");
    }

    #[test]
    fn normalize_over_full_turn() {
        let a = normalize_angle(TAU + FRAC_PI_2);
        assert!((a - FRAC_PI_2).abs() < TOL, "a={a}");
    }

    #[test]
    fn membership_plain_range() {
        assert!(angle_in_arc(FRAC_PI_2, 0.0, PI));
        assert!(!angle_in_arc(3.0 * FRAC_PI_2, 0.0, PI));
    }

    #[test]
    fn membership_wraps_through_zero() {
        // Arc from 270° to 90° passes through 0°.
        assert!(angle_in_arc(0.0, 3.0 * FRAC_PI_2, FRAC_PI_2));
        assert!(angle_in_arc(-0.1, 3.0 * FRAC_PI_2, FRAC_PI_2));
        assert!(!angle_in_arc(PI, 3.0 * FRAC_PI_2, FRAC_PI_2));
    }

    #[test]
    fn ccw_delta_wraps() {
        let d = ccw_delta(3.0 * FRAC_PI_2, FRAC_PI_2);
        assert!((d - PI).abs() < TOL, "d={d}");
    }

    #[test]
    fn angle_of_quadrants() {
        let o = Point2::new(0.0, 0.0);
        assert!((angle_of(&o, &Point2::new(1.0, 0.0))).abs() < TOL);
        assert!((angle_of(&o, &Point2::new(0.0, -1.0)) - 3.0 * FRAC_PI_2).abs() < TOL);
    }
}
