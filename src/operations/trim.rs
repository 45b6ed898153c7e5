//! Trimming entities against cutting boundaries.
//!
//! The clicked sub-interval between adjacent cut points is removed and the
//! remainder is emitted as new entities.

use crate::entity::{Arc, Circle, Entity, Line};
use crate::math::angle_2d::{angle_in_arc, angle_of, ccw_delta};
use crate::math::point_2d::midpoint;
use crate::math::{Point2, GAP_EPSILON};
use crate::operations::intersect::find_intersections;

/// Trims a line at its intersections with `others`, removing the
/// sub-segment under `click`.
///
/// Cut points are the intersections plus both endpoints, sorted by distance
/// from `line.start`. The interval whose midpoint is nearest the click is
/// dropped; the rest come back as new lines (degenerate pieces shorter than
/// the gap epsilon are discarded). `None` when nothing cuts the line.
#[must_use]
pub fn trim_line(line: &Line, click: &Point2, others: &[Entity]) -> Option<Vec<Line>> {
    let subject = Entity::Line(*line);
    let dir = line.end - line.start;
    let len = dir.norm();
    if len < GAP_EPSILON {
        return None;
    }

    let mut params: Vec<f64> = others
        .iter()
        .flat_map(|other| find_intersections(&subject, other))
        .map(|p| (p - line.start).dot(&dir) / (len * len))
        .collect();
    if params.is_empty() {
        return None;
    }
    params.push(0.0);
    params.push(1.0);
    params.sort_by(f64::total_cmp);
    params.dedup_by(|a, b| (*a - *b).abs() * len < GAP_EPSILON);

    let at = |t: f64| line.start + dir * t;
    let removed = params
        .windows(2)
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (midpoint(&at(a[0]), &at(a[1])) - click).norm();
            let db = (midpoint(&at(b[0]), &at(b[1])) - click).norm();
            da.total_cmp(&db)
        })
        .map(|(i, _)| i)?;

    Some(
        params
            .windows(2)
            .enumerate()
            .filter(|&(i, w)| i != removed && (w[1] - w[0]) * len >= GAP_EPSILON)
            .map(|(_, w)| Line::new(at(w[0]), at(w[1])))
            .collect(),
    )
}

/// Trims a circle at its intersections with `others`, removing the arc
/// interval under `click`.
///
/// Cut angles are sorted and the wrap-aware interval containing the click
/// angle is dropped; the remaining intervals come back as arcs. `None` when
/// fewer than two distinct cut angles exist (no interval to remove).
#[must_use]
pub fn trim_circle(circle: &Circle, click: &Point2, others: &[Entity]) -> Option<Vec<Arc>> {
    let subject = Entity::Circle(*circle);
    let mut angles: Vec<f64> = others
        .iter()
        .flat_map(|other| find_intersections(&subject, other))
        .map(|p| angle_of(&circle.center, &p))
        .collect();
    angles.sort_by(f64::total_cmp);
    angles.dedup_by(|a, b| (*a - *b).abs() * circle.radius < GAP_EPSILON);
    if angles.len() < 2 {
        return None;
    }

    let click_angle = angle_of(&circle.center, click);
    let removed = (0..angles.len())
        .find(|&i| {
            let end = angles[(i + 1) % angles.len()];
            angle_in_arc(click_angle, angles[i], end)
        })
        .unwrap_or(angles.len() - 1);

    Some(
        (0..angles.len())
            .filter(|&i| i != removed)
            .map(|i| {
                let start = angles[i];
                let end = angles[(i + 1) % angles.len()];
                Arc::new(circle.center, circle.radius, start, end)
            })
            .filter(|arc| arc.sweep() * circle.radius >= GAP_EPSILON)
            .collect(),
    )
}

/// Trims an arc the same way as [`trim_circle`], keeping only cut points
/// inside the arc's own angular range and treating the arc ends as cuts.
#[must_use]
pub fn trim_arc(arc: &Arc, click: &Point2, others: &[Entity]) -> Option<Vec<Arc>> {
    let subject = Entity::Arc(*arc);
    let mut cuts: Vec<f64> = others
        .iter()
        .flat_map(|other| find_intersections(&subject, other))
        .map(|p| ccw_delta(arc.start_angle, angle_of(&arc.center, &p)))
        .collect();
    if cuts.is_empty() {
        return None;
    }
    cuts.push(0.0);
    cuts.push(arc.sweep());
    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|a, b| (*a - *b).abs() * arc.radius < GAP_EPSILON);

    let click_delta = ccw_delta(arc.start_angle, angle_of(&arc.center, click));
    let removed = cuts
        .windows(2)
        .position(|w| (w[0]..=w[1]).contains(&click_delta))
        .unwrap_or(cuts.len().saturating_sub(2));

    Some(
        cuts.windows(2)
            .enumerate()
            .filter(|&(i, w)| i != removed && (w[1] - w[0]) * arc.radius >= GAP_EPSILON)
            .map(|(_, w)| {
                Arc::new(
                    arc.center,
                    arc.radius,
                    arc.start_angle + w[0],
                    arc.start_angle + w[1],
                )
            })
            .collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const TOL: f64 = 1e-9;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn single_crossing_cutter_yields_two_pieces_preserving_length() {
        // One cutter entity crossing twice: the circle cuts at x = 4 and
        // x = 6. Clicking between them drops the middle and keeps the rest.
        let subject = line(0.0, 0.0, 10.0, 0.0);
        let cutter = Entity::Circle(Circle::new(Point2::new(5.0, 0.0), 1.0));
        let pieces = trim_line(&subject, &Point2::new(5.0, 0.0), &[cutter]).unwrap();
        assert_eq!(pieces.len(), 2);
        let total: f64 = pieces.iter().map(Line::length).sum();
        assert!((total - (10.0 - 2.0)).abs() < TOL, "total={total}");
        assert!((pieces[0].end.x - 4.0).abs() < TOL);
        assert!((pieces[1].start.x - 6.0).abs() < TOL);
    }

    #[test]
    fn click_between_two_cutters_removes_middle() {
        let subject = line(0.0, 0.0, 10.0, 0.0);
        let cutters = [
            Entity::Line(line(3.0, -1.0, 3.0, 1.0)),
            Entity::Line(line(7.0, -1.0, 7.0, 1.0)),
        ];
        let pieces = trim_line(&subject, &Point2::new(5.0, 0.0), &cutters).unwrap();
        assert_eq!(pieces.len(), 2);
        assert!((pieces[0].end.x - 3.0).abs() < TOL);
        assert!((pieces[1].start.x - 7.0).abs() < TOL);
    }

    #[test]
    fn click_past_last_cut_removes_the_tail() {
        let subject = line(0.0, 0.0, 10.0, 0.0);
        let cutter = Entity::Line(line(4.0, -1.0, 4.0, 1.0));
        let pieces = trim_line(&subject, &Point2::new(9.0, 0.0), &[cutter]).unwrap();
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].start.x.abs() < TOL && (pieces[0].end.x - 4.0).abs() < TOL);
    }

    #[test]
    fn no_cutters_is_a_soft_failure() {
        let subject = line(0.0, 0.0, 10.0, 0.0);
        let miss = Entity::Line(line(0.0, 5.0, 10.0, 5.0));
        assert!(trim_line(&subject, &Point2::new(5.0, 0.0), &[miss]).is_none());
        assert!(trim_line(&subject, &Point2::new(5.0, 0.0), &[]).is_none());
    }

    #[test]
    fn annotations_do_not_act_as_cutters() {
        // A dimension drawn straight across the subject still contributes no
        // cut points; only geometric entities trim.
        let subject = line(0.0, 0.0, 10.0, 0.0);
        let dim = Entity::Dimension(crate::entity::Dimension {
            p1: Point2::new(5.0, -2.0),
            p2: Point2::new(5.0, 2.0),
            location: Point2::new(6.0, 0.0),
            text: None,
        });
        assert!(trim_line(&subject, &Point2::new(5.0, 0.0), &[dim]).is_none());
    }

    #[test]
    fn circle_cut_by_crossing_line_leaves_one_arc() {
        let circle = Circle::new(Point2::new(0.0, 0.0), 5.0);
        let cutter = Entity::Line(line(-10.0, 0.0, 10.0, 0.0));
        // Click at the top: the upper half (0 → π) goes, the lower stays.
        let arcs = trim_circle(&circle, &Point2::new(0.0, 5.0), &[cutter]).unwrap();
        assert_eq!(arcs.len(), 1);
        assert!((arcs[0].start_angle - PI).abs() < TOL);
        assert!(arcs[0].end_angle.abs() < TOL || (arcs[0].end_angle - 2.0 * PI).abs() < TOL);
    }

    #[test]
    fn circle_with_single_tangent_cut_cannot_trim() {
        let circle = Circle::new(Point2::new(0.0, 0.0), 5.0);
        let tangent = Entity::Line(line(-10.0, 5.0, 10.0, 5.0));
        assert!(trim_circle(&circle, &Point2::new(0.0, -5.0), &[tangent]).is_none());
    }

    #[test]
    fn arc_trim_removes_clicked_interval() {
        // Upper half-circle cut by a vertical line at x = 0.
        let arc = Arc::new(Point2::new(0.0, 0.0), 5.0, 0.0, PI);
        let cutter = Entity::Line(line(0.0, -10.0, 0.0, 10.0));
        // Click in the second-quadrant portion.
        let pieces = trim_arc(&arc, &Point2::new(-3.0, 4.0), &[cutter]).unwrap();
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].start_angle.abs() < TOL);
        assert!((pieces[0].end_angle - FRAC_PI_2).abs() < TOL);
    }
}
