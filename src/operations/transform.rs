//! Value-semantic entity transforms.
//!
//! Each transform clones the source and returns a fresh entity; the input
//! is never touched, so callers can hand the original to undo history.

use crate::entity::{Entity, Polyline, Rect};
use crate::math::angle_2d::normalize_angle;
use crate::math::point_2d::{mirror_point, rotate_point, scale_point};
use crate::math::{Point2, Vector2};

/// Translates an entity by `delta`.
#[must_use]
pub fn move_entity(entity: &Entity, delta: &Vector2) -> Entity {
    map_entity(entity, |p| p + delta, 0.0, 1.0, false)
}

/// Rotates an entity around `origin` by `angle` radians.
///
/// An axis-aligned rect under a rotation becomes a closed polyline of its
/// rotated corners; every other kind keeps its own variant.
#[must_use]
pub fn rotate_entity(entity: &Entity, origin: &Point2, angle: f64) -> Entity {
    if let Entity::Rect(r) = entity {
        return Entity::Polyline(rect_to_chain(r, |p| rotate_point(&p, origin, angle)));
    }
    map_entity(entity, |p| rotate_point(&p, origin, angle), angle, 1.0, false)
}

/// Scales an entity uniformly around `origin`.
#[must_use]
pub fn scale_entity(entity: &Entity, origin: &Point2, factor: f64) -> Entity {
    map_entity(
        entity,
        |p| scale_point(&p, origin, factor),
        0.0,
        factor.abs(),
        false,
    )
}

/// Mirrors an entity across the axis `a1 → a2`.
///
/// Mirroring reverses orientation: arc start/end swap so the result still
/// sweeps counter-clockwise. A rect mirrored across a non-axis-aligned
/// axis becomes a closed polyline.
#[must_use]
pub fn mirror_entity(entity: &Entity, a1: &Point2, a2: &Point2) -> Entity {
    if let Entity::Rect(r) = entity {
        let mirrored = rect_to_chain(r, |p| mirror_point(&p, a1, a2));
        // Axis-aligned mirrors keep the rect axis-aligned.
        let axis = a2 - a1;
        if axis.x.abs() < f64::EPSILON || axis.y.abs() < f64::EPSILON {
            return Entity::Rect(Rect::new(mirrored.vertices[0], mirrored.vertices[2]));
        }
        return Entity::Polyline(mirrored);
    }
    let axis_angle = (a2.y - a1.y).atan2(a2.x - a1.x);
    map_entity(entity, |p| mirror_point(&p, a1, a2), 2.0 * axis_angle, 1.0, true)
}

/// Applies `f` to every defining point, `angle_shift`/`radius_factor` to the
/// angular and radial fields. `mirrored` flips arc orientation: a mirror
/// maps angle `a` to `shift − a` and swaps start/end.
fn map_entity(
    entity: &Entity,
    f: impl Fn(Point2) -> Point2,
    angle_shift: f64,
    radius_factor: f64,
    mirrored: bool,
) -> Entity {
    let map_angle = |a: f64| {
        if mirrored {
            normalize_angle(angle_shift - a)
        } else {
            normalize_angle(a + angle_shift)
        }
    };
    let mut out = entity.clone();
    match &mut out {
        Entity::Point(p) => p.position = f(p.position),
        Entity::Line(l) => {
            l.start = f(l.start);
            l.end = f(l.end);
        }
        Entity::Circle(c) => {
            c.center = f(c.center);
            c.radius *= radius_factor;
        }
        Entity::Arc(a) => {
            a.center = f(a.center);
            a.radius *= radius_factor;
            let (s, e) = (map_angle(a.start_angle), map_angle(a.end_angle));
            if mirrored {
                a.start_angle = e;
                a.end_angle = s;
            } else {
                a.start_angle = s;
                a.end_angle = e;
            }
        }
        Entity::Rect(r) => {
            // Only reached by move/scale, which keep axis alignment.
            let c1 = f(r.corner1);
            let c2 = f(r.corner2);
            *r = Rect::new(c1, c2);
        }
        Entity::Polyline(pl) => {
            for v in &mut pl.vertices {
                *v = f(*v);
            }
        }
        Entity::Ellipse(e) => {
            e.center = f(e.center);
            e.major_radius *= radius_factor;
            e.minor_radius *= radius_factor;
            e.rotation = if mirrored {
                normalize_angle(angle_shift - e.rotation)
            } else {
                normalize_angle(e.rotation + angle_shift)
            };
        }
        Entity::Text(t) => {
            t.position = f(t.position);
            t.height *= radius_factor;
            t.rotation = map_angle(t.rotation);
        }
        Entity::Donut(d) => {
            d.center = f(d.center);
            d.inner_radius *= radius_factor;
            d.outer_radius *= radius_factor;
        }
        Entity::Leader(l) => {
            for v in &mut l.vertices {
                *v = f(*v);
            }
        }
        Entity::Dimension(d) => {
            d.p1 = f(d.p1);
            d.p2 = f(d.p2);
            d.location = f(d.location);
        }
        Entity::Hatch(h) => {
            for v in &mut h.boundary {
                *v = f(*v);
            }
        }
        Entity::Image(i) => {
            i.position = f(i.position);
            i.width *= radius_factor;
            i.height *= radius_factor;
            i.rotation = map_angle(i.rotation);
        }
        Entity::BlockRef(b) => {
            b.insert = f(b.insert);
            b.scale *= radius_factor;
            b.rotation = map_angle(b.rotation);
        }
    }
    out
}

fn rect_to_chain(r: &Rect, f: impl Fn(Point2) -> Point2) -> Polyline {
    Polyline::new(r.corners().iter().map(|&c| f(c)).collect(), true)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use super::*;
    use crate::entity::{Arc, Circle, Line};

    const TOL: f64 = 1e-9;

    #[test]
    fn move_leaves_the_original_untouched() {
        let original = Entity::Line(Line::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)));
        let moved = move_entity(&original, &Vector2::new(3.0, 4.0));
        match (&original, &moved) {
            (Entity::Line(a), Entity::Line(b)) => {
                assert!(a.start.x.abs() < TOL);
                assert!((b.start.x - 3.0).abs() < TOL && (b.start.y - 4.0).abs() < TOL);
            }
            _ => panic!("kind changed"),
        }
    }

    #[test]
    fn rotate_arc_shifts_both_angles() {
        let arc = Entity::Arc(Arc::new(Point2::new(2.0, 0.0), 1.0, 0.0, FRAC_PI_2));
        let rotated = rotate_entity(&arc, &Point2::new(0.0, 0.0), FRAC_PI_2);
        match rotated {
            Entity::Arc(a) => {
                assert!(a.center.x.abs() < TOL && (a.center.y - 2.0).abs() < TOL);
                assert!((a.start_angle - FRAC_PI_2).abs() < TOL);
                assert!((a.end_angle - PI).abs() < TOL);
            }
            _ => panic!("kind changed"),
        }
    }

    #[test]
    fn rotate_rect_becomes_a_closed_polyline() {
        let rect = Entity::Rect(Rect::new(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0)));
        match rotate_entity(&rect, &Point2::new(0.0, 0.0), FRAC_PI_4) {
            Entity::Polyline(pl) => {
                assert!(pl.closed);
                assert_eq!(pl.vertices.len(), 4);
            }
            _ => panic!("expected a polyline"),
        }
    }

    #[test]
    fn scale_circle_scales_radius() {
        let c = Entity::Circle(Circle::new(Point2::new(2.0, 0.0), 1.0));
        match scale_entity(&c, &Point2::new(0.0, 0.0), 3.0) {
            Entity::Circle(s) => {
                assert!((s.center.x - 6.0).abs() < TOL);
                assert!((s.radius - 3.0).abs() < TOL);
            }
            _ => panic!("kind changed"),
        }
    }

    #[test]
    fn mirror_arc_keeps_counter_clockwise_sweep() {
        // Quarter arc in the first quadrant mirrored across the Y axis lands
        // in the second quadrant, still sweeping counter-clockwise.
        let arc = Entity::Arc(Arc::new(Point2::new(0.0, 0.0), 1.0, 0.0, FRAC_PI_2));
        let mirrored = mirror_entity(
            &arc,
            &Point2::new(0.0, -1.0),
            &Point2::new(0.0, 1.0),
        );
        match mirrored {
            Entity::Arc(a) => {
                assert!((a.start_angle - FRAC_PI_2).abs() < TOL, "s={}", a.start_angle);
                assert!((a.end_angle - PI).abs() < TOL, "e={}", a.end_angle);
                assert!((a.sweep() - FRAC_PI_2).abs() < TOL);
            }
            _ => panic!("kind changed"),
        }
    }

    #[test]
    fn mirror_across_axis_aligned_line_keeps_rect() {
        let rect = Entity::Rect(Rect::new(Point2::new(1.0, 1.0), Point2::new(3.0, 2.0)));
        match mirror_entity(&rect, &Point2::new(0.0, 0.0), &Point2::new(0.0, 5.0)) {
            Entity::Rect(r) => {
                assert!((r.width() - 2.0).abs() < TOL && (r.height() - 1.0).abs() < TOL);
                assert!((r.center().x + 2.0).abs() < TOL);
            }
            _ => panic!("expected a rect"),
        }
    }
}
