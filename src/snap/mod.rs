//! Priority-ordered cursor snapping.
//!
//! Every enabled mode proposes candidate points near the cursor; the
//! resolver picks exactly one winner. Priority is fixed — an endpoint beats
//! a nearest-point candidate even when the latter is strictly closer —
//! and distance only breaks ties within a mode.

mod generate;

use crate::entity::Entity;
use crate::math::Point2;

/// A snap mode, in resolution priority order (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapMode {
    /// Real pairwise entity intersections.
    Intersection,
    /// Segment and arc endpoints, rect corners, polyline vertices.
    Endpoint,
    /// Segment and arc midpoints.
    Midpoint,
    /// Circle, arc, donut and ellipse centers.
    Center,
    /// 0°/90°/180°/270° points, rotation-aware for ellipses.
    Quadrant,
    /// Point entities.
    Node,
    /// Foot of the perpendicular from the active from-point.
    Perpendicular,
    /// Tangent touch points seen from the active from-point.
    Tangent,
    /// Points on a line's carrier beyond its ends, or on an arc's
    /// supporting circle beyond its angular range.
    Extension,
    /// Pairwise intersections that exist only under extension.
    ApparentIntersection,
    /// Closest point on an entity boundary.
    Nearest,
    /// Nearest grid point.
    Grid,
}

impl SnapMode {
    /// All modes, highest priority first.
    pub const ALL: [SnapMode; 12] = [
        SnapMode::Intersection,
        SnapMode::Endpoint,
        SnapMode::Midpoint,
        SnapMode::Center,
        SnapMode::Quadrant,
        SnapMode::Node,
        SnapMode::Perpendicular,
        SnapMode::Tangent,
        SnapMode::Extension,
        SnapMode::ApparentIntersection,
        SnapMode::Nearest,
        SnapMode::Grid,
    ];

    fn bit(self) -> u16 {
        match self {
            SnapMode::Intersection => 1,
            SnapMode::Endpoint => 1 << 1,
            SnapMode::Midpoint => 1 << 2,
            SnapMode::Center => 1 << 3,
            SnapMode::Quadrant => 1 << 4,
            SnapMode::Node => 1 << 5,
            SnapMode::Perpendicular => 1 << 6,
            SnapMode::Tangent => 1 << 7,
            SnapMode::Extension => 1 << 8,
            SnapMode::ApparentIntersection => 1 << 9,
            SnapMode::Nearest => 1 << 10,
            SnapMode::Grid => 1 << 11,
        }
    }
}

/// The set of enabled snap modes, packed into a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapModeSet(u16);

impl SnapModeSet {
    pub const NONE: SnapModeSet = SnapModeSet(0);

    /// Every mode enabled.
    #[must_use]
    pub fn all() -> Self {
        SnapMode::ALL.iter().fold(Self::NONE, |s, &m| s.with(m))
    }

    /// A set from an explicit mode list.
    #[must_use]
    pub fn of(modes: &[SnapMode]) -> Self {
        modes.iter().fold(Self::NONE, |s, &m| s.with(m))
    }

    #[must_use]
    pub fn with(self, mode: SnapMode) -> Self {
        Self(self.0 | mode.bit())
    }

    #[must_use]
    pub fn without(self, mode: SnapMode) -> Self {
        Self(self.0 & !mode.bit())
    }

    #[must_use]
    pub fn contains(self, mode: SnapMode) -> bool {
        self.0 & mode.bit() != 0
    }
}

impl Default for SnapModeSet {
    fn default() -> Self {
        Self::all()
    }
}

/// A point proposed by one snap mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub point: Point2,
    pub mode: SnapMode,
    /// Distance from the cursor to the proposed point.
    pub distance: f64,
}

/// Per-call snapping configuration.
///
/// `from_point` is the last committed point of the in-progress draw
/// operation; perpendicular and tangent snapping need it and generate
/// nothing without it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapContext {
    pub enabled: SnapModeSet,
    /// Maximum cursor-to-candidate distance, in drawing units.
    pub tolerance: f64,
    /// Grid spacing for grid snapping; non-positive disables the grid.
    pub grid_spacing: f64,
    pub from_point: Option<Point2>,
}

impl Default for SnapContext {
    fn default() -> Self {
        Self {
            enabled: SnapModeSet::all(),
            tolerance: 0.5,
            grid_spacing: 1.0,
            from_point: None,
        }
    }
}

/// Resolves the cursor against the entity set to at most one snap
/// candidate.
///
/// Modes are tried highest priority first; the first mode producing any
/// candidate within tolerance wins, and its closest candidate is returned.
#[must_use]
pub fn resolve_snap(
    cursor: &Point2,
    entities: &[Entity],
    ctx: &SnapContext,
) -> Option<SnapCandidate> {
    for mode in SnapMode::ALL {
        if !ctx.enabled.contains(mode) {
            continue;
        }
        let winner = generate::candidates(mode, cursor, entities, ctx)
            .into_iter()
            .map(|point| SnapCandidate {
                point,
                mode,
                distance: (point - cursor).norm(),
            })
            .filter(|c| c.distance <= ctx.tolerance)
            .min_by(|a, b| a.distance.total_cmp(&b.distance));
        if winner.is_some() {
            return winner;
        }
    }
    None
}
