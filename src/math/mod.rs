pub mod angle_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod point_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Determinant tolerance (dimensionless). A 2×2 cross-product determinant
/// below this magnitude means the system is parallel/coincident and has no
/// unique solution.
pub const DET_EPSILON: f64 = 1e-10;

/// Degenerate-length tolerance (drawing units). Trim/offset fragments shorter
/// than this are dropped, and gap decisions in corner reconciliation use it.
pub const GAP_EPSILON: f64 = 1e-3;

/// Point-chaining tolerance (drawing units). Two points closer than this are
/// treated as the same boundary point when deduplicating intersection sets.
pub const CHAIN_EPSILON: f64 = 1e-6;
