use thiserror::Error;

/// Top-level error type for the draftis geometry core.
///
/// Geometric infeasibility (parallel lines, unreachable boundaries, empty
/// intersection sets) is *not* an error — those cases soft-fail with `None`
/// or an empty collection so an interactive session can no-op gracefully.
/// Errors are reserved for contract violations the caller can fix.
#[derive(Debug, Error)]
pub enum DraftisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors related to geometric constructions.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("negative radius: {0}")]
    NegativeRadius(f64),
}

/// Errors related to the drawing store.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("entity not found")]
    EntityNotFound,

    #[error("block definition not found: {0}")]
    BlockNotFound(String),
}

/// Convenience type alias for results using [`DraftisError`].
pub type Result<T> = std::result::Result<T, DraftisError>;
