use thiserror::Error;

/// Top-level error type for area assembly.
///
/// Broken input geometry is not an error: self-intersections, open rings and
/// orphaned inner rings are reported through the returned area and the
/// problem list. Only conditions that make the input unusable or that indicate
/// a broken internal invariant end up here.
#[derive(Debug, Error)]
pub enum AreaError {
    #[error("location ({lon}, {lat}) is outside the valid coordinate range")]
    InvalidLocation { lon: f64, lat: f64 },

    #[error("ring handle does not resolve to a live ring")]
    RingNotFound,
}

/// Convenience type alias for results using [`AreaError`].
pub type Result<T> = std::result::Result<T, AreaError>;
