//! Error types for mesh-from-curves operations.

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for mesh-from-curves operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur during curve-to-mesh operations.
///
/// Every configuration variant names the offending parameter. Geometric
/// degeneracies (stationary tangents, vanishing curvature) are not errors;
/// they yield zero vectors in the affected frames.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Too few samples along the curve.
    #[error("num_curve_points must be at least {min}, got {actual}")]
    TooFewCurvePoints {
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Too few samples around the circle.
    #[error("num_circle_points must be at least {min}, got {actual}")]
    TooFewCirclePoints {
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Too few samples along one axis of a surface grid.
    #[error("{axis} must be at least {min}, got {actual}")]
    TooFewGridPoints {
        /// Name of the offending parameter.
        axis: &'static str,
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Radius is not finite.
    #[error("radius must be finite, got {0}")]
    InvalidRadius(f64),

    /// Reference-axis tolerance is outside `(0, 0.5)`.
    #[error("eps must lie in (0, 0.5), got {0}")]
    InvalidEpsilon(f64),

    /// Relative differentiation step is not a positive finite number.
    #[error("relative_step must be positive and finite, got {0}")]
    InvalidRelativeStep(f64),

    /// Parameter interval is empty or not finite.
    #[error("parameter interval [{start}, {end}] must be finite and non-empty")]
    InvalidInterval {
        /// Start of the interval.
        start: f64,
        /// End of the interval.
        end: f64,
    },

    /// The mesh has no parameter axes to drive a per-parameter operation.
    #[error("mesh has no parameter axes")]
    MissingParameters,

    /// Error from the underlying grid container.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
