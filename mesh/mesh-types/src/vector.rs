//! Vector helpers layered on nalgebra.
//!
//! nalgebra supplies the arithmetic (add, subtract, scale, dot, cross). The
//! one behavior it does not fix is what normalizing a (near) zero vector
//! should return; [`NormalizeOrZero`] pins that down for the whole workspace.

use nalgebra::{Vector2, Vector3};

/// Length at or below which a vector is treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Normalization that maps degenerate input to the zero vector.
///
/// # Example
///
/// ```
/// use mesh_types::{NormalizeOrZero, Vector3};
///
/// let v = Vector3::new(3.0, 0.0, 4.0).normalized_or_zero();
/// assert!((v.norm() - 1.0).abs() < 1e-12);
///
/// let z = Vector3::new(1e-12, 0.0, 0.0).normalized_or_zero();
/// assert_eq!(z, Vector3::zeros());
/// ```
pub trait NormalizeOrZero: Sized {
    /// Return the unit vector in the same direction, or zero if the length
    /// does not exceed [`NORMALIZE_EPSILON`].
    #[must_use]
    fn normalized_or_zero(&self) -> Self;

    /// Whether the length does not exceed [`NORMALIZE_EPSILON`].
    fn is_degenerate(&self) -> bool;
}

impl NormalizeOrZero for Vector3<f64> {
    #[inline]
    fn normalized_or_zero(&self) -> Self {
        self.try_normalize(NORMALIZE_EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        self.norm() <= NORMALIZE_EPSILON
    }
}

impl NormalizeOrZero for Vector2<f64> {
    #[inline]
    fn normalized_or_zero(&self) -> Self {
        self.try_normalize(NORMALIZE_EPSILON)
            .unwrap_or_else(Vector2::zeros)
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        self.norm() <= NORMALIZE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalizes_regular_vector() {
        let v = Vector3::new(0.0, -2.0, 0.0).normalized_or_zero();
        assert_relative_eq!(v, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_vector_stays_zero() {
        let v = Vector3::<f64>::zeros().normalized_or_zero();
        assert_eq!(v, Vector3::zeros());
        assert!(v.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn below_epsilon_is_zero() {
        let v = Vector3::new(5e-10, 0.0, 0.0);
        assert!(v.is_degenerate());
        assert_eq!(v.normalized_or_zero(), Vector3::zeros());
    }

    #[test]
    fn just_above_epsilon_is_unit() {
        let v = Vector3::new(0.0, 0.0, 1e-8).normalized_or_zero();
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn two_dimensional() {
        let v = Vector2::new(3.0, 4.0).normalized_or_zero();
        assert_relative_eq!(v, Vector2::new(0.6, 0.8), epsilon = 1e-12);
        assert_eq!(Vector2::<f64>::zeros().normalized_or_zero(), Vector2::zeros());
    }
}
