//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

use crate::vector::NormalizeOrZero;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.normal_unnormalized().norm() - 1.0).abs() < 1e-10);
/// assert!((tri.face_normal().z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal `(v1 - v0) × (v2 - v0)`.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal, or the zero vector for a degenerate
    /// (zero-area) triangle.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle, Point3, Vector3};
    ///
    /// let degen = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    /// );
    /// assert_eq!(degen.face_normal(), Vector3::zeros());
    /// ```
    #[inline]
    #[must_use]
    pub fn face_normal(&self) -> Vector3<f64> {
        self.normal_unnormalized().normalized_or_zero()
    }

    /// Get vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }
}
