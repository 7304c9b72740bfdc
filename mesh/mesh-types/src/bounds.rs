//! Axis-aligned bounding box.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 5.0, 3.0),
///     Point3::new(-2.0, 8.0, 1.0),
/// ];
///
/// let aabb = Aabb::from_points(points.iter());
/// assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
/// assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create an empty (invalid) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Grow the AABB so it contains `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
