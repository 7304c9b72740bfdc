//! Structured (grid) mesh.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, MeshError, MeshResult, Quad, Triangle, VertexColor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `num_points1 × num_points2` grid of vertices.
///
/// Node `(i, j)` is stored at flat index `i * num_points2 + j`. Normals and
/// colors are optional parallel grids with identical dimensions; the
/// parameter axes `params1` / `params2` are present only for regular grids
/// (see [`Self::is_regular`]).
///
/// A grid with a single row or column is valid (it is a polyline and has no
/// faces) so it can still be exported as a wireframe.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, StructuredMesh, Vector3};
///
/// let mut mesh = StructuredMesh::new(2, 3).unwrap();
/// mesh.set_node(1, 2, Point3::new(1.0, 0.0, 0.0)).unwrap();
/// mesh.set_normal(1, 2, Vector3::x()).unwrap();
///
/// assert_eq!(mesh.index(1, 2).unwrap(), 5);
/// assert_eq!(mesh.normal(1, 2).unwrap(), Some(Vector3::x()));
/// assert_eq!(mesh.quad_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructuredMesh {
    num_points1: usize,
    num_points2: usize,
    nodes: Vec<Point3<f64>>,
    normals: Option<Vec<Vector3<f64>>>,
    colors: Option<Vec<VertexColor>>,
    params1: Option<Vec<f64>>,
    params2: Option<Vec<f64>>,
}

impl StructuredMesh {
    /// Create a grid with every node at the origin and no attributes.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidDimensions`] if either dimension is zero.
    pub fn new(num_points1: usize, num_points2: usize) -> MeshResult<Self> {
        if num_points1 == 0 || num_points2 == 0 {
            return Err(MeshError::InvalidDimensions {
                num_points1,
                num_points2,
            });
        }

        Ok(Self {
            num_points1,
            num_points2,
            nodes: vec![Point3::origin(); num_points1 * num_points2],
            normals: None,
            colors: None,
            params1: None,
            params2: None,
        })
    }

    /// Allocate the normal grid (zero-filled) if it is not present yet.
    #[must_use]
    pub fn with_normals(mut self) -> Self {
        self.ensure_normals();
        self
    }

    /// Allocate the color grid (white-filled) if it is not present yet.
    #[must_use]
    pub fn with_colors(mut self) -> Self {
        self.ensure_colors();
        self
    }

    /// Number of points along the first direction (rows).
    #[inline]
    #[must_use]
    pub const fn num_points1(&self) -> usize {
        self.num_points1
    }

    /// Number of points along the second direction (columns).
    #[inline]
    #[must_use]
    pub const fn num_points2(&self) -> usize {
        self.num_points2
    }

    /// Total number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of grid cells.
    #[inline]
    #[must_use]
    pub const fn quad_count(&self) -> usize {
        self.num_points1.saturating_sub(1) * self.num_points2.saturating_sub(1)
    }

    /// Number of triangles after splitting every cell in two.
    #[inline]
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.quad_count() * 2
    }

    /// Whether the grid has at least one cell.
    #[inline]
    #[must_use]
    pub const fn has_faces(&self) -> bool {
        self.quad_count() > 0
    }

    /// Flat index of node `(i, j)`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `(i, j)` is outside the grid.
    pub fn index(&self, i: usize, j: usize) -> MeshResult<usize> {
        if i >= self.num_points1 || j >= self.num_points2 {
            return Err(MeshError::OutOfBounds {
                what: "node",
                i,
                j,
                rows: self.num_points1,
                cols: self.num_points2,
            });
        }
        Ok(self.flat(i, j))
    }

    #[inline]
    const fn flat(&self, i: usize, j: usize) -> usize {
        i * self.num_points2 + j
    }

    /// Position of node `(i, j)`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `(i, j)` is outside the grid.
    pub fn node(&self, i: usize, j: usize) -> MeshResult<Point3<f64>> {
        let idx = self.index(i, j)?;
        Ok(self.nodes[idx])
    }

    /// Set the position of node `(i, j)`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `(i, j)` is outside the grid.
    pub fn set_node(&mut self, i: usize, j: usize, position: Point3<f64>) -> MeshResult<()> {
        let idx = self.index(i, j)?;
        self.nodes[idx] = position;
        Ok(())
    }

    /// Normal of node `(i, j)`, or `None` if the mesh carries no normals.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `(i, j)` is outside the grid.
    pub fn normal(&self, i: usize, j: usize) -> MeshResult<Option<Vector3<f64>>> {
        let idx = self.index(i, j)?;
        Ok(self.normals.as_ref().map(|n| n[idx]))
    }

    /// Set the normal of node `(i, j)`, allocating the normal grid on first use.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `(i, j)` is outside the grid.
    pub fn set_normal(&mut self, i: usize, j: usize, normal: Vector3<f64>) -> MeshResult<()> {
        let idx = self.index(i, j)?;
        self.ensure_normals()[idx] = normal;
        Ok(())
    }

    /// Color of node `(i, j)`, or `None` if the mesh carries no colors.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `(i, j)` is outside the grid.
    pub fn color(&self, i: usize, j: usize) -> MeshResult<Option<VertexColor>> {
        let idx = self.index(i, j)?;
        Ok(self.colors.as_ref().map(|c| c[idx]))
    }

    /// Set the color of node `(i, j)`, allocating the color grid on first use.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `(i, j)` is outside the grid.
    pub fn set_color(&mut self, i: usize, j: usize, color: VertexColor) -> MeshResult<()> {
        let idx = self.index(i, j)?;
        self.ensure_colors()[idx] = color;
        Ok(())
    }

    /// All positions in row-major order.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Point3<f64>] {
        &self.nodes
    }

    /// All normals in row-major order, if present.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> Option<&[Vector3<f64>]> {
        self.normals.as_deref()
    }

    /// All colors in row-major order, if present.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> Option<&[VertexColor]> {
        self.colors.as_deref()
    }

    /// Positions of row `i` (all `j` for a fixed `i`).
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] if `i` is outside the grid.
    pub fn row(&self, i: usize) -> MeshResult<&[Point3<f64>]> {
        let start = self.index(i, 0)?;
        Ok(&self.nodes[start..start + self.num_points2])
    }

    /// Attach the parameter axes, marking the grid as regular.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::LengthMismatch`] if `params1` does not have
    /// `num_points1` entries or `params2` does not have `num_points2` entries.
    pub fn set_parameters(&mut self, params1: Vec<f64>, params2: Vec<f64>) -> MeshResult<()> {
        if params1.len() != self.num_points1 {
            return Err(MeshError::LengthMismatch {
                attribute: "params1",
                expected: self.num_points1,
                actual: params1.len(),
            });
        }
        if params2.len() != self.num_points2 {
            return Err(MeshError::LengthMismatch {
                attribute: "params2",
                expected: self.num_points2,
                actual: params2.len(),
            });
        }
        self.params1 = Some(params1);
        self.params2 = Some(params2);
        Ok(())
    }

    /// Whether the grid carries regular parameter axes.
    #[inline]
    #[must_use]
    pub const fn is_regular(&self) -> bool {
        self.params1.is_some() && self.params2.is_some()
    }

    /// Parameter values along the first direction (regular grids only).
    #[inline]
    #[must_use]
    pub fn params1(&self) -> Option<&[f64]> {
        self.params1.as_deref()
    }

    /// Parameter values along the second direction (regular grids only).
    #[inline]
    #[must_use]
    pub fn params2(&self) -> Option<&[f64]> {
        self.params2.as_deref()
    }

    /// Cell `(i, j)`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::OutOfBounds`] unless `i < num_points1 - 1` and
    /// `j < num_points2 - 1`.
    pub fn quad(&self, i: usize, j: usize) -> MeshResult<Quad> {
        let rows = self.num_points1.saturating_sub(1);
        let cols = self.num_points2.saturating_sub(1);
        if i >= rows || j >= cols {
            return Err(MeshError::OutOfBounds {
                what: "quad",
                i,
                j,
                rows,
                cols,
            });
        }
        Ok(self.quad_unchecked(i, j))
    }

    const fn quad_unchecked(&self, i: usize, j: usize) -> Quad {
        Quad {
            i,
            j,
            corners: [
                self.flat(i, j),
                self.flat(i + 1, j),
                self.flat(i + 1, j + 1),
                self.flat(i, j + 1),
            ],
        }
    }

    /// Iterate over all cells, row by row.
    pub fn quads(&self) -> impl Iterator<Item = Quad> + '_ {
        let rows = self.num_points1.saturating_sub(1);
        let cols = self.num_points2.saturating_sub(1);
        (0..rows).flat_map(move |i| (0..cols).map(move |j| self.quad_unchecked(i, j)))
    }

    /// Iterate over triangle vertex indices (two per cell, same split for
    /// every exporter).
    pub fn triangle_indices(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.quads().flat_map(|q| q.triangles())
    }

    /// Iterate over triangles with resolved positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangle_indices()
            .map(|[a, b, c]| Triangle::new(self.nodes[a], self.nodes[b], self.nodes[c]))
    }

    /// Bounding box of all nodes.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.nodes.iter())
    }

    fn ensure_normals(&mut self) -> &mut Vec<Vector3<f64>> {
        let len = self.nodes.len();
        self.normals.get_or_insert_with(|| vec![Vector3::zeros(); len])
    }

    fn ensure_colors(&mut self) -> &mut Vec<VertexColor> {
        let len = self.nodes.len();
        self.colors.get_or_insert_with(|| vec![VertexColor::WHITE; len])
    }
}
