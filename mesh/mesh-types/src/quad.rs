//! Grid cells and their triangle split.

/// One cell `(i, j)` of a [`StructuredMesh`](crate::StructuredMesh).
///
/// Corners are stored as flat vertex indices in cyclic order
/// `(i, j), (i+1, j), (i+1, j+1), (i, j+1)`. Every exporter splits a cell
/// along the `(i, j)`–`(i+1, j+1)` diagonal via [`Quad::triangles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad {
    /// Cell index along the first grid direction.
    pub i: usize,
    /// Cell index along the second grid direction.
    pub j: usize,
    /// Flat vertex indices in cyclic order.
    pub corners: [usize; 4],
}

impl Quad {
    /// The two triangles of this cell.
    ///
    /// `[(i,j), (i,j+1), (i+1,j+1)]` and `[(i,j), (i+1,j+1), (i+1,j)]`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::StructuredMesh;
    ///
    /// let mesh = StructuredMesh::new(2, 2).unwrap();
    /// let quad = mesh.quad(0, 0).unwrap();
    /// assert_eq!(quad.corners, [0, 2, 3, 1]);
    /// assert_eq!(quad.triangles(), [[0, 1, 3], [0, 3, 2]]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn triangles(&self) -> [[usize; 3]; 2] {
        let [a, b, c, d] = self.corners;
        [[a, d, c], [a, c, b]]
    }
}
