//! Core mesh types for structured tube meshing.
//!
//! This crate provides the foundational types shared by the generators and
//! the exporters:
//!
//! - [`StructuredMesh`] - A `num_points1 × num_points2` grid of vertices with
//!   optional normals, colors and parameter axes
//! - [`Quad`] - One grid cell and its fixed two-triangle split
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`VertexColor`] - RGBA color with `f32` components in `[0, 1]`
//! - [`NormalizeOrZero`] - Normalization with a zero-vector degeneracy policy
//!
//! # Storage
//!
//! Grids are stored row-major in a single flat buffer: node `(i, j)` lives at
//! `i * num_points2 + j`. Every exporter walks vertices in this order, so the
//! flat index is also the (0-based) export index.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. For a tube built with a positive
//! radius, the triangles returned by [`StructuredMesh::triangle_indices`] are
//! counter-clockwise when viewed from outside.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Point3, StructuredMesh};
//!
//! let mut mesh = StructuredMesh::new(3, 4).unwrap();
//! mesh.set_node(1, 2, Point3::new(1.0, 2.0, 3.0)).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 12);
//! assert_eq!(mesh.triangle_count(), 2 * 3 * 2);
//! assert!(mesh.quad(2, 0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod color;
mod error;
mod grid;
mod quad;
mod triangle;
mod vector;

pub use bounds::Aabb;
pub use color::VertexColor;
pub use error::{MeshError, MeshResult};
pub use grid::StructuredMesh;
pub use quad::Quad;
pub use triangle::Triangle;
pub use vector::{NORMALIZE_EPSILON, NormalizeOrZero};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};
