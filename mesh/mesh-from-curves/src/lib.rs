//! Generate structured meshes from parametric curves and surfaces.
//!
//! This crate sweeps a circle along a curve to build a tube, using a moving
//! frame to orient each ring, and samples parametric surfaces onto regular
//! grids. Results are [`StructuredMesh`](mesh_types::StructuredMesh) values
//! ready for export.
//!
//! # Features
//!
//! - **Parallel transport frames**: Rotation-minimizing, stable through
//!   inflections (the default)
//! - **Frenet frames**: Curvature-derived, flip where curvature changes sign
//! - **Analytic or numerical tangents**: Uses the curve's derivative when it
//!   has one, central differences otherwise
//! - **Surface grids**: Positions and normals sampled from a
//!   [`ParametricSurface`](curve_types::ParametricSurface)
//!
//! # Quick Start
//!
//! ```
//! use curve_types::{FnCurve, Point3};
//! use mesh_from_curves::{tube_from_curve, FrameStrategy, TubeConfig};
//!
//! let helix = FnCurve::new(
//!     |t| Point3::new(t.cos(), t.sin(), 0.1 * t),
//!     0.0,
//!     20.0 * std::f64::consts::PI,
//! );
//!
//! let config = TubeConfig::default()
//!     .with_radius(0.2)
//!     .with_curve_points(500)
//!     .with_circle_points(16)
//!     .with_strategy(FrameStrategy::ParallelTransport);
//!
//! let mesh = tube_from_curve(&helix, &config).unwrap();
//! assert_eq!(mesh.vertex_count(), 500 * 16);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

mod error;
mod frame;
mod surface;
mod tube;

pub use error::{CurveError, CurveResult};
pub use frame::{Frame, FrameStrategy, frenet_frames, parallel_transport_frames};
pub use surface::{SurfaceGridConfig, surface_mesh};
pub use tube::{TubeConfig, TubularMeshGenerator, color_by_parameter, tube_from_curve};
