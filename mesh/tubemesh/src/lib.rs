//! Tubular meshes around parametric curves.
//!
//! This umbrella crate re-exports the tube-meshing crates, providing a
//! unified API from curve definition to exported file.
//!
//! # Quick Start
//!
//! ```no_run
//! use tubemesh::prelude::*;
//!
//! // A helix, with its analytic derivative
//! let helix = FnCurve::new(
//!     |t| Point3::new(t.cos(), t.sin(), 0.1 * t),
//!     0.0,
//!     20.0 * std::f64::consts::PI,
//! )
//! .with_derivative(|t| Vector3::new(-t.sin(), t.cos(), 0.1));
//!
//! // Sweep a circle along it
//! let config = TubeConfig::default()
//!     .with_radius(0.2)
//!     .with_curve_points(1000)
//!     .with_circle_points(24);
//! let mesh = tube_from_curve(&helix, &config).unwrap();
//!
//! // Export
//! save_mesh(&mesh, "helix.stl").unwrap();
//! let material = MaterialProperties::named("copper").with_transparency(0.8);
//! save_obj_with_material(&mesh, "helix.obj", &material, ObjMode::Surface).unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `StructuredMesh`, `Quad`, `VertexColor`, vector helpers
//! - [`curves`] - Curve and surface capability traits, numerical derivatives
//! - [`from_curves`] - Moving frames, tube generation, surface sampling
//! - [`io`] - OBJ/MTL, binary STL and glTF export
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for configurations, colors,
//!   materials and lights

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Structured grid mesh types and vector helpers.
pub use mesh_types as types;

/// Curve and surface capability traits, numerical differentiation.
pub use curve_types as curves;

/// Moving frames, tube generation and surface sampling.
pub use mesh_from_curves as from_curves;

/// OBJ/MTL, binary STL and glTF export.
pub use mesh_io as io;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for tube meshing.
///
/// # Usage
///
/// ```
/// use tubemesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{NormalizeOrZero, Point3, StructuredMesh, Vector3, VertexColor};

    // Curves
    pub use curve_types::{FnCurve, FnSurface, ParametricCurve, ParametricSurface};

    // Generation
    pub use mesh_from_curves::{
        FrameStrategy, SurfaceGridConfig, TubeConfig, TubularMeshGenerator, surface_mesh,
        tube_from_curve,
    };

    // I/O
    pub use mesh_io::{
        GltfOptions, Light, LightKind, MaterialProperties, MeshFormat, ObjMode, ObjOptions,
        save_gltf, save_mesh, save_obj, save_obj_with_material, save_stl,
    };
}

// =============================================================================
// Tests
// =============================================================================
