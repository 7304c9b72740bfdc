//! Parametric curves and surfaces for tube meshing.
//!
//! This crate defines the capability contract the generators sweep over:
//!
//! - [`ParametricCurve`] - `t ↦ C(t)` with an optional analytic derivative
//! - [`ParametricSurface`] - `(u, v) ↦ S(u, v)` with optional analytic partials
//! - [`FnCurve`] / [`FnSurface`] - Closure adapters for ad-hoc shapes
//!
//! and the numerical tools used when no analytic derivative is available:
//!
//! - [`derivative`] - Central difference, optionally restricted to an interval
//! - [`step_size`] - Difference step scaled to the sampling resolution
//! - [`sample_parameters`] - Uniform parameter sampling with exact endpoints
//! - [`unit_tangent`] - Normalized derivative with a zero-vector fallback
//!
//! # Example
//!
//! ```
//! use curve_types::{unit_tangent, FnCurve, ParametricCurve, Point3};
//!
//! let helix = FnCurve::new(
//!     |t| Point3::new(t.cos(), t.sin(), 0.1 * t),
//!     0.0,
//!     std::f64::consts::TAU,
//! );
//!
//! let t = unit_tangent(&helix, 1.0, helix.start_parameter(), helix.end_parameter(), 1e-4);
//! assert!((t.norm() - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

mod adapters;
mod diff;
mod traits;

pub use adapters::{FnCurve, FnSurface};
pub use diff::{
    curve_derivative, derivative, sample_parameters, step_size, surface_partials, unit_tangent,
};
pub use traits::{ParametricCurve, ParametricSurface};

pub use nalgebra::{Point3, Vector3};
