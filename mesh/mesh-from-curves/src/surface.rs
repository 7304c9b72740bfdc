//! Structured grids sampled from parametric surfaces.

use curve_types::{ParametricSurface, sample_parameters, step_size, surface_partials};
use mesh_types::{NormalizeOrZero, StructuredMesh};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CurveError, CurveResult};

/// Configuration for surface grid sampling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceGridConfig {
    /// Number of samples along `u` (at least 2).
    pub num_points_u: usize,
    /// Number of samples along `v` (at least 2).
    pub num_points_v: usize,
    /// Differentiation step relative to the sampling interval.
    pub relative_step: f64,
}

impl Default for SurfaceGridConfig {
    fn default() -> Self {
        Self {
            num_points_u: 32,
            num_points_v: 32,
            relative_step: 1e-3,
        }
    }
}

impl SurfaceGridConfig {
    /// Set the number of samples along each direction.
    #[must_use]
    pub const fn with_resolution(mut self, num_points_u: usize, num_points_v: usize) -> Self {
        self.num_points_u = num_points_u;
        self.num_points_v = num_points_v;
        self
    }

    /// Set the relative differentiation step.
    #[must_use]
    pub const fn with_relative_step(mut self, relative_step: f64) -> Self {
        self.relative_step = relative_step;
        self
    }
}

/// Sample `surface` on a regular grid over its bounds.
///
/// Node `(i, j)` is `S(u_i, v_j)`, its normal `normalize(∂S/∂u × ∂S/∂v)`
/// (zero where the partials are parallel). Partials are analytic when the
/// surface provides them, else restricted central differences.
///
/// # Errors
///
/// Returns an error if either resolution is below 2 or the relative step is
/// not positive.
///
/// # Example
///
/// ```
/// use curve_types::{FnSurface, Point3};
/// use mesh_from_curves::{surface_mesh, SurfaceGridConfig};
///
/// let plane = FnSurface::new(|u, v| Point3::new(u, v, 0.0), (0.0, 1.0), (0.0, 1.0));
/// let mesh = surface_mesh(&plane, &SurfaceGridConfig::default().with_resolution(3, 5)).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 15);
/// let n = mesh.normal(1, 1).unwrap().unwrap();
/// assert!((n.z - 1.0).abs() < 1e-9);
/// ```
pub fn surface_mesh<S>(surface: &S, config: &SurfaceGridConfig) -> CurveResult<StructuredMesh>
where
    S: ParametricSurface + ?Sized,
{
    if config.num_points_u < 2 {
        return Err(CurveError::TooFewGridPoints {
            axis: "num_points_u",
            min: 2,
            actual: config.num_points_u,
        });
    }
    if config.num_points_v < 2 {
        return Err(CurveError::TooFewGridPoints {
            axis: "num_points_v",
            min: 2,
            actual: config.num_points_v,
        });
    }
    if !(config.relative_step.is_finite() && config.relative_step > 0.0) {
        return Err(CurveError::InvalidRelativeStep(config.relative_step));
    }

    let us = sample_parameters(surface.u_start(), surface.u_end(), config.num_points_u);
    let vs = sample_parameters(surface.v_start(), surface.v_end(), config.num_points_v);
    let hu = step_size(
        config.relative_step,
        surface.u_start(),
        surface.u_end(),
        config.num_points_u,
    );
    let hv = step_size(
        config.relative_step,
        surface.v_start(),
        surface.v_end(),
        config.num_points_v,
    );

    let mut mesh = StructuredMesh::new(config.num_points_u, config.num_points_v)?.with_normals();
    for (i, &u) in us.iter().enumerate() {
        for (j, &v) in vs.iter().enumerate() {
            let (du, dv) = surface_partials(surface, u, v, hu, hv);
            mesh.set_node(i, j, surface.evaluate(u, v))?;
            mesh.set_normal(i, j, du.cross(&dv).normalized_or_zero())?;
        }
    }
    mesh.set_parameters(us, vs)?;

    debug!(
        rows = mesh.num_points1(),
        cols = mesh.num_points2(),
        "sampled surface grid"
    );
    Ok(mesh)
}
