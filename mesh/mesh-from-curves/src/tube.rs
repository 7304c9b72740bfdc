//! Tube mesh generation from parametric curves.
//!
//! Sweeps a circle of constant radius along a curve using a moving frame and
//! stores the result in a [`StructuredMesh`]: row `i` is the ring at curve
//! parameter `t_i`, column `j` the angle `θ_j = j·2π/(K-1)`. The first and
//! last columns coincide, so the seam vertex is duplicated.

use std::f64::consts::TAU;

use curve_types::{ParametricCurve, sample_parameters, step_size, unit_tangent};
use mesh_types::{NormalizeOrZero, Point3, StructuredMesh, Vector3, VertexColor};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CurveError, CurveResult};
use crate::frame::{Frame, FrameStrategy, frenet_frames, parallel_transport_frames};

/// Configuration for tube generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TubeConfig {
    /// Radius of the tube. Negative values turn the tube inside out.
    pub radius: f64,
    /// Number of rings along the curve (at least 2).
    pub num_curve_points: usize,
    /// Number of vertices around each ring, seam included (at least 2).
    pub num_circle_points: usize,
    /// Frame propagation strategy.
    pub strategy: FrameStrategy,
    /// Reference-axis tolerance for the first parallel transport frame,
    /// in `(0, 0.5)`.
    pub eps: f64,
    /// Re-orthogonalize each binormal from its predecessor instead of
    /// recomputing it as `T × N`.
    pub normalize_from_previous: bool,
    /// Differentiation step relative to the sampling interval.
    pub relative_step: f64,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            num_curve_points: 64,
            num_circle_points: 17,
            strategy: FrameStrategy::ParallelTransport,
            eps: 0.1,
            normalize_from_previous: false,
            relative_step: 1e-3,
        }
    }
}

impl TubeConfig {
    /// Set the tube radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the number of rings along the curve.
    #[must_use]
    pub const fn with_curve_points(mut self, num_curve_points: usize) -> Self {
        self.num_curve_points = num_curve_points;
        self
    }

    /// Set the number of vertices around each ring.
    #[must_use]
    pub const fn with_circle_points(mut self, num_circle_points: usize) -> Self {
        self.num_circle_points = num_circle_points;
        self
    }

    /// Set the frame propagation strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: FrameStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the reference-axis tolerance.
    #[must_use]
    pub const fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Re-orthogonalize binormals from their predecessors.
    #[must_use]
    pub const fn normalize_from_previous(mut self, enabled: bool) -> Self {
        self.normalize_from_previous = enabled;
        self
    }

    /// Set the relative differentiation step.
    #[must_use]
    pub const fn with_relative_step(mut self, relative_step: f64) -> Self {
        self.relative_step = relative_step;
        self
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns the [`CurveError`] variant naming the first invalid field.
    pub fn validate(&self) -> CurveResult<()> {
        if self.num_curve_points < 2 {
            return Err(CurveError::TooFewCurvePoints {
                min: 2,
                actual: self.num_curve_points,
            });
        }
        if self.num_circle_points < 2 {
            return Err(CurveError::TooFewCirclePoints {
                min: 2,
                actual: self.num_circle_points,
            });
        }
        if !self.radius.is_finite() {
            return Err(CurveError::InvalidRadius(self.radius));
        }
        if !(self.eps > 0.0 && self.eps < 0.5) {
            return Err(CurveError::InvalidEpsilon(self.eps));
        }
        if !(self.relative_step.is_finite() && self.relative_step > 0.0) {
            return Err(CurveError::InvalidRelativeStep(self.relative_step));
        }
        Ok(())
    }
}

/// Builds tubular meshes around curves.
///
/// The generator holds no state; construct one wherever it is needed or
/// share a single instance across threads.
///
/// # Example
///
/// ```
/// use curve_types::{FnCurve, Point3};
/// use mesh_from_curves::{TubeConfig, TubularMeshGenerator};
/// use std::f64::consts::TAU;
///
/// let circle = FnCurve::new(|t| Point3::new(t.cos(), t.sin(), 0.0), 0.0, TAU);
/// let config = TubeConfig::default()
///     .with_radius(0.1)
///     .with_curve_points(4)
///     .with_circle_points(4);
///
/// let mesh = TubularMeshGenerator::new()
///     .generate(&circle, None, 0.0, TAU, &config)
///     .unwrap();
///
/// assert_eq!(mesh.vertex_count(), 16);
/// assert_eq!(mesh.triangle_count(), 18);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TubularMeshGenerator;

impl TubularMeshGenerator {
    /// Create a generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Sweep a circle along `curve` over `[t_start, t_end]`.
    ///
    /// `tangent`, when given, replaces the curve's own derivative as the
    /// tangent source. Otherwise the analytic derivative is used if the curve
    /// has one, else a central difference restricted to `[t_start, t_end]`
    /// with step `relative_step · |t_end - t_start| / (num_curve_points - 1)`.
    ///
    /// The returned mesh carries normals (the unit radial direction at each
    /// vertex) and parameter axes `params1 = t_i`, `params2 = θ_j`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the interval is
    /// not finite and non-empty.
    pub fn generate<C>(
        &self,
        curve: &C,
        tangent: Option<&dyn Fn(f64) -> Vector3<f64>>,
        t_start: f64,
        t_end: f64,
        config: &TubeConfig,
    ) -> CurveResult<StructuredMesh>
    where
        C: ParametricCurve + ?Sized,
    {
        config.validate()?;
        if !(t_start.is_finite() && t_end.is_finite()) || t_start == t_end {
            return Err(CurveError::InvalidInterval {
                start: t_start,
                end: t_end,
            });
        }

        let ts = sample_parameters(t_start, t_end, config.num_curve_points);
        let thetas = sample_parameters(0.0, TAU, config.num_circle_points);
        let h = step_size(
            config.relative_step,
            t_start,
            t_end,
            config.num_curve_points,
        );

        let tangent_at = |t: f64| match tangent {
            Some(f) => f(t).normalized_or_zero(),
            None => unit_tangent(curve, t, t_start, t_end, h),
        };

        let frames = match config.strategy {
            FrameStrategy::ParallelTransport => parallel_transport_frames(
                tangent_at,
                &ts,
                config.eps,
                config.normalize_from_previous,
            ),
            FrameStrategy::Frenet => frenet_frames(tangent_at, &ts, t_start, t_end, h),
        };

        let mut mesh =
            StructuredMesh::new(config.num_curve_points, config.num_circle_points)?.with_normals();

        for (i, (&t, frame)) in ts.iter().zip(&frames).enumerate() {
            let center = curve.evaluate(t);
            fill_ring(&mut mesh, i, center, frame, &thetas, config.radius)?;
        }
        mesh.set_parameters(ts, thetas)?;

        debug!(
            rows = mesh.num_points1(),
            cols = mesh.num_points2(),
            strategy = ?config.strategy,
            radius = config.radius,
            "generated tube mesh"
        );
        Ok(mesh)
    }
}

fn fill_ring(
    mesh: &mut StructuredMesh,
    i: usize,
    center: Point3<f64>,
    frame: &Frame,
    thetas: &[f64],
    radius: f64,
) -> CurveResult<()> {
    for (j, &theta) in thetas.iter().enumerate() {
        let radial = frame.radial(theta);
        mesh.set_node(i, j, center + radial * radius)?;
        mesh.set_normal(i, j, radial)?;
    }
    Ok(())
}

/// Sweep a circle along `curve` over its natural parameter range.
///
/// Shorthand for [`TubularMeshGenerator::generate`] with
/// `curve.start_parameter()..curve.end_parameter()` and no explicit tangent.
///
/// # Errors
///
/// See [`TubularMeshGenerator::generate`].
///
/// # Example
///
/// ```
/// use curve_types::{FnCurve, Point3};
/// use mesh_from_curves::{tube_from_curve, TubeConfig};
///
/// let line = FnCurve::new(|t| Point3::new(0.0, 0.0, t), 0.0, 10.0);
/// let mesh = tube_from_curve(&line, &TubeConfig::default().with_radius(0.5)).unwrap();
///
/// assert_eq!(mesh.num_points1(), 64);
/// assert!(mesh.is_regular());
/// ```
pub fn tube_from_curve<C>(curve: &C, config: &TubeConfig) -> CurveResult<StructuredMesh>
where
    C: ParametricCurve + ?Sized,
{
    TubularMeshGenerator::new().generate(
        curve,
        None,
        curve.start_parameter(),
        curve.end_parameter(),
        config,
    )
}

/// Fill the mesh's vertex colors from its parameter axes.
///
/// `color(p1, p2)` is evaluated at every node with its row and column
/// parameter (for tubes, `t_i` and `θ_j`).
///
/// # Errors
///
/// Returns [`CurveError::MissingParameters`] if the mesh is not regular.
///
/// # Example
///
/// ```
/// use curve_types::{FnCurve, Point3};
/// use mesh_from_curves::{color_by_parameter, tube_from_curve, TubeConfig};
/// use mesh_types::VertexColor;
///
/// let line = FnCurve::new(|t| Point3::new(t, 0.0, 0.0), 0.0, 1.0);
/// let mut mesh = tube_from_curve(&line, &TubeConfig::default()).unwrap();
///
/// color_by_parameter(&mut mesh, |t, _| VertexColor::rgb(t as f32, 0.0, 1.0 - t as f32)).unwrap();
/// assert_eq!(mesh.color(0, 0).unwrap(), Some(VertexColor::BLUE));
/// ```
pub fn color_by_parameter<F>(mesh: &mut StructuredMesh, color: F) -> CurveResult<()>
where
    F: Fn(f64, f64) -> VertexColor,
{
    let (Some(p1), Some(p2)) = (mesh.params1(), mesh.params2()) else {
        return Err(CurveError::MissingParameters);
    };
    let (p1, p2) = (p1.to_vec(), p2.to_vec());

    for (i, &a) in p1.iter().enumerate() {
        for (j, &b) in p2.iter().enumerate() {
            mesh.set_color(i, j, color(a, b))?;
        }
    }
    Ok(())
}
