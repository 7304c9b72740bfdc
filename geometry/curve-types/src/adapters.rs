//! Closure-backed curves and surfaces.

use std::fmt;

use nalgebra::{Point3, Vector3};

use crate::{ParametricCurve, ParametricSurface};

type CurveFn = Box<dyn Fn(f64) -> Point3<f64> + Send + Sync>;
type TangentFn = Box<dyn Fn(f64) -> Vector3<f64> + Send + Sync>;
type SurfaceFn = Box<dyn Fn(f64, f64) -> Point3<f64> + Send + Sync>;
type PartialFn = Box<dyn Fn(f64, f64) -> Vector3<f64> + Send + Sync>;

/// A curve defined by a closure over a parameter range.
///
/// # Example
///
/// ```
/// use curve_types::{FnCurve, ParametricCurve, Point3, Vector3};
///
/// let line = FnCurve::new(|t| Point3::new(t, 0.0, 0.0), 0.0, 1.0)
///     .with_derivative(|_| Vector3::x());
///
/// assert!(line.has_derivative());
/// assert_eq!(line.derivative(0.3), Some(Vector3::x()));
/// ```
pub struct FnCurve {
    eval: CurveFn,
    derivative: Option<TangentFn>,
    t_start: f64,
    t_end: f64,
}

impl FnCurve {
    /// Create a curve from its position function and sampling range.
    pub fn new<F>(eval: F, t_start: f64, t_end: f64) -> Self
    where
        F: Fn(f64) -> Point3<f64> + Send + Sync + 'static,
    {
        Self {
            eval: Box::new(eval),
            derivative: None,
            t_start,
            t_end,
        }
    }

    /// Attach an analytic first derivative.
    #[must_use]
    pub fn with_derivative<D>(mut self, derivative: D) -> Self
    where
        D: Fn(f64) -> Vector3<f64> + Send + Sync + 'static,
    {
        self.derivative = Some(Box::new(derivative));
        self
    }
}

impl fmt::Debug for FnCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCurve")
            .field("t_start", &self.t_start)
            .field("t_end", &self.t_end)
            .field("has_derivative", &self.derivative.is_some())
            .finish_non_exhaustive()
    }
}

impl ParametricCurve for FnCurve {
    fn evaluate(&self, t: f64) -> Point3<f64> {
        (self.eval)(t)
    }

    fn has_derivative(&self) -> bool {
        self.derivative.is_some()
    }

    fn derivative(&self, t: f64) -> Option<Vector3<f64>> {
        self.derivative.as_ref().map(|d| d(t))
    }

    fn start_parameter(&self) -> f64 {
        self.t_start
    }

    fn end_parameter(&self) -> f64 {
        self.t_end
    }
}

/// A surface defined by a closure over a rectangular parameter domain.
pub struct FnSurface {
    eval: SurfaceFn,
    partials: Option<(PartialFn, PartialFn)>,
    u_range: (f64, f64),
    v_range: (f64, f64),
}

impl FnSurface {
    /// Create a surface from its position function and parameter ranges.
    pub fn new<F>(eval: F, u_range: (f64, f64), v_range: (f64, f64)) -> Self
    where
        F: Fn(f64, f64) -> Point3<f64> + Send + Sync + 'static,
    {
        Self {
            eval: Box::new(eval),
            partials: None,
            u_range,
            v_range,
        }
    }

    /// Attach analytic partial derivatives `∂S/∂u` and `∂S/∂v`.
    #[must_use]
    pub fn with_partials<U, V>(mut self, du: U, dv: V) -> Self
    where
        U: Fn(f64, f64) -> Vector3<f64> + Send + Sync + 'static,
        V: Fn(f64, f64) -> Vector3<f64> + Send + Sync + 'static,
    {
        self.partials = Some((Box::new(du), Box::new(dv)));
        self
    }
}

impl fmt::Debug for FnSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSurface")
            .field("u_range", &self.u_range)
            .field("v_range", &self.v_range)
            .field("has_derivatives", &self.partials.is_some())
            .finish_non_exhaustive()
    }
}

impl ParametricSurface for FnSurface {
    fn evaluate(&self, u: f64, v: f64) -> Point3<f64> {
        (self.eval)(u, v)
    }

    fn has_derivatives(&self) -> bool {
        self.partials.is_some()
    }

    fn derivative_u(&self, u: f64, v: f64) -> Option<Vector3<f64>> {
        self.partials.as_ref().map(|(du, _)| du(u, v))
    }

    fn derivative_v(&self, u: f64, v: f64) -> Option<Vector3<f64>> {
        self.partials.as_ref().map(|(_, dv)| dv(u, v))
    }

    fn u_start(&self) -> f64 {
        self.u_range.0
    }

    fn u_end(&self) -> f64 {
        self.u_range.1
    }

    fn v_start(&self) -> f64 {
        self.v_range.0
    }

    fn v_end(&self) -> f64 {
        self.v_range.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fn_curve_without_derivative() {
        let c = FnCurve::new(|t| Point3::new(t, 2.0 * t, 0.0), -1.0, 3.0);
        assert!(!c.has_derivative());
        assert!(c.derivative(0.0).is_none());
        assert_eq!(c.start_parameter(), -1.0);
        assert_eq!(c.end_parameter(), 3.0);
        assert_eq!(c.evaluate(1.0), Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn fn_curve_debug_reports_capability() {
        let c = FnCurve::new(|t| Point3::new(t, 0.0, 0.0), 0.0, 1.0)
            .with_derivative(|_| Vector3::x());
        let text = format!("{c:?}");
        assert!(text.contains("has_derivative: true"));
    }

    #[test]
    fn fn_surface_partials() {
        let plane = FnSurface::new(|u, v| Point3::new(u, v, 0.0), (0.0, 1.0), (0.0, 2.0))
            .with_partials(|_, _| Vector3::x(), |_, _| Vector3::y());
        assert!(plane.has_derivatives());
        assert_eq!(plane.derivative_u(0.5, 0.5), Some(Vector3::x()));
        assert_eq!(plane.derivative_v(0.5, 0.5), Some(Vector3::y()));
        assert_eq!(plane.v_end(), 2.0);
        assert_relative_eq!(plane.evaluate(0.25, 1.5).y, 1.5);
    }

    #[test]
    fn fn_surface_without_partials() {
        let s = FnSurface::new(|u, v| Point3::new(u, v, u * v), (0.0, 1.0), (0.0, 1.0));
        assert!(!s.has_derivatives());
        assert!(s.derivative_u(0.0, 0.0).is_none());
    }
}
