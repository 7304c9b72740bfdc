//! Capability traits for parametric curves and surfaces.
//!
//! The meshing core never knows which formula it is sweeping. It only sees
//! these traits: a mapping from parameters to points, an optional analytic
//! derivative guarded by a capability flag, and a natural sampling range.

use nalgebra::{Point3, Vector3};

/// A parametric space curve `t ↦ C(t)`.
///
/// `start_parameter()..=end_parameter()` is the natural sampling range. It is
/// not necessarily the domain of definition: some curves are singular just
/// outside it, which is why numerical differentiation can be restricted to
/// this interval. For closed curves, evaluating at both ends yields the same
/// point.
///
/// # Derivatives
///
/// Implementors that know their analytic derivative override both
/// [`Self::has_derivative`] and [`Self::derivative`]. Callers must branch on
/// `has_derivative()` before relying on `derivative()`.
///
/// # Example
///
/// ```
/// use curve_types::{ParametricCurve, Point3, Vector3};
///
/// struct Circle;
///
/// impl ParametricCurve for Circle {
///     fn evaluate(&self, t: f64) -> Point3<f64> {
///         Point3::new(t.cos(), t.sin(), 0.0)
///     }
///     fn has_derivative(&self) -> bool {
///         true
///     }
///     fn derivative(&self, t: f64) -> Option<Vector3<f64>> {
///         Some(Vector3::new(-t.sin(), t.cos(), 0.0))
///     }
///     fn start_parameter(&self) -> f64 {
///         0.0
///     }
///     fn end_parameter(&self) -> f64 {
///         std::f64::consts::TAU
///     }
/// }
///
/// assert!(Circle.is_closed(1e-12));
/// ```
pub trait ParametricCurve {
    /// Evaluate the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point3<f64>;

    /// Whether [`Self::derivative`] returns an analytic derivative.
    fn has_derivative(&self) -> bool {
        false
    }

    /// Analytic first derivative `C'(t)`, if known.
    fn derivative(&self, _t: f64) -> Option<Vector3<f64>> {
        None
    }

    /// Start of the natural sampling range.
    fn start_parameter(&self) -> f64;

    /// End of the natural sampling range.
    fn end_parameter(&self) -> f64;

    /// Whether the curve returns to its start point within `tolerance`.
    fn is_closed(&self, tolerance: f64) -> bool {
        let a = self.evaluate(self.start_parameter());
        let b = self.evaluate(self.end_parameter());
        (a - b).norm() <= tolerance
    }
}

impl<C: ParametricCurve + ?Sized> ParametricCurve for &C {
    fn evaluate(&self, t: f64) -> Point3<f64> {
        (**self).evaluate(t)
    }

    fn has_derivative(&self) -> bool {
        (**self).has_derivative()
    }

    fn derivative(&self, t: f64) -> Option<Vector3<f64>> {
        (**self).derivative(t)
    }

    fn start_parameter(&self) -> f64 {
        (**self).start_parameter()
    }

    fn end_parameter(&self) -> f64 {
        (**self).end_parameter()
    }
}

impl<C: ParametricCurve + ?Sized> ParametricCurve for Box<C> {
    fn evaluate(&self, t: f64) -> Point3<f64> {
        (**self).evaluate(t)
    }

    fn has_derivative(&self) -> bool {
        (**self).has_derivative()
    }

    fn derivative(&self, t: f64) -> Option<Vector3<f64>> {
        (**self).derivative(t)
    }

    fn start_parameter(&self) -> f64 {
        (**self).start_parameter()
    }

    fn end_parameter(&self) -> f64 {
        (**self).end_parameter()
    }
}

/// A parametric surface `(u, v) ↦ S(u, v)`.
///
/// Same conventions as [`ParametricCurve`], with four bounds and one partial
/// derivative per direction behind a single capability flag.
pub trait ParametricSurface {
    /// Evaluate the surface at `(u, v)`.
    fn evaluate(&self, u: f64, v: f64) -> Point3<f64>;

    /// Whether [`Self::derivative_u`] and [`Self::derivative_v`] are analytic.
    fn has_derivatives(&self) -> bool {
        false
    }

    /// Analytic partial derivative `∂S/∂u`, if known.
    fn derivative_u(&self, _u: f64, _v: f64) -> Option<Vector3<f64>> {
        None
    }

    /// Analytic partial derivative `∂S/∂v`, if known.
    fn derivative_v(&self, _u: f64, _v: f64) -> Option<Vector3<f64>> {
        None
    }

    /// Start of the `u` sampling range.
    fn u_start(&self) -> f64;

    /// End of the `u` sampling range.
    fn u_end(&self) -> f64;

    /// Start of the `v` sampling range.
    fn v_start(&self) -> f64;

    /// End of the `v` sampling range.
    fn v_end(&self) -> f64;
}

impl<S: ParametricSurface + ?Sized> ParametricSurface for &S {
    fn evaluate(&self, u: f64, v: f64) -> Point3<f64> {
        (**self).evaluate(u, v)
    }

    fn has_derivatives(&self) -> bool {
        (**self).has_derivatives()
    }

    fn derivative_u(&self, u: f64, v: f64) -> Option<Vector3<f64>> {
        (**self).derivative_u(u, v)
    }

    fn derivative_v(&self, u: f64, v: f64) -> Option<Vector3<f64>> {
        (**self).derivative_v(u, v)
    }

    fn u_start(&self) -> f64 {
        (**self).u_start()
    }

    fn u_end(&self) -> f64 {
        (**self).u_end()
    }

    fn v_start(&self) -> f64 {
        (**self).v_start()
    }

    fn v_end(&self) -> f64 {
        (**self).v_end()
    }
}
