//! Numerical differentiation and parameter sampling.
//!
//! All derivative estimates are central differences. When restricted to an
//! interval, evaluation points that fall outside it are pulled back onto `t`,
//! turning the estimate into a one-sided difference at the boundary. This
//! keeps curves that are singular or discontinuous just past their sampling
//! range from ever being evaluated there.

use mesh_types::NormalizeOrZero;
use nalgebra::Vector3;

use crate::{ParametricCurve, ParametricSurface};

/// Uniformly spaced parameters `t_i = t_start + i·(t_end - t_start)/(n - 1)`.
///
/// The last value is exactly `t_end`. `n = 1` yields `[t_start]` and `n = 0`
/// yields an empty vector.
///
/// # Example
///
/// ```
/// use curve_types::sample_parameters;
///
/// assert_eq!(sample_parameters(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
#[must_use]
pub fn sample_parameters(t_start: f64, t_end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![t_start],
        _ => {
            let step = (t_end - t_start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { t_end } else { t_start + i as f64 * step })
                .collect()
        }
    }
}

/// Absolute difference step `h = relative_step · |t_end - t_start| / (n - 1)`.
///
/// Scaling by the sampling interval keeps differentiation error proportional
/// to mesh resolution. `n < 2` uses the whole interval as the sampling step.
#[must_use]
pub fn step_size(relative_step: f64, t_start: f64, t_end: f64, n: usize) -> f64 {
    let intervals = n.saturating_sub(1).max(1) as f64;
    relative_step * (t_end - t_start).abs() / intervals
}

/// Central-difference derivative of `f` at `t`.
///
/// Computes `(f(t + h') - f(t - h')) / ((t + h') - (t - h'))`. With
/// `restrict_to_interval`, each of `t - h` and `t + h` outside
/// `[t_min, t_max]` is replaced by `t`. If both are replaced (or `h` is zero)
/// the result is the zero vector.
///
/// # Example
///
/// ```
/// use curve_types::{derivative, Vector3};
///
/// let f = |t: f64| Vector3::new(t * t, 0.0, 0.0);
///
/// // Interior: exact for a quadratic.
/// let d = derivative(f, 1.0, 0.0, 2.0, 1e-3, true);
/// assert!((d.x - 2.0).abs() < 1e-9);
///
/// // At the upper bound the forward point is pulled back to t.
/// let d = derivative(f, 2.0, 0.0, 2.0, 1e-3, true);
/// assert!((d.x - (4.0 - 1e-3)).abs() < 1e-9);
/// ```
pub fn derivative<F>(
    f: F,
    t: f64,
    t_min: f64,
    t_max: f64,
    h: f64,
    restrict_to_interval: bool,
) -> Vector3<f64>
where
    F: Fn(f64) -> Vector3<f64>,
{
    let (lo, hi) = if t_min <= t_max {
        (t_min, t_max)
    } else {
        (t_max, t_min)
    };

    let mut t_minus = t - h;
    let mut t_plus = t + h;
    if restrict_to_interval {
        if t_minus < lo || t_minus > hi {
            t_minus = t;
        }
        if t_plus < lo || t_plus > hi {
            t_plus = t;
        }
    }

    let dt = t_plus - t_minus;
    if dt == 0.0 {
        return Vector3::zeros();
    }
    (f(t_plus) - f(t_minus)) / dt
}

/// First derivative of a curve at `t`.
///
/// Uses the analytic derivative when the curve advertises one, otherwise a
/// central difference restricted to `[t_min, t_max]`.
pub fn curve_derivative<C>(curve: &C, t: f64, t_min: f64, t_max: f64, h: f64) -> Vector3<f64>
where
    C: ParametricCurve + ?Sized,
{
    if curve.has_derivative() {
        if let Some(d) = curve.derivative(t) {
            return d;
        }
    }
    derivative(|s| curve.evaluate(s).coords, t, t_min, t_max, h, true)
}

/// Unit tangent of a curve at `t`, or zero at a stationary point.
///
/// See [`curve_derivative`] for how the derivative is obtained.
pub fn unit_tangent<C>(curve: &C, t: f64, t_min: f64, t_max: f64, h: f64) -> Vector3<f64>
where
    C: ParametricCurve + ?Sized,
{
    curve_derivative(curve, t, t_min, t_max, h).normalized_or_zero()
}

/// Partial derivatives `(∂S/∂u, ∂S/∂v)` of a surface at `(u, v)`.
///
/// Analytic partials are used when the surface advertises them; otherwise
/// central differences restricted to the surface bounds, with steps `hu` and
/// `hv`.
pub fn surface_partials<S>(surface: &S, u: f64, v: f64, hu: f64, hv: f64) -> (Vector3<f64>, Vector3<f64>)
where
    S: ParametricSurface + ?Sized,
{
    let analytic = if surface.has_derivatives() {
        surface.derivative_u(u, v).zip(surface.derivative_v(u, v))
    } else {
        None
    };

    analytic.unwrap_or_else(|| {
        let du = derivative(
            |s| surface.evaluate(s, v).coords,
            u,
            surface.u_start(),
            surface.u_end(),
            hu,
            true,
        );
        let dv = derivative(
            |s| surface.evaluate(u, s).coords,
            v,
            surface.v_start(),
            surface.v_end(),
            hv,
            true,
        );
        (du, dv)
    })
}
