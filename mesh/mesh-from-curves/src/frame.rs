//! Moving frame computation for curve sweeping.
//!
//! Two strategies are provided. [`parallel_transport_frames`] propagates the
//! previous normal onto each new tangent and never flips. [`frenet_frames`]
//! derives the normal from curvature and reverses it at inflection points,
//! which twists a swept tube by half a turn there.

use curve_types::derivative;
use mesh_types::NormalizeOrZero;
use nalgebra::Vector3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A reference frame at a point on a curve.
///
/// Consists of three orthonormal vectors: tangent, normal, and binormal,
/// with `binormal = tangent × normal`. Frames built at a stationary point of
/// the curve contain zero vectors instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Tangent direction (forward along curve).
    pub tangent: Vector3<f64>,
    /// Normal direction (perpendicular to tangent).
    pub normal: Vector3<f64>,
    /// Binormal direction (perpendicular to both tangent and normal).
    pub binormal: Vector3<f64>,
}

impl Frame {
    /// Create a new frame from tangent, normal, and binormal vectors.
    ///
    /// Vectors are assumed to be orthonormal.
    #[must_use]
    pub const fn new(tangent: Vector3<f64>, normal: Vector3<f64>, binormal: Vector3<f64>) -> Self {
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Whether the frame is a right-handed orthonormal basis within `tolerance`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_from_curves::Frame;
    /// use nalgebra::Vector3;
    ///
    /// let frame = Frame::new(Vector3::x(), Vector3::y(), Vector3::z());
    /// assert!(frame.is_orthonormal(1e-12));
    ///
    /// let left_handed = Frame::new(Vector3::x(), Vector3::y(), -Vector3::z());
    /// assert!(!left_handed.is_orthonormal(1e-12));
    /// ```
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let (t, n, b) = (self.tangent, self.normal, self.binormal);
        let unit = |v: Vector3<f64>| (v.norm() - 1.0).abs() <= tolerance;

        unit(t)
            && unit(n)
            && unit(b)
            && t.dot(&n).abs() <= tolerance
            && t.dot(&b).abs() <= tolerance
            && n.dot(&b).abs() <= tolerance
            && (t.cross(&n) - b).norm() <= tolerance
    }

    /// Unit direction at angle `theta` in the normal plane:
    /// `cos(θ)·normal + sin(θ)·binormal`.
    #[inline]
    #[must_use]
    pub fn radial(&self, theta: f64) -> Vector3<f64> {
        self.normal * theta.cos() + self.binormal * theta.sin()
    }
}

/// How frames are propagated along a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameStrategy {
    /// Rotation-minimizing frames. Stable through inflections.
    #[default]
    ParallelTransport,
    /// Curvature-derived frames. The normal flips where curvature changes
    /// sign.
    Frenet,
}

/// Compute parallel transport frames along sampled parameters.
///
/// `tangent` returns the unit tangent at a parameter (zero at stationary
/// points); it is re-normalized here.
///
/// The first normal is the projection of a reference axis onto the plane
/// orthogonal to the first tangent. The reference is `+Z`, or `+Y` when
/// `|T₀·Z| ≥ 1 - eps`. Each following normal is the previous normal with its
/// component along the new tangent removed. If that leaves nothing (the
/// tangent turned onto the previous normal between samples, or the previous
/// frame was degenerate) while the new tangent is non-zero, the frame is
/// reseeded from the reference axis as for the first sample.
///
/// With `normalize_from_previous`, each binormal is the previous binormal
/// re-orthogonalized against the new tangent and normal rather than
/// `T × N`.
///
/// # Example
///
/// ```
/// use mesh_from_curves::parallel_transport_frames;
/// use nalgebra::Vector3;
///
/// let frames = parallel_transport_frames(|_| Vector3::x(), &[0.0, 0.5, 1.0], 0.1, false);
///
/// assert_eq!(frames.len(), 3);
/// assert_eq!(frames[0].normal, Vector3::z());
/// assert_eq!(frames[2].binormal, -Vector3::y());
/// ```
#[must_use]
pub fn parallel_transport_frames<F>(
    tangent: F,
    params: &[f64],
    eps: f64,
    normalize_from_previous: bool,
) -> Vec<Frame>
where
    F: Fn(f64) -> Vector3<f64>,
{
    let mut frames: Vec<Frame> = Vec::with_capacity(params.len());

    for &t in params {
        let tangent = tangent(t).normalized_or_zero();

        let frame = match frames.last() {
            None => initial_frame(tangent, eps),
            Some(prev) => {
                let normal =
                    (prev.normal - tangent * prev.normal.dot(&tangent)).normalized_or_zero();
                if normal == Vector3::zeros() && tangent != Vector3::zeros() {
                    debug!(t, "transported normal vanished, reseeding frame");
                    initial_frame(tangent, eps)
                } else {
                    let binormal = if normalize_from_previous {
                        (prev.binormal
                            - tangent * prev.binormal.dot(&tangent)
                            - normal * prev.binormal.dot(&normal))
                        .normalized_or_zero()
                    } else {
                        tangent.cross(&normal).normalized_or_zero()
                    };
                    Frame::new(tangent, normal, binormal)
                }
            }
        };
        frames.push(frame);
    }

    debug!(
        samples = frames.len(),
        normalize_from_previous, "computed parallel transport frames"
    );
    frames
}

fn initial_frame(tangent: Vector3<f64>, eps: f64) -> Frame {
    let reference = if tangent.dot(&Vector3::z()).abs() >= 1.0 - eps {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let normal = (reference - tangent * reference.dot(&tangent)).normalized_or_zero();
    let binormal = tangent.cross(&normal).normalized_or_zero();
    Frame::new(tangent, normal, binormal)
}

/// Compute Frenet frames along sampled parameters.
///
/// The normal is the component of the tangent's derivative orthogonal to the
/// tangent, estimated by central differences with step `h`, restricted to
/// `[t_min, t_max]`. Where curvature vanishes the normal and binormal are
/// zero, and across an inflection the normal reverses direction.
///
/// # Example
///
/// ```
/// use mesh_from_curves::frenet_frames;
/// use nalgebra::Vector3;
///
/// // Unit circle in the XY plane: the normal points at the center.
/// let tangent = |t: f64| Vector3::new(-t.sin(), t.cos(), 0.0);
/// let frames = frenet_frames(tangent, &[0.0], -1.0, 1.0, 1e-4);
///
/// assert!((frames[0].normal - -Vector3::x()).norm() < 1e-6);
/// assert!((frames[0].binormal - Vector3::z()).norm() < 1e-6);
/// ```
#[must_use]
pub fn frenet_frames<F>(tangent: F, params: &[f64], t_min: f64, t_max: f64, h: f64) -> Vec<Frame>
where
    F: Fn(f64) -> Vector3<f64>,
{
    let unit_tangent = |t: f64| tangent(t).normalized_or_zero();

    let frames: Vec<Frame> = params
        .iter()
        .map(|&t| {
            let t1 = unit_tangent(t);
            let t2 = derivative(unit_tangent, t, t_min, t_max, h, true);
            let normal = (t2 - t1 * t2.dot(&t1)).normalized_or_zero();
            Frame::new(t1, normal, t1.cross(&normal))
        })
        .collect();

    debug!(samples = frames.len(), "computed frenet frames");
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curve_types::sample_parameters;
    use std::f64::consts::{PI, TAU};

    fn helix_tangent(t: f64) -> Vector3<f64> {
        Vector3::new(-t.sin(), t.cos(), 0.1).normalize()
    }

    fn sine_tangent(t: f64) -> Vector3<f64> {
        Vector3::new(1.0, t.cos(), 0.0).normalize()
    }

    #[test]
    fn frame_radial() {
        let frame = Frame::new(Vector3::x(), Vector3::y(), Vector3::z());
        assert_relative_eq!(frame.radial(0.0), Vector3::y());
        assert_relative_eq!(frame.radial(PI / 2.0), Vector3::z(), epsilon = 1e-15);
        assert_relative_eq!(frame.radial(TAU), frame.radial(0.0), epsilon = 1e-15);
    }

    #[test]
    fn parallel_transport_is_orthonormal() {
        let params = sample_parameters(0.0, 4.0 * PI, 200);
        for normalize_from_previous in [false, true] {
            let frames =
                parallel_transport_frames(helix_tangent, &params, 0.1, normalize_from_previous);
            for frame in &frames {
                assert!(frame.is_orthonormal(1e-6), "{frame:?}");
            }
        }
    }

    #[test]
    fn parallel_transport_helix_never_flips() {
        let params = sample_parameters(0.0, 20.0 * PI, 1000);
        let frames = parallel_transport_frames(helix_tangent, &params, 0.1, false);
        for pair in frames.windows(2) {
            assert!(pair[1].normal.dot(&pair[0].normal) >= 0.0);
        }
    }

    #[test]
    fn reference_axis_switches_when_tangent_is_vertical() {
        let frames = parallel_transport_frames(|_| Vector3::z(), &[0.0], 0.1, false);
        assert_eq!(frames[0].normal, Vector3::y());
        assert_eq!(frames[0].binormal, -Vector3::x());

        let frames = parallel_transport_frames(|_| -Vector3::z(), &[0.0], 0.1, false);
        assert_eq!(frames[0].normal, Vector3::y());
        assert!(frames[0].is_orthonormal(1e-12));
    }

    #[test]
    fn reference_axis_guard_uses_eps() {
        // 0.95 alignment with Z: inside the 0.1 guard, outside the 0.01 guard.
        let tangent = Vector3::new(0.0, (1.0f64 - 0.95 * 0.95).sqrt(), 0.95);
        let wide = parallel_transport_frames(|_| tangent, &[0.0], 0.1, false);
        let narrow = parallel_transport_frames(|_| tangent, &[0.0], 0.01, false);

        // +Y reference projected off the tangent keeps a positive y component.
        assert!(wide[0].normal.y > 0.0);
        // +Z reference projected off the tangent keeps a positive z component.
        assert!(narrow[0].normal.z > 0.0);
        assert!(wide[0].is_orthonormal(1e-9));
        assert!(narrow[0].is_orthonormal(1e-9));
    }

    #[test]
    fn stationary_tangent_yields_zero_not_nan() {
        let tangent = |t: f64| Vector3::new(3.0 * t * t, 0.0, 0.0);
        let frames = parallel_transport_frames(tangent, &[-1.0, 0.0, 1.0], 0.1, false);

        assert_eq!(frames[1].tangent, Vector3::zeros());
        for frame in &frames {
            assert!(frame.tangent.iter().all(|c| c.is_finite()));
            assert!(frame.normal.iter().all(|c| c.is_finite()));
            assert!(frame.binormal.iter().all(|c| c.is_finite()));
        }
        assert!(frames[2].is_orthonormal(1e-12));
    }

    #[test]
    fn right_angle_turn_reseeds_instead_of_collapsing() {
        let tangent = |t: f64| if t < 0.5 { Vector3::x() } else { Vector3::z() };
        for normalize_from_previous in [false, true] {
            let frames =
                parallel_transport_frames(tangent, &[0.0, 1.0, 2.0], 0.1, normalize_from_previous);

            assert_eq!(frames[0].normal, Vector3::z());
            assert_eq!(frames[1].normal, Vector3::y());
            assert_eq!(frames[1].binormal, -Vector3::x());
            assert_eq!(frames[2].normal, Vector3::y());
            assert!(frames.iter().all(|f| f.is_orthonormal(1e-12)));
        }
    }

    #[test]
    fn frenet_is_orthonormal_on_helix() {
        let params = sample_parameters(0.0, TAU, 64);
        let h = 1e-4;
        let frames = frenet_frames(helix_tangent, &params, 0.0, TAU, h);
        for frame in &frames {
            assert!(frame.is_orthonormal(1e-6), "{frame:?}");
            // Curvature of a helix points at its axis.
            assert!(frame.normal.z.abs() < 1e-4);
        }
    }

    #[test]
    fn frenet_flips_at_inflection() {
        // (t, sin t, 0) has an inflection at t = π, which is not a sample.
        let params = sample_parameters(0.0, TAU, 64);
        let frenet = frenet_frames(sine_tangent, &params, 0.0, TAU, 1e-4);
        assert!(
            frenet
                .windows(2)
                .any(|pair| pair[1].normal.dot(&pair[0].normal) < 0.0)
        );

        let transported = parallel_transport_frames(sine_tangent, &params, 0.1, false);
        assert!(
            transported
                .windows(2)
                .all(|pair| pair[1].normal.dot(&pair[0].normal) >= 0.0)
        );
    }

    #[test]
    fn frenet_straight_line_has_zero_normal() {
        let frames = frenet_frames(|_| Vector3::x(), &[0.0, 1.0], 0.0, 1.0, 1e-3);
        assert_eq!(frames[0].normal, Vector3::zeros());
        assert_eq!(frames[1].binormal, Vector3::zeros());
        assert_eq!(frames[0].tangent, Vector3::x());
    }

    #[test]
    fn empty_params() {
        assert!(parallel_transport_frames(|_| Vector3::x(), &[], 0.1, false).is_empty());
        assert!(frenet_frames(|_| Vector3::x(), &[], 0.0, 1.0, 1e-3).is_empty());
    }
}
