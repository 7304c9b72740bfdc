//! Property-based tests for frame transport and tube generation.
//!
//! Run with: cargo test -p mesh-from-curves -- proptest

use curve_types::{FnCurve, ParametricCurve, Point3, sample_parameters};
use mesh_from_curves::{
    FrameStrategy, TubeConfig, parallel_transport_frames, tube_from_curve,
};
use nalgebra::Vector3;
use proptest::prelude::*;
use std::f64::consts::TAU;

// =============================================================================
// Strategies
// =============================================================================

/// Coefficients `(a, b, c)` of an elliptic helix `(a cos t, b sin t, c t)`.
fn arb_helix() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.5..2.0f64, 0.5..2.0f64, -1.0..1.0f64)
}

fn helix(a: f64, b: f64, c: f64) -> FnCurve {
    FnCurve::new(move |t| Point3::new(a * t.cos(), b * t.sin(), c * t), 0.0, TAU)
        .with_derivative(move |t| Vector3::new(-a * t.sin(), b * t.cos(), c))
}

fn arb_config() -> impl Strategy<Value = TubeConfig> {
    (
        prop_oneof![0.01..1.0f64, -1.0..-0.01f64],
        16usize..64,
        2usize..24,
        any::<bool>(),
    )
        .prop_map(|(radius, curve_points, circle_points, from_previous)| {
            TubeConfig::default()
                .with_radius(radius)
                .with_curve_points(curve_points)
                .with_circle_points(circle_points)
                .normalize_from_previous(from_previous)
        })
}

// =============================================================================
// Property Tests: Frames
// =============================================================================

proptest! {
    /// Parallel transport frames are right-handed orthonormal bases.
    #[test]
    fn transported_frames_are_orthonormal(
        (a, b, c) in arb_helix(),
        samples in 16usize..128,
        from_previous in any::<bool>(),
    ) {
        let curve = helix(a, b, c);
        let tangent = |t: f64| curve.derivative(t).unwrap_or_else(Vector3::zeros);
        let params = sample_parameters(0.0, TAU, samples);
        let frames = parallel_transport_frames(tangent, &params, 0.1, from_previous);

        prop_assert_eq!(frames.len(), samples);
        for frame in &frames {
            prop_assert!(frame.is_orthonormal(1e-6), "{:?}", frame);
        }
    }

    /// Consecutive transported normals never point in opposite directions.
    #[test]
    fn transported_normals_never_flip((a, b, c) in arb_helix(), samples in 32usize..256) {
        let curve = helix(a, b, c);
        let tangent = |t: f64| curve.derivative(t).unwrap_or_else(Vector3::zeros);
        let params = sample_parameters(0.0, TAU, samples);
        let frames = parallel_transport_frames(tangent, &params, 0.1, false);

        for pair in frames.windows(2) {
            prop_assert!(pair[1].normal.dot(&pair[0].normal) >= 0.0);
        }
    }
}

// =============================================================================
// Property Tests: Tubes
// =============================================================================

proptest! {
    /// Every vertex lies at distance |radius| from its ring center.
    #[test]
    fn vertices_lie_on_tube((a, b, c) in arb_helix(), config in arb_config()) {
        let curve = helix(a, b, c);
        let mesh = tube_from_curve(&curve, &config).unwrap();
        let ts = mesh.params1().unwrap().to_vec();

        for (i, &t) in ts.iter().enumerate() {
            let center = curve.evaluate(t);
            for vertex in mesh.row(i).unwrap() {
                let distance = (*vertex - center).norm();
                prop_assert!((distance - config.radius.abs()).abs() < 1e-9);
            }
        }
    }

    /// The first and last column of every row coincide.
    #[test]
    fn seam_vertices_coincide((a, b, c) in arb_helix(), config in arb_config()) {
        let mesh = tube_from_curve(&helix(a, b, c), &config).unwrap();
        let last = mesh.num_points2() - 1;

        for i in 0..mesh.num_points1() {
            let gap = (mesh.node(i, 0).unwrap() - mesh.node(i, last).unwrap()).norm();
            prop_assert!(gap < 1e-9);
        }
    }

    /// Grid dimensions follow the configuration for either strategy.
    #[test]
    fn grid_dimensions(config in arb_config(), frenet in any::<bool>()) {
        let strategy = if frenet { FrameStrategy::Frenet } else { FrameStrategy::ParallelTransport };
        let config = config.with_strategy(strategy);
        let mesh = tube_from_curve(&helix(1.0, 1.0, 0.2), &config).unwrap();

        prop_assert_eq!(mesh.num_points1(), config.num_curve_points);
        prop_assert_eq!(mesh.num_points2(), config.num_circle_points);
        prop_assert_eq!(
            mesh.triangle_count(),
            (config.num_curve_points - 1) * (config.num_circle_points - 1) * 2
        );
        prop_assert!(mesh.nodes().iter().all(|p| p.coords.iter().all(|v| v.is_finite())));
    }
}
