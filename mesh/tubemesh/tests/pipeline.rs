//! End-to-end checks from curve definition to exported files.
//!
//! Tests are organized by stage:
//! - Tier 1: Grid construction
//! - Tier 2: Frame transport along curves
//! - Tier 3: Export agreement across formats

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use std::f64::consts::{PI, TAU};
use tubemesh::prelude::*;

fn unit_circle() -> FnCurve {
    FnCurve::new(|t| Point3::new(t.cos(), t.sin(), 0.0), 0.0, TAU)
        .with_derivative(|t| Vector3::new(-t.sin(), t.cos(), 0.0))
}

fn helix() -> FnCurve {
    FnCurve::new(|t| Point3::new(t.cos(), t.sin(), 0.1 * t), 0.0, 20.0 * PI)
        .with_derivative(|t| Vector3::new(-t.sin(), t.cos(), 0.1))
}

// =============================================================================
// Tier 1: Grid construction
// =============================================================================

mod tier1_grid {
    use super::*;

    #[test]
    fn small_circle_tube_dimensions() {
        let config = TubeConfig::default()
            .with_radius(0.25)
            .with_curve_points(4)
            .with_circle_points(4);
        let mesh = tube_from_curve(&unit_circle(), &config).unwrap();

        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.num_points1(), 4);
        assert_eq!(mesh.num_points2(), 4);
        assert_eq!(mesh.triangle_indices().count(), 18);
        assert_eq!(mesh.params1().unwrap().len(), 4);
        assert_relative_eq!(mesh.params2().unwrap()[3], TAU);
    }

    #[test]
    fn vertices_sit_at_tube_radius() {
        let curve = unit_circle();
        let config = TubeConfig::default()
            .with_radius(0.3)
            .with_curve_points(16)
            .with_circle_points(9);
        let mesh = tube_from_curve(&curve, &config).unwrap();
        let ts = mesh.params1().unwrap().to_vec();

        for (i, &t) in ts.iter().enumerate() {
            let center = curve.evaluate(t);
            for j in 0..mesh.num_points2() {
                let offset = mesh.node(i, j).unwrap() - center;
                assert_relative_eq!(offset.norm(), 0.3, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn stationary_curve_produces_no_nan() {
        let point = FnCurve::new(|_| Point3::new(1.0, 2.0, 3.0), 0.0, 1.0);
        let config = TubeConfig::default().with_curve_points(8).with_circle_points(5);
        let mesh = tube_from_curve(&point, &config).unwrap();

        assert!(mesh.nodes().iter().all(|p| p.iter().all(|c| c.is_finite())));
        assert!(
            mesh.normals()
                .unwrap()
                .iter()
                .all(|n| n.iter().all(|c| c.is_finite()))
        );
    }
}

// =============================================================================
// Tier 2: Frame transport along curves
// =============================================================================

mod tier2_frames {
    use super::*;
    use tubemesh::curves::{sample_parameters, unit_tangent};
    use tubemesh::from_curves::parallel_transport_frames;

    #[test]
    fn helix_transport_never_flips() {
        let curve = helix();
        let ts = sample_parameters(0.0, 20.0 * PI, 1000);
        let frames = parallel_transport_frames(
            |t| unit_tangent(&curve, t, 0.0, 20.0 * PI, 1e-4),
            &ts,
            0.1,
            false,
        );

        assert_eq!(frames.len(), 1000);
        for pair in frames.windows(2) {
            assert!(pair[0].normal.dot(&pair[1].normal) > 0.99);
            assert!(pair[1].is_orthonormal(1e-6));
        }
    }

    #[test]
    fn strategies_agree_on_tube_size() {
        let base = TubeConfig::default()
            .with_radius(0.1)
            .with_curve_points(200)
            .with_circle_points(12);
        let pt = tube_from_curve(&helix(), &base).unwrap();
        let frenet =
            tube_from_curve(&helix(), &base.with_strategy(FrameStrategy::Frenet)).unwrap();

        assert_eq!(pt.vertex_count(), frenet.vertex_count());
        let (a, b) = (pt.bounds(), frenet.bounds());
        assert_relative_eq!(a.min.z, b.min.z, epsilon = 1e-2);
        assert_relative_eq!(a.max.z, b.max.z, epsilon = 1e-2);
    }
}

// =============================================================================
// Tier 3: Export agreement across formats
// =============================================================================

mod tier3_export {
    use super::*;
    use tubemesh::io::{MAX_GLTF_VERTICES, decode_data_uri, load_obj, load_stl, to_gltf};

    fn small_tube() -> StructuredMesh {
        let config = TubeConfig::default()
            .with_radius(0.25)
            .with_curve_points(4)
            .with_circle_points(4);
        tube_from_curve(&unit_circle(), &config).unwrap()
    }

    #[test]
    fn obj_and_stl_round_trip_counts() {
        let mesh = small_tube();
        let dir = tempfile::tempdir().unwrap();

        let obj_path = dir.path().join("tube.obj");
        save_obj(&mesh, &obj_path, &ObjOptions::default()).unwrap();
        let obj = load_obj(&obj_path).unwrap();
        assert_eq!(obj.positions.len(), 16);
        assert_eq!(obj.normals.len(), 16);
        assert_eq!(obj.faces.len(), 18);

        let stl_path = dir.path().join("tube.stl");
        save_mesh(&mesh, &stl_path).unwrap();
        let triangles = load_stl(&stl_path).unwrap();
        assert_eq!(triangles.len(), 18);
        assert_eq!(
            std::fs::metadata(&stl_path).unwrap().len(),
            84 + 50 * 18
        );
    }

    #[test]
    fn transparency_reaches_mtl_and_gltf() {
        let mesh = small_tube();
        let material = MaterialProperties::named("glass").with_transparency(0.5);
        let dir = tempfile::tempdir().unwrap();

        let obj_path = dir.path().join("glass.obj");
        save_obj_with_material(&mesh, &obj_path, &material, ObjMode::Surface).unwrap();
        let mtl = std::fs::read_to_string(dir.path().join("glass.mtl")).unwrap();
        assert!(mtl.lines().any(|line| line == "newmtl glass"));
        assert!(mtl.lines().any(|line| line == "d 0.5"));

        let obj = load_obj(&obj_path).unwrap();
        assert_eq!(obj.material_libraries, vec!["glass.mtl".to_string()]);
        assert_eq!(obj.materials_used, vec!["glass".to_string()]);

        let json = tubemesh::io::to_gltf_json(&mesh, &GltfOptions::default().with_material(material))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let factor = &value["materials"][0]["pbrMetallicRoughness"]["baseColorFactor"];
        assert_eq!(factor[3].as_f64(), Some(0.5));
        assert_eq!(value["materials"][0]["alphaMode"], "BLEND");
    }

    #[test]
    fn gltf_indices_match_obj_faces() {
        let mesh = small_tube();
        let gltf = to_gltf(&mesh, &GltfOptions::default()).unwrap();

        let primitive = &gltf.meshes[0].primitives[0];
        let accessor = &gltf.accessors[primitive.indices.unwrap()];
        let view = &gltf.buffer_views[accessor.buffer_view];
        let uri = gltf.buffers[view.buffer].uri.as_deref().unwrap();
        let bytes = decode_data_uri(uri).unwrap();
        let indices: Vec<usize> = bytes
            .chunks_exact(2)
            .map(|b| usize::from(u16::from_le_bytes([b[0], b[1]])))
            .collect();

        let mut obj_bytes = Vec::new();
        tubemesh::io::write_obj(&mesh, &mut obj_bytes, &ObjOptions::default()).unwrap();
        let obj = tubemesh::io::read_obj(obj_bytes.as_slice()).unwrap();
        let from_obj: Vec<usize> = obj
            .faces
            .iter()
            .flat_map(|face| face.positions.iter().copied())
            .collect();

        assert_eq!(indices, from_obj);
    }

    #[test]
    fn gltf_rejects_oversized_grids() {
        let mut mesh = StructuredMesh::new(MAX_GLTF_VERTICES / 256 + 1, 256).unwrap();
        mesh.set_node(0, 0, Point3::origin()).unwrap();
        assert!(to_gltf(&mesh, &GltfOptions::default()).is_err());
    }
}
