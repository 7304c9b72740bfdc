//! Building and writing glTF documents from structured meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mesh_types::StructuredMesh;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schema::{
    Accessor, Asset, Buffer, BufferView, COMPONENT_FLOAT, COMPONENT_UNSIGNED_SHORT, Gltf,
    GltfMaterial, KHR_LIGHTS_PUNCTUAL, Mesh, Node, PbrMetallicRoughness, Primitive, PunctualLight,
    MODE_TRIANGLES, Scene, SpotCone, TARGET_ARRAY_BUFFER, TARGET_ELEMENT_ARRAY_BUFFER,
};
use crate::error::{IoError, IoResult};
use crate::material::{Light, LightKind, MaterialProperties};

/// Prefix of every embedded buffer URI.
pub const DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// Largest vertex count addressable by 16-bit indices.
pub const MAX_GLTF_VERTICES: usize = 1 << 16;

const METALLIC_FACTOR: f32 = 0.1;
const ROUGHNESS_FACTOR: f32 = 0.6;

/// Options for glTF export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GltfOptions {
    /// Name of the mesh and its node.
    pub name: String,
    /// Material assigned to the primitive. `None` exports
    /// [`MaterialProperties::default`].
    pub material: Option<MaterialProperties>,
    /// Lights exported through `KHR_lights_punctual`.
    pub lights: Vec<Light>,
    /// Write `NORMAL` when the mesh has normals.
    pub include_normals: bool,
    /// Write `COLOR_0` when the mesh has colors.
    pub include_colors: bool,
    /// Pretty-print the JSON.
    pub pretty: bool,
}

impl Default for GltfOptions {
    fn default() -> Self {
        Self {
            name: "mesh".to_string(),
            material: None,
            lights: Vec::new(),
            include_normals: true,
            include_colors: true,
            pretty: true,
        }
    }
}

impl GltfOptions {
    /// Assign a material.
    #[must_use]
    pub fn with_material(mut self, material: MaterialProperties) -> Self {
        self.material = Some(material);
        self
    }

    /// Add a light.
    #[must_use]
    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Emit compact JSON.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

/// Internal state for building glTF data.
///
/// Every attribute gets its own buffer, buffer view and accessor, so the
/// three indices of one attribute are always equal.
struct GltfBuilder {
    gltf: Gltf,
}

impl GltfBuilder {
    fn new() -> Self {
        Self {
            gltf: Gltf {
                asset: Asset {
                    version: "2.0".to_string(),
                    generator: Some(concat!("mesh-io ", env!("CARGO_PKG_VERSION")).to_string()),
                },
                ..Default::default()
            },
        }
    }

    fn add_buffer(&mut self, bytes: &[u8], target: u32) -> usize {
        let buffer = self.gltf.buffers.len();
        self.gltf.buffers.push(Buffer {
            byte_length: bytes.len(),
            uri: Some(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(bytes))),
        });

        let view = self.gltf.buffer_views.len();
        self.gltf.buffer_views.push(BufferView {
            buffer,
            byte_offset: 0,
            byte_length: bytes.len(),
            target: Some(target),
        });
        view
    }

    /// Add a float accessor for `N`-component vectors.
    fn add_accessor_float<const N: usize>(&mut self, data: &[[f32; N]], with_bounds: bool) -> usize {
        let mut bytes = Vec::with_capacity(data.len() * N * 4);
        let mut min = [f32::MAX; N];
        let mut max = [f32::MIN; N];
        for v in data {
            for k in 0..N {
                bytes.extend_from_slice(&v[k].to_le_bytes());
                min[k] = min[k].min(v[k]);
                max[k] = max[k].max(v[k]);
            }
        }
        let view = self.add_buffer(&bytes, TARGET_ARRAY_BUFFER);

        let accessor = self.gltf.accessors.len();
        self.gltf.accessors.push(Accessor {
            buffer_view: view,
            byte_offset: 0,
            component_type: COMPONENT_FLOAT,
            count: data.len(),
            accessor_type: format!("VEC{N}"),
            min: with_bounds.then(|| min.iter().map(|&x| f64::from(x)).collect()),
            max: with_bounds.then(|| max.iter().map(|&x| f64::from(x)).collect()),
        });
        accessor
    }

    fn add_accessor_indices(&mut self, indices: &[u16]) -> usize {
        let bytes: Vec<u8> = indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        let view = self.add_buffer(&bytes, TARGET_ELEMENT_ARRAY_BUFFER);

        let accessor = self.gltf.accessors.len();
        self.gltf.accessors.push(Accessor {
            buffer_view: view,
            byte_offset: 0,
            component_type: COMPONENT_UNSIGNED_SHORT,
            count: indices.len(),
            accessor_type: "SCALAR".to_string(),
            min: None,
            max: None,
        });
        accessor
    }

    fn add_material(&mut self, material: &MaterialProperties) -> usize {
        let d = material.diffuse;
        let e = material.emission;
        let idx = self.gltf.materials.len();
        self.gltf.materials.push(GltfMaterial {
            name: Some(material.name.clone()),
            pbr_metallic_roughness: Some(PbrMetallicRoughness {
                base_color_factor: [d.r, d.g, d.b, material.transparency],
                metallic_factor: METALLIC_FACTOR,
                roughness_factor: ROUGHNESS_FACTOR,
            }),
            emissive_factor: (e.r > 0.0 || e.g > 0.0 || e.b > 0.0).then_some([e.r, e.g, e.b]),
            alpha_mode: (material.transparency < 1.0).then(|| "BLEND".to_string()),
            double_sided: false,
        });
        idx
    }

    fn add_lights(&mut self, lights: &[Light]) -> IoResult<()> {
        if lights.is_empty() {
            return Ok(());
        }
        let lights: Vec<PunctualLight> = lights.iter().map(punctual_light).collect();
        let value = serde_json::json!({ "lights": serde_json::to_value(lights)? });
        self.gltf
            .extensions
            .insert(KHR_LIGHTS_PUNCTUAL.to_string(), value);
        self.gltf
            .extensions_used
            .push(KHR_LIGHTS_PUNCTUAL.to_string());
        Ok(())
    }
}

fn punctual_light(light: &Light) -> PunctualLight {
    PunctualLight {
        name: light.name.clone(),
        light_type: light.kind.gltf_type().to_string(),
        color: [light.color.r, light.color.g, light.color.b],
        intensity: light.intensity,
        spot: (light.kind == LightKind::Spot).then_some(SpotCone {
            inner_cone_angle: 0.0,
            outer_cone_angle: light.spot_angle,
        }),
    }
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: glTF stores f32
fn to_f32<const N: usize>(v: [f64; N]) -> [f32; N] {
    v.map(|x| x as f32)
}

/// Build the glTF document for a mesh.
///
/// The primitive is a triangle list with the same index order as the OBJ and
/// STL exporters, and always references exactly one material. `baseColorFactor` is the material's diffuse RGB with its
/// transparency as alpha; `metallicFactor` and `roughnessFactor` are fixed
/// at 0.1 and 0.6.
///
/// # Errors
///
/// Returns [`IoError::NoFaces`] if the grid has no cells,
/// [`IoError::IndexOverflow`] if it has more than [`MAX_GLTF_VERTICES`]
/// vertices, or a JSON error if a light cannot be encoded.
pub fn to_gltf(mesh: &StructuredMesh, options: &GltfOptions) -> IoResult<Gltf> {
    if !mesh.has_faces() {
        return Err(IoError::NoFaces {
            rows: mesh.num_points1(),
            cols: mesh.num_points2(),
        });
    }
    if mesh.vertex_count() > MAX_GLTF_VERTICES {
        return Err(IoError::IndexOverflow {
            vertices: mesh.vertex_count(),
            max: MAX_GLTF_VERTICES,
        });
    }

    let mut builder = GltfBuilder::new();
    let mut primitive = Primitive {
        mode: MODE_TRIANGLES,
        ..Primitive::default()
    };

    let positions: Vec<[f32; 3]> = mesh
        .nodes()
        .iter()
        .map(|p| to_f32([p.x, p.y, p.z]))
        .collect();
    let accessor = builder.add_accessor_float(&positions, true);
    primitive.attributes.insert("POSITION".to_string(), accessor);

    if options.include_normals {
        if let Some(normals) = mesh.normals() {
            let normals: Vec<[f32; 3]> = normals.iter().map(|n| to_f32([n.x, n.y, n.z])).collect();
            let accessor = builder.add_accessor_float(&normals, false);
            primitive.attributes.insert("NORMAL".to_string(), accessor);
        }
    }

    if options.include_colors {
        if let Some(colors) = mesh.colors() {
            let colors: Vec<[f32; 4]> = colors.iter().map(|c| c.to_array()).collect();
            let accessor = builder.add_accessor_float(&colors, false);
            primitive.attributes.insert("COLOR_0".to_string(), accessor);
        }
    }

    let indices = mesh
        .triangle_indices()
        .flatten()
        .map(|k| {
            u16::try_from(k).map_err(|_| IoError::IndexOverflow {
                vertices: mesh.vertex_count(),
                max: MAX_GLTF_VERTICES,
            })
        })
        .collect::<IoResult<Vec<u16>>>()?;
    primitive.indices = Some(builder.add_accessor_indices(&indices));

    let material = options.material.clone().unwrap_or_default();
    primitive.material = Some(builder.add_material(&material));
    builder.add_lights(&options.lights)?;

    let gltf = &mut builder.gltf;
    gltf.meshes.push(Mesh {
        name: Some(options.name.clone()),
        primitives: vec![primitive],
    });
    gltf.nodes.push(Node {
        name: Some(options.name.clone()),
        mesh: Some(0),
    });
    gltf.scenes.push(Scene {
        name: None,
        nodes: vec![0],
    });
    gltf.scene = Some(0);

    Ok(builder.gltf)
}

/// Serialize a mesh as glTF JSON text.
///
/// # Errors
///
/// See [`to_gltf`].
///
/// # Example
///
/// ```
/// use mesh_io::{to_gltf_json, GltfOptions, MaterialProperties};
/// use mesh_types::StructuredMesh;
///
/// let mesh = StructuredMesh::new(2, 2).unwrap();
/// let options = GltfOptions::default()
///     .with_material(MaterialProperties::default().with_transparency(0.5));
/// let json = to_gltf_json(&mesh, &options).unwrap();
///
/// let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
/// let factor = &doc["materials"][0]["pbrMetallicRoughness"]["baseColorFactor"];
/// assert_eq!(factor[3].as_f64(), Some(0.5));
/// ```
pub fn to_gltf_json(mesh: &StructuredMesh, options: &GltfOptions) -> IoResult<String> {
    let gltf = to_gltf(mesh, options)?;
    let json = if options.pretty {
        serde_json::to_string_pretty(&gltf)?
    } else {
        serde_json::to_string(&gltf)?
    };
    Ok(json)
}

/// Write a mesh as glTF JSON.
///
/// # Errors
///
/// See [`to_gltf`]; also returns an I/O error if writing fails.
pub fn write_gltf<W: Write>(mesh: &StructuredMesh, mut writer: W, options: &GltfOptions) -> IoResult<()> {
    let json = to_gltf_json(mesh, options)?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Save a mesh to a `.gltf` file.
///
/// # Errors
///
/// See [`write_gltf`].
pub fn save_gltf<P: AsRef<Path>>(mesh: &StructuredMesh, path: P, options: &GltfOptions) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_gltf(mesh, BufWriter::new(file), options)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        lights = options.lights.len(),
        "saved glTF"
    );
    Ok(())
}

/// Decode an embedded `data:application/octet-stream;base64,` buffer URI.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] if the URI has a different prefix or
/// the payload is not valid base64.
pub fn decode_data_uri(uri: &str) -> IoResult<Vec<u8>> {
    let payload = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| IoError::invalid_content("not an embedded octet-stream URI"))?;
    STANDARD
        .decode(payload)
        .map_err(|e| IoError::invalid_content(format!("invalid base64 payload: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::{Point3, Vector3, VertexColor};

    fn grid(rows: usize, cols: usize) -> StructuredMesh {
        let mut mesh = StructuredMesh::new(rows, cols).unwrap().with_normals();
        for i in 0..rows {
            for j in 0..cols {
                mesh.set_node(i, j, Point3::new(i as f64, j as f64, 0.5)).unwrap();
                mesh.set_normal(i, j, -Vector3::z()).unwrap();
            }
        }
        mesh
    }

    fn buffer_bytes(gltf: &Gltf, accessor: usize) -> Vec<u8> {
        let view = &gltf.buffer_views[gltf.accessors[accessor].buffer_view];
        let uri = gltf.buffers[view.buffer].uri.as_deref().unwrap();
        decode_data_uri(uri).unwrap()
    }

    #[test]
    fn one_buffer_per_attribute() {
        let mut mesh = grid(3, 3).with_colors();
        mesh.set_color(0, 0, VertexColor::RED).unwrap();
        let gltf = to_gltf(&mesh, &GltfOptions::default()).unwrap();

        let attributes = &gltf.meshes[0].primitives[0].attributes;
        assert_eq!(attributes.len(), 3);
        assert!(attributes.contains_key("POSITION"));
        assert!(attributes.contains_key("NORMAL"));
        assert!(attributes.contains_key("COLOR_0"));
        assert_eq!(gltf.buffers.len(), 4);
        assert_eq!(gltf.buffer_views.len(), 4);

        assert_eq!(gltf.accessors[attributes["POSITION"]].count, 9);
        assert_eq!(gltf.accessors[attributes["COLOR_0"]].accessor_type, "VEC4");
        assert_eq!(buffer_bytes(&gltf, attributes["COLOR_0"]).len(), 9 * 16);
    }

    #[test]
    fn position_bounds() {
        let gltf = to_gltf(&grid(3, 2), &GltfOptions::default()).unwrap();
        let position = &gltf.accessors[0];
        assert_eq!(position.min, Some(vec![0.0, 0.0, 0.5]));
        assert_eq!(position.max, Some(vec![2.0, 1.0, 0.5]));
        assert!(gltf.accessors[1].min.is_none());
    }

    #[test]
    fn indices_match_grid_split() {
        let mesh = grid(3, 4);
        let gltf = to_gltf(&mesh, &GltfOptions::default()).unwrap();
        let accessor = gltf.meshes[0].primitives[0].indices.unwrap();
        assert_eq!(gltf.accessors[accessor].component_type, COMPONENT_UNSIGNED_SHORT);

        let bytes = buffer_bytes(&gltf, accessor);
        let indices: Vec<usize> = bytes
            .chunks_exact(2)
            .map(|c| usize::from(u16::from_le_bytes([c[0], c[1]])))
            .collect();
        let expected: Vec<usize> = mesh.triangle_indices().flatten().collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn optional_attributes_can_be_skipped() {
        let options = GltfOptions {
            include_normals: false,
            ..GltfOptions::default()
        };
        let gltf = to_gltf(&grid(2, 2), &options).unwrap();
        let attributes = &gltf.meshes[0].primitives[0].attributes;
        assert_eq!(attributes.keys().collect::<Vec<_>>(), vec!["POSITION"]);
    }

    #[test]
    fn material_mapping() {
        let material = MaterialProperties::named("paint")
            .with_diffuse(VertexColor::rgb(0.2, 0.4, 0.6))
            .with_transparency(0.5);
        let gltf = to_gltf(&grid(2, 2), &GltfOptions::default().with_material(material)).unwrap();

        assert_eq!(gltf.meshes[0].primitives[0].material, Some(0));
        let pbr = gltf.materials[0].pbr_metallic_roughness.as_ref().unwrap();
        assert_eq!(pbr.base_color_factor, [0.2, 0.4, 0.6, 0.5]);
        assert_eq!(pbr.metallic_factor, 0.1);
        assert_eq!(pbr.roughness_factor, 0.6);
        assert_eq!(gltf.materials[0].alpha_mode.as_deref(), Some("BLEND"));
    }

    #[test]
    fn default_material_is_always_exported() {
        let gltf = to_gltf(&grid(2, 2), &GltfOptions::default()).unwrap();

        assert_eq!(gltf.materials.len(), 1);
        assert_eq!(gltf.meshes[0].primitives[0].material, Some(0));
        let material = &gltf.materials[0];
        assert_eq!(material.name.as_deref(), Some("material"));
        let pbr = material.pbr_metallic_roughness.as_ref().unwrap();
        assert_eq!(pbr.base_color_factor, [0.8, 0.8, 0.8, 1.0]);
        assert!(material.alpha_mode.is_none());
        assert!(material.emissive_factor.is_none());
    }

    #[test]
    fn lights_extension() {
        let options = GltfOptions::default()
            .with_light(Light::new("sun", LightKind::Directional).with_intensity(3.0))
            .with_light(Light::new("bulb", LightKind::Point))
            .with_light(Light::new("cone", LightKind::Spot))
            .with_light(Light::new("panel", LightKind::Area));
        let json = to_gltf_json(&grid(2, 2), &options).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(doc["extensionsUsed"][0], KHR_LIGHTS_PUNCTUAL);
        let lights = doc["extensions"][KHR_LIGHTS_PUNCTUAL]["lights"].as_array().unwrap();
        let types: Vec<&str> = lights.iter().map(|l| l["type"].as_str().unwrap()).collect();
        assert_eq!(types, vec!["directional", "point", "spot", "ambient"]);
        assert_eq!(lights[0]["name"], "sun");
        assert_eq!(lights[0]["intensity"].as_f64(), Some(3.0));
        assert_eq!(lights[0]["color"], serde_json::json!([1.0, 1.0, 1.0]));
        assert!(lights[2]["spot"]["outerConeAngle"].is_number());
        assert!(lights[0].get("spot").is_none());
    }

    #[test]
    fn no_lights_no_extension() {
        let json = to_gltf_json(&grid(2, 2), &GltfOptions::default().compact()).unwrap();
        assert!(!json.contains("extensions"));
        assert!(!json.contains('\n'));
        assert!(json.contains(DATA_URI_PREFIX));
    }

    #[test]
    fn index_overflow() {
        let mesh = StructuredMesh::new(257, 256).unwrap();
        let err = to_gltf(&mesh, &GltfOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            IoError::IndexOverflow {
                vertices: 65_792,
                max: 65_536
            }
        ));

        let largest = StructuredMesh::new(256, 256).unwrap();
        assert!(to_gltf(&largest, &GltfOptions::default()).is_ok());
    }

    #[test]
    fn faceless_mesh_is_rejected() {
        let mesh = StructuredMesh::new(4, 1).unwrap();
        assert!(matches!(
            to_gltf(&mesh, &GltfOptions::default()),
            Err(IoError::NoFaces { rows: 4, cols: 1 })
        ));
    }

    #[test]
    fn decode_rejects_foreign_uri() {
        assert!(decode_data_uri("file.bin").is_err());
        assert!(decode_data_uri("data:application/octet-stream;base64,@@").is_err());
        assert_eq!(
            decode_data_uri("data:application/octet-stream;base64,AQID").unwrap(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn document_roundtrips_through_json() {
        let json = to_gltf_json(&grid(2, 3), &GltfOptions::default()).unwrap();
        let parsed: Gltf = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, to_gltf(&grid(2, 3), &GltfOptions::default()).unwrap());
        assert_eq!(parsed.asset.version, "2.0");
    }
}
