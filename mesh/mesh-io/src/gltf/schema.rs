//! glTF 2.0 JSON schema types.
//!
//! Only the parts of the glTF 2.0 specification the exporter emits, plus
//! `KHR_lights_punctual`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Component type of 32-bit floats.
pub const COMPONENT_FLOAT: u32 = 5126;
/// Component type of 16-bit unsigned integers.
pub const COMPONENT_UNSIGNED_SHORT: u32 = 5123;
/// Buffer view target for vertex attributes.
pub const TARGET_ARRAY_BUFFER: u32 = 34962;
/// Buffer view target for indices.
pub const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;
/// Primitive mode for triangle lists.
pub const MODE_TRIANGLES: u32 = 4;
/// Extension name for punctual lights.
pub const KHR_LIGHTS_PUNCTUAL: &str = "KHR_lights_punctual";

/// Root glTF object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gltf {
    /// Asset information.
    pub asset: Asset,
    /// Default scene index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<usize>,
    /// Scenes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    /// Nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    /// Meshes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<Mesh>,
    /// Accessors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<Accessor>,
    /// Buffer views.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffer_views: Vec<BufferView>,
    /// Buffers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffers: Vec<Buffer>,
    /// Materials.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<GltfMaterial>,
    /// Extensions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, serde_json::Value>,
    /// Extension names used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions_used: Vec<String>,
}

/// Asset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// glTF version.
    pub version: String,
    /// Generator name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            generator: None,
        }
    }
}

/// A scene containing root nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Root node indices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<usize>,
}

/// A node in the scene graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Mesh index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<usize>,
}

/// A mesh containing primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Mesh name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Mesh primitives.
    pub primitives: Vec<Primitive>,
}

/// A mesh primitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Vertex attributes (`POSITION`, `NORMAL`, `COLOR_0`).
    pub attributes: BTreeMap<String, usize>,
    /// Index accessor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indices: Option<usize>,
    /// Material index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<usize>,
    /// Rendering mode (4 = TRIANGLES).
    #[serde(default = "default_primitive_mode")]
    pub mode: u32,
}

const fn default_primitive_mode() -> u32 {
    MODE_TRIANGLES
}

/// An accessor for typed buffer data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    /// Buffer view index.
    pub buffer_view: usize,
    /// Byte offset within buffer view.
    #[serde(default)]
    pub byte_offset: usize,
    /// Component type (5123 = UNSIGNED_SHORT, 5126 = FLOAT).
    pub component_type: u32,
    /// Number of elements.
    pub count: usize,
    /// Element type (`"SCALAR"`, `"VEC3"`, `"VEC4"`).
    #[serde(rename = "type")]
    pub accessor_type: String,
    /// Minimum values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f64>>,
    /// Maximum values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f64>>,
}

/// A view into a buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    /// Buffer index.
    pub buffer: usize,
    /// Byte offset into buffer.
    #[serde(default)]
    pub byte_offset: usize,
    /// Byte length.
    pub byte_length: usize,
    /// Target (34962 = ARRAY_BUFFER, 34963 = ELEMENT_ARRAY_BUFFER).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

/// A buffer containing binary data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    /// Byte length.
    pub byte_length: usize,
    /// Data URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A PBR material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfMaterial {
    /// Material name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// PBR metallic-roughness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    /// Emissive factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_factor: Option<[f32; 3]>,
    /// Alpha mode (`"OPAQUE"`, `"BLEND"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_mode: Option<String>,
    /// Double-sided rendering.
    #[serde(default)]
    pub double_sided: bool,
}

/// PBR metallic-roughness properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    /// Base color factor.
    pub base_color_factor: [f32; 4],
    /// Metallic factor.
    pub metallic_factor: f32,
    /// Roughness factor.
    pub roughness_factor: f32,
}

/// A light in the `KHR_lights_punctual` extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunctualLight {
    /// Light name.
    pub name: String,
    /// Light type (`"directional"`, `"point"`, `"spot"`, `"ambient"`).
    #[serde(rename = "type")]
    pub light_type: String,
    /// RGB color.
    pub color: [f32; 3],
    /// Brightness.
    pub intensity: f32,
    /// Cone for spot lights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<SpotCone>,
}

/// Cone angles of a spot light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotCone {
    /// Inner cone angle in radians.
    pub inner_cone_angle: f32,
    /// Outer cone angle in radians.
    pub outer_cone_angle: f32,
}
