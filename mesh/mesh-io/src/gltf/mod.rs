//! glTF 2.0 export with embedded buffers.
//!
//! Produces a single ASCII `.gltf` document. Every attribute lives in its
//! own base64 data-URI buffer, so no companion `.bin` file is needed.

mod schema;
mod writer;

pub use schema::{
    Accessor, Asset, Buffer, BufferView, COMPONENT_FLOAT, COMPONENT_UNSIGNED_SHORT, Gltf,
    GltfMaterial, KHR_LIGHTS_PUNCTUAL, Mesh, Node, PbrMetallicRoughness, Primitive, PunctualLight,
    Scene, SpotCone,
};
pub use writer::{
    DATA_URI_PREFIX, GltfOptions, MAX_GLTF_VERTICES, decode_data_uri, save_gltf, to_gltf,
    to_gltf_json, write_gltf,
};
