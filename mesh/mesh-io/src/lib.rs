//! Structured mesh export.
//!
//! This crate serializes [`StructuredMesh`] grids to common interchange
//! formats:
//!
//! - **OBJ** (Wavefront) - Surface or wireframe, with a companion **MTL**
//! - **STL** (Stereolithography) - Binary
//! - **glTF** 2.0 - ASCII JSON with embedded base64 buffers
//!
//! All three share the grid's triangulation: cell `(i, j)` becomes
//! `(i,j) (i,j+1) (i+1,j+1)` and `(i,j) (i+1,j+1) (i+1,j)`, in that order.
//! Readers for OBJ and binary STL are included for inspecting exported files.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{save_mesh, save_obj_with_material, MaterialProperties, ObjMode};
//! use mesh_types::StructuredMesh;
//!
//! let mesh = StructuredMesh::new(16, 8).unwrap();
//!
//! // Format detected from extension
//! save_mesh(&mesh, "tube.stl").unwrap();
//! save_mesh(&mesh, "tube.gltf").unwrap();
//!
//! // OBJ plus tube.mtl
//! let material = MaterialProperties::named("steel");
//! save_obj_with_material(&mesh, "tube.obj", &material, ObjMode::Surface).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
pub mod gltf;
mod material;
mod obj;
mod stl;

pub use error::{IoError, IoResult};
pub use gltf::{
    DATA_URI_PREFIX, GltfOptions, MAX_GLTF_VERTICES, decode_data_uri, save_gltf, to_gltf,
    to_gltf_json, write_gltf,
};
pub use material::{Light, LightKind, MaterialProperties};
pub use obj::{
    ObjData, ObjFace, ObjMode, ObjOptions, load_obj, read_obj, save_mtl, save_obj,
    save_obj_with_material, write_mtl, write_obj,
};
pub use stl::{HEADER_SIZE, StlTriangle, TRIANGLE_SIZE, load_stl, read_stl, save_stl, write_stl};

use std::path::Path;

use mesh_types::StructuredMesh;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Wavefront OBJ.
    Obj,
    /// Binary STL.
    Stl,
    /// glTF 2.0 JSON with embedded buffers.
    Gltf,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "stl" => Some(Self::Stl),
            "gltf" => Some(Self::Gltf),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Stl => "stl",
            Self::Gltf => "gltf",
        }
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// Uses default options for each format: OBJ surfaces without a material,
/// glTF without material or lights.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The mesh cannot be encoded in that format
/// - The file cannot be written
pub fn save_mesh<P: AsRef<Path>>(mesh: &StructuredMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        MeshFormat::Obj => save_obj(mesh, path, &ObjOptions::default()),
        MeshFormat::Stl => save_stl(mesh, path),
        MeshFormat::Gltf => save_gltf(mesh, path, &GltfOptions::default()),
    }
}
