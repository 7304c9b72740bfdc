//! Wavefront OBJ and MTL support.
//!
//! # Writing
//!
//! Vertices are written row-major (`v` then `vn`), so grid node `(i, j)` has
//! the 1-based OBJ index `i * num_points2 + j + 1`. In [`ObjMode::Surface`]
//! each cell becomes two `f` statements of `position//normal` pairs; in
//! [`ObjMode::Wireframe`] every row and every column becomes an `l`
//! polyline.
//!
//! # Reading
//!
//! [`read_obj`] understands the subset needed to inspect exported files:
//!
//! ```text
//! v x y z [w]          – position
//! vn x y z             – normal
//! f a a/b a//c a/b/c   – face (negative indices are relative)
//! l a b ...            – polyline
//! mtllib name          – material library
//! usemtl name          – material selection
//! ```
//!
//! Everything else is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{Point3, StructuredMesh, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::material::MaterialProperties;

/// What the OBJ file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjMode {
    /// Triangle faces.
    #[default]
    Surface,
    /// Grid lines along both directions.
    Wireframe,
}

/// Options for OBJ export.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjOptions {
    /// Surface or wireframe output.
    pub mode: ObjMode,
    /// Companion material file referenced by `mtllib`.
    pub material_library: Option<String>,
    /// Material selected by `usemtl`.
    pub material_name: Option<String>,
}

impl ObjOptions {
    /// Write grid lines instead of faces.
    #[must_use]
    pub fn wireframe(mut self) -> Self {
        self.mode = ObjMode::Wireframe;
        self
    }

    /// Reference a material library and select one of its materials.
    #[must_use]
    pub fn with_material(mut self, library: impl Into<String>, name: impl Into<String>) -> Self {
        self.material_library = Some(library.into());
        self.material_name = Some(name.into());
        self
    }
}

/// Write a mesh as OBJ text.
///
/// Normals are written when the mesh has them; faces then reference
/// `position//normal`, otherwise plain positions.
///
/// # Errors
///
/// Returns an error if writing fails.
///
/// # Example
///
/// ```
/// use mesh_io::{write_obj, ObjOptions};
/// use mesh_types::StructuredMesh;
///
/// let mesh = StructuredMesh::new(2, 2).unwrap();
/// let mut out = Vec::new();
/// write_obj(&mesh, &mut out, &ObjOptions::default()).unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("f 1 2 4\n"));
/// assert!(text.contains("f 1 4 3\n"));
/// ```
pub fn write_obj<W: Write>(mesh: &StructuredMesh, mut writer: W, options: &ObjOptions) -> IoResult<()> {
    writeln!(
        writer,
        "# {} x {} structured mesh",
        mesh.num_points1(),
        mesh.num_points2()
    )?;
    if let Some(lib) = &options.material_library {
        writeln!(writer, "mtllib {lib}")?;
    }

    for p in mesh.nodes() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    let has_normals = if let Some(normals) = mesh.normals() {
        for n in normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        true
    } else {
        false
    };

    if let Some(name) = &options.material_name {
        writeln!(writer, "usemtl {name}")?;
    }

    match options.mode {
        ObjMode::Surface => {
            for [a, b, c] in mesh.triangle_indices() {
                let (a, b, c) = (a + 1, b + 1, c + 1);
                if has_normals {
                    writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
                } else {
                    writeln!(writer, "f {a} {b} {c}")?;
                }
            }
        }
        ObjMode::Wireframe => write_grid_lines(mesh, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}

fn write_grid_lines<W: Write>(mesh: &StructuredMesh, writer: &mut W) -> IoResult<()> {
    let (rows, cols) = (mesh.num_points1(), mesh.num_points2());
    let mut polyline = |indices: &mut dyn Iterator<Item = usize>| -> IoResult<()> {
        write!(writer, "l")?;
        for k in indices {
            write!(writer, " {}", k + 1)?;
        }
        writeln!(writer)?;
        Ok(())
    };

    if cols > 1 {
        for i in 0..rows {
            polyline(&mut (0..cols).map(|j| i * cols + j))?;
        }
    }
    if rows > 1 {
        for j in 0..cols {
            polyline(&mut (0..rows).map(|i| i * cols + j))?;
        }
    }
    Ok(())
}

/// Save a mesh to an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_obj<P: AsRef<Path>>(mesh: &StructuredMesh, path: P, options: &ObjOptions) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_obj(mesh, BufWriter::new(file), options)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        mode = ?options.mode,
        "saved OBJ"
    );
    Ok(())
}

/// Save a mesh to an OBJ file plus a companion MTL file.
///
/// The material file is written next to `path` with the `.mtl` extension
/// and referenced through `mtllib` / `usemtl`.
///
/// # Errors
///
/// Returns an error if either file cannot be created or written.
pub fn save_obj_with_material<P: AsRef<Path>>(
    mesh: &StructuredMesh,
    path: P,
    material: &MaterialProperties,
    mode: ObjMode,
) -> IoResult<()> {
    let path = path.as_ref();
    let mtl_path = path.with_extension("mtl");
    let library = mtl_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| IoError::invalid_content("material path is not valid UTF-8"))?
        .to_string();

    save_mtl(std::slice::from_ref(material), &mtl_path)?;
    let options = ObjOptions {
        mode,
        ..ObjOptions::default()
    }
    .with_material(library, material.name.clone());
    save_obj(mesh, path, &options)
}

/// Write materials as MTL text.
///
/// # Errors
///
/// Returns an error if writing fails.
///
/// # Example
///
/// ```
/// use mesh_io::{write_mtl, MaterialProperties};
///
/// let material = MaterialProperties::named("glass").with_transparency(0.5);
/// let mut out = Vec::new();
/// write_mtl(&[material], &mut out).unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("newmtl glass\n"));
/// assert!(text.contains("d 0.5\n"));
/// ```
pub fn write_mtl<W: Write>(materials: &[MaterialProperties], mut writer: W) -> IoResult<()> {
    for (k, m) in materials.iter().enumerate() {
        if k > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "newmtl {}", m.name)?;
        writeln!(writer, "Ka {} {} {}", m.ambient.r, m.ambient.g, m.ambient.b)?;
        writeln!(writer, "Kd {} {} {}", m.diffuse.r, m.diffuse.g, m.diffuse.b)?;
        writeln!(writer, "Ks {} {} {}", m.specular.r, m.specular.g, m.specular.b)?;
        writeln!(writer, "Ke {} {} {}", m.emission.r, m.emission.g, m.emission.b)?;
        writeln!(writer, "Ns {}", m.shininess)?;
        writeln!(writer, "d {}", m.transparency)?;
        writeln!(writer, "illum 2")?;
        if let Some(texture) = &m.diffuse_texture {
            writeln!(writer, "map_Kd {texture}")?;
        }
        if let Some(texture) = &m.bump_texture {
            writeln!(writer, "map_Bump {texture}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Save materials to an MTL file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_mtl<P: AsRef<Path>>(materials: &[MaterialProperties], path: P) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_mtl(materials, BufWriter::new(file))
}

/// One `f` statement with 0-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjFace {
    /// Position indices.
    pub positions: Vec<usize>,
    /// Normal indices, when every corner has one.
    pub normals: Option<Vec<usize>>,
}

/// Contents of an OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjData {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Vertex normals.
    pub normals: Vec<Vector3<f64>>,
    /// Faces.
    pub faces: Vec<ObjFace>,
    /// Polylines (0-based position indices).
    pub lines: Vec<Vec<usize>>,
    /// Names from `mtllib` statements.
    pub material_libraries: Vec<String>,
    /// Names from `usemtl` statements.
    pub materials_used: Vec<String>,
}

/// Parse OBJ text.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] for malformed numbers or indices that
/// do not refer to an existing element.
///
/// # Example
///
/// ```
/// use mesh_io::read_obj;
///
/// let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 -1//1\n";
/// let data = read_obj(text.as_bytes()).unwrap();
///
/// assert_eq!(data.positions.len(), 3);
/// assert_eq!(data.faces[0].positions, vec![0, 1, 2]);
/// assert_eq!(data.faces[0].normals, Some(vec![0, 0, 0]));
/// ```
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<ObjData> {
    let mut data = ObjData::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.split('#').next().unwrap_or_default().trim();
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let at = |message: String| IoError::invalid_content(format!("line {}: {message}", line_no + 1));

        match keyword {
            "v" => {
                let [x, y, z] = parse_coords(&mut parts).map_err(at)?;
                data.positions.push(Point3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_coords(&mut parts).map_err(at)?;
                data.normals.push(Vector3::new(x, y, z));
            }
            "f" => {
                let face = parse_face(parts, data.positions.len(), data.normals.len()).map_err(at)?;
                data.faces.push(face);
            }
            "l" => {
                let polyline = parts
                    .map(|token| {
                        let first = token.split('/').next().unwrap_or_default();
                        resolve_index(first, data.positions.len())
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(at)?;
                if polyline.len() < 2 {
                    return Err(at("polyline needs at least two vertices".to_string()));
                }
                data.lines.push(polyline);
            }
            "mtllib" => data.material_libraries.extend(parts.map(str::to_string)),
            "usemtl" => {
                if let Some(name) = parts.next() {
                    data.materials_used.push(name.to_string());
                }
            }
            _ => {}
        }
    }

    debug!(
        positions = data.positions.len(),
        faces = data.faces.len(),
        lines = data.lines.len(),
        "parsed OBJ"
    );
    Ok(data)
}

fn parse_coords<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<[f64; 3], String> {
    let mut out = [0.0; 3];
    for slot in &mut out {
        let token = parts.next().ok_or("expected three coordinates")?;
        *slot = token
            .parse()
            .map_err(|e| format!("invalid number {token:?}: {e}"))?;
    }
    Ok(out)
}

fn parse_face<'a>(
    parts: impl Iterator<Item = &'a str>,
    num_positions: usize,
    num_normals: usize,
) -> Result<ObjFace, String> {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut all_normals = true;

    for token in parts {
        let mut fields = token.split('/');
        let position = fields.next().unwrap_or_default();
        positions.push(resolve_index(position, num_positions)?);

        let _texcoord = fields.next();
        match fields.next() {
            Some(normal) if !normal.is_empty() => normals.push(resolve_index(normal, num_normals)?),
            _ => all_normals = false,
        }
    }

    if positions.len() < 3 {
        return Err(format!("face needs at least three vertices, got {}", positions.len()));
    }
    Ok(ObjFace {
        positions,
        normals: all_normals.then_some(normals),
    })
}

/// Convert a 1-based (or negative, relative) OBJ index to 0-based.
fn resolve_index(token: &str, count: usize) -> Result<usize, String> {
    let value: i64 = token
        .parse()
        .map_err(|e| format!("invalid index {token:?}: {e}"))?;
    let resolved = match value {
        v if v > 0 => usize::try_from(v - 1).ok(),
        v if v < 0 => usize::try_from(-v).ok().and_then(|back| count.checked_sub(back)),
        _ => None,
    };
    resolved
        .filter(|&k| k < count)
        .ok_or_else(|| format!("index {value} out of range for {count} elements"))
}

/// Load an OBJ file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or any
/// error from [`read_obj`].
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<ObjData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(path, e))?;
    read_obj(BufReader::new(file))
}
