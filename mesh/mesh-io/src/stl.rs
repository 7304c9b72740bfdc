//! Binary STL (Stereolithography) support.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (all zero when written here)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! All values are little-endian. Normals are recomputed per face as
//! `normalize((v2 - v1) × (v3 - v1))` and written as zero for degenerate
//! triangles. Triangulation is the grid's fixed two-triangles-per-cell
//! split, identical to the OBJ exporter.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use mesh_types::{Point3, StructuredMesh, Vector3};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// One triangle record of a binary STL file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlTriangle {
    /// Stored face normal.
    pub normal: Vector3<f64>,
    /// Corner positions in file order.
    pub vertices: [Point3<f64>; 3],
}

/// Write a mesh as binary STL.
///
/// # Errors
///
/// Returns [`IoError::NoFaces`] if the grid has no cells, or an I/O error if
/// writing fails.
///
/// # Example
///
/// ```
/// use mesh_io::{write_stl, HEADER_SIZE, TRIANGLE_SIZE};
/// use mesh_types::StructuredMesh;
///
/// let mesh = StructuredMesh::new(3, 3).unwrap();
/// let mut out = Vec::new();
/// write_stl(&mesh, &mut out).unwrap();
///
/// assert_eq!(out.len(), HEADER_SIZE + 4 + 8 * TRIANGLE_SIZE);
/// assert_eq!(&out[80..84], &8u32.to_le_bytes());
/// ```
pub fn write_stl<W: Write>(mesh: &StructuredMesh, mut writer: W) -> IoResult<()> {
    if !mesh.has_faces() {
        return Err(IoError::NoFaces {
            rows: mesh.num_points1(),
            cols: mesh.num_points2(),
        });
    }

    writer.write_all(&[0u8; HEADER_SIZE])?;

    let count = u32::try_from(mesh.triangle_count())
        .map_err(|_| IoError::invalid_content("too many triangles for binary STL"))?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; TRIANGLE_SIZE];
    for triangle in mesh.triangles() {
        let normal = triangle.face_normal();
        put_vec3(&mut record[0..12], normal.x, normal.y, normal.z);
        for (k, v) in triangle.vertices().iter().enumerate() {
            let start = 12 + k * 12;
            put_vec3(&mut record[start..start + 12], v.x, v.y, v.z);
        }
        record[48..50].copy_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: STL stores f32
fn put_vec3(buf: &mut [u8], x: f64, y: f64, z: f64) {
    buf[0..4].copy_from_slice(&(x as f32).to_le_bytes());
    buf[4..8].copy_from_slice(&(y as f32).to_le_bytes());
    buf[8..12].copy_from_slice(&(z as f32).to_le_bytes());
}

/// Save a mesh to a binary STL file.
///
/// # Errors
///
/// See [`write_stl`].
pub fn save_stl<P: AsRef<Path>>(mesh: &StructuredMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_stl(mesh, BufWriter::new(file))?;
    debug!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        bytes = HEADER_SIZE + 4 + mesh.triangle_count() * TRIANGLE_SIZE,
        "saved STL"
    );
    Ok(())
}

/// Read a binary STL stream.
///
/// # Errors
///
/// Returns [`IoError::UnexpectedEof`] if the stream ends before the header,
/// the count, or any announced triangle is complete.
///
/// # Example
///
/// ```
/// use mesh_io::{read_stl, write_stl};
/// use mesh_types::StructuredMesh;
///
/// let mut bytes = Vec::new();
/// write_stl(&StructuredMesh::new(2, 4).unwrap(), &mut bytes).unwrap();
///
/// let triangles = read_stl(bytes.as_slice()).unwrap();
/// assert_eq!(triangles.len(), 6);
/// ```
pub fn read_stl<R: Read>(mut reader: R) -> IoResult<Vec<StlTriangle>> {
    let mut position = 0u64;

    let mut header = [0u8; HEADER_SIZE + 4];
    read_record(&mut reader, &mut header, &mut position)?;
    let count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);

    let mut triangles = Vec::with_capacity(count.min(1 << 20) as usize);
    let mut record = [0u8; TRIANGLE_SIZE];
    for _ in 0..count {
        read_record(&mut reader, &mut record, &mut position)?;
        triangles.push(StlTriangle {
            normal: get_vec3(&record[0..12]),
            vertices: [
                Point3::from(get_vec3(&record[12..24])),
                Point3::from(get_vec3(&record[24..36])),
                Point3::from(get_vec3(&record[36..48])),
            ],
        });
    }

    Ok(triangles)
}

fn read_record<R: Read>(reader: &mut R, buf: &mut [u8], position: &mut u64) -> IoResult<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(IoError::UnexpectedEof {
                    position: *position + filled as u64,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    *position += buf.len() as u64;
    Ok(())
}

/// Read three little-endian f32s.
fn get_vec3(buf: &[u8]) -> Vector3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vector3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Load a binary STL file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or any
/// error from [`read_stl`].
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Vec<StlTriangle>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(path, e))?;
    read_stl(BufReader::new(file))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_grid() -> StructuredMesh {
        let mut mesh = StructuredMesh::new(2, 2).unwrap();
        mesh.set_node(0, 0, Point3::new(0.0, 0.0, 0.0)).unwrap();
        mesh.set_node(0, 1, Point3::new(0.0, 1.0, 0.0)).unwrap();
        mesh.set_node(1, 0, Point3::new(1.0, 0.0, 0.0)).unwrap();
        mesh.set_node(1, 1, Point3::new(1.0, 1.0, 0.0)).unwrap();
        mesh
    }

    #[test]
    fn header_is_zero_and_count_little_endian() {
        let mut out = Vec::new();
        write_stl(&flat_grid(), &mut out).unwrap();

        assert_eq!(out.len(), HEADER_SIZE + 4 + 2 * TRIANGLE_SIZE);
        assert!(out[..HEADER_SIZE].iter().all(|&b| b == 0));
        assert_eq!(&out[80..84], &[2, 0, 0, 0]);
        // Attribute byte count of the first record.
        assert_eq!(&out[84 + 48..84 + 50], &[0, 0]);
    }

    #[test]
    fn vertices_follow_grid_split() {
        let mut out = Vec::new();
        write_stl(&flat_grid(), &mut out).unwrap();
        let triangles = read_stl(out.as_slice()).unwrap();

        // Cell (0, 0) split along the (0,0)-(1,1) diagonal.
        assert_eq!(
            triangles[0].vertices,
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ]
        );
        assert_eq!(
            triangles[1].vertices,
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn normals_are_recomputed() {
        let mut out = Vec::new();
        write_stl(&flat_grid(), &mut out).unwrap();
        for triangle in read_stl(out.as_slice()).unwrap() {
            assert_relative_eq!(triangle.normal, -Vector3::z());
        }
    }

    #[test]
    fn degenerate_triangles_have_zero_normal() {
        let mesh = StructuredMesh::new(2, 2).unwrap();
        let mut out = Vec::new();
        write_stl(&mesh, &mut out).unwrap();
        for triangle in read_stl(out.as_slice()).unwrap() {
            assert_eq!(triangle.normal, Vector3::zeros());
        }
    }

    #[test]
    fn faceless_mesh_is_rejected() {
        let mesh = StructuredMesh::new(1, 5).unwrap();
        let err = write_stl(&mesh, Vec::new()).unwrap_err();
        assert!(matches!(err, IoError::NoFaces { rows: 1, cols: 5 }));
    }

    #[test]
    fn truncated_input() {
        let mut out = Vec::new();
        write_stl(&flat_grid(), &mut out).unwrap();

        let err = read_stl(&out[..50]).unwrap_err();
        assert!(matches!(err, IoError::UnexpectedEof { position: 50 }));

        let err = read_stl(&out[..out.len() - 1]).unwrap_err();
        assert!(matches!(err, IoError::UnexpectedEof { .. }));
    }

    #[test]
    fn roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.stl");
        save_stl(&flat_grid(), &path).unwrap();

        let triangles = load_stl(&path).unwrap();
        assert_eq!(triangles.len(), 2);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 184);
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        if let Err(IoError::FileNotFound { path }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        } else {
            panic!("expected FileNotFound");
        }
    }
}
