//! Wavefront OBJ support
//!
//! The exporter writes one sub-mesh with per-face-corner attributes:
//!
//! ```text
//! v x y z        one per point, in point order
//! vt u v         one per face corner, faces in order, corners in winding order
//! vn x y z       one per face corner, same order as vt
//! f P/T/N ...    P = point index + 1, T = N = running corner number (1-based)
//! ```
//!
//! Texture and normal records are never deduplicated, so `T` and `N` grow
//! monotonically over the whole file regardless of point reuse.
//!
//! Export is not atomic. If a write fails part way the destination keeps
//! whatever was written before the failure; callers that need all-or-nothing
//! files should export to a temporary path and rename it on success.

use crate::error::{ExportError, IoError, IoResult};
use crate::{GeometryReader, GeometryWriter};
use facecrate_core::{
    AttributeLayout, Geometry, MeshAttributeKind, MeshBuilder, Point3f, PolyMesh, Uv, Vector3f,
};
use log::{debug, info};
use ::obj::ObjData;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Output settings for OBJ export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjWriteOptions {
    /// Digits after the decimal point for every coordinate
    pub precision: usize,
    /// `#` comment lines written before the first record
    pub comments: Vec<String>,
}

impl Default for ObjWriteOptions {
    fn default() -> Self {
        Self {
            precision: 6,
            comments: Vec::new(),
        }
    }
}

impl ObjWriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comments.push(comment.into());
        self
    }
}

/// Serializes single-mesh geometry with per-corner UVs and normals to OBJ text
#[derive(Debug, Clone, Default)]
pub struct ObjExporter {
    options: ObjWriteOptions,
}

impl ObjExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ObjWriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ObjWriteOptions {
        &self.options
    }

    /// Check the export preconditions and return the mesh to write
    pub fn check(geometry: &Geometry) -> Result<&PolyMesh, ExportError> {
        let mesh = match geometry.meshes() {
            [mesh] => mesh,
            meshes => {
                return Err(ExportError::UnsupportedMeshStructure {
                    meshes: meshes.len(),
                })
            }
        };

        for attribute in [MeshAttributeKind::Uv, MeshAttributeKind::Normal] {
            let layout = mesh.layout_of(attribute);
            if layout != AttributeLayout::VertexBased {
                return Err(ExportError::UnsupportedAttributeLayout { attribute, layout });
            }
        }
        Ok(mesh)
    }

    /// Export to a file. Preconditions are checked before the file is created.
    pub fn export<P: AsRef<Path>>(&self, geometry: &Geometry, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let mesh = Self::check(geometry)?;

        debug!("Exporting OBJ to {:?}", path);
        let file = File::create(path)?;
        self.write_mesh(mesh, BufWriter::new(file))?;

        info!(
            "Wrote {:?}: {} points, {} faces, {} corners",
            path,
            mesh.points_count(),
            mesh.faces_count(),
            mesh.corners_count()
        );
        Ok(())
    }

    /// Export to any writer. Preconditions are checked before the first byte.
    pub fn write_to<W: Write>(&self, geometry: &Geometry, writer: W) -> Result<(), ExportError> {
        let mesh = Self::check(geometry)?;
        self.write_mesh(mesh, BufWriter::new(writer))?;
        Ok(())
    }

    fn write_mesh<W: Write>(&self, mesh: &PolyMesh, mut out: BufWriter<W>) -> std::io::Result<()> {
        let prec = self.options.precision;

        for comment in &self.options.comments {
            writeln!(out, "# {}", comment)?;
        }

        for p in mesh.points() {
            writeln!(out, "v {:.*} {:.*} {:.*}", prec, p.x, prec, p.y, prec, p.z)?;
        }

        for f in 0..mesh.faces_count() {
            for c in 0..mesh.face_size(f) {
                let t = mesh.uv(f, c);
                writeln!(out, "vt {:.*} {:.*}", prec, t.x, prec, t.y)?;
            }
        }

        for f in 0..mesh.faces_count() {
            for c in 0..mesh.face_size(f) {
                let n = mesh.normal(f, c);
                writeln!(out, "vn {:.*} {:.*} {:.*}", prec, n.x, prec, n.y, prec, n.z)?;
            }
        }

        let mut offset = 0;
        for face in mesh.faces() {
            out.write_all(b"f")?;
            for (c, &point) in face.iter().enumerate() {
                let corner = offset + c + 1;
                write!(out, " {}/{}/{}", point + 1, corner, corner)?;
            }
            out.write_all(b"\n")?;
            offset += face.len();
        }

        out.flush()
    }
}

impl GeometryWriter for ObjExporter {
    type Error = ExportError;

    fn write_geometry<P: AsRef<Path>>(&self, geometry: &Geometry, path: P) -> Result<(), ExportError> {
        self.export(geometry, path)
    }
}

/// Export with default options
pub fn write_geometry_obj<P: AsRef<Path>>(geometry: &Geometry, path: P) -> Result<(), ExportError> {
    ObjExporter::new().export(geometry, path)
}

/// Reads OBJ files back into single-mesh geometry
pub struct ObjReader;

impl GeometryReader for ObjReader {
    fn read_geometry<P: AsRef<Path>>(path: P) -> IoResult<Geometry> {
        read_obj(path)
    }
}

/// Read an OBJ file. All objects and groups are merged into one sub-mesh
/// whose UVs and normals are vertex-based, resolved per face corner.
pub fn read_obj<P: AsRef<Path>>(path: P) -> IoResult<Geometry> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => IoError::Io(e),
    })?;
    let geometry = read_obj_from(BufReader::new(file))?;
    debug!("Read {:?}: {} points, {} faces", path, geometry.points_count(), geometry.faces_count());
    Ok(geometry)
}

/// Read OBJ text from any reader
pub fn read_obj_from<R: Read>(reader: R) -> IoResult<Geometry> {
    let data = ObjData::load_buf(reader).map_err(|e| IoError::ParseError {
        message: format!("{:?}", e),
    })?;

    let mut builder = MeshBuilder::new();
    for p in &data.position {
        builder.add_point(Point3f::new(p[0], p[1], p[2]));
    }

    let mut uvs = Vec::new();
    let mut normals = Vec::new();
    let mut face_points = Vec::new();
    let polygons = data
        .objects
        .iter()
        .flat_map(|o| o.groups.iter())
        .flat_map(|g| g.polys.iter());

    for (face, polygon) in polygons.enumerate() {
        face_points.clear();
        for corner in &polygon.0 {
            let (t, n) = match (corner.1, corner.2) {
                (Some(t), Some(n)) => (t, n),
                _ => {
                    return Err(IoError::InvalidFormat {
                        format: format!("face {} lacks texture or normal indices", face),
                    })
                }
            };
            let texture = data.texture.get(t).ok_or_else(|| IoError::ParseError {
                message: format!("face {} references missing texture coordinate {}", face, t + 1),
            })?;
            let normal = data.normal.get(n).ok_or_else(|| IoError::ParseError {
                message: format!("face {} references missing normal {}", face, n + 1),
            })?;
            face_points.push(corner.0);
            uvs.push(Uv::new(texture[0], texture[1]));
            normals.push(Vector3f::new(normal[0], normal[1], normal[2]));
        }
        builder.add_face(&face_points);
    }

    builder
        .set_uvs_attribute(AttributeLayout::VertexBased, uvs)
        .set_normals_attribute(AttributeLayout::VertexBased, normals);
    Ok(Geometry::from(builder.build()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facecrate_core::uv;

    fn triangle(uv_layout: AttributeLayout) -> PolyMesh {
        let mut builder = MeshBuilder::new();
        builder.add_point(Point3f::new(0.0, 0.0, 0.0));
        builder.add_point(Point3f::new(1.0, 0.0, 0.0));
        builder.add_point(Point3f::new(0.0, 1.0, 0.0));
        builder.add_face(&[0, 1, 2]);
        builder.set_uvs_attribute(uv_layout, vec![uv(0.0, 0.0), uv(1.0, 0.0), uv(0.0, 1.0)]);
        builder.build().unwrap()
    }

    fn export_to_string(exporter: &ObjExporter, geometry: &Geometry) -> String {
        let mut buf = Vec::new();
        exporter.write_to(geometry, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_triangle_output_exact() {
        let geo = Geometry::from(triangle(AttributeLayout::VertexBased));
        let text = export_to_string(&ObjExporter::new(), &geo);
        let expected = "\
v 0.000000 0.000000 0.000000
v 1.000000 0.000000 0.000000
v 0.000000 1.000000 0.000000
vt 0.000000 0.000000
vt 1.000000 0.000000
vt 0.000000 1.000000
vn 0.000000 0.000000 1.000000
vn 0.000000 0.000000 1.000000
vn 0.000000 0.000000 1.000000
f 1/1/1 2/2/2 3/3/3
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_precision_and_comments() {
        let geo = Geometry::from(triangle(AttributeLayout::VertexBased));
        let exporter = ObjExporter::with_options(
            ObjWriteOptions::new().with_precision(2).with_comment("head model"),
        );
        let text = export_to_string(&exporter, &geo);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# head model"));
        assert_eq!(lines.next(), Some("v 0.00 0.00 0.00"));
    }

    #[test]
    fn test_point_based_uv_rejected_before_writing() {
        let geo = Geometry::from(triangle(AttributeLayout::PointBased));
        let mut buf = Vec::new();
        let err = ObjExporter::new().write_to(&geo, &mut buf).unwrap_err();
        assert!(matches!(
            err,
            ExportError::UnsupportedAttributeLayout {
                attribute: MeshAttributeKind::Uv,
                layout: AttributeLayout::PointBased
            }
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_geometry_rejected() {
        let err = ObjExporter::check(&Geometry::new()).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedMeshStructure { meshes: 0 }));
        assert!(err.to_string().contains("found 0"));
    }

    #[test]
    fn test_read_rejects_faces_without_normals() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1\n";
        let err = read_obj_from(text.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::InvalidFormat { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_obj("definitely_missing_head.obj").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn test_read_merges_groups() {
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
g left
f 1/1/1 2/1/1 3/1/1
g right
f 1/1/1 3/1/1 4/1/1
";
        let geo = read_obj_from(text.as_bytes()).unwrap();
        assert_eq!(geo.meshes_count(), 1);
        let mesh = geo.mesh(0).unwrap();
        assert_eq!(mesh.faces_count(), 2);
        assert_eq!(mesh.face(1), &[0, 2, 3]);
        assert_eq!(mesh.uvs_attribute(), AttributeLayout::VertexBased);
    }
}
