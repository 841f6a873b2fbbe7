//! Incremental, validated mesh construction

use crate::mesh::{AttributeLayout, MeshAttribute, PolyMesh};
use crate::point::*;
use crate::{Error, Result};
use log::debug;

/// Collects points, faces and attributes, then checks them in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    points: Vec<Point3f>,
    corners: Vec<usize>,
    face_offsets: Vec<usize>,
    uvs: Option<MeshAttribute<Uv>>,
    normals: Option<MeshAttribute<Vector3f>>,
}

impl MeshBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            corners: Vec::new(),
            face_offsets: vec![0],
            uvs: None,
            normals: None,
        }
    }

    /// Add a point and return its index
    pub fn add_point(&mut self, point: Point3f) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// Add a face given its point indices in winding order; returns the face index
    pub fn add_face(&mut self, points: &[usize]) -> usize {
        let index = self.face_offsets.len() - 1;
        self.corners.extend_from_slice(points);
        self.face_offsets.push(self.corners.len());
        index
    }

    pub fn set_uvs_attribute(&mut self, layout: AttributeLayout, uvs: Vec<Uv>) -> &mut Self {
        self.uvs = Some(MeshAttribute::new(layout, uvs));
        self
    }

    pub fn set_normals_attribute(&mut self, layout: AttributeLayout, normals: Vec<Vector3f>) -> &mut Self {
        self.normals = Some(MeshAttribute::new(layout, normals));
        self
    }

    pub fn points_count(&self) -> usize {
        self.points.len()
    }

    pub fn faces_count(&self) -> usize {
        self.face_offsets.len() - 1
    }

    /// Validate everything collected so far and produce the mesh.
    ///
    /// Without an explicit normal attribute, flat per-corner normals are
    /// derived from each face polygon.
    pub fn build(self) -> Result<PolyMesh> {
        let points_count = self.points.len();
        let corners_count = self.corners.len();

        for (face, w) in self.face_offsets.windows(2).enumerate() {
            let size = w[1] - w[0];
            if size < 3 {
                return Err(Error::InvalidData(format!(
                    "face {} has {} corners, at least 3 required",
                    face, size
                )));
            }
            if let Some(&bad) = self.corners[w[0]..w[1]].iter().find(|&&p| p >= points_count) {
                return Err(Error::InvalidData(format!(
                    "face {} references point {} but the mesh has {} points",
                    face, bad, points_count
                )));
            }
        }

        let uvs = self
            .uvs
            .ok_or_else(|| Error::InvalidData("mesh has no uv attribute".to_string()))?;
        check_attribute_len("uv", uvs.layout(), uvs.len(), points_count, corners_count)?;

        let normals = match self.normals {
            Some(normals) => {
                check_attribute_len("normal", normals.layout(), normals.len(), points_count, corners_count)?;
                normals
            }
            None => MeshAttribute::vertex_based(flat_corner_normals(
                &self.points,
                &self.corners,
                &self.face_offsets,
            )),
        };

        debug!(
            "Built mesh with {} points, {} faces, {} corners (uv {}, normal {})",
            points_count,
            self.face_offsets.len() - 1,
            corners_count,
            uvs.layout(),
            normals.layout()
        );

        Ok(PolyMesh {
            points: self.points,
            corners: self.corners,
            face_offsets: self.face_offsets,
            uvs,
            normals,
        })
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_attribute_len(
    name: &str,
    layout: AttributeLayout,
    len: usize,
    points_count: usize,
    corners_count: usize,
) -> Result<()> {
    let expected = match layout {
        AttributeLayout::PointBased => points_count,
        AttributeLayout::VertexBased => corners_count,
    };
    if len != expected {
        return Err(Error::InvalidData(format!(
            "{} attribute ({}) has {} values, expected {}",
            name, layout, len, expected
        )));
    }
    Ok(())
}

/// Polygon normal by Newell's method; zero for degenerate polygons
pub fn polygon_normal(points: &[Point3f], polygon: &[usize]) -> Vector3f {
    let mut normal = Vector3f::zeros();
    for (i, &a) in polygon.iter().enumerate() {
        let p = points[a];
        let q = points[polygon[(i + 1) % polygon.len()]];
        normal.x += (p.y - q.y) * (p.z + q.z);
        normal.y += (p.z - q.z) * (p.x + q.x);
        normal.z += (p.x - q.x) * (p.y + q.y);
    }
    normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros)
}

fn flat_corner_normals(points: &[Point3f], corners: &[usize], face_offsets: &[usize]) -> Vec<Vector3f> {
    let mut normals = Vec::with_capacity(corners.len());
    for w in face_offsets.windows(2) {
        let polygon = &corners[w[0]..w[1]];
        let n = polygon_normal(points, polygon);
        normals.extend(std::iter::repeat(n).take(polygon.len()));
    }
    normals
}
