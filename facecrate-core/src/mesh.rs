//! Polygonal mesh with per-point or per-face-corner attributes

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an attribute's values map onto the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeLayout {
    /// One value per point, shared by every face using that point
    PointBased,
    /// One value per face corner, so a point may carry seams
    VertexBased,
}

impl fmt::Display for AttributeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeLayout::PointBased => write!(f, "POINT_BASED"),
            AttributeLayout::VertexBased => write!(f, "VERTEX_BASED"),
        }
    }
}

/// Which per-corner attribute of a mesh is being referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshAttributeKind {
    Uv,
    Normal,
}

impl fmt::Display for MeshAttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshAttributeKind::Uv => write!(f, "uv"),
            MeshAttributeKind::Normal => write!(f, "normal"),
        }
    }
}

/// Attribute values together with their layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAttribute<T> {
    pub(crate) layout: AttributeLayout,
    pub(crate) values: Vec<T>,
}

impl<T> MeshAttribute<T> {
    pub fn new(layout: AttributeLayout, values: Vec<T>) -> Self {
        Self { layout, values }
    }

    pub fn point_based(values: Vec<T>) -> Self {
        Self::new(AttributeLayout::PointBased, values)
    }

    pub fn vertex_based(values: Vec<T>) -> Self {
        Self::new(AttributeLayout::VertexBased, values)
    }

    pub fn layout(&self) -> AttributeLayout {
        self.layout
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A polygonal surface: points, faces of three or more corners, and UV and
/// normal attributes.
///
/// Meshes are created through [`MeshBuilder`](crate::MeshBuilder), which
/// checks face sizes, point indices and attribute counts, so every accessor
/// here can index without further validation. Accessors panic on
/// out-of-range face, corner or point indices, like slice indexing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolyMesh {
    pub(crate) points: Vec<Point3f>,
    /// Point index of every face corner, faces laid out back to back
    pub(crate) corners: Vec<usize>,
    /// `faces_count + 1` offsets into `corners`, starting at 0
    pub(crate) face_offsets: Vec<usize>,
    pub(crate) uvs: MeshAttribute<Uv>,
    pub(crate) normals: MeshAttribute<Vector3f>,
}

impl PolyMesh {
    /// Get the number of points
    pub fn points_count(&self) -> usize {
        self.points.len()
    }

    /// Get a point by index
    pub fn point(&self, index: usize) -> Point3f {
        self.points[index]
    }

    pub fn points(&self) -> &[Point3f] {
        &self.points
    }

    /// Get the number of faces
    pub fn faces_count(&self) -> usize {
        self.face_offsets.len() - 1
    }

    /// Number of corners of a face
    pub fn face_size(&self, face: usize) -> usize {
        self.face_offsets[face + 1] - self.face_offsets[face]
    }

    /// Point indices of a face in winding order
    pub fn face(&self, face: usize) -> &[usize] {
        &self.corners[self.face_offsets[face]..self.face_offsets[face + 1]]
    }

    /// Point index referenced by a face corner
    pub fn face_point(&self, face: usize, corner: usize) -> usize {
        self.face(face)[corner]
    }

    /// Iterate over faces as slices of point indices
    pub fn faces(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.face_offsets
            .windows(2)
            .map(move |w| &self.corners[w[0]..w[1]])
    }

    /// Total number of face corners (the sum of all face sizes)
    pub fn corners_count(&self) -> usize {
        self.corners.len()
    }

    /// Position of a face corner in global face-iteration order
    pub fn corner_index(&self, face: usize, corner: usize) -> usize {
        assert!(corner < self.face_size(face), "corner {corner} out of range for face {face}");
        self.face_offsets[face] + corner
    }

    pub fn uvs_attribute(&self) -> AttributeLayout {
        self.uvs.layout()
    }

    pub fn normals_attribute(&self) -> AttributeLayout {
        self.normals.layout()
    }

    pub fn layout_of(&self, kind: MeshAttributeKind) -> AttributeLayout {
        match kind {
            MeshAttributeKind::Uv => self.uvs_attribute(),
            MeshAttributeKind::Normal => self.normals_attribute(),
        }
    }

    /// UV of a face corner, resolved through the attribute layout
    pub fn uv(&self, face: usize, corner: usize) -> Uv {
        self.uvs.values[self.attribute_slot(self.uvs.layout, face, corner)]
    }

    /// Normal of a face corner, resolved through the attribute layout
    pub fn normal(&self, face: usize, corner: usize) -> Vector3f {
        self.normals.values[self.attribute_slot(self.normals.layout, face, corner)]
    }

    fn attribute_slot(&self, layout: AttributeLayout, face: usize, corner: usize) -> usize {
        match layout {
            AttributeLayout::PointBased => self.face_point(face, corner),
            AttributeLayout::VertexBased => self.corner_index(face, corner),
        }
    }

    /// Copy of this mesh with both attributes expanded to one value per
    /// face corner. Already vertex-based attributes are copied unchanged.
    pub fn to_vertex_based(&self) -> PolyMesh {
        let corner_refs: Vec<(usize, usize)> = (0..self.faces_count())
            .flat_map(|f| (0..self.face_size(f)).map(move |c| (f, c)))
            .collect();

        let uvs = corner_refs.iter().map(|&(f, c)| self.uv(f, c)).collect();
        let normals = corner_refs.iter().map(|&(f, c)| self.normal(f, c)).collect();

        PolyMesh {
            points: self.points.clone(),
            corners: self.corners.clone(),
            face_offsets: self.face_offsets.clone(),
            uvs: MeshAttribute::vertex_based(uvs),
            normals: MeshAttribute::vertex_based(normals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeshBuilder;

    fn point_based_quad() -> PolyMesh {
        let mut builder = MeshBuilder::new();
        builder.add_point(Point3f::new(0.5, -0.5, 0.0));
        builder.add_point(Point3f::new(0.5, 0.5, 0.0));
        builder.add_point(Point3f::new(-0.5, 0.5, 0.0));
        builder.add_point(Point3f::new(-0.5, -0.5, 0.0));
        builder.add_face(&[0, 1, 2, 3]);
        builder.set_uvs_attribute(
            AttributeLayout::PointBased,
            vec![uv(1.0, 0.0), uv(1.0, 1.0), uv(0.0, 1.0), uv(0.0, 0.0)],
        );
        builder.build().unwrap()
    }

    #[test]
    fn test_face_accessors() {
        let mut builder = MeshBuilder::new();
        for i in 0..5 {
            builder.add_point(Point3f::new(i as f32, (i * i) as f32, 0.0));
        }
        builder.add_face(&[0, 1, 2]);
        builder.add_face(&[0, 2, 3, 4]);
        builder.set_uvs_attribute(AttributeLayout::VertexBased, vec![Uv::zeros(); 7]);
        let mesh = builder.build().unwrap();

        assert_eq!(mesh.faces_count(), 2);
        assert_eq!(mesh.face_size(0), 3);
        assert_eq!(mesh.face_size(1), 4);
        assert_eq!(mesh.face_point(1, 3), 4);
        assert_eq!(mesh.corners_count(), 7);
        assert_eq!(mesh.corner_index(1, 0), 3);
        assert_eq!(mesh.faces().map(|f| f.len()).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_point_based_lookup_follows_face_points() {
        let mesh = point_based_quad();
        assert_eq!(mesh.uvs_attribute(), AttributeLayout::PointBased);
        assert_eq!(mesh.uv(0, 2), uv(0.0, 1.0));
    }

    #[test]
    fn test_to_vertex_based_expands_per_corner() {
        let mut builder = MeshBuilder::new();
        builder.add_point(Point3f::new(0.0, 0.0, 0.0));
        builder.add_point(Point3f::new(1.0, 0.0, 0.0));
        builder.add_point(Point3f::new(1.0, 1.0, 0.0));
        builder.add_point(Point3f::new(0.0, 1.0, 0.0));
        builder.add_face(&[0, 1, 2]);
        builder.add_face(&[0, 2, 3]);
        builder.set_uvs_attribute(
            AttributeLayout::PointBased,
            vec![uv(0.0, 0.0), uv(1.0, 0.0), uv(1.0, 1.0), uv(0.0, 1.0)],
        );
        let mesh = builder.build().unwrap().to_vertex_based();

        assert_eq!(mesh.uvs_attribute(), AttributeLayout::VertexBased);
        assert_eq!(mesh.normals_attribute(), AttributeLayout::VertexBased);
        assert_eq!(mesh.uvs.len(), 6);
        // point 0 appears in both faces
        assert_eq!(mesh.uv(0, 0), mesh.uv(1, 0));
        assert_eq!(mesh.uv(1, 2), uv(0.0, 1.0));
    }

    #[test]
    fn test_to_vertex_based_keeps_values() {
        let original = point_based_quad();
        let converted = original.to_vertex_based();
        for c in 0..4 {
            assert_eq!(original.uv(0, c), converted.uv(0, c));
            assert_eq!(original.normal(0, c), converted.normal(0, c));
        }
    }

    #[test]
    fn test_layout_display() {
        assert_eq!(AttributeLayout::VertexBased.to_string(), "VERTEX_BASED");
        assert_eq!(AttributeLayout::PointBased.to_string(), "POINT_BASED");
        assert_eq!(MeshAttributeKind::Normal.to_string(), "normal");
    }
}
