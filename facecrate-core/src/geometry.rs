//! Geometry container holding one or more sub-meshes

use crate::mesh::PolyMesh;
use serde::Serialize;

/// A composite geometry made of independent polygonal surfaces
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Geometry {
    meshes: Vec<PolyMesh>,
}

impl Geometry {
    /// Create an empty geometry
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    pub fn from_meshes(meshes: Vec<PolyMesh>) -> Self {
        Self { meshes }
    }

    /// Add a sub-mesh and return its index
    pub fn add_mesh(&mut self, mesh: PolyMesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn meshes_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, index: usize) -> Option<&PolyMesh> {
        self.meshes.get(index)
    }

    pub fn mesh_mut(&mut self, index: usize) -> Option<&mut PolyMesh> {
        self.meshes.get_mut(index)
    }

    pub fn meshes(&self) -> &[PolyMesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [PolyMesh] {
        &mut self.meshes
    }

    /// Total number of points over all sub-meshes
    pub fn points_count(&self) -> usize {
        self.meshes.iter().map(PolyMesh::points_count).sum()
    }

    /// Total number of faces over all sub-meshes
    pub fn faces_count(&self) -> usize {
        self.meshes.iter().map(PolyMesh::faces_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl From<PolyMesh> for Geometry {
    fn from(mesh: PolyMesh) -> Self {
        Self { meshes: vec![mesh] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeLayout, MeshBuilder, Point3f, Uv};

    fn triangle(offset: f32) -> PolyMesh {
        let mut builder = MeshBuilder::new();
        builder.add_point(Point3f::new(offset, 0.0, 0.0));
        builder.add_point(Point3f::new(offset + 1.0, 0.0, 0.0));
        builder.add_point(Point3f::new(offset, 1.0, 0.0));
        builder.add_face(&[0, 1, 2]);
        builder.set_uvs_attribute(AttributeLayout::VertexBased, vec![Uv::zeros(); 3]);
        builder.build().unwrap()
    }

    #[test]
    fn test_counts_sum_over_meshes() {
        let mut geo = Geometry::new();
        assert!(geo.is_empty());
        assert_eq!(geo.add_mesh(triangle(0.0)), 0);
        assert_eq!(geo.add_mesh(triangle(2.0)), 1);

        assert_eq!(geo.meshes_count(), 2);
        assert_eq!(geo.points_count(), 6);
        assert_eq!(geo.faces_count(), 2);
        assert!(geo.mesh(2).is_none());
    }

    #[test]
    fn test_from_single_mesh() {
        let geo = Geometry::from(triangle(0.0));
        assert_eq!(geo.meshes_count(), 1);
        assert_eq!(geo.mesh(0).map(PolyMesh::points_count), Some(3));
    }
}
