//! Core traits for facecrate

use crate::{geometry::Geometry, mesh::PolyMesh, point::*, transform::Transform3D};

/// Trait for objects with a spatial extent
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

fn bounds_of<'a, I: IntoIterator<Item = &'a Point3f>>(points: I) -> Option<(Point3f, Point3f)> {
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    Some(iter.fold((first, first), |(min, max), p| (min.inf(p), max.sup(p))))
}

impl Drawable for PolyMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(self.points()).unwrap_or((Point3f::origin(), Point3f::origin()))
    }
}

impl Drawable for Geometry {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds_of(self.meshes().iter().flat_map(|m| m.points()))
            .unwrap_or((Point3f::origin(), Point3f::origin()))
    }
}

impl Transformable for PolyMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for p in &mut self.points {
            *p = transform.transform_point(p);
        }
        for n in &mut self.normals.values {
            *n = transform.transform_normal(n);
        }
    }
}

impl Transformable for Geometry {
    fn transform(&mut self, transform: &Transform3D) {
        for mesh in self.meshes_mut() {
            mesh.transform(transform);
        }
    }
}
