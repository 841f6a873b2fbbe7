//! Point and vector types shared by meshes and cameras

use nalgebra::{Point3, Vector2, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Texture coordinate (u, v)
pub type Uv = Vector2<f32>;

/// Shorthand for building a texture coordinate
pub fn uv(u: f32, v: f32) -> Uv {
    Uv::new(u, v)
}
