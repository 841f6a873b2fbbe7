//! Rigid and affine transforms used for model and view matrices
//!
//! Matrices use nalgebra's convention: column vectors, `matrix[(row, col)]`,
//! column-major storage. A point `p` maps to `matrix * p`.

use crate::point::*;
use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Homogeneous 4x4 transform, used as model and view matrices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// No-op transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Pure offset by `translation`
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Pure rotation
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Rotation by `angle` radians about `axis`
    pub fn axis_angle(axis: Vector3<f32>, angle: f32) -> Self {
        Self::rotation(UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle))
    }

    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Rigid transform: rotate first, then translate
    pub fn from_translation_rotation(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        let isometry = Isometry3::from_parts(translation.into(), rotation);
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }

    /// Map a point, including translation
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the linear part of the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.linear() * vector
    }

    /// Transform a surface normal with the inverse transpose of the linear
    /// part and renormalize it. Zero normals stay zero.
    pub fn transform_normal(&self, normal: &Vector3f) -> Vector3f {
        let linear = self.linear();
        let normal_matrix = linear.try_inverse().map(|m| m.transpose()).unwrap_or(linear);
        (normal_matrix * normal)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3f::zeros)
    }

    fn linear(&self) -> Matrix3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// `self * other`; `other` is applied first
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// `None` for singular matrices
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(Self::from)
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

impl From<Transform3D> for Matrix4<f32> {
    fn from(transform: Transform3D) -> Self {
        transform.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_translation_then_rotation() {
        let rotate = Transform3D::axis_angle(Vector3::z(), FRAC_PI_2);
        let translate = Transform3D::translation(Vector3::new(0.0, 0.0, -5.0));
        let view = translate * rotate;

        let p = view.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, -5.0), epsilon = 1e-6);
    }

    #[test]
    fn test_vectors_ignore_translation() {
        let t = Transform3D::translation(Vector3::new(3.0, 2.0, 1.0));
        assert_eq!(t.transform_vector(&Vector3::x()), Vector3::x());
    }

    #[test]
    fn test_normal_stays_unit_under_scaling() {
        let t = Transform3D::uniform_scaling(4.0);
        assert_relative_eq!(t.transform_normal(&Vector3::y()), Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = Transform3D::from_translation_rotation(
            Vector3::new(1.0, -2.0, 0.5),
            UnitQuaternion::from_euler_angles(0.3, 0.2, 0.1),
        );
        let inv = t.inverse().unwrap();
        assert_relative_eq!((t * inv).matrix, Matrix4::identity(), epsilon = 1e-5);
    }
}
