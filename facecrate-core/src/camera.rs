//! Pinhole camera model
//!
//! Projection matrices are OpenGL-style and right-handed: the camera looks
//! down -Z, clip space is `[-1, 1]` on every axis. Matrix layout follows
//! nalgebra (column vectors, `m[(row, col)]`).

use crate::{Error, Point3f, Result};
use log::debug;
use nalgebra::{Matrix4, Point2};

/// Parameters of a pinhole projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Focal length divided by horizontal sensor aperture
    pub fl_to_haperture: f32,
    /// Image width in pixels
    pub width: f32,
    /// Image height in pixels
    pub height: f32,
    /// Pixel width over pixel height
    pub pixel_aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            fl_to_haperture: 50.0 / 36.0,
            width: 1920.0,
            height: 1080.0,
            pixel_aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ProjectionParams {
    /// Parameters for a camera of `focal_length` over a sensor `h_aperture`
    /// wide (same units), with square pixels and the default clip range.
    pub fn from_focal_length(focal_length: f32, h_aperture: f32, width: u32, height: u32) -> Self {
        Self {
            fl_to_haperture: focal_length / h_aperture,
            width: width as f32,
            height: height as f32,
            ..Self::default()
        }
    }

    pub fn with_clip_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("focal length ratio", self.fl_to_haperture),
            ("width", self.width),
            ("height", self.height),
            ("pixel aspect ratio", self.pixel_aspect_ratio),
            ("near plane", self.near),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidCamera(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(Error::InvalidCamera(format!(
                "far plane {} must be beyond near plane {}",
                self.far, self.near
            )));
        }
        Ok(())
    }

    /// Build the projection matrix
    pub fn matrix(&self) -> Result<Matrix4<f32>> {
        self.validate()?;

        let sx = 2.0 * self.fl_to_haperture;
        let sy = sx * self.pixel_aspect_ratio * self.width / self.height;
        let depth = self.far - self.near;

        let mut m = Matrix4::zeros();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = -(self.far + self.near) / depth;
        m[(2, 3)] = -2.0 * self.far * self.near / depth;
        m[(3, 2)] = -1.0;
        Ok(m)
    }
}

/// Projection matrix for the given focal ratio, image size, pixel aspect and clip range
pub fn proj_mat(
    fl_to_haperture: f32,
    width: f32,
    height: f32,
    pixel_aspect_ratio: f32,
    near: f32,
    far: f32,
) -> Result<Matrix4<f32>> {
    ProjectionParams {
        fl_to_haperture,
        width,
        height,
        pixel_aspect_ratio,
        near,
        far,
    }
    .matrix()
}

/// Per-frame camera description consumed by reconstruction and texture
/// baking drivers
pub trait CameraInput {
    fn projection(&self, frame: usize) -> Matrix4<f32>;

    fn view(&self, frame: usize) -> Matrix4<f32>;

    /// Image (width, height) in pixels
    fn image_size(&self, frame: usize) -> (u32, u32);

    /// Project a world-space point to pixel coordinates with the origin at
    /// the bottom-left corner. `None` when the point is behind the camera.
    fn project_to_image(&self, frame: usize, model: &Matrix4<f32>, point: &Point3f) -> Option<Point2<f32>> {
        let clip = self.projection(frame) * self.view(frame) * model * point.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        let (w, h) = self.image_size(frame);
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(Point2::new(
            (ndc_x + 1.0) * 0.5 * w as f32,
            (ndc_y + 1.0) * 0.5 * h as f32,
        ))
    }
}

/// A camera whose projection, view and image size are the same in every frame
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantCamera {
    projection: Matrix4<f32>,
    view: Matrix4<f32>,
    image_size: (u32, u32),
}

impl ConstantCamera {
    /// Camera at the origin looking down -Z (identity view)
    pub fn new(focal_length: f32, h_aperture: f32, width: u32, height: u32) -> Result<Self> {
        let params = ProjectionParams::from_focal_length(focal_length, h_aperture, width, height);
        Self::from_params(&params)
    }

    pub fn from_params(params: &ProjectionParams) -> Result<Self> {
        let projection = params.matrix()?;
        debug!(
            "Constant camera: focal ratio {:.4}, {}x{} px",
            params.fl_to_haperture, params.width, params.height
        );
        Ok(Self {
            projection,
            view: Matrix4::identity(),
            image_size: (params.width as u32, params.height as u32),
        })
    }

    pub fn with_view(mut self, view: Matrix4<f32>) -> Self {
        self.view = view;
        self
    }
}

impl CameraInput for ConstantCamera {
    fn projection(&self, _frame: usize) -> Matrix4<f32> {
        self.projection
    }

    fn view(&self, _frame: usize) -> Matrix4<f32> {
        self.view
    }

    fn image_size(&self, _frame: usize) -> (u32, u32) {
        self.image_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transform3D;
    use approx::assert_relative_eq;
    use nalgebra::{Vector3, Vector4};

    #[test]
    fn test_near_and_far_map_to_clip_bounds() {
        let m = proj_mat(50.0 / 36.0, 1920.0, 1080.0, 1.0, 0.1, 1000.0).unwrap();

        let near = m * Vector4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);

        let far = m * Vector4::new(0.0, 0.0, -1000.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_focal_scale_entries() {
        let m = proj_mat(2.0, 1800.0, 1200.0, 1.0, 0.1, 1000.0).unwrap();
        assert_relative_eq!(m[(0, 0)], 4.0);
        assert_relative_eq!(m[(1, 1)], 6.0);
        assert_relative_eq!(m[(3, 2)], -1.0);
        assert_relative_eq!(m[(3, 3)], 0.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(matches!(proj_mat(0.0, 100.0, 100.0, 1.0, 0.1, 10.0), Err(Error::InvalidCamera(_))));
        assert!(matches!(proj_mat(1.0, 100.0, -1.0, 1.0, 0.1, 10.0), Err(Error::InvalidCamera(_))));
        assert!(matches!(proj_mat(1.0, 100.0, 100.0, 1.0, 10.0, 10.0), Err(Error::InvalidCamera(_))));
    }

    #[test]
    fn test_optical_axis_hits_image_center() {
        let camera = ConstantCamera::new(50.0, 23.6, 1800, 1200).unwrap();
        assert_eq!(camera.image_size(7), (1800, 1200));

        let pixel = camera
            .project_to_image(0, &Matrix4::identity(), &Point3f::new(0.0, 0.0, -5.0))
            .unwrap();
        assert_relative_eq!(pixel.x, 900.0, epsilon = 1e-3);
        assert_relative_eq!(pixel.y, 600.0, epsilon = 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_not_projected() {
        let camera = ConstantCamera::new(50.0, 36.0, 640, 480).unwrap();
        assert!(camera
            .project_to_image(0, &Matrix4::identity(), &Point3f::new(0.0, 0.0, 5.0))
            .is_none());
    }

    #[test]
    fn test_horizontal_edge_of_view() {
        // with fl / haperture = 1 the image edge sits at x = z / 2
        let camera = ConstantCamera::from_params(&ProjectionParams {
            fl_to_haperture: 1.0,
            width: 200.0,
            height: 100.0,
            ..ProjectionParams::default()
        })
        .unwrap();
        let pixel = camera
            .project_to_image(0, &Matrix4::identity(), &Point3f::new(1.0, 0.0, -2.0))
            .unwrap();
        assert_relative_eq!(pixel.x, 200.0, epsilon = 1e-3);
    }

    #[test]
    fn test_view_matrix_is_applied() {
        let view = Transform3D::translation(Vector3::new(0.0, 0.0, -5.0));
        let camera = ConstantCamera::new(50.0, 36.0, 1280, 720).unwrap().with_view(view.into());
        let pixel = camera
            .project_to_image(0, &Matrix4::identity(), &Point3f::origin())
            .unwrap();
        assert_relative_eq!(pixel.x, 640.0, epsilon = 1e-3);
        assert_relative_eq!(pixel.y, 360.0, epsilon = 1e-3);
    }
}
