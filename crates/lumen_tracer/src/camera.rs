//! Pinhole camera for primary ray generation.

use lumen_math::{Mat4, Mat4Ext, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// A pinhole camera.
///
/// In camera space the eye sits at the origin looking down -z with +y up.
/// `transform` maps camera space to world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub transform: Mat4,
}

impl Camera {
    /// Create a camera at the origin looking down -z.
    pub fn new(width: u32, height: u32, fov_degrees: f32) -> Self {
        Self {
            width,
            height,
            fov_degrees,
            transform: Mat4::IDENTITY,
        }
    }

    /// Set the camera-to-world transform.
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Place the camera at `eye`, looking toward `target`.
    pub fn looking_at(mut self, eye: Vec3, target: Vec3, up: Vec3) -> Self {
        self.transform = Mat4::look_at_rh(eye, target, up).inverse();
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// World-space ray through the continuous image coordinate (x, y).
    ///
    /// (0, 0) is the top-left corner of the image and (width, height) the
    /// bottom-right. The returned direction is unit length.
    pub fn ray_for_pixel(&self, x: f32, y: f32) -> Ray {
        let half_height = (self.fov_degrees / 2.0).to_radians().tan();
        let pixel_x = (2.0 * (x / self.width as f32) - 1.0) * half_height * self.aspect_ratio();
        let pixel_y = (1.0 - 2.0 * (y / self.height as f32)) * half_height;

        let pixel = self.transform.transform_homogeneous(Vec3::new(pixel_x, pixel_y, -1.0));
        let origin = self.transform.transform_homogeneous(Vec3::ZERO);

        Ray::new(origin, (pixel - origin).normalize_or_zero())
    }
}
