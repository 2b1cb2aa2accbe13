//! Camera for ray generation.

use glint_core::{CameraDesc, SceneResult};
use glint_math::{DVec3, Ray};

/// Pinhole camera that maps pixels to world-space rays.
///
/// The orthonormal basis and the image-plane extents are computed once in
/// [`Camera::new`]; ray generation is then a handful of multiply-adds.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    // Half extents of the image plane at unit distance
    half_width: f64,
    half_height: f64,
    aspect: f64,
}

impl Camera {
    /// Build a camera from its description.
    ///
    /// Fails if the field of view, aspect ratio or up vector cannot produce a
    /// view. This is the only place camera parameters are checked; ray
    /// generation itself never fails.
    pub fn new(desc: &CameraDesc) -> SceneResult<Self> {
        desc.validate()?;

        let forward = (desc.target - desc.eye).normalize();
        let right = forward.cross(desc.up).normalize();
        let up = right.cross(forward);

        let half_height = (desc.vfov.to_radians() / 2.0).tan();
        let half_width = half_height * desc.aspect;

        Ok(Self {
            eye: desc.eye,
            forward,
            right,
            up,
            half_width,
            half_height,
            aspect: desc.aspect,
        })
    }

    /// Generate the ray through the center of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner of the image. The direction is not
    /// normalized.
    pub fn generate_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let ndc_x = 2.0 * (x as f64 + 0.5) / width as f64 - 1.0;
        let ndc_y = 1.0 - 2.0 * (y as f64 + 0.5) / height as f64;

        let direction = self.forward
            + (ndc_x * self.half_width) * self.right
            + (ndc_y * self.half_height) * self.up;

        Ray::new(self.eye, direction)
    }

    /// Camera position.
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// Width / height ratio the camera was built for.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }
}
