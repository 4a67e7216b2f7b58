//! Camera description and the view/projection matrices derived from it

use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform;
use crate::vector::normalize;

/// Camera configuration for 3D rendering
///
/// `fov` is the vertical field of view in radians. The camera is never mutated
/// by rendering code; it is only read to derive matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn looking_at(
        mut self,
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
    ) -> Self {
        self.position = position;
        self.target = target;
        self.up = up;
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// True when `target == position` or `up` is parallel to the viewing
    /// direction. The view basis collapses for such cameras.
    pub fn is_degenerate(&self) -> bool {
        let forward = self.target - self.position;
        forward.cross(&self.up).norm_squared() <= f32::EPSILON * forward.norm_squared()
    }

    /// Look-at view matrix.
    ///
    /// Requires a camera for which [`Camera::is_degenerate`] is false.
    #[rustfmt::skip]
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let forward = normalize(&(self.target - self.position));
        let right = normalize(&forward.cross(&self.up));
        let up = right.cross(&forward);
        let eye = self.position.coords;

        Matrix4::new(
            right.x, right.y, right.z, -right.dot(&eye),
            up.x, up.y, up.z, -up.dot(&eye),
            -forward.x, -forward.y, -forward.z, forward.dot(&eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Symmetric perspective projection built from the asymmetric frustum
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let top = self.near * (self.fov * 0.5).tan();
        let right = top * self.aspect;
        Transform::frustum(-right, right, -top, top, self.near, self.far)
    }

    /// `projection * view`, ready to be combined with a model matrix
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
