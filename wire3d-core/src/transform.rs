//! 4x4 transformation matrices and rotation state
//!
//! Matrices are nalgebra's column-major `Matrix4<f32>`: `m.as_slice()[col * 4 + row]`
//! holds row `row`, column `col`, and `m[(row, col)]` is the named accessor.
//! Composition reads right to left, the rightmost matrix applies first.

use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::rotation_xyz(self.x, self.y, self.z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Translation, rotation and scale of a model, composed as `T * R * S`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub translation: Vector3<f32>,
    pub rotation: RotationState,
    pub scale: Vector3<f32>,
}

impl ModelTransform {
    pub fn new() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, rotation: RotationState) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vector3::new(s, s, s);
        self
    }

    /// Scale first, then rotate, then translate
    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.translation.x, self.translation.y, self.translation.z)
            * self.rotation.matrix()
            * Transform::scale_matrix(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f32> {
        Matrix4::identity()
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    pub fn rotation_x(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(angle, 0.0, 0.0))
    }

    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
    }

    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle))
    }

    /// Combined rotation `Rz * Ry * Rx`: a point turns about X first, then Y, then Z
    pub fn rotation_xyz(rx: f32, ry: f32, rz: f32) -> Matrix4<f32> {
        Self::rotation_z(rz) * Self::rotation_y(ry) * Self::rotation_x(rx)
    }

    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        Self::rotation_xyz(rotation.x, rotation.y, rotation.z)
    }

    /// Asymmetric perspective frustum (OpenGL convention, `w' = -z`)
    #[rustfmt::skip]
    pub fn frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        Matrix4::new(
            2.0 * near / width, 0.0, (right + left) / width, 0.0,
            0.0, 2.0 * near / height, (top + bottom) / height, 0.0,
            0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }

    /// Apply `m` to the homogeneous point `(x, y, z, 1)` without dividing
    pub fn transform_homogeneous(m: &Matrix4<f32>, point: &Point3<f32>) -> Vector4<f32> {
        m * point.to_homogeneous()
    }

    /// Apply `m` to a point and divide by `w` unless `w` is exactly zero
    pub fn transform_point(m: &Matrix4<f32>, point: &Point3<f32>) -> Point3<f32> {
        let h = Self::transform_homogeneous(m, point);
        if h.w != 0.0 {
            Point3::new(h.x / h.w, h.y / h.w, h.z / h.w)
        } else {
            Point3::new(h.x, h.y, h.z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn sample_matrix() -> Matrix4<f32> {
        Matrix4::from_fn(|r, c| (r * 4 + c) as f32 * 0.5 - 3.0)
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
        assert_eq!(Transform::rotation_xyz(0.0, 0.0, 0.0), Transform::identity());
    }

    #[test]
    fn test_column_major_layout() {
        let t = Transform::translation_matrix(1.0, 2.0, 3.0);
        let m = t.as_slice();
        assert_eq!(m[12], 1.0);
        assert_eq!(m[13], 2.0);
        assert_eq!(m[14], 3.0);
        assert_eq!(t[(0, 3)], 1.0);

        let s = Transform::scale_matrix(2.0, 3.0, 4.0);
        assert_eq!(s.as_slice()[0], 2.0);
        assert_eq!(s.as_slice()[5], 3.0);
        assert_eq!(s.as_slice()[10], 4.0);
        assert_eq!(s.as_slice()[15], 1.0);
    }

    #[test]
    fn test_multiply_by_identity() {
        let a = sample_matrix();
        assert_eq!(a * Transform::identity(), a);
        assert_eq!(Transform::identity() * a, a);
    }

    #[test]
    fn test_multiply_is_not_commutative() {
        let t = Transform::translation_matrix(1.0, 0.0, 0.0);
        let r = Transform::rotation_z(FRAC_PI_2);
        let p = Point3::new(1.0, 0.0, 0.0);

        // Rotate then translate: (0,1,0) + (1,0,0)
        let rt = Transform::transform_point(&(t * r), &p);
        assert_relative_eq!(rt, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-6);

        // Translate then rotate: (2,0,0) turned to (0,2,0)
        let tr = Transform::transform_point(&(r * t), &p);
        assert_relative_eq!(tr, Point3::new(0.0, 2.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_single_axis_rotations() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let z = Transform::transform_point(&Transform::rotation_z(FRAC_PI_2), &p);
        assert_relative_eq!(z, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);

        let q = Point3::new(0.0, 1.0, 0.0);
        let x = Transform::transform_point(&Transform::rotation_x(FRAC_PI_2), &q);
        assert_relative_eq!(x, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-6);

        let r = Point3::new(0.0, 0.0, 1.0);
        let y = Transform::transform_point(&Transform::rotation_y(FRAC_PI_2), &r);
        assert_relative_eq!(y, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_xyz_applies_x_first() {
        // X then Z: (0,1,0) -> (0,0,1) -> (0,0,1)
        // Z then X would give (-1,0,0)
        let m = Transform::rotation_xyz(FRAC_PI_2, 0.0, FRAC_PI_2);
        let p = Transform::transform_point(&m, &Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-6);

        let expected = Transform::rotation_z(FRAC_PI_2) * Transform::rotation_x(FRAC_PI_2);
        assert_relative_eq!(m, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_transform_identity_is_exact() {
        let p = Point3::new(0.3, -7.25, 1e4);
        assert_eq!(Transform::transform_point(&Transform::identity(), &p), p);
    }

    #[test]
    fn test_transform_point_skips_zero_w() {
        let mut m = Transform::identity();
        m[(3, 3)] = 0.0;
        let p = Transform::transform_point(&m, &Point3::new(2.0, 3.0, 4.0));
        assert_eq!(p, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_frustum_entries() {
        let f = Transform::frustum(-1.0, 3.0, -2.0, 2.0, 1.0, 10.0);
        let m = f.as_slice();
        assert_relative_eq!(m[0], 0.5);
        assert_relative_eq!(m[5], 0.5);
        assert_relative_eq!(m[8], 0.5);
        assert_relative_eq!(m[9], 0.0);
        assert_relative_eq!(m[10], -11.0 / 9.0);
        assert_relative_eq!(m[11], -1.0);
        assert_relative_eq!(m[14], -20.0 / 9.0);
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn test_frustum_maps_near_and_far_planes() {
        let f = Transform::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let near = Transform::transform_point(&f, &Point3::new(0.0, 0.0, -1.0));
        let far = Transform::transform_point(&f, &Point3::new(0.0, 0.0, -10.0));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_model_transform_order() {
        let model = ModelTransform::new()
            .with_translation(0.0, 0.0, -3.0)
            .with_rotation(RotationState::new(0.0, 0.0, FRAC_PI_2))
            .with_uniform_scale(2.0);
        let p = Transform::transform_point(&model.matrix(), &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 2.0, -3.0), epsilon = 1e-6);
        assert_eq!(ModelTransform::default().matrix(), Transform::identity());
    }
}
