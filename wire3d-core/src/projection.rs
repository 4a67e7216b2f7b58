//! Vertex projection: model -> view -> clip -> NDC -> screen

use nalgebra::{Matrix4, Point3, Vector4};

use crate::transform::Transform;

/// A projected vertex in pixel space
///
/// `depth` is the NDC z after the perspective divide (or the raw clip z when
/// `w` was zero), kept only for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32, depth: f32) -> Self {
        Self { x, y, depth }
    }
}

/// Project a vertex through a combined model-view-projection matrix
pub fn project_vertex(
    vertex: &Point3<f32>,
    mvp: &Matrix4<f32>,
    width: usize,
    height: usize,
) -> ScreenPoint {
    clip_to_screen(Transform::transform_homogeneous(mvp, vertex), width, height)
}

/// Project a vertex through model, view and projection applied in sequence
///
/// Agrees with [`project_vertex`] on `projection * view * model` up to
/// floating-point rounding.
pub fn project_vertex_staged(
    vertex: &Point3<f32>,
    model: &Matrix4<f32>,
    view: &Matrix4<f32>,
    projection: &Matrix4<f32>,
    width: usize,
    height: usize,
) -> ScreenPoint {
    let world = model * vertex.to_homogeneous();
    let eye = view * world;
    clip_to_screen(projection * eye, width, height)
}

/// Perspective divide (skipped when `w == 0`) followed by the viewport mapping
pub fn clip_to_screen(clip: Vector4<f32>, width: usize, height: usize) -> ScreenPoint {
    let (x, y, z) = if clip.w != 0.0 {
        (clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
    } else {
        (clip.x, clip.y, clip.z)
    };
    let (sx, sy) = ndc_to_screen(x, y, width, height);
    ScreenPoint::new(sx, sy, z)
}

/// Map NDC x/y in `[-1, 1]` to pixels; NDC up is screen down
pub fn ndc_to_screen(x: f32, y: f32, width: usize, height: usize) -> (f32, f32) {
    let sx = (x * 0.5 + 0.5) * width as f32;
    let sy = (1.0 - (y * 0.5 + 0.5)) * height as f32;
    (sx, sy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ndc_corners() {
        assert_eq!(ndc_to_screen(-1.0, 1.0, 800, 600), (0.0, 0.0));
        assert_eq!(ndc_to_screen(1.0, -1.0, 800, 600), (800.0, 600.0));
        assert_eq!(ndc_to_screen(0.0, 0.0, 800, 600), (400.0, 300.0));
    }

    #[test]
    fn test_identity_keeps_depth_untouched() {
        let p = project_vertex(&Point3::new(0.5, 0.5, 0.25), &Matrix4::identity(), 100, 100);
        assert_relative_eq!(p.x, 75.0);
        assert_relative_eq!(p.y, 25.0);
        assert_eq!(p.depth, 0.25);
    }

    #[test]
    fn test_zero_w_skips_divide() {
        let mut m = Matrix4::identity();
        m[(3, 3)] = 0.0;
        let p = project_vertex(&Point3::new(0.0, 0.0, 3.0), &m, 10, 10);
        assert_eq!(p, ScreenPoint::new(5.0, 5.0, 3.0));
    }

    #[test]
    fn test_perspective_divide() {
        let projection = Transform::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 100.0);
        let view = Transform::translation_matrix(0.0, 0.0, -5.0);
        let mvp = Transform::mvp_matrix(&Matrix4::identity(), &view, &projection);

        // Eye-space (1, 1, -7): NDC x = y = 1/7
        let p = project_vertex(&Point3::new(1.0, 1.0, -2.0), &mvp, 700, 700);
        assert_relative_eq!(p.x, (1.0 / 7.0 * 0.5 + 0.5) * 700.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, (1.0 - (1.0 / 7.0 * 0.5 + 0.5)) * 700.0, epsilon = 1e-3);
        assert!(p.depth > -1.0 && p.depth < 1.0);
    }

    #[test]
    fn test_staged_matches_combined() {
        let model =
            Transform::rotation_xyz(0.3, -1.1, 0.7) * Transform::scale_matrix(1.5, 1.5, 1.5);
        let view = Transform::translation_matrix(0.2, -0.1, -4.0);
        let projection = Transform::frustum(-0.8, 1.2, -0.6, 0.6, 0.5, 20.0);
        let mvp = Transform::mvp_matrix(&model, &view, &projection);

        for v in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, -0.5, 0.25),
            Point3::new(-0.3, 0.9, -0.8),
        ] {
            let a = project_vertex(&v, &mvp, 640, 480);
            let b = project_vertex_staged(&v, &model, &view, &projection, 640, 480);
            assert_relative_eq!(a.x, b.x, epsilon = 1e-3);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-3);
            assert_relative_eq!(a.depth, b.depth, epsilon = 1e-5);
        }
    }
}
