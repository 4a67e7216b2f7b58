//! Per-edge Lambertian lighting

use nalgebra::{Point3, Vector3};

use crate::vector::normalize;

/// A point light. `direction` and `color` are carried for callers; the edge
/// lighting model only reads `position` and `intensity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub intensity: f32,
    pub color: Vector3<f32>,
}

impl Light {
    /// White light at `position` pointing back towards the origin
    pub fn point(position: Point3<f32>, intensity: f32) -> Self {
        Self {
            position,
            direction: normalize(&-position.coords),
            intensity,
            color: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LightSystem {
    lights: Vec<Light>,
}

impl LightSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lights: Vec::with_capacity(capacity),
        }
    }

    pub fn add_light(
        &mut self,
        position: Point3<f32>,
        direction: Vector3<f32>,
        intensity: f32,
        color: Vector3<f32>,
    ) {
        self.push(Light {
            position,
            direction,
            intensity,
            color,
        });
    }

    pub fn push(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Intensity in `[0, 1]` for the world-space edge `v1 -> v2`.
    ///
    /// Sums each light's Lambert term between the edge direction and the
    /// direction from the edge midpoint to the light, weighted by the light's
    /// intensity, then clamps at 1.
    pub fn edge_intensity(&self, v1: &Point3<f32>, v2: &Point3<f32>) -> f32 {
        let edge_dir = v2 - v1;
        let midpoint = Point3::from((v1.coords + v2.coords) * 0.5);

        let total: f32 = self
            .lights
            .iter()
            .map(|light| lambert(&edge_dir, &(light.position - midpoint)) * light.intensity)
            .sum();
        total.clamp(0.0, 1.0)
    }
}

/// `max(0, cos)` of the angle between two directions
pub fn lambert(edge_dir: &Vector3<f32>, light_dir: &Vector3<f32>) -> f32 {
    normalize(edge_dir).dot(&normalize(light_dir)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambert() {
        let x = Vector3::new(2.0, 0.0, 0.0);
        assert_relative_eq!(lambert(&x, &Vector3::new(1.0, 0.0, 0.0)), 1.0);
        assert_relative_eq!(lambert(&x, &Vector3::new(0.0, 3.0, 0.0)), 0.0);
        assert_eq!(lambert(&x, &Vector3::new(-1.0, 0.0, 0.0)), 0.0);
        assert_relative_eq!(
            lambert(&x, &Vector3::new(1.0, 1.0, 0.0)),
            std::f32::consts::FRAC_1_SQRT_2,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_empty_system_is_dark() {
        let lights = LightSystem::new();
        let i = lights.edge_intensity(&Point3::origin(), &Point3::new(1.0, 0.0, 0.0));
        assert_eq!(i, 0.0);
    }

    #[test]
    fn test_edge_facing_light() {
        let mut lights = LightSystem::with_capacity(1);
        lights.push(Light::point(Point3::new(10.0, 0.0, 0.0), 0.5));
        let i = lights.edge_intensity(&Point3::new(-1.0, 0.0, 0.0), &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(i, 0.5, epsilon = 1e-6);

        // Reversed edge points away from the light
        let r = lights.edge_intensity(&Point3::new(1.0, 0.0, 0.0), &Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_intensity_is_clamped() {
        let mut lights = LightSystem::new();
        for _ in 0..3 {
            lights.add_light(
                Point3::new(0.0, 10.0, 0.0),
                Vector3::new(0.0, -1.0, 0.0),
                0.9,
                Vector3::new(1.0, 1.0, 1.0),
            );
        }
        assert_eq!(lights.len(), 3);
        let i = lights.edge_intensity(&Point3::origin(), &Point3::new(0.0, 1.0, 0.0));
        assert_eq!(i, 1.0);
    }
}
