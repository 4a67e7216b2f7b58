//! Vector helpers: spherical coordinates, normalization and interpolation
//!
//! Cartesian `Vector3<f32>` is the authoritative representation everywhere in
//! the crate. Spherical coordinates are a separate value obtained through an
//! explicit conversion, so a vector can never carry a stale spherical view.

use nalgebra::Vector3;

/// Dot product above which slerp falls back to normalized lerp
const SLERP_LERP_THRESHOLD: f32 = 0.9995;

/// Spherical coordinates of a point (angles in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the origin
    pub radius: f32,
    /// Angle in the XY plane measured from +X (theta)
    pub azimuth: f32,
    /// Angle measured from +Z (phi)
    pub polar: f32,
}

impl Spherical {
    pub fn new(radius: f32, azimuth: f32, polar: f32) -> Self {
        Self {
            radius,
            azimuth,
            polar,
        }
    }

    /// Derive spherical coordinates from a Cartesian vector.
    ///
    /// The zero vector maps to all-zero coordinates.
    pub fn from_cartesian(v: &Vector3<f32>) -> Self {
        let radius = v.norm();
        if radius > 0.0 {
            Self {
                radius,
                azimuth: v.y.atan2(v.x),
                polar: (v.z / radius).clamp(-1.0, 1.0).acos(),
            }
        } else {
            Self::new(0.0, 0.0, 0.0)
        }
    }

    pub fn to_cartesian(&self) -> Vector3<f32> {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vector3::new(
            self.radius * sin_polar * cos_azimuth,
            self.radius * sin_polar * sin_azimuth,
            self.radius * cos_polar,
        )
    }
}

impl From<Vector3<f32>> for Spherical {
    fn from(v: Vector3<f32>) -> Self {
        Self::from_cartesian(&v)
    }
}

/// Build a Cartesian vector from radius, azimuth (theta) and polar angle (phi)
pub fn from_spherical(radius: f32, azimuth: f32, polar: f32) -> Vector3<f32> {
    Spherical::new(radius, azimuth, polar).to_cartesian()
}

/// Exact normalization. The zero vector is returned unchanged.
pub fn normalize(v: &Vector3<f32>) -> Vector3<f32> {
    let length = v.norm();
    if length > 0.0 {
        v / length
    } else {
        *v
    }
}

/// Approximate `1 / sqrt(x)` for positive `x`.
///
/// Seeds from the IEEE-754 bit pattern and refines with one Newton-Raphson
/// step. Relative error stays below 0.2% for normal positive inputs.
pub fn fast_inv_sqrt(x: f32) -> f32 {
    let half = 0.5 * x;
    let seed = f32::from_bits(0x5f37_59df - (x.to_bits() >> 1));
    seed * (1.5 - half * seed * seed)
}

/// Approximate normalization using [`fast_inv_sqrt`].
///
/// Resulting length is within 1e-3 of 1.0. The zero vector is returned unchanged.
pub fn normalize_fast(v: &Vector3<f32>) -> Vector3<f32> {
    let length_sq = v.norm_squared();
    if length_sq > 0.0 {
        v * fast_inv_sqrt(length_sq)
    } else {
        *v
    }
}

/// Spherical linear interpolation between the directions of `a` and `b`.
///
/// Both inputs are normalized first, so the result is a unit vector (or zero
/// when an input is zero). `t = 0` yields `a`, `t = 1` yields `b`.
pub fn slerp(a: &Vector3<f32>, b: &Vector3<f32>, t: f32) -> Vector3<f32> {
    let a = normalize(a);
    let b = normalize(b);

    let dot = a.dot(&b).clamp(-1.0, 1.0);
    let angle = dot.acos();
    let sin_angle = angle.sin();

    // Nearly parallel, or anti-parallel with no unique arc
    if dot > SLERP_LERP_THRESHOLD || sin_angle.abs() < 1e-6 {
        return normalize(&a.lerp(&b, t));
    }

    let weight_a = ((1.0 - t) * angle).sin() / sin_angle;
    let weight_b = (t * angle).sin() / sin_angle;
    a * weight_a + b * weight_b
}

/// Evaluate a cubic Bézier curve at `t` in `[0, 1]`
pub fn bezier(
    p0: &Vector3<f32>,
    p1: &Vector3<f32>,
    p2: &Vector3<f32>,
    p3: &Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

    #[test]
    fn test_from_spherical_axes() {
        let up = from_spherical(2.0, 0.0, 0.0);
        assert_relative_eq!(up, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-6);

        let y = from_spherical(1.0, FRAC_PI_2, FRAC_PI_2);
        assert_relative_eq!(y, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_spherical_conversion_is_consistent() {
        let v = from_spherical(10.0, FRAC_PI_4, FRAC_PI_3);
        let s = Spherical::from_cartesian(&v);
        assert_relative_eq!(s.radius, 10.0, epsilon = 1e-5);
        assert_relative_eq!(s.azimuth, FRAC_PI_4, epsilon = 1e-5);
        assert_relative_eq!(s.polar, FRAC_PI_3, epsilon = 1e-5);
    }

    #[test]
    fn test_spherical_of_zero_vector() {
        let s = Spherical::from(Vector3::zeros());
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_normalize_exact() {
        let n = normalize(&Vector3::new(3.0, 4.0, 5.0));
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
        assert_eq!(normalize(&Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn test_normalize_fast_error_bound() {
        for v in [
            Vector3::new(3.0, 4.0, 5.0),
            Vector3::new(1e-3, 0.0, 0.0),
            Vector3::new(-250.0, 17.0, 0.5),
            Vector3::new(0.5, 0.0, 2.427_051),
        ] {
            let n = normalize_fast(&v);
            assert!((n.norm() - 1.0).abs() < 1e-3, "length {} for {:?}", n.norm(), v);
        }
        assert_eq!(normalize_fast(&Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn test_fast_inv_sqrt_relative_error() {
        for x in [0.01_f32, 0.5, 1.0, 2.0, 9.0, 1234.5] {
            let exact = 1.0 / x.sqrt();
            let rel = (fast_inv_sqrt(x) - exact).abs() / exact;
            assert!(rel < 0.002, "x={} rel={}", x, rel);
        }
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(slerp(&a, &b, 0.0), a, epsilon = 1e-6);
        assert_relative_eq!(slerp(&a, &b, 1.0), b, epsilon = 1e-6);
    }

    #[test]
    fn test_slerp_midpoint_stays_on_sphere() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 0.0, 3.0);
        let mid = slerp(&a, &b, 0.5);
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(mid, Vector3::new(half, 0.0, half), epsilon = 1e-5);
    }

    #[test]
    fn test_slerp_nearly_parallel_falls_back_to_lerp() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.01, 0.0);
        let r = slerp(&a, &b, 0.5);
        assert!(r.iter().all(|c| c.is_finite()));
        assert_relative_eq!(r.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_slerp_antiparallel_is_finite() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let r = slerp(&a, &-a, 0.25);
        assert!(r.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_bezier_endpoints_and_midpoint() {
        let p0 = Vector3::new(0.0, 0.0, 0.0);
        let p1 = Vector3::new(0.0, 1.0, 0.0);
        let p2 = Vector3::new(1.0, 1.0, 0.0);
        let p3 = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(bezier(&p0, &p1, &p2, &p3, 0.0), p0);
        assert_eq!(bezier(&p0, &p1, &p2, &p3, 1.0), p3);
        assert_relative_eq!(
            bezier(&p0, &p1, &p2, &p3, 0.5),
            Vector3::new(0.5, 0.75, 0.0),
            epsilon = 1e-6
        );
    }
}
