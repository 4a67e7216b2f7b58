//! Keyframe animation along cubic Bézier curves
//!
//! The rasterizer never sees curves or time; callers sample a position here and
//! fold it into the model transform between frames.

use nalgebra::Vector3;
use thiserror::Error;

use crate::vector::bezier;

#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    #[error("curve duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
}

/// A cubic Bézier path traversed over `duration` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    pub p0: Vector3<f32>,
    pub p1: Vector3<f32>,
    pub p2: Vector3<f32>,
    pub p3: Vector3<f32>,
    duration: f32,
    current_time: f32,
    pub looping: bool,
}

impl BezierCurve {
    /// Create a looping curve starting at time zero
    pub fn new(
        p0: Vector3<f32>,
        p1: Vector3<f32>,
        p2: Vector3<f32>,
        p3: Vector3<f32>,
        duration: f32,
    ) -> Result<Self, AnimationError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(AnimationError::InvalidDuration(duration));
        }
        Ok(Self {
            p0,
            p1,
            p2,
            p3,
            duration,
            current_time: 0.0,
            looping: true,
        })
    }

    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Position at an absolute time; time outside `[0, duration]` is clamped
    pub fn position_at(&self, time: f32) -> Vector3<f32> {
        let t = (time / self.duration).clamp(0.0, 1.0);
        bezier(&self.p0, &self.p1, &self.p2, &self.p3, t)
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position_at(self.current_time)
    }

    /// Advance the curve clock. Looping curves wrap into `[0, duration)`,
    /// others stop at the end.
    pub fn advance(&mut self, delta_time: f32) {
        let time = self.current_time + delta_time;
        self.current_time = if self.looping {
            time.rem_euclid(self.duration)
        } else {
            time.clamp(0.0, self.duration)
        };
    }
}

/// A set of curves driven by one clock
#[derive(Debug, Clone, Default)]
pub struct AnimationSystem {
    curves: Vec<BezierCurve>,
    global_time: f32,
}

impl AnimationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_curve(&mut self, curve: BezierCurve) -> usize {
        self.curves.push(curve);
        self.curves.len() - 1
    }

    pub fn curves(&self) -> &[BezierCurve] {
        &self.curves
    }

    pub fn curve(&self, index: usize) -> Option<&BezierCurve> {
        self.curves.get(index)
    }

    pub fn global_time(&self) -> f32 {
        self.global_time
    }

    pub fn update(&mut self, delta_time: f32) {
        self.global_time += delta_time;
        for curve in &mut self.curves {
            curve.advance(delta_time);
        }
    }
}
