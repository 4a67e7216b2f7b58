//! Accumulating grayscale canvas with sub-pixel point and line primitives

use thiserror::Error;

/// Perpendicular sampling interval across a line's thickness, in pixels
const THICKNESS_STEP: f32 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum CanvasError {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: usize, height: usize },
}

/// A width x height grid of additive floating-point intensities
///
/// Values are never clamped while drawing; overlapping splats simply add up.
/// Clamping to `[0, 255]` happens only in [`Canvas::to_samples`].
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<f32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0.0; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major intensities
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0.0);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Sum of all intensities on the canvas
    pub fn total_intensity(&self) -> f32 {
        self.pixels.iter().sum()
    }

    fn accumulate(&mut self, x: i64, y: i64, amount: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] += amount;
        }
    }

    /// Bilinear splat: spread `intensity` over the four pixels around `(x, y)`.
    ///
    /// Corners outside the canvas are dropped; their share is lost.
    pub fn splat(&mut self, x: f32, y: f32, intensity: f32) {
        let fx0 = x.floor();
        let fy0 = y.floor();
        let fx = x - fx0;
        let fy = y - fy0;
        let x0 = fx0 as i64;
        let y0 = fy0 as i64;

        self.accumulate(x0, y0, intensity * (1.0 - fx) * (1.0 - fy));
        self.accumulate(x0 + 1, y0, intensity * fx * (1.0 - fy));
        self.accumulate(x0, y0 + 1, intensity * (1.0 - fx) * fy);
        self.accumulate(x0 + 1, y0 + 1, intensity * fx * fy);
    }

    /// DDA line with thickness.
    ///
    /// Steps once per pixel along the major axis and, at each step, splats
    /// samples across the line every half pixel out to `thickness / 2` on
    /// both sides. A line shorter than one step is a single splat at the start.
    /// Only the steps that land within reach of the canvas are visited, so an
    /// endpoint far off-canvas costs nothing extra. Lines with non-finite
    /// endpoints are not drawn. Returns the number of splats issued.
    pub fn draw_line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: f32,
        intensity: f32,
    ) -> usize {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return 0;
        }
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()) as usize;

        if steps == 0 {
            self.splat(x0, y0, intensity);
            return 1;
        }

        let half = thickness.max(0.0) * 0.5;
        let margin = half + 1.0;
        let Some((t0, t1)) = clip_span(
            (x0, y0),
            (dx, dy),
            (-margin, self.width as f32 + margin),
            (-margin, self.height as f32 + margin),
        ) else {
            return 0;
        };
        let first = (t0 * steps as f32).floor().max(0.0) as usize;
        let last = ((t1 * steps as f32).ceil() as usize).min(steps);

        let length = (dx * dx + dy * dy).sqrt();
        let (nx, ny) = (-dy / length, dx / length);
        let x_inc = dx / steps as f32;
        let y_inc = dy / steps as f32;
        let bands = (2.0 * half / THICKNESS_STEP).floor() as usize;

        let mut splats = 0;
        for i in first..=last {
            let x = x0 + i as f32 * x_inc;
            let y = y0 + i as f32 * y_inc;
            for k in 0..=bands {
                let t = -half + k as f32 * THICKNESS_STEP;
                self.splat(x + nx * t, y + ny * t, intensity);
                splats += 1;
            }
        }
        splats
    }

    /// Convert to 8-bit samples: `intensity * 255`, clamped to `[0, 255]`
    pub fn to_samples(&self) -> Vec<u8> {
        self.pixels.iter().map(|&v| to_sample(v)).collect()
    }
}

/// Liang-Barsky: the parameter range of `origin + t * delta`, `t` in
/// `[0, 1]`, that lies inside the rectangle `xs` x `ys`
fn clip_span(
    origin: (f32, f32),
    delta: (f32, f32),
    xs: (f32, f32),
    ys: (f32, f32),
) -> Option<(f32, f32)> {
    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    let bounds = [
        (-delta.0, origin.0 - xs.0),
        (delta.0, xs.1 - origin.0),
        (-delta.1, origin.1 - ys.0),
        (delta.1, ys.1 - origin.1),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

fn to_sample(intensity: f32) -> u8 {
    // NaN clamps to 0 through the saturating cast
    (intensity * 255.0).clamp(0.0, 255.0) as u8
}
