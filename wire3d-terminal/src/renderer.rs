//! ASCII view of a grayscale canvas

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::Canvas;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Canvas pixel rows folded into one character cell. Terminal cells are
/// roughly twice as tall as they are wide, so this keeps pixels square.
pub const ROWS_PER_CELL: usize = 2;

/// Converts canvas intensities into terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    /// Renderer for a `width` x `height` character grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel dimensions of the canvas this renderer expects
    pub fn canvas_size(&self) -> (usize, usize) {
        (self.width, self.height * ROWS_PER_CELL)
    }

    /// Shade every cell from the brightest of the canvas pixels it covers.
    /// Cells outside the canvas stay blank.
    pub fn rasterize(&mut self, canvas: &Canvas) {
        for row in 0..self.height {
            for col in 0..self.width {
                let brightest = (0..ROWS_PER_CELL)
                    .filter_map(|dy| canvas.get(col, row * ROWS_PER_CELL + dy))
                    .fold(0.0f32, f32::max);
                self.char_buffer[row * self.width + col] = shade(brightest);
            }
        }
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.char_buffer[row * self.width + col])
        } else {
            None
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map an intensity (clamped to `[0, 1]`) onto the ramp
pub fn shade(intensity: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (intensity.clamp(0.0, 1.0) * last as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_ramp_ends() {
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(1.0), '@');
        assert_eq!(shade(7.5), '@');
        assert_eq!(shade(-1.0), ' ');
        assert_eq!(shade(f32::NAN), ' ');
    }

    #[test]
    fn test_canvas_size_doubles_rows() {
        let renderer = AsciiRenderer::new(80, 24);
        assert_eq!(renderer.canvas_size(), (80, 48));
    }

    #[test]
    fn test_rasterize_takes_brightest_pixel_per_cell() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.splat(1.0, 3.0, 1.0);
        canvas.splat(2.0, 0.0, 0.4);

        let mut renderer = AsciiRenderer::new(4, 2);
        renderer.rasterize(&canvas);
        assert_eq!(renderer.char_at(1, 1), Some('@'));
        assert_eq!(renderer.char_at(2, 0), Some(shade(0.4)));
        assert_eq!(renderer.char_at(0, 0), Some(' '));
        assert_eq!(renderer.char_at(4, 0), None);
    }

    #[test]
    fn test_rasterize_overwrites_previous_frame() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.splat(1.0, 1.0, 1.0);
        let mut renderer = AsciiRenderer::new(4, 2);
        renderer.rasterize(&canvas);
        assert_eq!(renderer.char_at(1, 0), Some('@'));

        canvas.clear();
        renderer.rasterize(&canvas);
        for row in 0..2 {
            for col in 0..4 {
                assert_eq!(renderer.char_at(col, row), Some(' '));
            }
        }
    }

    #[test]
    fn test_draw_emits_every_cell() {
        let mut renderer = AsciiRenderer::new(3, 2);
        let mut canvas = Canvas::new(3, 4).unwrap();
        canvas.splat(0.0, 0.0, 1.0);
        renderer.rasterize(&canvas);

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('@').count(), 1);
        assert_eq!(text.matches("\r\n").count(), 2);
    }
}
