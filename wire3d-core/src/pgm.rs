//! Plain-text grayscale (`P2`) export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::canvas::Canvas;

/// Maximum sample value written in the header
pub const MAX_VALUE: u8 = 255;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Write `canvas` as an ASCII PGM: `P2`, dimensions, max value, then one
/// line of space-separated samples per row.
pub fn write_pgm<W: Write>(canvas: &Canvas, writer: &mut W) -> Result<(), ExportError> {
    write!(writer, "P2\n{} {}\n{}\n", canvas.width(), canvas.height(), MAX_VALUE)?;

    let samples = canvas.to_samples();
    for row in samples.chunks(canvas.width()) {
        let mut first = true;
        for sample in row {
            if !first {
                writer.write_all(b" ")?;
            }
            write!(writer, "{}", sample)?;
            first = false;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write the canvas into it
pub fn save_pgm<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_pgm(canvas, &mut writer)?;
    writer.flush()?;
    log::info!("wrote {}x{} PGM to {}", canvas.width(), canvas.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        canvas.splat(0.0, 0.0, 1.0);
        canvas.splat(2.0, 1.0, 0.5);

        let mut out = Vec::new();
        write_pgm(&canvas, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P2\n3 2\n255\n255 0 0\n0 0 127\n");
    }

    #[test]
    fn test_overexposed_pixels_clamp() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        for _ in 0..4 {
            canvas.splat(0.0, 0.0, 1.0);
        }
        let mut out = Vec::new();
        write_pgm(&canvas, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("\n255\n255\n"));
    }

    #[test]
    fn test_save_to_file() {
        let path = std::env::temp_dir().join(format!("wire3d_pgm_test_{}.pgm", std::process::id()));
        let canvas = Canvas::new(4, 4).unwrap();
        save_pgm(&canvas, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P2"));
        assert_eq!(lines.next(), Some("4 4"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.filter(|l| *l == "0 0 0 0").count(), 4);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let canvas = Canvas::new(1, 1).unwrap();
        let path = std::env::temp_dir().join("wire3d_no_such_dir").join("x.pgm");
        assert!(matches!(save_pgm(&canvas, &path), Err(ExportError::Io(_))));
    }
}
