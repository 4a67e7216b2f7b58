//! Batch export of a spinning mesh as numbered PGM frames

use std::f32::consts::TAU;
use std::path::PathBuf;

use wire3d_core::{
    save_pgm, Camera, Canvas, CanvasError, Mesh, RenderOptions, Transform, WireframeRasterizer,
};

/// Frame loop settings for [`ExportJob::run`]
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub width: usize,
    pub height: usize,
    pub frames: usize,
    /// Vertical field of view in radians
    pub fov: f32,
    pub out_dir: PathBuf,
    pub prefix: String,
    pub options: RenderOptions,
}

/// Outcome of an export run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub written: usize,
    pub failed: usize,
}

impl ExportJob {
    /// `<out_dir>/<prefix>_NNN.pgm`
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.out_dir.join(format!("{}_{:03}.pgm", self.prefix, frame))
    }

    /// Spin `mesh` one full turn around Y over `frames` frames and save each.
    ///
    /// A frame that fails to render or save is logged and skipped; the run
    /// moves on to the next one.
    pub fn run(&self, mesh: &mut Mesh) -> Result<ExportSummary, CanvasError> {
        let mut canvas = Canvas::new(self.width, self.height)?;
        let camera = Camera::new(self.width as u32, self.height as u32).with_fov(self.fov);
        let rasterizer = WireframeRasterizer::new(self.options);
        let mut summary = ExportSummary::default();

        for frame in 0..self.frames {
            let angle = TAU * frame as f32 / self.frames as f32;
            mesh.transform = Transform::rotation_y(angle);
            canvas.clear();

            if let Err(e) = rasterizer.render(&mut canvas, mesh, &camera) {
                log::warn!("frame {}: render failed: {}", frame, e);
                summary.failed += 1;
                continue;
            }
            let path = self.frame_path(frame);
            match save_pgm(&canvas, &path) {
                Ok(()) => summary.written += 1,
                Err(e) => {
                    log::warn!("frame {}: could not write {}: {}", frame, path.display(), e);
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }
}
