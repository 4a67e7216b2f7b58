//! wire3d-export: render a spinning wireframe into numbered PGM frames
//!
//! Usage:
//!   wire3d-export --frames 36 --out frames --prefix soccer
//!   wire3d-export --obj model.obj --thickness 2 --strict-clip

use argh::FromArgs;
use std::io;
use std::path::PathBuf;
use wire3d_terminal::cli::{load_mesh, render_options, MeshKind};
use wire3d_terminal::export::ExportJob;

#[derive(FromArgs)]
/// Render a full turn of a wireframe mesh into P2 PGM frames.
struct Args {
    /// built-in mesh to render: soccer or cube
    #[argh(option, default = "MeshKind::Soccer")]
    mesh: MeshKind,

    /// wavefront OBJ file to render instead of a built-in mesh
    #[argh(option)]
    obj: Option<PathBuf>,

    /// number of frames in one turn
    #[argh(option, default = "36")]
    frames: usize,

    /// image width in pixels
    #[argh(option, default = "400")]
    width: usize,

    /// image height in pixels
    #[argh(option, default = "400")]
    height: usize,

    /// line thickness in pixels
    #[argh(option, default = "1.0")]
    thickness: f32,

    /// vertical field of view in degrees
    #[argh(option, default = "45.0")]
    fov: f32,

    /// only draw edges whose endpoints are both inside the viewport
    #[argh(switch)]
    strict_clip: bool,

    /// output directory, created when missing
    #[argh(option, default = "PathBuf::from(\".\")")]
    out: PathBuf,

    /// file name prefix for frames
    #[argh(option, default = "String::from(\"frame\")")]
    prefix: String,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut mesh = load_mesh(args.mesh, args.obj.as_deref())?;
    std::fs::create_dir_all(&args.out)?;

    let job = ExportJob {
        width: args.width,
        height: args.height,
        frames: args.frames,
        fov: args.fov.to_radians(),
        out_dir: args.out,
        prefix: args.prefix,
        options: render_options(args.thickness, args.strict_clip),
    };
    let summary = job
        .run(&mut mesh)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    println!(
        "wrote {} of {} frames to {}",
        summary.written,
        job.frames,
        job.out_dir.display()
    );
    Ok(())
}
