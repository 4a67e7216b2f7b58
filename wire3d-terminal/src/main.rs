//! wire3d terminal viewer - rotating wireframe in the terminal
//!
//! Controls:
//!   - WASD / Arrow Keys: Rotate the model
//!   - E/R: Roll rotation
//!   - Q/ESC: Quit

use argh::FromArgs;
use nalgebra::{Point3, Vector3};
use std::io;
use std::path::PathBuf;
use wire3d_core::{BezierCurve, LightSystem, Light};
use wire3d_terminal::cli::{load_mesh, render_options, MeshKind};
use wire3d_terminal::TerminalApp;

#[derive(FromArgs)]
/// Interactive wireframe viewer for the terminal.
struct Args {
    /// built-in mesh to show: soccer or cube
    #[argh(option, default = "MeshKind::Soccer")]
    mesh: MeshKind,

    /// wavefront OBJ file to show instead of a built-in mesh
    #[argh(option)]
    obj: Option<PathBuf>,

    /// line thickness in pixels
    #[argh(option, default = "1.0")]
    thickness: f32,

    /// vertical field of view in degrees
    #[argh(option, default = "45.0")]
    fov: f32,

    /// only draw edges whose endpoints are both inside the viewport
    #[argh(switch)]
    strict_clip: bool,

    /// shade edges with two point lights
    #[argh(switch)]
    lit: bool,

    /// drift the model along a looping Bézier path
    #[argh(switch)]
    path: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mesh = load_mesh(args.mesh, args.obj.as_deref())?;
    log::info!("viewing {} vertices, {} edges", mesh.vertex_count(), mesh.edge_count());

    let mut app = TerminalApp::new(mesh, render_options(args.thickness, args.strict_clip))?
        .with_fov(args.fov.to_radians());

    if args.lit {
        let mut lights = LightSystem::with_capacity(2);
        lights.push(Light::point(Point3::new(3.0, 4.0, 5.0), 0.9));
        lights.push(Light::point(Point3::new(-4.0, -1.0, 2.0), 0.4));
        app = app.with_lights(lights);
    }

    if args.path {
        let path = BezierCurve::new(
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(-1.0, 1.5, -1.0),
            Vector3::new(1.0, -1.5, -1.0),
            Vector3::new(1.0, 0.0, 0.0),
            4.0,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        app = app.with_path(path);
    }

    app.run()
}
