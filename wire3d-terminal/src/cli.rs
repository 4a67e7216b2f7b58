//! Command-line pieces shared by the viewer and the exporter

use std::io;
use std::path::Path;
use std::str::FromStr;

use wire3d_core::{load_obj, soccer_ball, ClipPolicy, Mesh, RenderOptions};

/// Built-in meshes selectable with `--mesh`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Soccer,
    Cube,
}

impl FromStr for MeshKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "soccer" => Ok(MeshKind::Soccer),
            "cube" => Ok(MeshKind::Cube),
            other => Err(format!("unknown mesh `{}`, expected `soccer` or `cube`", other)),
        }
    }
}

/// Load the OBJ file when one is given, otherwise build the named mesh
pub fn load_mesh(kind: MeshKind, obj: Option<&Path>) -> io::Result<Mesh> {
    if let Some(path) = obj {
        return load_obj(path).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e));
    }
    match kind {
        MeshKind::Soccer => soccer_ball().map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
        MeshKind::Cube => Ok(Mesh::cube(2.0)),
    }
}

pub fn render_options(thickness: f32, strict_clip: bool) -> RenderOptions {
    RenderOptions {
        thickness,
        clip: if strict_clip {
            ClipPolicy::BothEndpoints
        } else {
            ClipPolicy::AnyEndpoint
        },
        ..RenderOptions::default()
    }
}
