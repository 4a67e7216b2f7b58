//! Wavefront OBJ loader for wireframe meshes
//!
//! Reads vertex positions (`v`), polygon faces (`f`) and polylines (`l`).
//! Faces are walked as closed boundaries and polylines as open chains; every
//! undirected edge is kept once. Texture coordinates, normals, groups and
//! materials are skipped.

use std::io;
use std::path::Path;

use nalgebra::Point3;
use nom::{
    bytes::complete::take_till,
    character::complete::{char, i64 as index, space0, space1},
    combinator::{all_consuming, opt},
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

use crate::geometry::{EdgeSet, Mesh, MeshError};

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

/// Parse OBJ text into a mesh with an identity transform
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut vertices = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut skipped = 0;

    for (number, raw) in input.lines().enumerate() {
        let line_no = number + 1;
        let statement = raw.split('#').next().unwrap_or_default().trim();
        if statement.is_empty() {
            continue;
        }
        let (keyword, rest) = statement
            .split_once(|c: char| c.is_whitespace())
            .unwrap_or((statement, ""));

        match keyword {
            "v" => {
                let (_, (x, y, z)) = all_consuming(vertex_coords)(rest)
                    .map_err(|_| parse_error(line_no, "expected `v x y z [w]`"))?;
                vertices.push(Point3::new(x, y, z));
            }
            "f" | "l" => {
                let (_, raw_indices) = all_consuming(index_list)(rest)
                    .map_err(|_| parse_error(line_no, "expected a list of vertex indices"))?;
                let resolved = raw_indices
                    .into_iter()
                    .map(|i| resolve_index(i, vertices.len(), line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                if keyword == "f" {
                    faces.push(resolved);
                } else {
                    lines.push(resolved);
                }
            }
            other => {
                log::debug!("line {}: skipping `{}` statement", line_no, other);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("skipped {} unsupported OBJ statements", skipped);
    }

    let mut edges = EdgeSet::new(vertices.len());
    for face in &faces {
        edges.insert_face(face)?;
    }
    for line in &lines {
        edges.insert_polyline(line)?;
    }
    Ok(Mesh::from_edge_set(vertices, edges))
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mesh = parse_obj(&text)?;
    log::info!(
        "loaded {}: {} vertices, {} edges",
        path.display(),
        mesh.vertex_count(),
        mesh.edge_count()
    );
    Ok(mesh)
}

fn parse_error(line: usize, message: &str) -> ObjError {
    ObjError::Parse {
        line,
        message: message.to_string(),
    }
}

/// OBJ indices are 1-based; negative values count back from the most
/// recently defined vertex
fn resolve_index(raw: i64, defined: usize, line: usize) -> Result<usize, ObjError> {
    let resolved = match raw {
        0 => None,
        n if n > 0 => usize::try_from(n - 1).ok(),
        n => i64::try_from(defined).ok().and_then(|d| usize::try_from(d + n).ok()),
    };
    resolved.ok_or_else(|| ObjError::Parse {
        line,
        message: format!("vertex index {} does not refer to a defined vertex", raw),
    })
}

/// `x y z` with an optional, ignored `w`
fn vertex_coords(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, (x, _, y, _, z)) =
        preceded(space0, tuple((float, space1, float, space1, float)))(input)?;
    let (input, _) = terminated(opt(preceded(space1, float)), space0)(input)?;
    Ok((input, (x, y, z)))
}

/// One face/line token: `i`, `i/j`, `i//k` or `i/j/k`; only `i` is kept
fn vertex_ref(input: &str) -> IResult<&str, i64> {
    terminated(index, opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))))(input)
}

fn index_list(input: &str) -> IResult<&str, Vec<i64>> {
    delimited(space0, separated_list1(space1, vertex_ref), space0)(input)
}
