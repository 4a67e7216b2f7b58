//! Truncated icosahedron ("soccer ball") test mesh
//!
//! Raw vertices are golden-ratio coordinates with edge length 1, projected onto
//! the unit sphere with the fast normalization.

use nalgebra::{Point3, Vector3};

use crate::geometry::{EdgeSet, Mesh, MeshError};
use crate::vector::normalize_fast;

pub const SOCCER_VERTEX_COUNT: usize = 60;
pub const SOCCER_EDGE_COUNT: usize = 90;

/// Edge storage reserved up front, one slot per face boundary visit
const EDGE_CAPACITY: usize = 180;

// Golden-ratio constants
const C0: f32 = 0.809_017; // (1 + sqrt 5) / 4
const C1: f32 = 1.618_034; // (1 + sqrt 5) / 2
const C2: f32 = 1.809_017; // (5 + sqrt 5) / 4
const C3: f32 = 2.118_034; // (2 + sqrt 5) / 2
const C4: f32 = 2.427_051; // 3 (1 + sqrt 5) / 4

#[rustfmt::skip]
const RAW_VERTICES: [[f32; 3]; SOCCER_VERTEX_COUNT] = [
    [ 0.5,  0.0,  C4], [ 0.5,  0.0, -C4], [-0.5,  0.0,  C4], [-0.5,  0.0, -C4],
    [  C4,  0.5, 0.0], [  C4, -0.5, 0.0], [ -C4,  0.5, 0.0], [ -C4, -0.5, 0.0],
    [ 0.0,   C4, 0.5], [ 0.0,   C4, -0.5], [ 0.0,  -C4, 0.5], [ 0.0,  -C4, -0.5],
    [ 1.0,   C0,  C3], [ 1.0,   C0, -C3], [ 1.0,  -C0,  C3], [ 1.0,  -C0, -C3],
    [-1.0,   C0,  C3], [-1.0,   C0, -C3], [-1.0,  -C0,  C3], [-1.0,  -C0, -C3],
    [  C3,  1.0,  C0], [  C3,  1.0, -C0], [  C3, -1.0,  C0], [  C3, -1.0, -C0],
    [ -C3,  1.0,  C0], [ -C3,  1.0, -C0], [ -C3, -1.0,  C0], [ -C3, -1.0, -C0],
    [  C0,   C3, 1.0], [  C0,   C3, -1.0], [  C0,  -C3, 1.0], [  C0,  -C3, -1.0],
    [ -C0,   C3, 1.0], [ -C0,   C3, -1.0], [ -C0,  -C3, 1.0], [ -C0,  -C3, -1.0],
    [ 0.5,   C1,  C2], [ 0.5,   C1, -C2], [ 0.5,  -C1,  C2], [ 0.5,  -C1, -C2],
    [-0.5,   C1,  C2], [-0.5,   C1, -C2], [-0.5,  -C1,  C2], [-0.5,  -C1, -C2],
    [  C2,  0.5,  C1], [  C2,  0.5, -C1], [  C2, -0.5,  C1], [  C2, -0.5, -C1],
    [ -C2,  0.5,  C1], [ -C2,  0.5, -C1], [ -C2, -0.5,  C1], [ -C2, -0.5, -C1],
    [  C1,   C2, 0.5], [  C1,   C2, -0.5], [  C1,  -C2, 0.5], [  C1,  -C2, -0.5],
    [ -C1,   C2, 0.5], [ -C1,   C2, -0.5], [ -C1,  -C2, 0.5], [ -C1,  -C2, -0.5],
];

/// 20 hexagons followed by 12 pentagons
#[rustfmt::skip]
const FACES: [&[usize]; 32] = [
    &[ 0,  2, 18, 42, 38, 14], &[ 1,  3, 17, 41, 37, 13],
    &[ 2,  0, 12, 36, 40, 16], &[ 3,  1, 15, 39, 43, 19],
    &[ 4,  5, 23, 47, 45, 21], &[ 5,  4, 20, 44, 46, 22],
    &[ 6,  7, 26, 50, 48, 24], &[ 7,  6, 25, 49, 51, 27],
    &[ 8,  9, 33, 57, 56, 32], &[ 9,  8, 28, 52, 53, 29],
    &[10, 11, 31, 55, 54, 30], &[11, 10, 34, 58, 59, 35],
    &[12, 44, 20, 52, 28, 36], &[13, 37, 29, 53, 21, 45],
    &[14, 38, 30, 54, 22, 46], &[15, 47, 23, 55, 31, 39],
    &[16, 40, 32, 56, 24, 48], &[17, 49, 25, 57, 33, 41],
    &[18, 50, 26, 58, 34, 42], &[19, 43, 35, 59, 27, 51],
    &[ 0, 14, 46, 44, 12], &[ 1, 13, 45, 47, 15],
    &[ 2, 16, 48, 50, 18], &[ 3, 19, 51, 49, 17],
    &[ 4, 21, 53, 52, 20], &[ 5, 22, 54, 55, 23],
    &[ 6, 24, 56, 57, 25], &[ 7, 27, 59, 58, 26],
    &[ 8, 32, 40, 36, 28], &[ 9, 29, 37, 41, 33],
    &[10, 30, 38, 42, 34], &[11, 35, 43, 39, 31],
];

/// Generate the soccer ball: 60 unit-sphere vertices and 90 unique edges
pub fn soccer_ball() -> Result<Mesh, MeshError> {
    let vertices: Vec<Point3<f32>> = RAW_VERTICES
        .iter()
        .map(|&[x, y, z]| Point3::from(normalize_fast(&Vector3::new(x, y, z))))
        .collect();

    let mut edges = EdgeSet::with_capacity(vertices.len(), EDGE_CAPACITY);
    for face in FACES {
        edges.insert_face(face)?;
    }

    log::debug!(
        "generated truncated icosahedron: {} vertices, {} edges",
        vertices.len(),
        edges.len()
    );
    Ok(Mesh::from_edge_set(vertices, edges))
}
