//! Wireframe geometry: vertices joined by undirected edges

use std::collections::HashSet;

use nalgebra::{Matrix4, Point3};
use thiserror::Error;

/// Errors raised while assembling a mesh
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("edge ({a}, {b}) references a vertex outside 0..{vertex_count}")]
    IndexOutOfRange {
        a: usize,
        b: usize,
        vertex_count: usize,
    },

    #[error("edge ({0}, {0}) connects a vertex to itself")]
    SelfLoop(usize),

    #[error("edge ({a}, {b}) appears more than once")]
    DuplicateEdge { a: usize, b: usize },
}

/// An undirected edge between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Orientation-independent identity of the edge
    pub fn key(&self) -> (usize, usize) {
        (self.a.min(self.b), self.a.max(self.b))
    }
}

impl From<(usize, usize)> for Edge {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

/// Collects undirected edges, keeping the first orientation seen for each pair
#[derive(Debug, Clone)]
pub struct EdgeSet {
    vertex_count: usize,
    seen: HashSet<(usize, usize)>,
    edges: Vec<Edge>,
}

impl EdgeSet {
    pub fn new(vertex_count: usize) -> Self {
        Self::with_capacity(vertex_count, 0)
    }

    pub fn with_capacity(vertex_count: usize, capacity: usize) -> Self {
        Self {
            vertex_count,
            seen: HashSet::with_capacity(capacity),
            edges: Vec::with_capacity(capacity),
        }
    }

    /// Record the edge `a-b`. Returns `Ok(false)` when `a-b` or `b-a` was
    /// already present, and ignores self loops the same way.
    pub fn insert(&mut self, a: usize, b: usize) -> Result<bool, MeshError> {
        if a >= self.vertex_count || b >= self.vertex_count {
            return Err(MeshError::IndexOutOfRange {
                a,
                b,
                vertex_count: self.vertex_count,
            });
        }
        if a == b {
            return Ok(false);
        }
        let edge = Edge::new(a, b);
        if !self.seen.insert(edge.key()) {
            return Ok(false);
        }
        self.edges.push(edge);
        Ok(true)
    }

    /// Walk a closed polygon boundary, including the edge from last back to first
    pub fn insert_face(&mut self, face: &[usize]) -> Result<(), MeshError> {
        if face.len() < 2 {
            return Ok(());
        }
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            self.insert(a, b)?;
        }
        Ok(())
    }

    /// Walk an open polyline
    pub fn insert_polyline(&mut self, line: &[usize]) -> Result<(), MeshError> {
        for pair in line.windows(2) {
            self.insert(pair[0], pair[1])?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

/// A wireframe mesh: vertices, unique undirected edges and a model transform
///
/// Every edge index is below the vertex count and no unordered pair repeats.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    edges: Vec<Edge>,
    pub transform: Matrix4<f32>,
}

impl Mesh {
    /// Build a mesh from an explicit edge list, rejecting invalid or repeated edges
    pub fn new(vertices: Vec<Point3<f32>>, edges: Vec<Edge>) -> Result<Self, MeshError> {
        let mut seen = HashSet::with_capacity(edges.len());
        for edge in &edges {
            if edge.a >= vertices.len() || edge.b >= vertices.len() {
                return Err(MeshError::IndexOutOfRange {
                    a: edge.a,
                    b: edge.b,
                    vertex_count: vertices.len(),
                });
            }
            if edge.a == edge.b {
                return Err(MeshError::SelfLoop(edge.a));
            }
            if !seen.insert(edge.key()) {
                return Err(MeshError::DuplicateEdge {
                    a: edge.a,
                    b: edge.b,
                });
            }
        }

        Ok(Self::from_parts(vertices, edges))
    }

    /// Build a mesh from polygon faces, keeping each shared edge once
    pub fn from_faces<F: AsRef<[usize]>>(
        vertices: Vec<Point3<f32>>,
        faces: &[F],
    ) -> Result<Self, MeshError> {
        let mut edge_set = EdgeSet::new(vertices.len());
        for face in faces {
            edge_set.insert_face(face.as_ref())?;
        }
        Ok(Self::from_parts(vertices, edge_set.into_edges()))
    }

    /// Assemble from an `EdgeSet` that already enforces the mesh invariants
    pub fn from_edge_set(vertices: Vec<Point3<f32>>, edge_set: EdgeSet) -> Self {
        Self::from_parts(vertices, edge_set.into_edges())
    }

    fn from_parts(vertices: Vec<Point3<f32>>, edges: Vec<Edge>) -> Self {
        log::debug!(
            "built mesh with {} vertices and {} edges",
            vertices.len(),
            edges.len()
        );
        Self {
            vertices,
            edges,
            transform: Matrix4::identity(),
        }
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Create an axis-aligned cube wireframe centred on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            // Back face (z = -half)
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            // Front face (z = +half)
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        #[rustfmt::skip]
        let edges = [
            (0, 1), (1, 2), (2, 3), (3, 0),
            (4, 5), (5, 6), (6, 7), (7, 4),
            (0, 4), (1, 5), (2, 6), (3, 7),
        ]
        .into_iter()
        .map(Edge::from)
        .collect();

        Self::from_parts(vertices, edges)
    }
}
