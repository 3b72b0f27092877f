//! Unindexed triangle storage.

use nalgebra::Vector3;

use crate::error::{MeshError, Result};

/// Number of floats per triangle (3 vertices x 3 coordinates).
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// A triangle soup: every triangle owns its own three vertex copies.
///
/// Vertices are stored flat as `[x0, y0, z0, x1, y1, z1, ...]` in
/// millimeters, nine floats per triangle, matching the layout of an STL
/// file and of a GPU position buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    vertices: Vec<f32>,
}

impl TriangleSoup {
    /// Create an empty soup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty soup with room for `triangles` triangles.
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * FLOATS_PER_TRIANGLE),
        }
    }

    /// Wrap a flat vertex array.
    ///
    /// Fails if the length is not a multiple of 9.
    pub fn from_vertices(vertices: Vec<f32>) -> Result<Self> {
        if vertices.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(MeshError::InvalidLength(vertices.len()));
        }
        Ok(Self { vertices })
    }

    /// Append one triangle.
    pub fn push_triangle(&mut self, v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) {
        self.vertices.extend_from_slice(&v0);
        self.vertices.extend_from_slice(&v1);
        self.vertices.extend_from_slice(&v2);
    }

    /// Flat vertex array.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Consume the soup and return the flat vertex array.
    pub fn into_vertices(self) -> Vec<f32> {
        self.vertices
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.vertices.len() / FLOATS_PER_TRIANGLE
    }

    /// Number of vertices (three per triangle).
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True if the soup holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw coordinates of triangle `index`.
    pub fn triangle(&self, index: usize) -> [[f32; 3]; 3] {
        let t = &self.vertices[index * FLOATS_PER_TRIANGLE..(index + 1) * FLOATS_PER_TRIANGLE];
        [[t[0], t[1], t[2]], [t[3], t[4], t[5]], [t[6], t[7], t[8]]]
    }

    /// Iterate over triangles as f64 vectors.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [Vector3<f64>; 3]> + '_ {
        self.vertices
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .map(|t| {
                [
                    Vector3::new(t[0] as f64, t[1] as f64, t[2] as f64),
                    Vector3::new(t[3] as f64, t[4] as f64, t[5] as f64),
                    Vector3::new(t[6] as f64, t[7] as f64, t[8] as f64),
                ]
            })
    }

    /// Append all triangles from another soup.
    pub fn merge(&mut self, other: &TriangleSoup) {
        self.vertices.extend_from_slice(&other.vertices);
    }
}
