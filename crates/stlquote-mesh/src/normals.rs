//! Per-triangle normal estimation.

use tracing::{debug, instrument};

use crate::error::{MeshError, Result};
use crate::soup::{TriangleSoup, FLOATS_PER_TRIANGLE};

/// Face normals replicated to every vertex of their triangle.
///
/// Parallel to a [`TriangleSoup`]: same length, same layout. Degenerate
/// (zero-area) triangles carry a zero vector and are listed in
/// [`NormalSet::degenerate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalSet {
    normals: Vec<f32>,
    degenerate: Vec<usize>,
}

impl NormalSet {
    /// Wrap precomputed normals, e.g. from a renderer.
    ///
    /// Zero-length normals are recorded as degenerate.
    pub fn from_normals(normals: Vec<f32>) -> Result<Self> {
        if normals.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(MeshError::InvalidLength(normals.len()));
        }
        let degenerate = normals
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .enumerate()
            .filter(|(_, n)| n[0] == 0.0 && n[1] == 0.0 && n[2] == 0.0)
            .map(|(i, _)| i)
            .collect();
        Ok(Self {
            normals,
            degenerate,
        })
    }

    /// Flat normal array: `[nx0, ny0, nz0, ...]`.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Consume the set and return the flat normal array.
    pub fn into_normals(self) -> Vec<f32> {
        self.normals
    }

    /// Indices of triangles whose normal could not be computed.
    pub fn degenerate(&self) -> &[usize] {
        &self.degenerate
    }

    /// Number of triangles covered.
    pub fn num_triangles(&self) -> usize {
        self.normals.len() / FLOATS_PER_TRIANGLE
    }

    /// Normal of triangle `index` (first of its three replicated copies).
    pub fn triangle_normal(&self, index: usize) -> [f32; 3] {
        let base = index * FLOATS_PER_TRIANGLE;
        [
            self.normals[base],
            self.normals[base + 1],
            self.normals[base + 2],
        ]
    }

    /// Average Z component across the three vertex normals of a triangle.
    pub fn average_z(&self, index: usize) -> f32 {
        let base = index * FLOATS_PER_TRIANGLE;
        (self.normals[base + 2] + self.normals[base + 5] + self.normals[base + 8]) / 3.0
    }
}

/// Compute one unit normal per triangle from its winding.
///
/// The normal is `(v1 - v0) x (v2 - v0)` normalized, written to all three
/// vertex slots. A zero-length cross product yields `(0, 0, 0)` instead of
/// NaN.
#[instrument(skip_all, fields(triangles = soup.num_triangles()))]
pub fn compute_normals(soup: &TriangleSoup) -> NormalSet {
    let mut normals = Vec::with_capacity(soup.vertices().len());
    let mut degenerate = Vec::new();

    for (i, [v0, v1, v2]) in soup.triangles().enumerate() {
        let n = (v1 - v0).cross(&(v2 - v0));
        let len = n.norm();

        let unit = if len > 0.0 && len.is_finite() {
            [(n.x / len) as f32, (n.y / len) as f32, (n.z / len) as f32]
        } else {
            degenerate.push(i);
            [0.0, 0.0, 0.0]
        };

        for _ in 0..3 {
            normals.extend_from_slice(&unit);
        }
    }

    if !degenerate.is_empty() {
        debug!(count = degenerate.len(), "degenerate triangles");
    }

    NormalSet {
        normals,
        degenerate,
    }
}
