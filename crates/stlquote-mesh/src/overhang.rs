//! Overhang (unsupported surface) detection.

use serde::{Deserialize, Serialize};

use crate::normals::NormalSet;
use crate::soup::TriangleSoup;

/// Default overhang threshold on the averaged normal Z component.
///
/// Faces whose normal Z is below `-0.15` (pointing more than ~8.6 degrees
/// below horizontal) are flagged.
pub const DEFAULT_OVERHANG_THRESHOLD: f64 = 0.15;

/// Triangles classified as overhangs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverhangSet {
    /// Indices of flagged triangles, ascending.
    pub triangles: Vec<usize>,
}

impl OverhangSet {
    /// Number of flagged triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if no triangle was flagged.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Copy the flagged triangles out of `soup` for highlighting.
    pub fn extract(&self, soup: &TriangleSoup) -> TriangleSoup {
        extract_triangles(soup, &self.triangles)
    }
}

/// Flag triangles whose averaged normal Z falls below `-threshold`.
///
/// Degenerate triangles have a zero normal and are never flagged.
pub fn detect_overhangs(normals: &NormalSet, threshold: f64) -> OverhangSet {
    let triangles = (0..normals.num_triangles())
        .filter(|&i| (normals.average_z(i) as f64) < -threshold)
        .collect();
    OverhangSet { triangles }
}

/// Build a new soup holding only the triangles at `indices`.
///
/// Out-of-range indices are skipped.
pub fn extract_triangles(soup: &TriangleSoup, indices: &[usize]) -> TriangleSoup {
    let mut out = TriangleSoup::with_capacity(indices.len());
    for &i in indices {
        if i < soup.num_triangles() {
            let [v0, v1, v2] = soup.triangle(i);
            out.push_triangle(v0, v1, v2);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::compute_normals;

    fn down_and_up() -> TriangleSoup {
        let mut soup = TriangleSoup::new();
        // Clockwise seen from above: normal (0, 0, -1)
        soup.push_triangle([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        // Counter-clockwise: normal (0, 0, 1)
        soup.push_triangle([0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 5.0]);
        soup
    }

    #[test]
    fn test_straight_down_is_overhang_at_any_threshold() {
        let soup = down_and_up();
        let normals = compute_normals(&soup);
        for threshold in [0.0, 0.15, 0.5, 0.99] {
            let set = detect_overhangs(&normals, threshold);
            assert_eq!(set.triangles, vec![0], "threshold {threshold}");
        }
    }

    #[test]
    fn test_straight_up_never_overhang() {
        let mut soup = TriangleSoup::new();
        soup.push_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let normals = compute_normals(&soup);
        for threshold in [-0.99, 0.0, 0.15, 0.99] {
            assert!(detect_overhangs(&normals, threshold).is_empty());
        }
    }

    #[test]
    fn test_vertical_wall_is_not_overhang() {
        let mut soup = TriangleSoup::new();
        soup.push_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let normals = compute_normals(&soup);
        assert!(detect_overhangs(&normals, DEFAULT_OVERHANG_THRESHOLD).is_empty());
    }

    #[test]
    fn test_extract_overhang_geometry() {
        let soup = down_and_up();
        let normals = compute_normals(&soup);
        let set = detect_overhangs(&normals, DEFAULT_OVERHANG_THRESHOLD);
        let sub = set.extract(&soup);

        assert_eq!(sub.num_triangles(), 1);
        assert_eq!(sub.triangle(0), soup.triangle(0));
    }

    #[test]
    fn test_extract_skips_out_of_range() {
        let soup = down_and_up();
        let sub = extract_triangles(&soup, &[1, 7]);
        assert_eq!(sub.num_triangles(), 1);
    }
}
