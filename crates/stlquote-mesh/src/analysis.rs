//! Bounding box, dimensions, volume and overhang analysis.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{MeshError, Result};
use crate::normals::NormalSet;
use crate::overhang::{detect_overhangs, OverhangSet};
use crate::soup::TriangleSoup;

/// Axis-aligned bounding box (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Extent along each axis.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: (self.max[0] - self.min[0]).abs(),
            depth: (self.max[1] - self.min[1]).abs(),
            height: (self.max[2] - self.min[2]).abs(),
        }
    }

    /// Center point.
    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }
}

/// Model extents in millimeters.
///
/// `width` is the X extent, `depth` the Y extent and `height` the Z
/// extent. Z is the build direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// X extent (mm).
    pub width: f64,
    /// Y extent (mm).
    pub depth: f64,
    /// Z extent (mm).
    pub height: f64,
}

impl Dimensions {
    /// Create dimensions from explicit extents.
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Largest extent.
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.depth).max(self.height)
    }
}

/// Result of spatial analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialAnalysis {
    /// Bounding box, `None` for an empty soup.
    pub bounds: Option<BoundingBox>,
    /// Extents; all zero for an empty soup.
    pub dimensions: Dimensions,
    /// Enclosed volume (mm³), exact for closed consistently wound meshes.
    pub volume_mm3: f64,
    /// Total triangle area (mm²).
    pub surface_area_mm2: f64,
    /// Triangles flagged as overhangs.
    pub overhangs: OverhangSet,
}

impl SpatialAnalysis {
    /// Number of overhang triangles.
    pub fn overhang_count(&self) -> usize {
        self.overhangs.len()
    }
}

/// Analyze a soup and its normals.
///
/// Fails only if `normals` does not match `soup` in length.
#[instrument(skip_all, fields(triangles = soup.num_triangles(), overhang_threshold = overhang_threshold))]
pub fn analyze(
    soup: &TriangleSoup,
    normals: &NormalSet,
    overhang_threshold: f64,
) -> Result<SpatialAnalysis> {
    if normals.normals().len() != soup.vertices().len() {
        return Err(MeshError::NormalsMismatch {
            normals: normals.normals().len(),
            vertices: soup.vertices().len(),
        });
    }

    let bounds = mesh_bounds(soup);
    let dimensions = bounds.map(|b| b.dimensions()).unwrap_or_default();
    let (volume_mm3, surface_area_mm2) = volume_and_area(soup);
    let overhangs = detect_overhangs(normals, overhang_threshold);

    debug!(
        width = dimensions.width,
        depth = dimensions.depth,
        height = dimensions.height,
        volume_mm3,
        overhangs = overhangs.len(),
        "spatial analysis complete"
    );

    Ok(SpatialAnalysis {
        bounds,
        dimensions,
        volume_mm3,
        surface_area_mm2,
        overhangs,
    })
}

/// Axis-aligned bounds of all vertices, or `None` if empty.
///
/// Vertices with a NaN or infinite component are left out; a soup with no
/// finite vertex has no bounds.
pub fn mesh_bounds(soup: &TriangleSoup) -> Option<BoundingBox> {
    let mut min = [f64::MAX, f64::MAX, f64::MAX];
    let mut max = [f64::MIN, f64::MIN, f64::MIN];
    let mut any = false;

    for v in soup.vertices().chunks_exact(3) {
        if !v.iter().all(|c| c.is_finite()) {
            continue;
        }
        any = true;
        for axis in 0..3 {
            let c = v[axis] as f64;
            min[axis] = min[axis].min(c);
            max[axis] = max[axis].max(c);
        }
    }

    any.then_some(BoundingBox { min, max })
}

/// Enclosed volume via the divergence theorem (mm³).
///
/// Sums the signed volumes `v0 · (v1 × v2) / 6` of the tetrahedra formed
/// with the origin and returns the absolute total.
pub fn mesh_volume(soup: &TriangleSoup) -> f64 {
    volume_and_area(soup).0
}

/// Total surface area (mm²).
pub fn surface_area(soup: &TriangleSoup) -> f64 {
    volume_and_area(soup).1
}

/// Triangles with a non-finite vertex contribute nothing.
fn volume_and_area(soup: &TriangleSoup) -> (f64, f64) {
    let mut signed = 0.0;
    let mut area = 0.0;
    for [v0, v1, v2] in soup.triangles() {
        if ![v0, v1, v2].iter().all(|v| v.iter().all(|c| c.is_finite())) {
            continue;
        }
        signed += v0.dot(&v1.cross(&v2)) / 6.0;
        area += (v1 - v0).cross(&(v2 - v0)).norm() / 2.0;
    }
    (signed.abs(), area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::compute_normals;
    use crate::overhang::DEFAULT_OVERHANG_THRESHOLD;
    use approx::assert_relative_eq;

    /// Outward-wound axis-aligned cube from (0,0,0) to (size,size,size).
    fn cube(size: f32) -> TriangleSoup {
        let s = size;
        let p = [
            [0.0, 0.0, 0.0],
            [s, 0.0, 0.0],
            [s, s, 0.0],
            [0.0, s, 0.0],
            [0.0, 0.0, s],
            [s, 0.0, s],
            [s, s, s],
            [0.0, s, s],
        ];
        let faces = [
            [0, 2, 1], [0, 3, 2], // bottom
            [4, 5, 6], [4, 6, 7], // top
            [0, 1, 5], [0, 5, 4], // front
            [2, 3, 7], [2, 7, 6], // back
            [0, 4, 7], [0, 7, 3], // left
            [1, 2, 6], [1, 6, 5], // right
        ];
        let mut soup = TriangleSoup::with_capacity(faces.len());
        for [a, b, c] in faces {
            soup.push_triangle(p[a], p[b], p[c]);
        }
        soup
    }

    #[test]
    fn test_cube_dimensions() {
        let soup = cube(10.0);
        let normals = compute_normals(&soup);
        let result = analyze(&soup, &normals, DEFAULT_OVERHANG_THRESHOLD).unwrap();

        let bounds = result.bounds.unwrap();
        assert_eq!(bounds.min, [0.0, 0.0, 0.0]);
        assert_eq!(bounds.max, [10.0, 10.0, 10.0]);
        assert_eq!(result.dimensions, Dimensions::new(10.0, 10.0, 10.0));
        assert_relative_eq!(bounds.center()[2], 5.0);
    }

    #[test]
    fn test_cube_volume_and_area() {
        let soup = cube(10.0);
        assert_relative_eq!(mesh_volume(&soup), 1000.0, epsilon = 1e-6);
        assert_relative_eq!(surface_area(&soup), 600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_volume_is_independent_of_winding_direction() {
        let soup = cube(2.0);
        let mut flipped = TriangleSoup::new();
        for i in 0..soup.num_triangles() {
            let [a, b, c] = soup.triangle(i);
            flipped.push_triangle(a, c, b);
        }
        assert_relative_eq!(mesh_volume(&flipped), 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cube_bottom_faces_are_overhangs() {
        let soup = cube(10.0);
        let normals = compute_normals(&soup);
        let result = analyze(&soup, &normals, DEFAULT_OVERHANG_THRESHOLD).unwrap();
        assert_eq!(result.overhangs.triangles, vec![0, 1]);
        assert_eq!(result.overhang_count(), 2);
    }

    #[test]
    fn test_empty_soup() {
        let soup = TriangleSoup::new();
        let normals = compute_normals(&soup);
        let result = analyze(&soup, &normals, DEFAULT_OVERHANG_THRESHOLD).unwrap();

        assert!(result.bounds.is_none());
        assert_eq!(result.dimensions, Dimensions::default());
        assert_eq!(result.volume_mm3, 0.0);
        assert_eq!(result.overhang_count(), 0);
    }

    #[test]
    fn test_mismatched_normals_rejected() {
        let soup = cube(1.0);
        let err = analyze(&soup, &NormalSet::default(), 0.15).unwrap_err();
        assert!(matches!(err, MeshError::NormalsMismatch { .. }));
    }

    #[test]
    fn test_negative_coordinates_give_positive_dimensions() {
        let mut soup = TriangleSoup::new();
        soup.push_triangle([-5.0, -2.0, -1.0], [5.0, 0.0, 0.0], [0.0, 3.0, 4.0]);
        let dims = mesh_bounds(&soup).unwrap().dimensions();
        assert_eq!(dims, Dimensions::new(10.0, 5.0, 5.0));
    }

    #[test]
    fn test_non_finite_vertices_are_skipped() {
        let mut soup = cube(10.0);
        soup.push_triangle([f32::INFINITY, 0.0, 0.0], [0.0, f32::NAN, 0.0], [0.0, 0.0, 50.0]);
        let normals = compute_normals(&soup);
        let result = analyze(&soup, &normals, DEFAULT_OVERHANG_THRESHOLD).unwrap();

        // The finite apex of the broken triangle still counts toward the bounds
        let bounds = result.bounds.unwrap();
        assert_eq!(bounds.min, [0.0, 0.0, 0.0]);
        assert_eq!(bounds.max, [10.0, 10.0, 50.0]);
        assert_relative_eq!(result.volume_mm3, 1000.0, epsilon = 1e-6);
        assert_relative_eq!(result.surface_area_mm2, 600.0, epsilon = 1e-6);
        assert!(result.dimensions.width.is_finite());
    }

    #[test]
    fn test_all_non_finite_soup_has_no_bounds() {
        let mut soup = TriangleSoup::new();
        soup.push_triangle([f32::NAN; 3], [f32::NAN; 3], [f32::NEG_INFINITY; 3]);
        let normals = compute_normals(&soup);
        let result = analyze(&soup, &normals, DEFAULT_OVERHANG_THRESHOLD).unwrap();

        assert!(result.bounds.is_none());
        assert_eq!(result.dimensions, Dimensions::default());
        assert_eq!(result.volume_mm3, 0.0);
        assert_eq!(result.surface_area_mm2, 0.0);
    }
}
