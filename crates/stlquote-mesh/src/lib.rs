#![warn(missing_docs)]

//! Triangle soup geometry for stlquote.
//!
//! This crate holds the in-memory model produced by the STL decoder and
//! the two geometric stages that follow it: per-triangle normal
//! estimation and spatial analysis (bounds, dimensions, volume, surface
//! area and overhang detection).
//!
//! All coordinates are millimeters. Every function is a pure pass over
//! its inputs.
//!
//! # Example
//!
//! ```
//! use stlquote_mesh::{analyze, compute_normals, TriangleSoup, DEFAULT_OVERHANG_THRESHOLD};
//!
//! let mut soup = TriangleSoup::new();
//! soup.push_triangle([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
//!
//! let normals = compute_normals(&soup);
//! let analysis = analyze(&soup, &normals, DEFAULT_OVERHANG_THRESHOLD).unwrap();
//! assert_eq!(analysis.overhang_count(), 1);
//! ```

pub mod analysis;
pub mod error;
pub mod normals;
pub mod overhang;
pub mod soup;

pub use analysis::{analyze, mesh_bounds, mesh_volume, surface_area, BoundingBox, Dimensions, SpatialAnalysis};
pub use error::{MeshError, Result};
pub use normals::{compute_normals, NormalSet};
pub use overhang::{detect_overhangs, extract_triangles, OverhangSet, DEFAULT_OVERHANG_THRESHOLD};
pub use soup::{TriangleSoup, FLOATS_PER_TRIANGLE};
