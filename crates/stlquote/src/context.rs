//! Plain-text file summary handed to chat and quoting collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};
use stlquote_mesh::Dimensions;

use crate::pipeline::ModelReport;

/// What downstream consumers are told about an uploaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContext {
    /// Original file name.
    pub file_name: String,
    /// File size (bytes).
    pub size_bytes: u64,
    /// Triangle count, if the file was analyzed.
    pub triangles: Option<usize>,
    /// Model extents, if the file was analyzed.
    pub dimensions: Option<Dimensions>,
}

impl FileContext {
    /// Context for a file that has not been analyzed.
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            triangles: None,
            dimensions: None,
        }
    }

    /// Context carrying the geometry from `report`.
    pub fn from_report(file_name: impl Into<String>, size_bytes: u64, report: &ModelReport) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
            triangles: Some(report.triangle_count),
            dimensions: Some(report.dimensions),
        }
    }

    /// Render the context block.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FileContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.file_name)?;
        write!(f, "Size: {:.2} KB", self.size_bytes as f64 / 1024.0)?;
        if let Some(triangles) = self.triangles {
            write!(f, "\nTriangles: {triangles}")?;
        }
        if let Some(d) = self.dimensions {
            write!(
                f,
                "\nDimensions: {:.2} x {:.2} x {:.2} mm",
                d.width, d.depth, d.height
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_geometry() {
        let ctx = FileContext::new("bracket.stl", 2048);
        assert_eq!(ctx.render(), "File: bracket.stl\nSize: 2.00 KB");
    }

    #[test]
    fn test_render_with_geometry() {
        let ctx = FileContext {
            triangles: Some(12),
            dimensions: Some(Dimensions::new(10.0, 20.5, 3.333)),
            ..FileContext::new("cube.stl", 684)
        };
        assert_eq!(
            ctx.render(),
            "File: cube.stl\nSize: 0.67 KB\nTriangles: 12\nDimensions: 10.00 x 20.50 x 3.33 mm"
        );
    }
}
