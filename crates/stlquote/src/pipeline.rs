//! End-to-end decode, analyze and estimate.

use serde::{Deserialize, Serialize};
use stlquote_estimate::{estimate, ManufacturingEstimate, PrintWarning};
use stlquote_mesh::{analyze, compute_normals, BoundingBox, Dimensions, NormalSet, TriangleSoup};
use stlquote_stl::{decode_with_format, StlFormat};
use tracing::{info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::Result;

/// A decoded model with its recomputed normals.
#[derive(Debug, Clone)]
pub struct DecodedModel {
    /// Encoding the buffer was decoded from.
    pub format: StlFormat,
    /// Triangle geometry.
    pub soup: TriangleSoup,
    /// One normal per triangle, replicated per vertex.
    pub normals: NormalSet,
}

impl DecodedModel {
    /// Decode `bytes` and compute normals.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (soup, format) = decode_with_format(bytes)?;
        let normals = compute_normals(&soup);
        Ok(Self {
            format,
            soup,
            normals,
        })
    }

    /// Run spatial analysis and the manufacturing estimate.
    pub fn report(&self, config: &PipelineConfig) -> Result<ModelReport> {
        config.validate()?;

        let analysis = analyze(&self.soup, &self.normals, config.overhang_threshold)?;
        let estimate = estimate(
            &analysis.dimensions,
            analysis.volume_mm3,
            analysis.overhang_count(),
            &config.estimate,
        )?;

        Ok(ModelReport {
            format: self.format,
            triangle_count: self.soup.num_triangles(),
            degenerate_triangles: self.normals.degenerate().len(),
            bounds: analysis.bounds,
            dimensions: analysis.dimensions,
            volume_mm3: analysis.volume_mm3,
            surface_area_mm2: analysis.surface_area_mm2,
            overhang_count: analysis.overhang_count(),
            overhang_triangles: analysis.overhangs.triangles,
            estimate,
        })
    }

    /// Triangles whose normals point down past `threshold`, as a new soup.
    pub fn overhang_soup(&self, threshold: f64) -> TriangleSoup {
        stlquote_mesh::detect_overhangs(&self.normals, threshold).extract(&self.soup)
    }
}

/// Everything the pipeline derives from one STL buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    /// Encoding the buffer was decoded from.
    pub format: StlFormat,
    /// Number of triangles decoded.
    pub triangle_count: usize,
    /// Number of zero-area triangles.
    pub degenerate_triangles: usize,
    /// Bounding box, `None` for an empty model.
    pub bounds: Option<BoundingBox>,
    /// Model extents (mm).
    pub dimensions: Dimensions,
    /// Enclosed volume (mm³).
    pub volume_mm3: f64,
    /// Surface area (mm²).
    pub surface_area_mm2: f64,
    /// Number of overhang triangles.
    pub overhang_count: usize,
    /// Indices of overhang triangles.
    pub overhang_triangles: Vec<usize>,
    /// Manufacturing figures.
    pub estimate: ManufacturingEstimate,
}

/// How a parsed model should be presented to a user.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnosis {
    /// Geometry is usable and no warnings were raised.
    Ready,
    /// Geometry is usable but printability warnings apply.
    Advisory(Vec<PrintWarning>),
    /// Every triangle has zero area.
    Degenerate {
        /// Number of degenerate triangles.
        count: usize,
    },
    /// No triangles were decoded.
    Empty,
}

impl ModelReport {
    /// Classify the report.
    pub fn diagnosis(&self) -> Diagnosis {
        if self.triangle_count == 0 {
            Diagnosis::Empty
        } else if self.degenerate_triangles == self.triangle_count {
            Diagnosis::Degenerate {
                count: self.degenerate_triangles,
            }
        } else if self.estimate.warnings.is_empty() {
            Diagnosis::Ready
        } else {
            Diagnosis::Advisory(self.estimate.warnings.clone())
        }
    }

    /// One-paragraph summary suitable for showing to the uploader.
    pub fn user_message(&self) -> String {
        match self.diagnosis() {
            Diagnosis::Empty => "The file parsed but contains no geometry.".to_string(),
            Diagnosis::Degenerate { count } => format!(
                "The file parsed but its geometry is degenerate: all {count} triangles have zero area."
            ),
            Diagnosis::Ready => format!(
                "Model is ready to print: {} layers, about {} minutes, {:.2} g of {}.",
                self.estimate.total_layers,
                self.estimate.print_time_minutes,
                self.estimate.weight_grams,
                self.estimate.material,
            ),
            Diagnosis::Advisory(warnings) => {
                let mut message = format!(
                    "Model parsed with {} printability warning{}:",
                    warnings.len(),
                    if warnings.len() == 1 { "" } else { "s" }
                );
                for w in &warnings {
                    message.push_str("\n- ");
                    message.push_str(&w.to_string());
                }
                message
            }
        }
    }
}

/// Decode, analyze and estimate an STL buffer.
#[instrument(skip_all, fields(len = bytes.len()))]
pub fn analyze_model(bytes: &[u8], config: &PipelineConfig) -> Result<ModelReport> {
    let model = DecodedModel::decode(bytes)?;
    let report = model.report(config)?;

    match report.diagnosis() {
        Diagnosis::Empty => warn!("model has no triangles"),
        Diagnosis::Degenerate { count } => warn!(count, "all triangles are degenerate"),
        _ => info!(
            triangles = report.triangle_count,
            overhangs = report.overhang_count,
            warnings = report.estimate.warnings.len(),
            "model analyzed"
        ),
    }

    Ok(report)
}
