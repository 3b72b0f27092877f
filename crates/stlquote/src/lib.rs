#![warn(missing_docs)]

//! STL decode-and-analyze pipeline for 3D print quoting.
//!
//! Ties the stage crates together: [`stlquote_stl`] decodes bytes into a
//! triangle soup, [`stlquote_mesh`] computes normals and spatial metrics,
//! and [`stlquote_estimate`] turns those into manufacturing figures.
//!
//! # Example
//!
//! ```
//! use stlquote::{analyze_model, Diagnosis, PipelineConfig};
//!
//! let report = analyze_model(b"solid empty\nendsolid empty\n", &PipelineConfig::default()).unwrap();
//! assert_eq!(report.triangle_count, 0);
//! assert_eq!(report.diagnosis(), Diagnosis::Empty);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use context::FileContext;
pub use error::{PipelineError, Result};
pub use pipeline::{analyze_model, DecodedModel, Diagnosis, ModelReport};

pub use stlquote_estimate::{
    layer_preview, snap_layer_height, EstimateSettings, LayerPreview, ManufacturingEstimate,
    MaterialProfile, PrintWarning, PrintabilityLimits, SupportMaterial, SupportProfile,
};
pub use stlquote_mesh::{BoundingBox, Dimensions, NormalSet, TriangleSoup};
pub use stlquote_stl::{encode_ascii, encode_binary, StlError, StlFormat};
