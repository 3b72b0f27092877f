//! Advisory printability checks.

use serde::{Deserialize, Serialize};
use stlquote_mesh::Dimensions;

/// Thresholds for printability warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintabilityLimits {
    /// Heights below this risk poor bed adhesion (mm).
    pub min_height_mm: f64,
    /// Heights above this risk instability (mm).
    pub max_height_mm: f64,
    /// Height / min(width, depth) above this may topple.
    pub max_aspect_ratio: f64,
    /// Height / min(width, depth) below this may warp.
    pub min_aspect_ratio: f64,
    /// Volumes below this lose detail (cm³).
    pub min_volume_cm3: f64,
    /// Volumes above this may not fit the bed (cm³).
    pub max_volume_cm3: f64,
    /// Overhang triangle counts above this need extensive support.
    pub max_overhangs: usize,
}

impl Default for PrintabilityLimits {
    fn default() -> Self {
        Self {
            min_height_mm: 5.0,
            max_height_mm: 300.0,
            max_aspect_ratio: 10.0,
            min_aspect_ratio: 0.1,
            min_volume_cm3: 1.0,
            max_volume_cm3: 500.0,
            max_overhangs: 100,
        }
    }
}

/// A non-blocking printability concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrintWarning {
    /// Model is very short.
    TooShort {
        /// Model height (mm).
        height_mm: f64,
    },
    /// Model is very tall.
    TooTall {
        /// Model height (mm).
        height_mm: f64,
    },
    /// Tall and thin.
    TooSlender {
        /// Height / min(width, depth).
        aspect_ratio: f64,
    },
    /// Very flat.
    TooFlat {
        /// Height / min(width, depth).
        aspect_ratio: f64,
    },
    /// Very small volume.
    TooSmall {
        /// Model volume (cm³).
        volume_cm3: f64,
    },
    /// Very large volume.
    TooLarge {
        /// Model volume (cm³).
        volume_cm3: f64,
    },
    /// Many overhanging faces.
    ExtensiveSupport {
        /// Overhang triangle count.
        overhangs: usize,
    },
}

impl std::fmt::Display for PrintWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintWarning::TooShort { height_mm } => write!(
                f,
                "model is very short ({height_mm:.1} mm): bed adhesion may be difficult"
            ),
            PrintWarning::TooTall { height_mm } => write!(
                f,
                "model is very tall ({height_mm:.1} mm): ensure stable printing"
            ),
            PrintWarning::TooSlender { aspect_ratio } => write!(
                f,
                "model is tall and thin (aspect ratio {aspect_ratio:.1}): may topple during printing"
            ),
            PrintWarning::TooFlat { aspect_ratio } => write!(
                f,
                "model is very flat (aspect ratio {aspect_ratio:.2}): may warp"
            ),
            PrintWarning::TooSmall { volume_cm3 } => write!(
                f,
                "model is very small ({volume_cm3:.2} cm³): fine details may be lost"
            ),
            PrintWarning::TooLarge { volume_cm3 } => write!(
                f,
                "model is very large ({volume_cm3:.1} cm³): check that it fits the bed"
            ),
            PrintWarning::ExtensiveSupport { overhangs } => write!(
                f,
                "{overhangs} overhanging faces: extensive support material needed"
            ),
        }
    }
}

/// Check a model against `limits`.
///
/// The aspect-ratio checks are skipped when the model has no footprint.
pub fn validate_model(
    dimensions: &Dimensions,
    volume_cm3: f64,
    overhang_count: usize,
    limits: &PrintabilityLimits,
) -> Vec<PrintWarning> {
    let mut warnings = Vec::new();
    let height_mm = dimensions.height;

    if height_mm < limits.min_height_mm {
        warnings.push(PrintWarning::TooShort { height_mm });
    }
    if height_mm > limits.max_height_mm {
        warnings.push(PrintWarning::TooTall { height_mm });
    }

    let min_xy = dimensions.width.min(dimensions.depth);
    if min_xy > 0.0 {
        let aspect_ratio = height_mm / min_xy;
        if aspect_ratio > limits.max_aspect_ratio {
            warnings.push(PrintWarning::TooSlender { aspect_ratio });
        }
        if aspect_ratio < limits.min_aspect_ratio {
            warnings.push(PrintWarning::TooFlat { aspect_ratio });
        }
    }

    if volume_cm3 < limits.min_volume_cm3 {
        warnings.push(PrintWarning::TooSmall { volume_cm3 });
    }
    if volume_cm3 > limits.max_volume_cm3 {
        warnings.push(PrintWarning::TooLarge { volume_cm3 });
    }

    if overhang_count > limits.max_overhangs {
        warnings.push(PrintWarning::ExtensiveSupport {
            overhangs: overhang_count,
        });
    }

    warnings
}
