//! Pipeline configuration.
//!
//! Configuration is TOML. Every key is optional:
//!
//! ```toml
//! overhang_threshold = 0.15
//!
//! [estimate]
//! layer_height_mm = 0.2
//! price_per_kwh = 0.15
//!
//! [estimate.material]
//! name = "PETG"
//! density_g_cm3 = 1.27
//!
//! [estimate.limits]
//! max_height_mm = 250.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use stlquote_estimate::EstimateSettings;
use stlquote_mesh::DEFAULT_OVERHANG_THRESHOLD;

use crate::error::{PipelineError, Result};

/// Settings for a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Averaged normal Z below `-overhang_threshold` marks an overhang.
    pub overhang_threshold: f64,
    /// Manufacturing estimate settings.
    pub estimate: EstimateSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            overhang_threshold: DEFAULT_OVERHANG_THRESHOLD,
            estimate: EstimateSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.overhang_threshold > -1.0 && self.overhang_threshold < 1.0) {
            return Err(PipelineError::Config(
                "overhang_threshold must be between -1 and 1".into(),
            ));
        }
        self.estimate.validate()?;
        Ok(())
    }
}
