#![warn(missing_docs)]

//! Manufacturing estimates for stlquote.
//!
//! Turns model dimensions, volume and overhang count into FDM print
//! figures: layer count, print time, filament length and weight, support
//! material, cost, and advisory printability warnings.
//!
//! Volumes come in as mm³ (as measured from the mesh) and are converted to
//! cm³ exactly once before density-based formulas.
//!
//! # Example
//!
//! ```
//! use stlquote_estimate::{estimate, EstimateSettings};
//! use stlquote_mesh::Dimensions;
//!
//! let dims = Dimensions::new(10.0, 10.0, 10.0);
//! let result = estimate(&dims, 1000.0, 0, &EstimateSettings::default()).unwrap();
//! assert_eq!(result.total_layers, 50);
//! ```

pub mod cost;
pub mod error;
pub mod layers;
pub mod material;
pub mod validation;

pub use cost::{estimate_print_cost, round_cents};
pub use error::{EstimateError, Result};
pub use layers::{
    layer_preview, snap_layer_height, total_layers, LayerPreview, COMMON_LAYER_HEIGHTS,
    DEFAULT_LAYER_HEIGHT,
};
pub use material::{MaterialProfile, SupportMaterial, SupportProfile};
pub use validation::{validate_model, PrintWarning, PrintabilityLimits};

use serde::{Deserialize, Serialize};
use stlquote_mesh::Dimensions;
use tracing::{debug, instrument};

/// Footprint area deposited per second by the print-time heuristic (mm²/s).
pub const PRINT_RATE_MM2_PER_SECOND: f64 = 50.0;

/// Cubic millimeters per cubic centimeter.
pub const MM3_PER_CM3: f64 = 1000.0;

/// Estimation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateSettings {
    /// Layer height (mm).
    pub layer_height_mm: f64,
    /// Electricity price (USD per kWh).
    pub price_per_kwh: f64,
    /// Energy used per kilogram of printed material (kWh/kg).
    pub kwh_per_kg: f64,
    /// Model material.
    pub material: MaterialProfile,
    /// Support material used when overhangs are present.
    pub support: SupportProfile,
    /// Printability warning thresholds.
    pub limits: PrintabilityLimits,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        Self {
            layer_height_mm: DEFAULT_LAYER_HEIGHT,
            material: MaterialProfile::pla(),
            support: SupportProfile::pva(),
            price_per_kwh: 0.15,
            kwh_per_kg: 0.05,
            limits: PrintabilityLimits::default(),
        }
    }
}

impl EstimateSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.layer_height_mm > 0.0 && self.layer_height_mm <= 1.0) {
            return Err(EstimateError::InvalidSettings(
                "layer_height_mm must be between 0 and 1mm".into(),
            ));
        }
        if !(self.material.density_g_cm3 > 0.0) {
            return Err(EstimateError::InvalidSettings(
                "material density must be positive".into(),
            ));
        }
        if !(self.material.filament_diameter_mm > 0.0) {
            return Err(EstimateError::InvalidSettings(
                "filament diameter must be positive".into(),
            ));
        }
        if !(self.material.price_per_kg >= 0.0) {
            return Err(EstimateError::InvalidSettings(
                "material price must not be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.support.volume_fraction) {
            return Err(EstimateError::InvalidSettings(
                "support volume_fraction must be between 0 and 1".into(),
            ));
        }
        if !(self.support.density_g_cm3 >= 0.0) {
            return Err(EstimateError::InvalidSettings(
                "support density must not be negative".into(),
            ));
        }
        if !(self.price_per_kwh >= 0.0 && self.kwh_per_kg >= 0.0) {
            return Err(EstimateError::InvalidSettings(
                "electricity figures must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Support material needed for overhangs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportEstimate {
    /// Support volume (cm³).
    pub volume_cm3: f64,
    /// Support weight (g).
    pub weight_grams: f64,
    /// Support material.
    pub material: SupportMaterial,
}

impl SupportEstimate {
    /// True if any support is required.
    pub fn is_needed(&self) -> bool {
        self.material != SupportMaterial::None
    }
}

/// Estimate support material for a model of `volume_cm3` with
/// `overhang_count` overhanging faces.
pub fn estimate_support(
    volume_cm3: f64,
    overhang_count: usize,
    profile: &SupportProfile,
) -> SupportEstimate {
    if overhang_count == 0 {
        return SupportEstimate::default();
    }
    let volume_cm3 = volume_cm3 * profile.volume_fraction;
    SupportEstimate {
        volume_cm3,
        weight_grams: volume_cm3 * profile.density_g_cm3,
        material: profile.material,
    }
}

/// Derived manufacturing figures for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingEstimate {
    /// Material profile name.
    pub material: String,
    /// Layer height used (mm).
    pub layer_height_mm: f64,
    /// Number of layers.
    pub total_layers: u32,
    /// Estimated print time (minutes). A footprint-times-layers heuristic,
    /// not a slicer simulation.
    pub print_time_minutes: u64,
    /// Model volume (cm³).
    pub volume_cm3: f64,
    /// Model weight (g).
    pub weight_grams: f64,
    /// Filament length (mm).
    pub filament_mm: f64,
    /// Filament length (m).
    pub filament_meters: f64,
    /// Support material.
    pub support: SupportEstimate,
    /// Overhanging face count the estimate was based on.
    pub overhang_count: usize,
    /// Estimated cost (USD, two decimals).
    pub cost: f64,
    /// Printability warnings.
    pub warnings: Vec<PrintWarning>,
    /// True when there are no warnings.
    pub valid: bool,
}

/// Estimate print figures for a model.
///
/// `volume_mm3` is the mesh volume in cubic millimeters.
#[instrument(skip_all, fields(volume_mm3 = volume_mm3, overhang_count = overhang_count, layer_height = settings.layer_height_mm))]
pub fn estimate(
    dimensions: &Dimensions,
    volume_mm3: f64,
    overhang_count: usize,
    settings: &EstimateSettings,
) -> Result<ManufacturingEstimate> {
    settings.validate()?;

    let total_layers = total_layers(dimensions.height, settings.layer_height_mm);
    let footprint = dimensions.width * dimensions.depth;
    let print_time_minutes =
        (footprint * total_layers as f64 / PRINT_RATE_MM2_PER_SECOND / 60.0).round() as u64;

    let volume_cm3 = volume_mm3 / MM3_PER_CM3;
    let weight_grams = volume_cm3 * settings.material.density_g_cm3;

    // Extruded length = volume / filament cross-section
    let filament_mm = volume_mm3 / settings.material.filament_area_mm2();

    let support = estimate_support(volume_cm3, overhang_count, &settings.support);
    let cost = estimate_print_cost(
        weight_grams,
        settings.material.price_per_kg,
        settings.kwh_per_kg,
        settings.price_per_kwh,
    );

    let warnings = validate_model(dimensions, volume_cm3, overhang_count, &settings.limits);

    debug!(
        total_layers,
        print_time_minutes,
        weight_grams,
        warnings = warnings.len(),
        "estimate complete"
    );

    Ok(ManufacturingEstimate {
        material: settings.material.name.clone(),
        layer_height_mm: settings.layer_height_mm,
        total_layers,
        print_time_minutes,
        volume_cm3,
        weight_grams,
        filament_mm,
        filament_meters: filament_mm / 1000.0,
        support,
        overhang_count,
        cost,
        valid: warnings.is_empty(),
        warnings,
    })
}
