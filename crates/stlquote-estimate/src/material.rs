//! Filament and support material profiles.

use serde::{Deserialize, Serialize};

/// Model material (filament) profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialProfile {
    /// Profile name.
    pub name: String,
    /// Density (g/cm³).
    pub density_g_cm3: f64,
    /// Filament diameter (mm).
    pub filament_diameter_mm: f64,
    /// Filament price (USD per kg).
    pub price_per_kg: f64,
}

impl Default for MaterialProfile {
    fn default() -> Self {
        Self::pla()
    }
}

impl MaterialProfile {
    /// PLA, 1.75 mm.
    pub fn pla() -> Self {
        Self {
            name: "PLA".into(),
            density_g_cm3: 1.24,
            filament_diameter_mm: 1.75,
            price_per_kg: 20.0,
        }
    }

    /// PETG, 1.75 mm.
    pub fn petg() -> Self {
        Self {
            name: "PETG".into(),
            density_g_cm3: 1.27,
            filament_diameter_mm: 1.75,
            price_per_kg: 25.0,
        }
    }

    /// ABS, 1.75 mm.
    pub fn abs() -> Self {
        Self {
            name: "ABS".into(),
            density_g_cm3: 1.04,
            filament_diameter_mm: 1.75,
            price_per_kg: 22.0,
        }
    }

    /// All built-in profiles.
    pub fn all_profiles() -> Vec<Self> {
        vec![Self::pla(), Self::petg(), Self::abs()]
    }

    /// Look up a built-in profile by case-insensitive name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::all_profiles()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Cross-sectional area of the filament (mm²).
    pub fn filament_area_mm2(&self) -> f64 {
        let r = self.filament_diameter_mm / 2.0;
        std::f64::consts::PI * r * r
    }
}

/// Support structure material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SupportMaterial {
    /// No support needed.
    #[default]
    None,
    /// Water-soluble PVA.
    #[serde(rename = "PVA")]
    Pva,
}

impl std::fmt::Display for SupportMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupportMaterial::None => write!(f, "None"),
            SupportMaterial::Pva => write!(f, "PVA"),
        }
    }
}

/// How support material is estimated when overhangs are present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportProfile {
    /// Material used for supports.
    pub material: SupportMaterial,
    /// Support volume as a fraction of model volume.
    pub volume_fraction: f64,
    /// Support material density (g/cm³).
    pub density_g_cm3: f64,
}

impl Default for SupportProfile {
    fn default() -> Self {
        Self::pva()
    }
}

impl SupportProfile {
    /// PVA supports at 15% of model volume.
    pub fn pva() -> Self {
        Self {
            material: SupportMaterial::Pva,
            volume_fraction: 0.15,
            density_g_cm3: 1.0,
        }
    }
}
