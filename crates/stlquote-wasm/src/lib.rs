//! WASM bindings for the stlquote pipeline.

use serde::{Deserialize, Serialize};
use stlquote::{
    analyze_model, DecodedModel, Diagnosis, MaterialProfile, ModelReport, PipelineConfig,
};
use stlquote_mesh::{compute_normals, detect_overhangs, TriangleSoup};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Estimate settings for WASM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[wasm_bindgen]
pub struct WasmEstimateSettings {
    /// Layer height (mm).
    pub layer_height: f64,
    /// Material (0=PLA, 1=PETG, 2=ABS).
    pub material: u32,
    /// Electricity price (USD per kWh).
    pub price_per_kwh: f64,
    /// Normal Z below minus this value marks an overhang.
    pub overhang_threshold: f64,
}

#[wasm_bindgen]
impl WasmEstimateSettings {
    /// Create default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        Self {
            layer_height: config.estimate.layer_height_mm,
            material: 0,
            price_per_kwh: config.estimate.price_per_kwh,
            overhang_threshold: config.overhang_threshold,
        }
    }

    /// Create from JSON.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmEstimateSettings, JsError> {
        serde_json::from_str(json).map_err(js_err)
    }

    /// Convert to JSON.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self).map_err(js_err)
    }
}

impl Default for WasmEstimateSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&WasmEstimateSettings> for PipelineConfig {
    fn from(settings: &WasmEstimateSettings) -> Self {
        let mut config = PipelineConfig {
            overhang_threshold: settings.overhang_threshold,
            ..Default::default()
        };
        config.estimate.layer_height_mm = settings.layer_height;
        config.estimate.price_per_kwh = settings.price_per_kwh;
        config.estimate.material = match settings.material {
            1 => MaterialProfile::petg(),
            2 => MaterialProfile::abs(),
            _ => MaterialProfile::pla(),
        };
        config
    }
}

/// Analysis result for WASM.
#[wasm_bindgen]
pub struct WasmModelReport {
    inner: ModelReport,
}

#[wasm_bindgen]
impl WasmModelReport {
    /// Number of triangles.
    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.inner.triangle_count
    }

    /// X extent (mm).
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.dimensions.width
    }

    /// Y extent (mm).
    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> f64 {
        self.inner.dimensions.depth
    }

    /// Z extent (mm).
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.dimensions.height
    }

    /// Volume in cm³.
    #[wasm_bindgen(getter, js_name = volumeCm3)]
    pub fn volume_cm3(&self) -> f64 {
        self.inner.estimate.volume_cm3
    }

    /// Number of triangles flagged as overhangs.
    #[wasm_bindgen(getter, js_name = overhangCount)]
    pub fn overhang_count(&self) -> usize {
        self.inner.overhang_count
    }

    /// Layer count at the configured layer height.
    #[wasm_bindgen(getter, js_name = totalLayers)]
    pub fn total_layers(&self) -> u32 {
        self.inner.estimate.total_layers
    }

    /// Estimated print time in whole minutes.
    #[wasm_bindgen(getter, js_name = printTimeMinutes)]
    pub fn print_time_minutes(&self) -> f64 {
        self.inner.estimate.print_time_minutes as f64
    }

    /// Filament weight (g).
    #[wasm_bindgen(getter, js_name = weightGrams)]
    pub fn weight_grams(&self) -> f64 {
        self.inner.estimate.weight_grams
    }

    /// Filament length (m).
    #[wasm_bindgen(getter, js_name = filamentMeters)]
    pub fn filament_meters(&self) -> f64 {
        self.inner.estimate.filament_meters
    }

    /// Total cost in USD, material plus electricity.
    #[wasm_bindgen(getter)]
    pub fn cost(&self) -> f64 {
        self.inner.estimate.cost
    }

    /// True when no printability warnings were raised.
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.inner.estimate.valid
    }

    /// True when the model has no triangles or only zero-area ones.
    #[wasm_bindgen(getter, js_name = isDegenerate)]
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self.inner.diagnosis(),
            Diagnosis::Empty | Diagnosis::Degenerate { .. }
        )
    }

    /// Warning messages.
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> js_sys::Array {
        self.inner
            .estimate
            .warnings
            .iter()
            .map(|w| JsValue::from_str(&w.to_string()))
            .collect()
    }

    /// Summary for the uploader.
    #[wasm_bindgen(js_name = userMessage)]
    pub fn user_message(&self) -> String {
        self.inner.user_message()
    }

    /// Full report as JSON.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.inner).map_err(js_err)
    }
}

/// Decode STL bytes into a flat vertex array (9 floats per triangle).
#[wasm_bindgen(js_name = decodeStl)]
pub fn decode_stl(bytes: &[u8]) -> Result<Vec<f32>, JsError> {
    let model = DecodedModel::decode(bytes).map_err(js_err)?;
    Ok(model.soup.into_vertices())
}

/// Per-vertex normals for a flat vertex array.
#[wasm_bindgen(js_name = computeNormals)]
pub fn compute_normals_js(vertices: &[f32]) -> Result<Vec<f32>, JsError> {
    let soup = TriangleSoup::from_vertices(vertices.to_vec()).map_err(js_err)?;
    Ok(compute_normals(&soup).into_normals())
}

/// Decode, analyze and estimate STL bytes.
#[wasm_bindgen(js_name = analyzeStl)]
pub fn analyze_stl(
    bytes: &[u8],
    settings: &WasmEstimateSettings,
) -> Result<WasmModelReport, JsError> {
    let config = PipelineConfig::from(settings);
    let inner = analyze_model(bytes, &config).map_err(js_err)?;
    Ok(WasmModelReport { inner })
}

/// Vertices of the overhanging triangles, for highlighting in the viewer.
#[wasm_bindgen(js_name = overhangGeometry)]
pub fn overhang_geometry(vertices: &[f32], threshold: f64) -> Result<Vec<f32>, JsError> {
    let soup = TriangleSoup::from_vertices(vertices.to_vec()).map_err(js_err)?;
    let normals = compute_normals(&soup);
    Ok(detect_overhangs(&normals, threshold)
        .extract(&soup)
        .into_vertices())
}

/// Common layer height closest to `height / layers`.
#[wasm_bindgen(js_name = snapLayerHeight)]
pub fn snap_layer_height(height: f64, layers: u32) -> f64 {
    stlquote::snap_layer_height(height, layers)
}

/// Slice plane position for a layer slider.
#[wasm_bindgen(js_name = layerPreview)]
pub fn layer_preview(height: f64, total_layers: u32, layer: u32) -> Result<JsValue, JsError> {
    let preview = stlquote::layer_preview(height, total_layers, layer);
    serde_wasm_bindgen::to_value(&preview).map_err(js_err)
}

/// Get available material profiles.
#[wasm_bindgen(js_name = getMaterialProfiles)]
pub fn get_material_profiles() -> Result<JsValue, JsError> {
    let profiles: Vec<MaterialInfo> = MaterialProfile::all_profiles()
        .into_iter()
        .enumerate()
        .map(|(id, p)| MaterialInfo {
            id: id as u32,
            name: p.name,
            density_g_cm3: p.density_g_cm3,
            filament_diameter_mm: p.filament_diameter_mm,
            price_per_kg: p.price_per_kg,
        })
        .collect();

    serde_wasm_bindgen::to_value(&profiles).map_err(js_err)
}

#[derive(Serialize)]
struct MaterialInfo {
    id: u32,
    name: String,
    density_g_cm3: f64,
    filament_diameter_mm: f64,
    price_per_kg: f64,
}
