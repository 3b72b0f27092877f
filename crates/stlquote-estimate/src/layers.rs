//! Layer counting, layer-height snapping and slice preview.

use serde::{Deserialize, Serialize};

/// Layer heights offered by typical FDM profiles (mm).
pub const COMMON_LAYER_HEIGHTS: [f64; 5] = [0.1, 0.15, 0.2, 0.25, 0.3];

/// Layer height used when no better choice exists (mm).
pub const DEFAULT_LAYER_HEIGHT: f64 = 0.2;

/// Number of layers needed for a model of `model_height` mm.
///
/// Always at least 1. `layer_height` must be positive.
pub fn total_layers(model_height: f64, layer_height: f64) -> u32 {
    (model_height / layer_height).round().max(1.0) as u32
}

/// Pick the common layer height closest to `model_height / desired_layers`.
///
/// Returns [`DEFAULT_LAYER_HEIGHT`] when `desired_layers` is zero. On a tie
/// the smaller height wins.
pub fn snap_layer_height(model_height: f64, desired_layers: u32) -> f64 {
    if desired_layers == 0 {
        return DEFAULT_LAYER_HEIGHT;
    }
    let raw = model_height / desired_layers as f64;
    COMMON_LAYER_HEIGHTS
        .iter()
        .copied()
        .fold(COMMON_LAYER_HEIGHTS[0], |best, h| {
            if (h - raw).abs() < (best - raw).abs() {
                h
            } else {
                best
            }
        })
}

/// Position of a slice plane while stepping through layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerPreview {
    /// Layer shown, clamped to the layer count.
    pub layer: u32,
    /// Height of the slice plane above the model base (mm).
    pub z_mm: f64,
    /// Progress through the print (0-100).
    pub progress_percent: f64,
}

/// Slice plane for `layer` of a model `model_height` mm tall.
pub fn layer_preview(model_height: f64, total_layers: u32, layer: u32) -> LayerPreview {
    let layer = layer.min(total_layers);
    let z_mm = model_height * (layer as f64 / total_layers.max(1) as f64);
    let progress_percent = if total_layers > 0 {
        layer as f64 / total_layers as f64 * 100.0
    } else {
        0.0
    };
    LayerPreview {
        layer,
        z_mm,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_total_layers() {
        assert_eq!(total_layers(10.0, 0.2), 50);
        assert_eq!(total_layers(0.0, 0.2), 1);
        assert_eq!(total_layers(0.05, 0.2), 1);
    }

    #[test]
    fn test_total_layers_monotonic_in_layer_height() {
        let mut previous = u32::MAX;
        for step in 1..=30 {
            let lh = step as f64 * 0.01;
            let layers = total_layers(37.3, lh);
            assert!(layers <= previous, "layer height {lh}");
            previous = layers;
        }
    }

    #[test]
    fn test_snap_layer_height() {
        assert_relative_eq!(snap_layer_height(10.0, 100), 0.1);
        assert_relative_eq!(snap_layer_height(10.0, 50), 0.2);
        assert_relative_eq!(snap_layer_height(10.0, 10), 0.3);
        assert_relative_eq!(snap_layer_height(10.0, 1000), 0.1);
        assert_relative_eq!(snap_layer_height(10.0, 0), 0.2);
        assert_relative_eq!(snap_layer_height(10.0, 42), 0.25);
    }

    #[test]
    fn test_layer_preview() {
        let p = layer_preview(10.0, 50, 25);
        assert_eq!(p.layer, 25);
        assert_relative_eq!(p.z_mm, 5.0);
        assert_relative_eq!(p.progress_percent, 50.0);

        let clamped = layer_preview(10.0, 50, 80);
        assert_eq!(clamped.layer, 50);
        assert_relative_eq!(clamped.z_mm, 10.0);

        let none = layer_preview(10.0, 0, 3);
        assert_eq!(none.layer, 0);
        assert_relative_eq!(none.progress_percent, 0.0);
    }
}
