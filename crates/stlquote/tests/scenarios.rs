//! End-to-end scenarios through the public API.

use approx::assert_relative_eq;
use stlquote::{
    analyze_model, encode_ascii, encode_binary, DecodedModel, Diagnosis, FileContext,
    PipelineConfig, PipelineError, StlError, StlFormat, SupportMaterial, TriangleSoup,
};

fn box_soup(w: f32, d: f32, h: f32) -> TriangleSoup {
    let p = [
        [0.0, 0.0, 0.0],
        [w, 0.0, 0.0],
        [w, d, 0.0],
        [0.0, d, 0.0],
        [0.0, 0.0, h],
        [w, 0.0, h],
        [w, d, h],
        [0.0, d, h],
    ];
    let faces = [
        [0, 2, 1], [0, 3, 2],
        [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4],
        [2, 3, 7], [2, 7, 6],
        [0, 4, 7], [0, 7, 3],
        [1, 2, 6], [1, 6, 5],
    ];
    let mut soup = TriangleSoup::with_capacity(faces.len());
    for [a, b, c] in faces {
        soup.push_triangle(p[a], p[b], p[c]);
    }
    soup
}

#[test]
fn binary_cube_quote() {
    let bytes = encode_binary(&box_soup(10.0, 10.0, 10.0), "cube");
    assert_eq!(bytes.len(), 84 + 12 * 50);

    let report = analyze_model(&bytes, &PipelineConfig::default()).unwrap();
    let est = &report.estimate;

    assert_eq!(report.triangle_count, 12);
    assert_eq!(est.total_layers, 50);
    assert_relative_eq!(est.volume_cm3, 1.0, epsilon = 1e-6);
    assert_relative_eq!(est.weight_grams, 1.24, epsilon = 1e-6);
    assert_relative_eq!(est.filament_mm, 415.8, epsilon = 0.1);
    // The two bottom faces face the bed
    assert_eq!(report.overhang_count, 2);
    assert_eq!(est.support.material, SupportMaterial::Pva);
}

#[test]
fn ascii_and_binary_agree() {
    let soup = box_soup(30.0, 20.0, 10.0);
    let config = PipelineConfig::default();

    let from_binary = analyze_model(&encode_binary(&soup, "box"), &config).unwrap();
    let from_ascii = analyze_model(encode_ascii(&soup, "box").as_bytes(), &config).unwrap();

    assert_eq!(from_binary.format, StlFormat::Binary);
    assert_eq!(from_ascii.format, StlFormat::Ascii);
    assert_eq!(from_binary.triangle_count, from_ascii.triangle_count);
    assert_eq!(from_binary.dimensions, from_ascii.dimensions);
    assert_relative_eq!(from_binary.volume_mm3, from_ascii.volume_mm3, epsilon = 1e-6);
    assert_eq!(from_binary.overhang_triangles, from_ascii.overhang_triangles);
}

#[test]
fn empty_ascii_file() {
    let report = analyze_model(b"solid empty\nendsolid empty\n", &PipelineConfig::default()).unwrap();
    assert_eq!(report.triangle_count, 0);
    assert!(report.bounds.is_none());
    assert_eq!(report.overhang_count, 0);
    assert_eq!(report.diagnosis(), Diagnosis::Empty);
}

#[test]
fn truncated_binary_is_rejected() {
    let mut bytes = encode_binary(&box_soup(10.0, 10.0, 10.0), "cube");
    bytes.truncate(bytes.len() - 10);

    let err = analyze_model(&bytes, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Stl(StlError::MalformedInput { declared: 12, .. })
    ));
}

#[test]
fn solid_header_binary_survives_a_short_write() {
    let mut bytes = encode_binary(&box_soup(10.0, 10.0, 10.0), "solid cube exported by CAD");
    let config = PipelineConfig::default();

    bytes.push(0);
    let report = analyze_model(&bytes, &config).unwrap();
    assert_eq!(report.format, StlFormat::Binary);
    assert_eq!(report.triangle_count, 12);

    bytes.truncate(bytes.len() - 11);
    let err = analyze_model(&bytes, &config).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Stl(StlError::MalformedInput { declared: 12, .. })
    ));
}

#[test]
fn nan_vertex_in_binary_is_rejected() {
    let mut soup = box_soup(10.0, 10.0, 10.0);
    soup.push_triangle([0.0, 0.0, 0.0], [f32::NAN, 1.0, 0.0], [1.0, 0.0, 0.0]);

    let err = analyze_model(&encode_binary(&soup, "cube"), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Stl(StlError::NonFiniteVertex { triangle: 12 })
    ));
}

#[test]
fn config_changes_the_quote() {
    let bytes = encode_binary(&box_soup(20.0, 20.0, 20.0), "cube");
    let config = PipelineConfig::from_toml_str(
        r#"
        [estimate]
        layer_height_mm = 0.1

        [estimate.material]
        name = "PETG"
        density_g_cm3 = 1.27
        price_per_kg = 25.0
        "#,
    )
    .unwrap();

    let report = analyze_model(&bytes, &config).unwrap();
    assert_eq!(report.estimate.total_layers, 200);
    assert_relative_eq!(report.estimate.weight_grams, 8.0 * 1.27, epsilon = 1e-6);
    assert_eq!(report.estimate.material, "PETG");
}

#[test]
fn raised_threshold_hides_gentle_slopes() {
    // Downward-facing slope with normal Z of about -0.89
    let mut soup = TriangleSoup::new();
    soup.push_triangle([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.5]);
    let model = DecodedModel::decode(&encode_binary(&soup, "slope")).unwrap();

    assert_eq!(model.overhang_soup(0.15).num_triangles(), 1);
    assert_eq!(model.overhang_soup(0.95).num_triangles(), 0);
}

#[test]
fn file_context_from_report() {
    let bytes = encode_binary(&box_soup(10.0, 20.0, 5.0), "plate");
    let report = analyze_model(&bytes, &PipelineConfig::default()).unwrap();
    let ctx = FileContext::from_report("plate.stl", bytes.len() as u64, &report);

    assert_eq!(
        ctx.render(),
        "File: plate.stl\nSize: 0.67 KB\nTriangles: 12\nDimensions: 10.00 x 20.00 x 5.00 mm"
    );
}
