//! ASCII STL reading and writing.
//!
//! Only `vertex` lines carry geometry; `solid`, `facet normal`,
//! `outer loop`, `endloop`, `endfacet` and `endsolid` are structure that
//! the reader skips over.

use std::fmt::Write;

use stlquote_mesh::{compute_normals, TriangleSoup};
use tracing::warn;

/// Decode ASCII STL text.
///
/// Every `vertex` keyword followed by three numbers contributes one vertex,
/// in document order. Text without any vertex yields an empty soup. A
/// trailing incomplete triangle is dropped.
pub fn decode_ascii(bytes: &[u8]) -> TriangleSoup {
    let text = String::from_utf8_lossy(bytes);
    let mut coords: Vec<f32> = Vec::new();

    let mut tokens = text.split_ascii_whitespace();
    while let Some(token) = tokens.next() {
        if !token.eq_ignore_ascii_case("vertex") {
            continue;
        }
        let mut lookahead = tokens.clone();
        let parsed = (
            lookahead.next().and_then(parse_float),
            lookahead.next().and_then(parse_float),
            lookahead.next().and_then(parse_float),
        );
        if let (Some(x), Some(y), Some(z)) = parsed {
            coords.extend_from_slice(&[x, y, z]);
            tokens = lookahead;
        }
    }

    let whole = coords.len() - coords.len() % 9;
    if whole != coords.len() {
        warn!(
            vertices = coords.len() / 3,
            "dropping incomplete trailing triangle"
        );
        coords.truncate(whole);
    }

    let mut soup = TriangleSoup::with_capacity(coords.len() / 9);
    for t in coords.chunks_exact(9) {
        soup.push_triangle([t[0], t[1], t[2]], [t[3], t[4], t[5]], [t[6], t[7], t[8]]);
    }
    soup
}

/// Parse a decimal float: optional sign, digits with optional fraction,
/// optional exponent. Rejects `inf`, `nan` and other non-numeric forms.
fn parse_float(token: &str) -> Option<f32> {
    let bytes = token.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return None;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }
    if i != bytes.len() {
        return None;
    }

    token.parse().ok()
}

/// Encode a soup as ASCII STL with recomputed normals.
pub fn encode_ascii(soup: &TriangleSoup, name: &str) -> String {
    let normals = compute_normals(soup);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "solid {name}");
    for i in 0..soup.num_triangles() {
        let [nx, ny, nz] = normals.triangle_normal(i);
        let _ = writeln!(out, "  facet normal {nx:.6e} {ny:.6e} {nz:.6e}");
        let _ = writeln!(out, "    outer loop");
        for [x, y, z] in soup.triangle(i) {
            let _ = writeln!(out, "      vertex {x:.6e} {y:.6e} {z:.6e}");
        }
        let _ = writeln!(out, "    endloop");
        let _ = writeln!(out, "  endfacet");
    }
    let _ = writeln!(out, "endsolid {name}");

    out
}
