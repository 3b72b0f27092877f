//! Binary STL reading and writing.
//!
//! ```text
//! UINT8[80]    - Header (ignored)
//! UINT32       - Number of triangles (little-endian)
//! foreach triangle
//!     REAL32[3] - Normal vector (ignored, recomputed)
//!     REAL32[3] - Vertex 1
//!     REAL32[3] - Vertex 2
//!     REAL32[3] - Vertex 3
//!     UINT16    - Attribute byte count
//! end
//! ```

use stlquote_mesh::{compute_normals, TriangleSoup};
use tracing::debug;

use crate::error::{Result, StlError};

/// Header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Header plus the 4-byte triangle count.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Triangle count stored at offset 80, if the buffer is long enough.
pub fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Bytes required for `count` triangles, or `None` on overflow.
pub fn expected_len(count: u32) -> Option<usize> {
    (count as usize)
        .checked_mul(TRIANGLE_SIZE)?
        .checked_add(PREAMBLE_SIZE)
}

/// Decode a binary STL buffer.
///
/// The declared triangle count is checked against the buffer length before
/// any triangle is read. NaN or infinite coordinates are rejected.
pub fn decode_binary(bytes: &[u8]) -> Result<TriangleSoup> {
    let declared = declared_triangle_count(bytes).ok_or(StlError::InvalidHeader {
        expected: PREAMBLE_SIZE,
        got: bytes.len(),
    })?;
    let required = expected_len(declared).ok_or(StlError::TriangleCountOverflow(declared))?;

    if required > bytes.len() {
        return Err(StlError::MalformedInput {
            declared,
            required,
            available: bytes.len(),
        });
    }
    if required < bytes.len() {
        debug!(
            trailing = bytes.len() - required,
            "ignoring bytes after last triangle"
        );
    }

    let mut soup = TriangleSoup::with_capacity(declared as usize);
    for (triangle, record) in bytes[PREAMBLE_SIZE..required]
        .chunks_exact(TRIANGLE_SIZE)
        .enumerate()
    {
        // Skip the stored normal (12 bytes) and the attribute (2 bytes)
        let v0 = read_vertex(&record[12..24]);
        let v1 = read_vertex(&record[24..36]);
        let v2 = read_vertex(&record[36..48]);
        if !v0.iter().chain(&v1).chain(&v2).all(|c| c.is_finite()) {
            return Err(StlError::NonFiniteVertex { triangle });
        }
        soup.push_triangle(v0, v1, v2);
    }

    Ok(soup)
}

fn read_vertex(buf: &[u8]) -> [f32; 3] {
    [
        f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
        f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
    ]
}

/// Encode a soup as binary STL with recomputed normals.
///
/// `header` is truncated or space-padded to 80 bytes.
pub fn encode_binary(soup: &TriangleSoup, header: &str) -> Vec<u8> {
    let num_triangles = soup.num_triangles();
    let mut data = Vec::with_capacity(PREAMBLE_SIZE + num_triangles * TRIANGLE_SIZE);

    let mut head = [b' '; HEADER_SIZE];
    let text = header.as_bytes();
    let n = text.len().min(HEADER_SIZE);
    head[..n].copy_from_slice(&text[..n]);
    data.extend_from_slice(&head);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    let normals = compute_normals(soup);
    for (i, tri) in soup.vertices().chunks_exact(9).enumerate() {
        for c in normals.triangle_normal(i) {
            data.extend_from_slice(&c.to_le_bytes());
        }
        for c in tri {
            data.extend_from_slice(&c.to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_triangle() -> TriangleSoup {
        let mut soup = TriangleSoup::new();
        soup.push_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        soup
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode_binary(&one_triangle(), "test");
        assert_eq!(bytes.len(), PREAMBLE_SIZE + TRIANGLE_SIZE);
        assert_eq!(&bytes[..4], b"test");
        assert_eq!(bytes[4], b' ');
        assert_eq!(declared_triangle_count(&bytes), Some(1));
        // Stored normal is +Z
        let nz = f32::from_le_bytes([bytes[92], bytes[93], bytes[94], bytes[95]]);
        assert_eq!(nz, 1.0);
    }

    #[test]
    fn test_decode_encoded() {
        let soup = one_triangle();
        let decoded = decode_binary(&encode_binary(&soup, "")).unwrap();
        assert_eq!(decoded, soup);
    }

    #[test]
    fn test_truncated_buffer_is_malformed() {
        let mut bytes = encode_binary(&one_triangle(), "");
        bytes.truncate(bytes.len() - 1);
        let err = decode_binary(&bytes).unwrap_err();
        assert_eq!(
            err,
            StlError::MalformedInput {
                declared: 1,
                required: 134,
                available: 133,
            }
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = encode_binary(&one_triangle(), "");
        bytes.extend_from_slice(&[0xAB; 7]);
        assert_eq!(decode_binary(&bytes).unwrap().num_triangles(), 1);
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let mut soup = one_triangle();
        soup.push_triangle([0.0, 0.0, 0.0], [f32::NAN, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let err = decode_binary(&encode_binary(&soup, "")).unwrap_err();
        assert_eq!(err, StlError::NonFiniteVertex { triangle: 1 });

        let mut soup = TriangleSoup::new();
        soup.push_triangle([0.0, 0.0, f32::INFINITY], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let err = decode_binary(&encode_binary(&soup, "")).unwrap_err();
        assert_eq!(err, StlError::NonFiniteVertex { triangle: 0 });
    }

    #[test]
    fn test_short_buffer_has_no_header() {
        let err = decode_binary(&[0u8; 40]).unwrap_err();
        assert!(matches!(err, StlError::InvalidHeader { got: 40, .. }));
    }

    #[test]
    fn test_expected_len() {
        assert_eq!(expected_len(0), Some(84));
        assert_eq!(expected_len(12), Some(684));
    }
}
