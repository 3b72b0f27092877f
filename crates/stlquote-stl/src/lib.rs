#![warn(missing_docs)]

//! STL decoding for stlquote.
//!
//! Turns a raw byte buffer into a [`TriangleSoup`]. Both binary and ASCII
//! STL are supported; stored facet normals are ignored because the
//! geometry stage recomputes them from the vertex winding.
//!
//! # Format detection
//!
//! - Buffers of 84 bytes or fewer are ASCII (a binary file needs an 80-byte
//!   header plus a 4-byte triangle count).
//! - Longer buffers are binary, unless the header starts with `solid`, the
//!   declared triangle count does not match the buffer length, and the
//!   leading text holds a `facet` or `endsolid` keyword. Binary files whose
//!   header happens to start with `solid` therefore still decode as binary
//!   when truncated or padded.
//!
//! # Example
//!
//! ```
//! let soup = stlquote_stl::decode(b"solid empty\nendsolid empty\n").unwrap();
//! assert!(soup.is_empty());
//! ```

pub mod ascii;
pub mod binary;
pub mod error;

pub use ascii::{decode_ascii, encode_ascii};
pub use binary::{decode_binary, encode_binary};
pub use error::{Result, StlError};
pub use stlquote_mesh::TriangleSoup;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::binary::{declared_triangle_count, expected_len, HEADER_SIZE, PREAMBLE_SIZE};

/// STL encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    /// 80-byte header, triangle count, 50-byte records.
    Binary,
    /// `solid` / `facet` / `vertex` text.
    Ascii,
}

impl std::fmt::Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StlFormat::Binary => write!(f, "binary"),
            StlFormat::Ascii => write!(f, "ascii"),
        }
    }
}

/// Decide how a buffer should be decoded.
pub fn detect_format(bytes: &[u8]) -> StlFormat {
    if bytes.len() <= PREAMBLE_SIZE {
        return StlFormat::Ascii;
    }

    if starts_with_solid(bytes) {
        let exact = declared_triangle_count(bytes)
            .and_then(expected_len)
            .is_some_and(|len| len == bytes.len());
        if !exact && looks_like_ascii(bytes) {
            return StlFormat::Ascii;
        }
    }

    StlFormat::Binary
}

/// Bytes inspected when deciding whether a `solid` header starts real text.
const SNIFF_LEN: usize = 512;

/// Check whether a `solid`-prefixed buffer is ASCII STL.
///
/// Binary exporters often write `solid` into the header, so the prefix
/// alone proves nothing. A NUL in the header means binary. Otherwise the
/// leading run of text bytes must contain a `facet` or `endsolid` keyword.
fn looks_like_ascii(bytes: &[u8]) -> bool {
    if bytes[..bytes.len().min(HEADER_SIZE)].contains(&0) {
        return false;
    }

    let window = &bytes[..bytes.len().min(SNIFF_LEN)];
    let text_len = window
        .iter()
        .position(|&b| !(b.is_ascii_graphic() || b.is_ascii_whitespace() || b >= 0x80))
        .unwrap_or(window.len());
    let text = &window[..text_len];

    contains_keyword(text, b"facet") || contains_keyword(text, b"endsolid")
}

fn contains_keyword(text: &[u8], keyword: &[u8]) -> bool {
    text.windows(keyword.len())
        .any(|w| w.eq_ignore_ascii_case(keyword))
}

fn starts_with_solid(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..]
        .get(..5)
        .is_some_and(|w| w.eq_ignore_ascii_case(b"solid"))
}

/// Decode an STL buffer into a triangle soup.
pub fn decode(bytes: &[u8]) -> Result<TriangleSoup> {
    decode_with_format(bytes).map(|(soup, _)| soup)
}

/// Decode an STL buffer, also reporting which encoding was used.
#[instrument(skip_all, fields(len = bytes.len()))]
pub fn decode_with_format(bytes: &[u8]) -> Result<(TriangleSoup, StlFormat)> {
    let format = detect_format(bytes);
    let soup = match format {
        StlFormat::Binary => decode_binary(bytes)?,
        StlFormat::Ascii => decode_ascii(bytes),
    };
    debug!(%format, triangles = soup.num_triangles(), "decoded STL");
    Ok((soup, format))
}
