//! Streaming triangle access
//!
//! Both STL encodings decode into the same lazy, finite, single-pass
//! [`TriangleStream`]. Nothing is materialised: the analyzer folds triangles
//! as they are produced, so memory use does not grow with mesh size.
//!
//! # Example
//!
//! ```
//! use printquote::streaming::TriangleStream;
//!
//! let text = b"solid t
//! facet normal 0 0 1
//!  outer loop
//!   vertex 0 0 0
//!   vertex 1 0 0
//!   vertex 0 1 0
//!  endloop
//! endfacet
//! endsolid t
//! ";
//!
//! let stream = TriangleStream::from_bytes(text)?;
//! let mut area = 0.0;
//! for triangle in stream {
//!     area += triangle?.area();
//! }
//! assert_eq!(area, 0.5);
//! # Ok::<(), printquote::Error>(())
//! ```

use crate::error::Result;
use crate::model::Triangle;
use crate::parser::{self, AsciiTriangles, BinaryTriangles, StlFormat};

/// Triangles decoded on demand from either STL encoding
///
/// Yields `Err` at most once; the stream ends after the first error.
#[derive(Debug, Clone)]
pub enum TriangleStream<'a> {
    /// Decoding binary records
    Binary(BinaryTriangles<'a>),
    /// Decoding ASCII lines
    Ascii(AsciiTriangles<'a>),
}

impl<'a> TriangleStream<'a> {
    /// Classify `bytes` and start decoding
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        parser::triangles(bytes)
    }

    /// The encoding being decoded
    pub fn format(&self) -> StlFormat {
        match self {
            TriangleStream::Binary(_) => StlFormat::Binary,
            TriangleStream::Ascii(_) => StlFormat::Ascii,
        }
    }

    /// ASCII facets skipped so far for not holding exactly three vertices
    pub fn dropped_facets(&self) -> usize {
        match self {
            TriangleStream::Binary(_) => 0,
            TriangleStream::Ascii(decoder) => decoder.dropped_facets(),
        }
    }
}

impl Iterator for TriangleStream<'_> {
    type Item = Result<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            TriangleStream::Binary(decoder) => decoder.next(),
            TriangleStream::Ascii(decoder) => decoder.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            TriangleStream::Binary(decoder) => decoder.size_hint(),
            TriangleStream::Ascii(decoder) => decoder.size_hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_reports_format() {
        let stream = TriangleStream::from_bytes(b"solid x\nendsolid x\n").unwrap();
        assert_eq!(stream.format(), StlFormat::Ascii);

        let mut binary = vec![0u8; 80];
        binary.extend_from_slice(&0u32.to_le_bytes());
        let stream = TriangleStream::from_bytes(&binary).unwrap();
        assert_eq!(stream.format(), StlFormat::Binary);
        assert_eq!(stream.count(), 0);
    }

    #[test]
    fn test_stream_counts_dropped_facets() {
        let text = b"solid x\nvertex 0 0 0\nendfacet\nendsolid x\n";
        let mut stream = TriangleStream::from_bytes(text).unwrap();
        assert!(stream.next().is_none());
        assert_eq!(stream.dropped_facets(), 1);
    }
}
