//! STL decoding
//!
//! A buffer is classified once as binary or ASCII ([`StlSource::classify`]);
//! each arm then decodes independently into a lazy stream of triangles.
//!
//! # Format Detection
//!
//! - Buffers whose first five bytes read `solid` (any case) are ASCII
//! - Everything else is binary
//!
//! Some exporters write binary files whose 80-byte header starts with
//! `solid`. A `solid`-prefixed buffer whose length equals exactly the size
//! implied by the triangle count at offset 80 is therefore read as binary.

pub mod ascii;
pub mod binary;

use crate::error::Result;
use crate::streaming::TriangleStream;

pub use ascii::AsciiTriangles;
pub use binary::BinaryTriangles;

const ASCII_MAGIC: &[u8; 5] = b"solid";

/// STL encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    /// 80-byte header, triangle count and fixed-size records
    Binary,
    /// Line-oriented `solid ... endsolid` text
    Ascii,
}

/// An STL buffer tagged with its encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlSource<'a> {
    /// Binary STL bytes
    Binary(&'a [u8]),
    /// ASCII STL text, not required to be valid UTF-8
    Ascii(&'a [u8]),
}

impl<'a> StlSource<'a> {
    /// Classify `bytes` as binary or ASCII STL
    pub fn classify(bytes: &'a [u8]) -> Self {
        match detect_format(bytes) {
            StlFormat::Binary => StlSource::Binary(bytes),
            StlFormat::Ascii => StlSource::Ascii(bytes),
        }
    }

    /// The encoding of this source
    pub fn format(&self) -> StlFormat {
        match self {
            StlSource::Binary(_) => StlFormat::Binary,
            StlSource::Ascii(_) => StlFormat::Ascii,
        }
    }

    /// Start decoding triangles
    ///
    /// Binary sources are checked against their declared size here, so a
    /// truncated buffer fails before any triangle is produced.
    pub fn triangles(self) -> Result<TriangleStream<'a>> {
        Ok(match self {
            StlSource::Binary(bytes) => TriangleStream::Binary(BinaryTriangles::new(bytes)?),
            StlSource::Ascii(text) => TriangleStream::Ascii(AsciiTriangles::new(text)),
        })
    }
}

/// Decide whether `bytes` hold binary or ASCII STL
pub fn detect_format(bytes: &[u8]) -> StlFormat {
    let has_magic = bytes
        .get(..ASCII_MAGIC.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ASCII_MAGIC));

    if !has_magic {
        return StlFormat::Binary;
    }

    let exact_binary_size = binary::declared_triangle_count(bytes)
        .and_then(binary::expected_size)
        .is_some_and(|size| size == bytes.len());

    if exact_binary_size {
        StlFormat::Binary
    } else {
        StlFormat::Ascii
    }
}

/// Classify and start decoding an STL buffer
pub fn triangles(bytes: &[u8]) -> Result<TriangleStream<'_>> {
    StlSource::classify(bytes).triangles()
}

/// Declared type of an uploaded model file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    /// STL, binary or ASCII
    Stl,
    /// Any other model format, identified by its lowercase extension or MIME type
    Other(String),
}

const STL_MIME_TYPES: [&str; 5] = [
    "model/stl",
    "model/x.stl-binary",
    "model/x.stl-ascii",
    "application/sla",
    "application/vnd.ms-pki.stl",
];

impl FileFormat {
    /// Resolve from a file extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        if ext == "stl" {
            FileFormat::Stl
        } else {
            FileFormat::Other(ext)
        }
    }

    /// Resolve from a MIME type; parameters after `;` are ignored
    pub fn from_mime_type(mime_type: &str) -> Self {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if STL_MIME_TYPES.contains(&essence.as_str()) {
            FileFormat::Stl
        } else {
            FileFormat::Other(essence)
        }
    }

    /// Resolve from a file name by its extension
    pub fn from_file_name(name: &str) -> Self {
        match std::path::Path::new(name).extension() {
            Some(ext) => Self::from_extension(&ext.to_string_lossy()),
            None => FileFormat::Other(String::new()),
        }
    }

    /// Resolve from whatever the upload declared; STL wins if either says so
    pub fn resolve(extension: Option<&str>, mime_type: Option<&str>) -> Self {
        let by_extension = extension.map(Self::from_extension);
        let by_mime = mime_type.map(Self::from_mime_type);
        match (by_extension, by_mime) {
            (Some(FileFormat::Stl), _) | (_, Some(FileFormat::Stl)) => FileFormat::Stl,
            (Some(other), _) | (None, Some(other)) => other,
            (None, None) => FileFormat::Other(String::new()),
        }
    }

    /// Whether the geometry of this format is analysed
    pub fn is_stl(&self) -> bool {
        matches!(self, FileFormat::Stl)
    }
}
