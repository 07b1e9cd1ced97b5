//! Binary STL decoding
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles (little-endian)
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```

use crate::error::{Error, Result};
use crate::model::{Triangle, Vertex};

/// Size of the free-form header in bytes
pub const HEADER_SIZE: usize = 80;

/// Size of the header plus the triangle count
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record in bytes
pub const RECORD_SIZE: usize = 50;

/// Offset of the first vertex inside a record (after the normal)
const VERTEX_OFFSET: usize = 12;

/// Triangle count stored after the header, if the buffer is long enough to hold it
pub fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let count = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([count[0], count[1], count[2], count[3]]))
}

/// Number of bytes a binary STL with `count` triangles occupies
pub fn expected_size(count: u32) -> Option<usize> {
    (count as usize)
        .checked_mul(RECORD_SIZE)?
        .checked_add(PREAMBLE_SIZE)
}

/// Lazy iterator over the triangles of a binary STL buffer
///
/// The buffer size is checked against the declared triangle count up front;
/// bytes past the last declared record are ignored.
#[derive(Debug, Clone)]
pub struct BinaryTriangles<'a> {
    records: std::slice::ChunksExact<'a, u8>,
    index: usize,
    failed: bool,
}

impl<'a> BinaryTriangles<'a> {
    /// Validate the buffer layout and prepare to decode its records
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let count = declared_triangle_count(bytes)
            .ok_or_else(|| Error::truncated("binary STL header", PREAMBLE_SIZE, bytes.len()))?;

        let expected = expected_size(count).ok_or_else(|| {
            Error::MalformedInput(format!(
                "declared triangle count {} exceeds addressable size",
                count
            ))
        })?;

        if bytes.len() < expected {
            return Err(Error::MalformedInput(format!(
                "header declares {} triangles ({} bytes) but buffer holds {} bytes",
                count,
                expected,
                bytes.len()
            )));
        }

        Ok(Self {
            records: bytes[PREAMBLE_SIZE..expected].chunks_exact(RECORD_SIZE),
            index: 0,
            failed: false,
        })
    }

    /// Triangles not yet decoded
    pub fn remaining(&self) -> usize {
        if self.failed { 0 } else { self.records.len() }
    }
}

/// Read a little-endian f32 vertex from 12 bytes
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::new(f64::from(x), f64::from(y), f64::from(z))
}

fn decode_record(record: &[u8], index: usize) -> Result<Triangle> {
    let v0 = read_vertex(&record[VERTEX_OFFSET..VERTEX_OFFSET + 12]);
    let v1 = read_vertex(&record[VERTEX_OFFSET + 12..VERTEX_OFFSET + 24]);
    let v2 = read_vertex(&record[VERTEX_OFFSET + 24..VERTEX_OFFSET + 36]);

    if !(v0.is_finite() && v1.is_finite() && v2.is_finite()) {
        return Err(Error::NonFiniteGeometry(format!(
            "triangle {} has a NaN or infinite vertex coordinate",
            index
        )));
    }

    Ok(Triangle::new(v0, v1, v2))
}

impl Iterator for BinaryTriangles<'_> {
    type Item = Result<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let record = self.records.next()?;
        let result = decode_record(record, self.index);
        self.index += 1;
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}
