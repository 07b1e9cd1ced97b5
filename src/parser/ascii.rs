//! ASCII STL decoding
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Only `vertex` and `endfacet` lines matter. A facet that does not hold
//! exactly three vertices when it is closed is skipped without error.

use crate::error::{Error, Result};
use crate::model::{Triangle, Vertex};

type Lines<'a> = std::iter::Enumerate<std::slice::Split<'a, u8, fn(&u8) -> bool>>;

fn is_newline(byte: &u8) -> bool {
    *byte == b'\n'
}

/// Case-insensitive ASCII prefix test
fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.len() >= keyword.len()
        && line.as_bytes()[..keyword.len()].eq_ignore_ascii_case(keyword.as_bytes())
}

/// Lazy iterator over the triangles of an ASCII STL buffer
///
/// Lines are decoded one at a time; only the vertices of the facet being
/// read are held in memory.
#[derive(Debug, Clone)]
pub struct AsciiTriangles<'a> {
    lines: Lines<'a>,
    pending: [Vertex; 3],
    pending_count: usize,
    dropped_facets: usize,
    failed: bool,
}

impl<'a> AsciiTriangles<'a> {
    /// Prepare to decode `text`
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            lines: text.split(is_newline as fn(&u8) -> bool).enumerate(),
            pending: [Vertex::new(0.0, 0.0, 0.0); 3],
            pending_count: 0,
            dropped_facets: 0,
            failed: false,
        }
    }

    /// Facets skipped so far because they did not hold exactly three vertices
    pub fn dropped_facets(&self) -> usize {
        self.dropped_facets
    }

    fn push_vertex(&mut self, vertex: Vertex) {
        if self.pending_count < 3 {
            self.pending[self.pending_count] = vertex;
        }
        self.pending_count += 1;
    }

    fn close_facet(&mut self, line_number: usize) -> Option<Triangle> {
        let count = std::mem::take(&mut self.pending_count);
        if count == 3 {
            let [v0, v1, v2] = self.pending;
            Some(Triangle::new(v0, v1, v2))
        } else {
            self.dropped_facets += 1;
            tracing::debug!(
                line = line_number,
                vertices = count,
                "Dropping facet without exactly three vertices"
            );
            None
        }
    }
}

const AXES: [&str; 3] = ["vertex x coordinate", "vertex y coordinate", "vertex z coordinate"];

/// Parse the three coordinates following the `vertex` keyword
fn parse_vertex(line: &str, line_number: usize) -> Result<Vertex> {
    let mut tokens = line.split_whitespace().skip(1);
    let mut coords = [0.0f64; 3];

    for (coord, axis) in coords.iter_mut().zip(AXES) {
        let token = tokens.next().ok_or_else(|| {
            Error::ParseError(format!(
                "line {}: vertex has fewer than 3 coordinates",
                line_number
            ))
        })?;
        let value: f64 = token
            .parse()
            .map_err(|_| Error::parse_error_at_line(line_number, axis, token))?;
        if !value.is_finite() {
            return Err(Error::NonFiniteGeometry(format!(
                "line {}: {} is '{}'",
                line_number, axis, token
            )));
        }
        *coord = value;
    }

    Ok(Vertex::new(coords[0], coords[1], coords[2]))
}

impl Iterator for AsciiTriangles<'_> {
    type Item = Result<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some((index, raw)) = self.lines.next() {
            let line_number = index + 1;
            let text = String::from_utf8_lossy(raw);
            let line = text.trim();

            if starts_with_keyword(line, "vertex") {
                match parse_vertex(line, line_number) {
                    Ok(vertex) => self.push_vertex(vertex),
                    Err(e) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                }
            } else if starts_with_keyword(line, "endfacet") {
                if let Some(triangle) = self.close_facet(line_number) {
                    return Some(Ok(triangle));
                }
            }
        }

        None
    }
}
