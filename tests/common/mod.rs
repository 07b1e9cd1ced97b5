//! Shared STL builders for integration tests
//!
//! Meshes are described as plain vertex triples so the same geometry can be
//! encoded as binary or ASCII STL.

#![allow(dead_code)]

/// One triangle as three `[x, y, z]` vertices
pub type Facet = [[f32; 3]; 3];

/// Axis-aligned box from the origin to `(dx, dy, dz)`, wound outward
pub fn box_facets(dx: f32, dy: f32, dz: f32) -> Vec<Facet> {
    let corners = [
        [0.0, 0.0, 0.0],
        [dx, 0.0, 0.0],
        [dx, dy, 0.0],
        [0.0, dy, 0.0],
        [0.0, 0.0, dz],
        [dx, 0.0, dz],
        [dx, dy, dz],
        [0.0, dy, dz],
    ];
    let faces: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    faces
        .iter()
        .map(|[a, b, c]| [corners[*a], corners[*b], corners[*c]])
        .collect()
}

/// Cube with edge length `size`, wound outward
pub fn cube_facets(size: f32) -> Vec<Facet> {
    box_facets(size, size, size)
}

/// Same triangles with every winding reversed
pub fn reversed(facets: &[Facet]) -> Vec<Facet> {
    facets.iter().map(|[a, b, c]| [*a, *c, *b]).collect()
}

/// Translate every vertex by `offset`
pub fn translated(facets: &[Facet], offset: [f32; 3]) -> Vec<Facet> {
    facets
        .iter()
        .map(|facet| {
            facet.map(|[x, y, z]| [x + offset[0], y + offset[1], z + offset[2]])
        })
        .collect()
}

/// Encode as binary STL with the given header text
pub fn binary_stl_with_header(header: &[u8], facets: &[Facet]) -> Vec<u8> {
    let mut buf = vec![0u8; 80];
    buf[..header.len()].copy_from_slice(header);
    buf.extend_from_slice(&(facets.len() as u32).to_le_bytes());
    for facet in facets {
        // Normal is ignored by readers
        buf.extend_from_slice(&[0u8; 12]);
        for vertex in facet {
            for coord in vertex {
                buf.extend_from_slice(&coord.to_le_bytes());
            }
        }
        buf.extend_from_slice(&[0, 0]);
    }
    buf
}

/// Encode as binary STL with a neutral header
pub fn binary_stl(facets: &[Facet]) -> Vec<u8> {
    binary_stl_with_header(b"binary test mesh", facets)
}

/// Encode as ASCII STL
pub fn ascii_stl(name: &str, facets: &[Facet]) -> String {
    let mut text = format!("solid {}\n", name);
    for facet in facets {
        text.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in facet {
            text.push_str(&format!("      vertex {} {} {}\n", x, y, z));
        }
        text.push_str("    endloop\n  endfacet\n");
    }
    text.push_str(&format!("endsolid {}\n", name));
    text
}
