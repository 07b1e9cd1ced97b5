//! Core geometry types and the mesh analysis result

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A vertex position in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when all three coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub(crate) fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// A triangle given by three vertex positions
///
/// The facet normal stored in STL files is not kept: area and volume are
/// computed from the vertex positions and their winding order alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices in winding order
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Surface area in square input units
    ///
    /// Half the magnitude of the cross product of two edges. Degenerate
    /// triangles have zero area.
    pub fn area(&self) -> f64 {
        let [v0, v1, v2] = self.vertices.map(Vertex::to_vector);
        0.5 * (v1 - v0).cross(&(v2 - v0)).norm()
    }

    /// Signed volume of the tetrahedron spanned by this triangle and the origin
    ///
    /// Summed over a closed, outward-wound mesh this yields the enclosed volume
    /// (divergence theorem). Inward winding flips the sign.
    pub fn signed_volume(&self) -> f64 {
        let [v0, v1, v2] = self.vertices.map(Vertex::to_vector);
        v0.dot(&v1.cross(&v2)) / 6.0
    }

    /// The same triangle with opposite winding
    pub fn reversed(&self) -> Self {
        let [v0, v1, v2] = self.vertices;
        Self::new(v0, v2, v1)
    }
}

/// Axis-aligned extents of a mesh in millimeters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Extent along X
    pub x: f64,
    /// Extent along Y
    pub y: f64,
    /// Extent along Z
    pub z: f64,
}

impl BoundingBox {
    /// Create a new bounding box from its extents
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Physical measurements of an uploaded mesh
///
/// Produced once per uploaded file. When analysis fails, `has_errors` is set,
/// `errors` holds the reasons, and every numeric field is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshAnalysis {
    /// Enclosed volume in cm³, rounded to 2 decimals
    pub volume_cm3: f64,
    /// Total surface area in cm², rounded to 2 decimals
    pub surface_area_cm2: f64,
    /// Extents in mm, rounded to 2 decimals
    pub bounding_box: BoundingBox,
    /// Number of triangles that contributed to the measurements
    pub triangle_count: u64,
    /// Heuristic: true when the accumulated signed volume is positive
    pub is_watertight: bool,
    /// True when the file could not be analysed
    pub has_errors: bool,
    /// Human-readable failure reasons (empty unless `has_errors`)
    pub errors: Vec<String>,
}

impl MeshAnalysis {
    /// Volume assumed for formats whose geometry is not analysed (cm³)
    pub const PLACEHOLDER_VOLUME_CM3: f64 = 100.0;
    /// Surface area assumed for formats whose geometry is not analysed (cm²)
    pub const PLACEHOLDER_SURFACE_AREA_CM2: f64 = 200.0;
    /// Extent assumed on every axis for formats whose geometry is not analysed (mm)
    pub const PLACEHOLDER_EXTENT_MM: f64 = 10.0;

    /// A zeroed analysis recording why the file could not be measured
    ///
    /// An empty `errors` list is replaced by a generic message so the
    /// `has_errors` ⇔ non-empty `errors` invariant always holds.
    pub fn failed(errors: Vec<String>) -> Self {
        let errors = if errors.is_empty() {
            vec!["mesh analysis failed".to_string()]
        } else {
            errors
        };
        Self {
            volume_cm3: 0.0,
            surface_area_cm2: 0.0,
            bounding_box: BoundingBox::default(),
            triangle_count: 0,
            is_watertight: false,
            has_errors: true,
            errors,
        }
    }

    /// Fixed stand-in used for uploads in formats other than STL
    pub fn placeholder() -> Self {
        Self {
            volume_cm3: Self::PLACEHOLDER_VOLUME_CM3,
            surface_area_cm2: Self::PLACEHOLDER_SURFACE_AREA_CM2,
            bounding_box: BoundingBox::new(
                Self::PLACEHOLDER_EXTENT_MM,
                Self::PLACEHOLDER_EXTENT_MM,
                Self::PLACEHOLDER_EXTENT_MM,
            ),
            triangle_count: 0,
            is_watertight: true,
            has_errors: false,
            errors: Vec::new(),
        }
    }

    /// All error messages joined into one line, or `None` for a clean analysis
    pub fn errors_message(&self) -> Option<String> {
        if self.has_errors {
            Some(self.errors.join("; "))
        } else {
            None
        }
    }
}
