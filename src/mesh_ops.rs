//! Mesh measurement
//!
//! This module turns STL bytes into a [`MeshAnalysis`] in a single pass:
//! - Bounding box extents
//! - Surface area
//! - Signed volume via the divergence theorem
//! - A watertightness heuristic (positive signed volume)
//!
//! Analysis never fails hard. Truncated buffers, unparseable vertices and
//! non-finite results all produce an analysis with `has_errors` set, so the
//! upload can still be recorded and marked as failed.

use crate::error::{Error, Result};
use crate::model::{BoundingBox, MeshAnalysis, Triangle, round2};
use crate::parser::FileFormat;
use crate::streaming::TriangleStream;
use std::io::Read;

/// mm² per cm²
const MM2_PER_CM2: f64 = 100.0;

/// mm³ per cm³
const MM3_PER_CM3: f64 = 1000.0;

/// Running totals of a left fold over triangles
///
/// Accumulation is associative, so partial accumulators over disjoint
/// triangle ranges can be combined with [`MeshAccumulator::merge`]. Results
/// may differ from a sequential fold in the last bits of precision.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAccumulator {
    triangle_count: u64,
    min: [f64; 3],
    max: [f64; 3],
    area_mm2: f64,
    signed_volume_mm3: f64,
}

impl Default for MeshAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshAccumulator {
    /// An accumulator that has seen no triangles
    pub fn new() -> Self {
        Self {
            triangle_count: 0,
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
            area_mm2: 0.0,
            signed_volume_mm3: 0.0,
        }
    }

    /// Fold one triangle into the totals
    pub fn add(&mut self, triangle: &Triangle) {
        for v in &triangle.vertices {
            for (axis, value) in [v.x, v.y, v.z].into_iter().enumerate() {
                self.min[axis] = self.min[axis].min(value);
                self.max[axis] = self.max[axis].max(value);
            }
        }
        self.area_mm2 += triangle.area();
        self.signed_volume_mm3 += triangle.signed_volume();
        self.triangle_count += 1;
    }

    /// Combine with the totals of another range of triangles
    pub fn merge(mut self, other: &MeshAccumulator) -> Self {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(other.min[axis]);
            self.max[axis] = self.max[axis].max(other.max[axis]);
        }
        self.area_mm2 += other.area_mm2;
        self.signed_volume_mm3 += other.signed_volume_mm3;
        self.triangle_count += other.triangle_count;
        self
    }

    /// Triangles folded so far
    pub fn triangle_count(&self) -> u64 {
        self.triangle_count
    }

    /// Unrounded surface area in mm²
    pub fn area_mm2(&self) -> f64 {
        self.area_mm2
    }

    /// Unrounded signed volume in mm³; negative for inward-wound meshes
    pub fn signed_volume_mm3(&self) -> f64 {
        self.signed_volume_mm3
    }

    /// Unrounded extents in mm; zero when no triangle has been seen
    pub fn extents(&self) -> [f64; 3] {
        if self.triangle_count == 0 {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Convert the totals into rounded, unit-converted measurements
    ///
    /// Fails when any total is not finite, which happens when coordinates
    /// are large enough for products to overflow.
    pub fn finish(&self) -> Result<MeshAnalysis> {
        let [x, y, z] = self.extents();
        let totals = [self.area_mm2, self.signed_volume_mm3, x, y, z];
        if totals.iter().any(|value| !value.is_finite()) {
            return Err(Error::NonFiniteGeometry(
                "mesh measurements overflowed to a non-finite value".to_string(),
            ));
        }

        Ok(MeshAnalysis {
            volume_cm3: round2(self.signed_volume_mm3.abs() / MM3_PER_CM3),
            surface_area_cm2: round2(self.area_mm2 / MM2_PER_CM2),
            bounding_box: BoundingBox::new(round2(x), round2(y), round2(z)),
            triangle_count: self.triangle_count,
            is_watertight: self.signed_volume_mm3 > 0.0,
            has_errors: false,
            errors: Vec::new(),
        })
    }
}

/// Fold a triangle sequence, stopping at the first decoding error
pub fn accumulate<I>(triangles: I) -> Result<MeshAccumulator>
where
    I: IntoIterator<Item = Result<Triangle>>,
{
    let mut acc = MeshAccumulator::new();
    for triangle in triangles {
        acc.add(&triangle?);
    }
    Ok(acc)
}

fn measure(bytes: &[u8]) -> Result<MeshAnalysis> {
    let mut stream = TriangleStream::from_bytes(bytes)?;
    tracing::debug!(format = ?stream.format(), size = bytes.len(), "Classified STL buffer");

    let acc = accumulate(stream.by_ref())?;
    let dropped = stream.dropped_facets();
    if dropped > 0 {
        tracing::debug!(dropped_facets = dropped, "Skipped malformed facets");
    }
    acc.finish()
}

/// Analyse an STL buffer, binary or ASCII
///
/// # Example
///
/// ```
/// use printquote::analyze_mesh;
///
/// let analysis = analyze_mesh(b"not an stl");
/// assert!(analysis.has_errors);
/// assert_eq!(analysis.volume_cm3, 0.0);
/// ```
pub fn analyze_mesh(bytes: &[u8]) -> MeshAnalysis {
    match measure(bytes) {
        Ok(analysis) => {
            tracing::info!(
                triangles = analysis.triangle_count,
                volume_cm3 = analysis.volume_cm3,
                watertight = analysis.is_watertight,
                "Mesh analysis complete"
            );
            analysis
        }
        Err(e) => {
            tracing::warn!(error = %e, size = bytes.len(), "Mesh analysis failed");
            MeshAnalysis::failed(vec![e.to_string()])
        }
    }
}

/// Analyse an upload according to its declared format
///
/// Only STL geometry is measured; every other format gets
/// [`MeshAnalysis::placeholder`].
pub fn analyze_upload(bytes: &[u8], format: &FileFormat) -> MeshAnalysis {
    match format {
        FileFormat::Stl => analyze_mesh(bytes),
        FileFormat::Other(kind) => {
            tracing::debug!(format = %kind, "Using placeholder analysis for non-STL upload");
            MeshAnalysis::placeholder()
        }
    }
}

/// Read an STL stream to the end and analyse it
///
/// Read failures are reported in the analysis like any other error.
pub fn analyze_reader<R: Read>(mut reader: R) -> MeshAnalysis {
    let mut bytes = Vec::new();
    match reader.read_to_end(&mut bytes) {
        Ok(_) => analyze_mesh(&bytes),
        Err(e) => {
            let e = Error::from(e);
            tracing::warn!(error = %e, "Failed to read mesh data");
            MeshAnalysis::failed(vec![e.to_string()])
        }
    }
}
