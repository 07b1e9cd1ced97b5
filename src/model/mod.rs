//! Data structures for meshes, materials, print requests and quotes

mod configuration;
mod core;
mod material;
mod quote;

pub use configuration::PrintConfiguration;
pub use core::{BoundingBox, MeshAnalysis, Triangle, Vertex};
pub use material::{MaterialPricing, MaterialProfile, MaterialProperties};
pub use quote::{PricingBreakdown, Quote};

/// Round to a fixed number of decimal places, half away from zero
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to cents
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to tenths
#[inline]
pub(crate) fn round1(value: f64) -> f64 {
    round_to(value, 1)
}
