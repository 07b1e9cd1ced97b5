//! Customer print configuration

use serde::{Deserialize, Serialize};

/// How a customer wants a part printed
///
/// Field bounds are checked by [`crate::validator::validate_configuration`]
/// before a configuration reaches pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintConfiguration {
    /// Number of copies
    pub quantity: u32,
    /// Requested color; must be one of the material's color options
    pub color: String,
    /// Internal density in percent
    pub infill_percentage: f64,
    /// Layer height in mm
    pub layer_height: f64,
    /// Whether support structures are printed
    #[serde(default)]
    pub support_structures: bool,
    /// Post-processing steps in order; each entry is costed, duplicates included
    #[serde(default)]
    pub post_processing: Vec<String>,
}

impl PrintConfiguration {
    /// A single copy at 20% infill and 0.2 mm layers, no supports or post-processing
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            quantity: 1,
            color: color.into(),
            infill_percentage: 20.0,
            layer_height: 0.2,
            support_structures: false,
            post_processing: Vec::new(),
        }
    }

    /// Set the number of copies
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the infill percentage
    pub fn with_infill_percentage(mut self, infill_percentage: f64) -> Self {
        self.infill_percentage = infill_percentage;
        self
    }

    /// Set the layer height in mm
    pub fn with_layer_height(mut self, layer_height: f64) -> Self {
        self.layer_height = layer_height;
        self
    }

    /// Enable or disable support structures
    pub fn with_support_structures(mut self, enabled: bool) -> Self {
        self.support_structures = enabled;
        self
    }

    /// Append a post-processing step
    pub fn with_post_processing(mut self, tag: impl Into<String>) -> Self {
        self.post_processing.push(tag.into());
        self
    }

    /// Whether any post-processing step was requested
    pub fn has_post_processing(&self) -> bool {
        !self.post_processing.is_empty()
    }
}
