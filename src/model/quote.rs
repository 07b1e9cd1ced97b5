//! Pricing results

use super::configuration::PrintConfiguration;
use serde::{Deserialize, Serialize};

/// Itemised cost of a print request, every amount rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Cost of the effective material volume across all copies
    pub material_cost: f64,
    /// Machine time across all copies
    pub labor_cost: f64,
    /// Flat setup fee of the material
    pub setup_fee: f64,
    /// Post-processing across all copies
    pub post_processing_fee: f64,
    /// Sum of the four cost components
    pub subtotal: f64,
    /// Quantity discount
    pub discount: f64,
    /// Discounted subtotal, never below the material's minimum price
    pub total: f64,
    /// Currency code of every amount
    pub currency: String,
}

/// A priced print request
///
/// Created once per pricing request and never changed afterwards. Status,
/// expiry and reference ids belong to whoever stores the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Catalog id of the quoted material
    pub material_id: String,
    /// Part volume the quote was computed from (cm³)
    pub volume_cm3: f64,
    /// Snapshot of the requested configuration
    pub configuration: PrintConfiguration,
    /// Cost breakdown
    pub pricing: PricingBreakdown,
    /// Estimated machine time, rounded to 1 decimal
    pub estimated_print_time_hours: f64,
    /// Estimated days until delivery
    pub estimated_delivery_days: u32,
}
