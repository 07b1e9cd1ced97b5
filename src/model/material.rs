//! Material catalog entries

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Pricing profile of a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPricing {
    /// Price per cm³ of effective (infill-adjusted) volume
    pub base_price_per_cm3: f64,
    /// Flat fee per order line, independent of quantity
    pub setup_fee: f64,
    /// Floor applied to the discounted total
    pub min_price: f64,
    /// ISO currency code; the quote configuration's default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl MaterialPricing {
    /// Create a pricing profile without an explicit currency
    pub fn new(base_price_per_cm3: f64, setup_fee: f64, min_price: f64) -> Self {
        Self {
            base_price_per_cm3,
            setup_fee,
            min_price,
            currency: None,
        }
    }

    /// Set the currency code
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Physical and catalog properties of a material
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProperties {
    /// Colors this material can be printed in
    #[serde(default)]
    pub color_options: BTreeSet<String>,
}

/// A material catalog entry, supplied by the material catalog and never mutated here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProfile {
    /// Catalog identifier
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Pricing profile
    pub pricing: MaterialPricing,
    /// Catalog properties
    #[serde(default)]
    pub properties: MaterialProperties,
    /// Days needed to source the material before printing can start
    #[serde(default)]
    pub lead_time_days: u32,
}

impl MaterialProfile {
    /// Create a material with no color options and no lead time
    pub fn new(id: impl Into<String>, pricing: MaterialPricing) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            pricing,
            properties: MaterialProperties::default(),
            lead_time_days: 0,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a color option
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.properties.color_options.insert(color.into());
        self
    }

    /// Set the sourcing lead time
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// Whether the material can be printed in `color`
    pub fn offers_color(&self, color: &str) -> bool {
        self.properties.color_options.contains(color)
    }
}
