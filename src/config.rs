//! Quote configuration
//!
//! Every rate, fee and threshold used by pricing and estimation lives in a
//! [`QuoteConfig`] so deployments can tune them without code changes. The
//! [`Default`] configuration reproduces the stock price list.
//!
//! # Example
//!
//! ```
//! use printquote::config::{QuoteConfig, UnknownTagPolicy};
//!
//! let config = QuoteConfig::new()
//!     .with_post_processing_fee("vapor-smoothing", 45.0)
//!     .with_unknown_tag_policy(UnknownTagPolicy::Reject);
//!
//! assert_eq!(config.post_processing_fee("vapor-smoothing"), Some(45.0));
//! assert_eq!(config.post_processing_fee("sanding"), Some(20.0));
//! ```
//!
//! Configurations can also be loaded from JSON; omitted fields keep their
//! defaults:
//!
//! ```
//! use printquote::config::QuoteConfig;
//!
//! let config = QuoteConfig::from_json_str(r#"{ "rates": { "laborRate": 18 } }"#).unwrap();
//! assert_eq!(config.rates().labor_rate, 18.0);
//! assert_eq!(config.rates().base_print_speed, 30.0);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Machine and logistics rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateTable {
    /// Printed volume per hour at baseline settings (cm³/h)
    pub base_print_speed: f64,
    /// Labor cost per machine hour
    pub labor_rate: f64,
    /// Share of the part volume costed as solid regardless of infill
    pub shell_fraction: f64,
    /// Layer height at which print speed equals `base_print_speed` (mm)
    pub baseline_layer_height: f64,
    /// Infill percentage at which print speed equals `base_print_speed`
    pub baseline_infill_percentage: f64,
    /// Time multiplier when support structures are printed
    pub support_time_factor: f64,
    /// Productive printer hours per day
    pub productive_hours_per_day: f64,
    /// Days added when any post-processing is requested
    pub post_processing_days: u32,
    /// Days in transit
    pub shipping_days: u32,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            base_print_speed: 30.0,
            labor_rate: 15.0,
            shell_fraction: 0.2,
            baseline_layer_height: 0.2,
            baseline_infill_percentage: 20.0,
            support_time_factor: 1.3,
            productive_hours_per_day: 8.0,
            post_processing_days: 1,
            shipping_days: 2,
        }
    }
}

/// A quantity discount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    /// Smallest quantity that earns this discount
    pub min_quantity: u32,
    /// Fraction of the subtotal taken off (0.1 = 10%)
    pub rate: f64,
}

impl DiscountTier {
    /// Create a discount tier
    pub fn new(min_quantity: u32, rate: f64) -> Self {
        Self { min_quantity, rate }
    }
}

/// What pricing does with a post-processing tag missing from the fee table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTagPolicy {
    /// Cost the tag at zero and log a warning
    #[default]
    Ignore,
    /// Fail the quote with [`Error::UnknownPostProcessing`]
    Reject,
}

/// Accepted ranges for print configuration fields (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationBounds {
    /// Smallest quantity
    pub min_quantity: u32,
    /// Largest quantity
    pub max_quantity: u32,
    /// Smallest infill percentage
    pub min_infill_percentage: f64,
    /// Largest infill percentage
    pub max_infill_percentage: f64,
    /// Thinnest layer (mm)
    pub min_layer_height: f64,
    /// Thickest layer (mm)
    pub max_layer_height: f64,
}

impl Default for ConfigurationBounds {
    fn default() -> Self {
        Self {
            min_quantity: 1,
            max_quantity: 1000,
            min_infill_percentage: 10.0,
            max_infill_percentage: 100.0,
            min_layer_height: 0.05,
            max_layer_height: 0.5,
        }
    }
}

fn default_post_processing_fees() -> BTreeMap<String, f64> {
    [
        ("sanding", 20.0),
        ("painting", 35.0),
        ("polishing", 25.0),
        ("assembly", 50.0),
        ("heat-treatment", 40.0),
    ]
    .into_iter()
    .map(|(tag, fee)| (tag.to_string(), fee))
    .collect()
}

fn default_discount_tiers() -> Vec<DiscountTier> {
    vec![DiscountTier::new(5, 0.05), DiscountTier::new(10, 0.10)]
}

/// Rates, fees and limits used to price a print request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteConfig {
    post_processing_fees: BTreeMap<String, f64>,
    rates: RateTable,
    discount_tiers: Vec<DiscountTier>,
    default_currency: String,
    unknown_tag_policy: UnknownTagPolicy,
    bounds: ConfigurationBounds,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            post_processing_fees: default_post_processing_fees(),
            rates: RateTable::default(),
            discount_tiers: default_discount_tiers(),
            default_currency: "AED".to_string(),
            unknown_tag_policy: UnknownTagPolicy::default(),
            bounds: ConfigurationBounds::default(),
        }
    }
}

impl QuoteConfig {
    /// Create a configuration with the stock price list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Add or replace the fee of a post-processing tag
    pub fn with_post_processing_fee(mut self, tag: impl Into<String>, fee: f64) -> Self {
        self.post_processing_fees.insert(tag.into(), fee);
        self
    }

    /// Replace the rate table
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    /// Replace the quantity discount tiers
    pub fn with_discount_tiers(mut self, tiers: Vec<DiscountTier>) -> Self {
        self.discount_tiers = tiers;
        self
    }

    /// Set the currency used when a material does not name one
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Choose how unknown post-processing tags are handled
    pub fn with_unknown_tag_policy(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tag_policy = policy;
        self
    }

    /// Replace the accepted configuration ranges
    pub fn with_bounds(mut self, bounds: ConfigurationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fee of a post-processing tag, if the tag is known
    pub fn post_processing_fee(&self, tag: &str) -> Option<f64> {
        self.post_processing_fees.get(tag).copied()
    }

    /// All known post-processing tags and their fees
    pub fn post_processing_fees(&self) -> &BTreeMap<String, f64> {
        &self.post_processing_fees
    }

    /// Machine and logistics rates
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Quantity discount tiers
    pub fn discount_tiers(&self) -> &[DiscountTier] {
        &self.discount_tiers
    }

    /// Discount rate earned by `quantity`: the rate of the highest tier reached
    pub fn discount_rate(&self, quantity: u32) -> f64 {
        self.discount_tiers
            .iter()
            .filter(|tier| quantity >= tier.min_quantity)
            .max_by_key(|tier| tier.min_quantity)
            .map_or(0.0, |tier| tier.rate)
    }

    /// Currency used when a material does not name one
    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Handling of unknown post-processing tags
    pub fn unknown_tag_policy(&self) -> UnknownTagPolicy {
        self.unknown_tag_policy
    }

    /// Accepted configuration ranges
    pub fn bounds(&self) -> &ConfigurationBounds {
        &self.bounds
    }

    /// Check the configuration for values that would make quotes meaningless
    pub fn validate(&self) -> Result<()> {
        let rates = &self.rates;
        let positive = [
            ("basePrintSpeed", rates.base_print_speed),
            ("laborRate", rates.labor_rate),
            ("baselineLayerHeight", rates.baseline_layer_height),
            ("baselineInfillPercentage", rates.baseline_infill_percentage),
            ("supportTimeFactor", rates.support_time_factor),
            ("productiveHoursPerDay", rates.productive_hours_per_day),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!(
                    "rates.{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&rates.shell_fraction) {
            return Err(Error::Config(format!(
                "rates.shellFraction must be between 0 and 1, got {}",
                rates.shell_fraction
            )));
        }

        for (tag, fee) in &self.post_processing_fees {
            if !(fee.is_finite() && *fee >= 0.0) {
                return Err(Error::Config(format!(
                    "post-processing fee for '{}' must be non-negative, got {}",
                    tag, fee
                )));
            }
        }

        for tier in &self.discount_tiers {
            if !(0.0..1.0).contains(&tier.rate) {
                return Err(Error::Config(format!(
                    "discount rate for quantity {} must be in [0, 1), got {}",
                    tier.min_quantity, tier.rate
                )));
            }
        }

        if self.default_currency.trim().is_empty() {
            return Err(Error::Config("defaultCurrency must not be empty".to_string()));
        }

        let bounds = &self.bounds;
        if bounds.min_quantity == 0 || bounds.min_quantity > bounds.max_quantity {
            return Err(Error::Config(format!(
                "quantity bounds {}..={} are invalid",
                bounds.min_quantity, bounds.max_quantity
            )));
        }
        if !(bounds.min_infill_percentage > 0.0
            && bounds.min_infill_percentage <= bounds.max_infill_percentage)
        {
            return Err(Error::Config(format!(
                "infill bounds {}..={} are invalid",
                bounds.min_infill_percentage, bounds.max_infill_percentage
            )));
        }
        if !(bounds.min_layer_height > 0.0 && bounds.min_layer_height <= bounds.max_layer_height)
        {
            return Err(Error::Config(format!(
                "layer height bounds {}..={} are invalid",
                bounds.min_layer_height, bounds.max_layer_height
            )));
        }

        Ok(())
    }
}
