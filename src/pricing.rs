//! Cost breakdown for a print request
//!
//! Pricing follows a fixed sequence:
//!
//! 1. Effective volume: the shell fraction of the part is always paid in
//!    full, the remainder scales with the infill ratio
//! 2. Material cost from the effective volume and the per-cm³ price
//! 3. Labor cost from the print time implied by the effective volume
//! 4. Flat setup fee (not scaled by quantity)
//! 5. Post-processing fees, once per tag per unit
//! 6. Subtotal, then a quantity discount, then the minimum-price floor
//!
//! Every monetary value is rounded to two decimals as it is produced, so
//! the breakdown adds up exactly as displayed.
//!
//! The engine assumes the configuration was already checked with
//! [`crate::validator::validate_configuration`].

use crate::config::{QuoteConfig, UnknownTagPolicy};
use crate::error::{Error, Result};
use crate::model::{MaterialProfile, PricingBreakdown, PrintConfiguration, round2};

/// Volume actually paid for, in cm³
///
/// `shell_fraction` of the part is costed regardless of infill; the rest is
/// scaled by `infill_percentage / 100`.
pub fn effective_volume(volume_cm3: f64, infill_percentage: f64, shell_fraction: f64) -> f64 {
    volume_cm3 * (infill_percentage / 100.0) * (1.0 - shell_fraction) + volume_cm3 * shell_fraction
}

/// Computes [`PricingBreakdown`]s against a [`QuoteConfig`]
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    config: &'a QuoteConfig,
}

impl<'a> PricingEngine<'a> {
    /// Create an engine using the fee table and rates of `config`
    pub fn new(config: &'a QuoteConfig) -> Self {
        Self { config }
    }

    /// Price `quantity` copies of a part of `volume_cm3` in `material`
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidVolume`] if the volume is negative or not finite, or
    ///   so large that the price overflows
    /// - [`Error::Validation`] if the material's pricing is negative or not finite
    /// - [`Error::UnknownPostProcessing`] if a tag has no fee and the
    ///   configuration rejects unknown tags
    pub fn price(
        &self,
        volume_cm3: f64,
        material: &MaterialProfile,
        configuration: &PrintConfiguration,
    ) -> Result<PricingBreakdown> {
        if !(volume_cm3.is_finite() && volume_cm3 >= 0.0) {
            return Err(Error::InvalidVolume(format!(
                "volume must be a non-negative number of cm³, got {}",
                volume_cm3
            )));
        }
        check_material_pricing(material)?;

        let rates = self.config.rates();
        let pricing = &material.pricing;
        let quantity = f64::from(configuration.quantity);

        let effective = effective_volume(
            volume_cm3,
            configuration.infill_percentage,
            rates.shell_fraction,
        );

        let material_cost = round2(effective * pricing.base_price_per_cm3 * quantity);
        let print_hours_per_unit = effective / rates.base_print_speed;
        let labor_cost = round2(print_hours_per_unit * rates.labor_rate * quantity);
        let setup_fee = pricing.setup_fee;
        let post_processing_fee =
            round2(quantity * self.post_processing_per_unit(&configuration.post_processing)?);

        let subtotal = round2(material_cost + labor_cost + setup_fee + post_processing_fee);
        if !subtotal.is_finite() {
            return Err(Error::InvalidVolume(format!(
                "price of {} cm³ x {} overflowed",
                volume_cm3, configuration.quantity
            )));
        }
        let discount = round2(subtotal * self.config.discount_rate(configuration.quantity));
        let total = round2(subtotal - discount).max(pricing.min_price);

        let currency = pricing
            .currency
            .clone()
            .unwrap_or_else(|| self.config.default_currency().to_string());

        tracing::debug!(
            material = %material.id,
            quantity = configuration.quantity,
            effective_volume_cm3 = effective,
            subtotal,
            discount,
            total,
            "Priced print request"
        );

        Ok(PricingBreakdown {
            material_cost,
            labor_cost,
            setup_fee,
            post_processing_fee,
            subtotal,
            discount,
            total,
            currency,
        })
    }

    /// Sum of the fees for one unit; each occurrence of a tag counts
    fn post_processing_per_unit(&self, tags: &[String]) -> Result<f64> {
        let mut sum = 0.0;
        for tag in tags {
            match self.config.post_processing_fee(tag) {
                Some(fee) => sum += fee,
                None => match self.config.unknown_tag_policy() {
                    UnknownTagPolicy::Ignore => {
                        tracing::warn!(tag = %tag, "Unknown post-processing option costed at zero");
                    }
                    UnknownTagPolicy::Reject => {
                        return Err(Error::UnknownPostProcessing(tag.clone()));
                    }
                },
            }
        }
        Ok(sum)
    }
}

fn check_material_pricing(material: &MaterialProfile) -> Result<()> {
    let pricing = &material.pricing;
    let fields = [
        ("basePricePerCm3", pricing.base_price_per_cm3),
        ("setupFee", pricing.setup_fee),
        ("minPrice", pricing.min_price),
    ];
    for (name, value) in fields {
        if !(value.is_finite() && value >= 0.0) {
            return Err(Error::Validation(format!(
                "material '{}' has invalid pricing: {} must be non-negative, got {}",
                material.id, name, value
            )));
        }
    }
    Ok(())
}

/// Price a request with the default fee table and rates
///
/// # Example
///
/// ```
/// use printquote::{MaterialPricing, MaterialProfile, PrintConfiguration, price_quote};
///
/// let material = MaterialProfile::new("pla", MaterialPricing::new(0.5, 10.0, 25.0));
/// let configuration = PrintConfiguration::new("white");
///
/// let pricing = price_quote(10.0, &material, &configuration)?;
/// assert_eq!(pricing.subtotal, 13.6);
/// assert_eq!(pricing.total, 25.0);
/// assert_eq!(pricing.currency, "AED");
/// # Ok::<(), printquote::Error>(())
/// ```
pub fn price_quote(
    volume_cm3: f64,
    material: &MaterialProfile,
    configuration: &PrintConfiguration,
) -> Result<PricingBreakdown> {
    let config = QuoteConfig::default();
    PricingEngine::new(&config).price(volume_cm3, material, configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateTable;
    use crate::model::MaterialPricing;

    fn pla() -> MaterialProfile {
        MaterialProfile::new("pla", MaterialPricing::new(0.5, 10.0, 25.0)).with_color("white")
    }

    #[test]
    fn test_effective_volume() {
        assert!((effective_volume(10.0, 20.0, 0.2) - 3.6).abs() < 1e-12);
        assert!((effective_volume(10.0, 100.0, 0.2) - 10.0).abs() < 1e-12);
        assert_eq!(effective_volume(0.0, 50.0, 0.2), 0.0);
    }

    #[test]
    fn test_single_unit_hits_price_floor() {
        let config = QuoteConfig::default();
        let pricing = PricingEngine::new(&config)
            .price(10.0, &pla(), &PrintConfiguration::new("white"))
            .unwrap();

        assert_eq!(pricing.material_cost, 1.8);
        assert_eq!(pricing.labor_cost, 1.8);
        assert_eq!(pricing.setup_fee, 10.0);
        assert_eq!(pricing.post_processing_fee, 0.0);
        assert_eq!(pricing.subtotal, 13.6);
        assert_eq!(pricing.discount, 0.0);
        assert_eq!(pricing.total, 25.0);
        assert_eq!(pricing.currency, "AED");
    }

    #[test]
    fn test_ten_units_get_ten_percent_discount() {
        let config = QuoteConfig::default();
        let request = PrintConfiguration::new("white").with_quantity(10);
        let pricing = PricingEngine::new(&config).price(10.0, &pla(), &request).unwrap();

        assert_eq!(pricing.material_cost, 18.0);
        assert_eq!(pricing.labor_cost, 18.0);
        assert_eq!(pricing.subtotal, 46.0);
        assert_eq!(pricing.discount, 4.6);
        assert_eq!(pricing.total, 41.4);
    }

    #[test]
    fn test_floor_applies_after_discount() {
        let mut material = pla();
        material.pricing.min_price = 50.0;
        let config = QuoteConfig::default();
        let request = PrintConfiguration::new("white").with_quantity(10);
        let pricing = PricingEngine::new(&config).price(10.0, &material, &request).unwrap();

        assert_eq!(pricing.discount, 4.6);
        assert_eq!(pricing.total, 50.0);
    }

    #[test]
    fn test_five_units_get_five_percent_discount() {
        let config = QuoteConfig::default();
        let request = PrintConfiguration::new("white").with_quantity(5);
        let pricing = PricingEngine::new(&config).price(10.0, &pla(), &request).unwrap();

        // 9 + 9 + 10 = 28
        assert_eq!(pricing.subtotal, 28.0);
        assert_eq!(pricing.discount, 1.4);
        assert_eq!(pricing.total, 26.6);
    }

    #[test]
    fn test_post_processing_counts_each_tag_per_unit() {
        let config = QuoteConfig::default();
        let request = PrintConfiguration::new("white")
            .with_quantity(2)
            .with_post_processing("sanding")
            .with_post_processing("painting")
            .with_post_processing("sanding");
        let pricing = PricingEngine::new(&config).price(10.0, &pla(), &request).unwrap();

        assert_eq!(pricing.post_processing_fee, 150.0);
        assert_eq!(
            pricing.subtotal,
            round2(
                pricing.material_cost
                    + pricing.labor_cost
                    + pricing.setup_fee
                    + pricing.post_processing_fee
            )
        );
    }

    #[test]
    fn test_unknown_tag_is_free_when_ignored() {
        let config = QuoteConfig::default();
        let request = PrintConfiguration::new("white").with_post_processing("gilding");
        let pricing = PricingEngine::new(&config).price(10.0, &pla(), &request).unwrap();
        assert_eq!(pricing.post_processing_fee, 0.0);
    }

    #[test]
    fn test_unknown_tag_fails_when_rejected() {
        let config = QuoteConfig::new().with_unknown_tag_policy(UnknownTagPolicy::Reject);
        let request = PrintConfiguration::new("white")
            .with_post_processing("sanding")
            .with_post_processing("gilding");
        let err = PricingEngine::new(&config).price(10.0, &pla(), &request).unwrap_err();
        assert!(matches!(err, Error::UnknownPostProcessing(ref tag) if tag == "gilding"));
    }

    #[test]
    fn test_material_currency_wins_over_default() {
        let mut material = pla();
        material.pricing = material.pricing.with_currency("USD");
        let config = QuoteConfig::new().with_default_currency("EUR");
        let pricing = PricingEngine::new(&config)
            .price(10.0, &material, &PrintConfiguration::new("white"))
            .unwrap();
        assert_eq!(pricing.currency, "USD");

        let pricing = PricingEngine::new(&config)
            .price(10.0, &pla(), &PrintConfiguration::new("white"))
            .unwrap();
        assert_eq!(pricing.currency, "EUR");
    }

    #[test]
    fn test_custom_rates() {
        let config = QuoteConfig::new().with_rates(RateTable {
            base_print_speed: 10.0,
            labor_rate: 30.0,
            ..RateTable::default()
        });
        let pricing = PricingEngine::new(&config)
            .price(10.0, &pla(), &PrintConfiguration::new("white"))
            .unwrap();
        // 3.6 / 10 * 30
        assert_eq!(pricing.labor_cost, 10.8);
    }

    #[test]
    fn test_invalid_volume() {
        let config = QuoteConfig::default();
        let engine = PricingEngine::new(&config);
        let request = PrintConfiguration::new("white");
        for volume in [-1.0, f64::NAN, f64::INFINITY] {
            let err = engine.price(volume, &pla(), &request).unwrap_err();
            assert!(err.to_string().contains("[E3002]"));
        }
    }

    #[test]
    fn test_overflowing_price() {
        let request = PrintConfiguration::new("white").with_quantity(1000);
        let err = price_quote(f64::MAX, &pla(), &request).unwrap_err();
        assert!(matches!(err, Error::InvalidVolume(_)));
    }

    #[test]
    fn test_invalid_material_pricing() {
        let mut material = pla();
        material.pricing.base_price_per_cm3 = f64::NAN;
        let err = price_quote(10.0, &material, &PrintConfiguration::new("white")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("basePricePerCm3"));
    }

    #[test]
    fn test_zero_volume_costs_setup_and_floor() {
        let pricing = price_quote(0.0, &pla(), &PrintConfiguration::new("white")).unwrap();
        assert_eq!(pricing.material_cost, 0.0);
        assert_eq!(pricing.subtotal, 10.0);
        assert_eq!(pricing.total, 25.0);
    }
}
