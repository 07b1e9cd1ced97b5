//! Quote assembly
//!
//! [`QuoteAssembler`] runs a print request through the whole pipeline:
//! validation, pricing, print time and delivery estimates. It owns the
//! [`QuoteConfig`] so one assembler can serve any number of requests.

use crate::config::QuoteConfig;
use crate::error::{Error, Result};
use crate::estimate::{estimate_delivery, estimate_time};
use crate::model::{MaterialProfile, MeshAnalysis, PrintConfiguration, Quote};
use crate::pricing::PricingEngine;
use crate::validator::validate_configuration;

/// Builds [`Quote`]s from a volume, a material and a print request
///
/// # Example
///
/// ```
/// use printquote::{MaterialPricing, MaterialProfile, PrintConfiguration, QuoteAssembler};
///
/// let assembler = QuoteAssembler::default();
/// let material = MaterialProfile::new("pla", MaterialPricing::new(0.5, 10.0, 25.0))
///     .with_color("white")
///     .with_lead_time_days(1);
/// let request = PrintConfiguration::new("white").with_quantity(10);
///
/// let quote = assembler.assemble(10.0, &material, &request)?;
/// assert_eq!(quote.pricing.total, 41.4);
/// assert_eq!(quote.estimated_print_time_hours, 3.3);
/// assert_eq!(quote.estimated_delivery_days, 1 + 1 + 2);
/// # Ok::<(), printquote::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuoteAssembler {
    config: QuoteConfig,
}

impl QuoteAssembler {
    /// Create an assembler, rejecting an inconsistent configuration
    pub fn new(config: QuoteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The fee table, rates and bounds in use
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Validate and price a request for a part of `volume_cm3`
    ///
    /// # Errors
    ///
    /// Validation errors for the request ([`Error::Validation`],
    /// [`Error::UnsupportedColor`]) are returned before anything is priced.
    /// Pricing errors are passed through unchanged.
    pub fn assemble(
        &self,
        volume_cm3: f64,
        material: &MaterialProfile,
        configuration: &PrintConfiguration,
    ) -> Result<Quote> {
        validate_configuration(configuration, material, self.config.bounds())?;

        let pricing = PricingEngine::new(&self.config).price(volume_cm3, material, configuration)?;
        let rates = self.config.rates();
        let hours = estimate_time(volume_cm3, configuration, rates);
        let days = estimate_delivery(hours, material.lead_time_days, configuration, rates);

        tracing::info!(
            material = %material.id,
            quantity = configuration.quantity,
            total = pricing.total,
            currency = %pricing.currency,
            print_hours = hours,
            delivery_days = days,
            "Quote assembled"
        );

        Ok(Quote {
            material_id: material.id.clone(),
            volume_cm3,
            configuration: configuration.clone(),
            pricing,
            estimated_print_time_hours: hours,
            estimated_delivery_days: days,
        })
    }

    /// Quote a request using the volume of an analysed upload
    ///
    /// Uploads whose analysis failed cannot be quoted; the analysis errors
    /// are returned as [`Error::InvalidVolume`].
    pub fn assemble_from_analysis(
        &self,
        analysis: &MeshAnalysis,
        material: &MaterialProfile,
        configuration: &PrintConfiguration,
    ) -> Result<Quote> {
        if let Some(message) = analysis.errors_message() {
            return Err(Error::InvalidVolume(format!(
                "mesh analysis failed: {}",
                message
            )));
        }
        self.assemble(analysis.volume_cm3, material, configuration)
    }
}
