//! Print request validation
//!
//! A [`PrintConfiguration`] is checked before pricing runs:
//! - Quantity, infill percentage and layer height lie within the configured
//!   [`ConfigurationBounds`] (non-finite values are always out of bounds)
//! - The requested color is offered by the material
//!
//! All out-of-bounds fields are reported together so a customer can fix the
//! whole request at once.

use std::fmt::Display;

use crate::config::ConfigurationBounds;
use crate::error::{Error, Result};
use crate::model::{MaterialProfile, PrintConfiguration};

/// Validate a print request against its material and the field bounds
///
/// # Errors
///
/// - [`Error::Validation`] listing every field outside its bounds
/// - [`Error::UnsupportedColor`] if every field is in bounds but the color
///   is not one of the material's `color_options`
///
/// # Example
///
/// ```
/// use printquote::config::ConfigurationBounds;
/// use printquote::validator::validate_configuration;
/// use printquote::{MaterialPricing, MaterialProfile, PrintConfiguration};
///
/// let material = MaterialProfile::new("pla", MaterialPricing::new(0.5, 10.0, 25.0))
///     .with_color("white");
/// let bounds = ConfigurationBounds::default();
///
/// assert!(validate_configuration(&PrintConfiguration::new("white"), &material, &bounds).is_ok());
/// assert!(validate_configuration(&PrintConfiguration::new("red"), &material, &bounds).is_err());
/// ```
pub fn validate_configuration(
    configuration: &PrintConfiguration,
    material: &MaterialProfile,
    bounds: &ConfigurationBounds,
) -> Result<()> {
    validate_bounds(configuration, bounds)?;
    validate_color(configuration, material)
}

/// Check the numeric fields of a request against `bounds`
pub fn validate_bounds(
    configuration: &PrintConfiguration,
    bounds: &ConfigurationBounds,
) -> Result<()> {
    let violations: Vec<Error> = [
        check_range(
            "quantity",
            configuration.quantity,
            bounds.min_quantity,
            bounds.max_quantity,
        ),
        check_range(
            "infillPercentage",
            configuration.infill_percentage,
            bounds.min_infill_percentage,
            bounds.max_infill_percentage,
        ),
        check_range(
            "layerHeight",
            configuration.layer_height,
            bounds.min_layer_height,
            bounds.max_layer_height,
        ),
    ]
    .into_iter()
    .filter_map(|check| check.err())
    .collect();

    if violations.len() <= 1 {
        return violations.into_iter().next().map_or(Ok(()), Err);
    }

    let messages: Vec<String> = violations
        .into_iter()
        .map(|violation| match violation {
            Error::Validation(message) => message,
            other => other.to_string(),
        })
        .collect();
    Err(Error::Validation(messages.join("; ")))
}

/// Inclusive range check; NaN is never in range
fn check_range<T>(field_name: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + Display + Copy,
{
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::out_of_range(field_name, value, min, max))
    }
}

/// Check that the material is offered in the requested color
pub fn validate_color(
    configuration: &PrintConfiguration,
    material: &MaterialProfile,
) -> Result<()> {
    if material.offers_color(&configuration.color) {
        Ok(())
    } else {
        Err(Error::UnsupportedColor {
            color: configuration.color.clone(),
            material: material.id.clone(),
        })
    }
}
