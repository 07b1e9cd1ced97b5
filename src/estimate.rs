//! Print time and delivery estimates
//!
//! Both estimates are scaled from a baseline print: at the baseline layer
//! height and infill a part prints at `base_print_speed` cm³ per hour.
//! Thinner layers and denser infill slow the print down proportionally,
//! and support structures add a flat penalty.

use crate::config::RateTable;
use crate::model::{PrintConfiguration, round1};

/// Estimated hours to print every unit of a request, rounded to 0.1 h
///
/// The configuration is expected to have passed validation; a zero layer
/// height or print speed yields a non-finite estimate.
///
/// # Example
///
/// ```
/// use printquote::{PrintConfiguration, RateTable, estimate_time};
///
/// let rates = RateTable::default();
/// let baseline = PrintConfiguration::new("white");
/// assert_eq!(estimate_time(30.0, &baseline, &rates), 1.0);
///
/// let fine = baseline.clone().with_layer_height(0.1).with_support_structures(true);
/// assert_eq!(estimate_time(30.0, &fine, &rates), 2.6);
/// ```
pub fn estimate_time(
    volume_cm3: f64,
    configuration: &PrintConfiguration,
    rates: &RateTable,
) -> f64 {
    let base_hours = volume_cm3 / rates.base_print_speed;
    let layer_factor = rates.baseline_layer_height / configuration.layer_height;
    let infill_factor = configuration.infill_percentage / rates.baseline_infill_percentage;
    let support_factor = if configuration.support_structures {
        rates.support_time_factor
    } else {
        1.0
    };

    round1(
        base_hours
            * layer_factor
            * infill_factor
            * support_factor
            * f64::from(configuration.quantity),
    )
}

/// Whole days of printing needed for `hours` of machine time
///
/// NaN and non-positive inputs count as no printing at all; huge or
/// infinite inputs saturate at `u32::MAX`.
pub fn print_days(hours: f64, rates: &RateTable) -> u32 {
    if hours.is_nan() || hours <= 0.0 {
        return 0;
    }
    // Float-to-int casts saturate
    (hours / rates.productive_hours_per_day).ceil() as u32
}

/// Estimated days until the order arrives
///
/// Lead time, print days, one post-processing day when any post-processing
/// is requested, and the shipping days are added together.
///
/// # Example
///
/// ```
/// use printquote::{PrintConfiguration, RateTable, estimate_delivery};
///
/// let rates = RateTable::default();
/// let plain = PrintConfiguration::new("white");
/// assert_eq!(estimate_delivery(9.5, 3, &plain, &rates), 3 + 2 + 2);
///
/// let sanded = plain.with_post_processing("sanding");
/// assert_eq!(estimate_delivery(9.5, 3, &sanded, &rates), 3 + 2 + 1 + 2);
/// ```
pub fn estimate_delivery(
    hours: f64,
    lead_time_days: u32,
    configuration: &PrintConfiguration,
    rates: &RateTable,
) -> u32 {
    let post_processing_days = if configuration.has_post_processing() {
        rates.post_processing_days
    } else {
        0
    };

    lead_time_days
        .saturating_add(print_days(hours, rates))
        .saturating_add(post_processing_days)
        .saturating_add(rates.shipping_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_time() {
        let rates = RateTable::default();
        let config = PrintConfiguration::new("white");
        assert_eq!(estimate_time(10.0, &config, &rates), 0.3);
        assert_eq!(estimate_time(0.0, &config, &rates), 0.0);
    }

    #[test]
    fn test_time_scales_with_every_factor() {
        let rates = RateTable::default();
        let base = PrintConfiguration::new("white");
        assert_eq!(estimate_time(60.0, &base, &rates), 2.0);

        let dense = base.clone().with_infill_percentage(40.0);
        assert_eq!(estimate_time(60.0, &dense, &rates), 4.0);

        let thick = base.clone().with_layer_height(0.4);
        assert_eq!(estimate_time(60.0, &thick, &rates), 1.0);

        let supported = base.clone().with_support_structures(true);
        assert_eq!(estimate_time(60.0, &supported, &rates), 2.6);

        let batch = base.with_quantity(3);
        assert_eq!(estimate_time(60.0, &batch, &rates), 6.0);
    }

    #[test]
    fn test_print_days() {
        let rates = RateTable::default();
        assert_eq!(print_days(0.0, &rates), 0);
        assert_eq!(print_days(0.1, &rates), 1);
        assert_eq!(print_days(8.0, &rates), 1);
        assert_eq!(print_days(8.1, &rates), 2);
        assert_eq!(print_days(-3.0, &rates), 0);
        assert_eq!(print_days(f64::NAN, &rates), 0);
        assert_eq!(print_days(f64::NEG_INFINITY, &rates), 0);
        assert_eq!(print_days(f64::INFINITY, &rates), u32::MAX);
    }

    #[test]
    fn test_delivery_breakdown() {
        let rates = RateTable::default();
        let config = PrintConfiguration::new("white");
        assert_eq!(estimate_delivery(0.0, 0, &config, &rates), 2);
        assert_eq!(estimate_delivery(0.3, 0, &config, &rates), 3);
        assert_eq!(estimate_delivery(16.5, 5, &config, &rates), 5 + 3 + 2);
    }

    #[test]
    fn test_delivery_is_monotonic() {
        let rates = RateTable::default();
        let plain = PrintConfiguration::new("white");
        let finished = plain.clone().with_post_processing("polishing");

        let mut previous = 0;
        for lead in 0..10 {
            let days = estimate_delivery(12.0, lead, &plain, &rates);
            assert!(days >= previous);
            previous = days;
        }

        let mut previous = 0;
        for tenths in 0..500 {
            let days = estimate_delivery(f64::from(tenths) / 10.0, 2, &plain, &rates);
            assert!(days >= previous);
            previous = days;
        }

        assert!(
            estimate_delivery(12.0, 2, &finished, &rates)
                > estimate_delivery(12.0, 2, &plain, &rates)
        );
    }

    #[test]
    fn test_delivery_saturates() {
        let rates = RateTable::default();
        let config = PrintConfiguration::new("white");
        assert_eq!(estimate_delivery(1e30, u32::MAX, &config, &rates), u32::MAX);
    }

    #[test]
    fn test_infinite_hours_are_not_faster_than_huge_ones() {
        let rates = RateTable::default();
        let config = PrintConfiguration::new("white");
        assert_eq!(print_days(1e30, &rates), u32::MAX);
        assert!(print_days(f64::INFINITY, &rates) >= print_days(1e30, &rates));
        assert!(
            estimate_delivery(f64::INFINITY, 0, &config, &rates)
                >= estimate_delivery(1e30, 0, &config, &rates)
        );
    }
}
