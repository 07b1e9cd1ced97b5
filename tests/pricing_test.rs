//! Integration tests for pricing, time and delivery estimates

use printquote::{
    DiscountTier, Error, MaterialPricing, MaterialProfile, PricingEngine, PrintConfiguration,
    QuoteConfig, RateTable, UnknownTagPolicy, estimate_delivery, estimate_time, price_quote,
};

fn material(base: f64, setup: f64, min: f64) -> MaterialProfile {
    MaterialProfile::new("resin", MaterialPricing::new(base, setup, min))
        .with_name("Standard Resin")
        .with_color("grey")
}

fn assert_subtotal_adds_up(pricing: &printquote::PricingBreakdown) {
    let sum = pricing.material_cost
        + pricing.labor_cost
        + pricing.setup_fee
        + pricing.post_processing_fee;
    assert!((pricing.subtotal - sum).abs() < 1e-9, "{:?}", pricing);
}

#[test]
fn test_reference_quote() {
    let pricing = price_quote(10.0, &material(0.5, 10.0, 25.0), &PrintConfiguration::new("grey"))
        .unwrap();

    assert_eq!(pricing.material_cost, 1.80);
    assert_eq!(pricing.labor_cost, 1.80);
    assert_eq!(pricing.setup_fee, 10.0);
    assert_eq!(pricing.subtotal, 13.60);
    assert_eq!(pricing.discount, 0.0);
    assert_eq!(pricing.total, 25.00);
    assert_subtotal_adds_up(&pricing);
}

#[test]
fn test_discount_tier_boundaries() {
    let resin = material(2.0, 5.0, 0.0);
    let rate_at = |quantity: u32| {
        let request = PrintConfiguration::new("grey").with_quantity(quantity);
        let pricing = price_quote(50.0, &resin, &request).unwrap();
        assert_subtotal_adds_up(&pricing);
        pricing.discount / pricing.subtotal
    };

    assert_eq!(rate_at(4), 0.0);
    assert!((rate_at(5) - 0.05).abs() < 1e-3);
    assert!((rate_at(9) - 0.05).abs() < 1e-3);
    assert!((rate_at(10) - 0.10).abs() < 1e-3);
    assert!((rate_at(500) - 0.10).abs() < 1e-3);
}

#[test]
fn test_floor_survives_the_discount() {
    let request = PrintConfiguration::new("grey").with_quantity(10);
    let pricing = price_quote(10.0, &material(0.5, 10.0, 45.0), &request).unwrap();

    // 18 + 18 + 10 = 46, minus 4.60 is below the floor
    assert_eq!(pricing.subtotal, 46.0);
    assert_eq!(pricing.discount, 4.6);
    assert_eq!(pricing.total, 45.0);
}

#[test]
fn test_post_processing_scales_with_quantity() {
    let request = PrintConfiguration::new("grey")
        .with_quantity(3)
        .with_post_processing("assembly")
        .with_post_processing("heat-treatment")
        .with_post_processing("polishing");
    let pricing = price_quote(1.0, &material(0.5, 0.0, 0.0), &request).unwrap();

    assert_eq!(pricing.post_processing_fee, 3.0 * (50.0 + 40.0 + 25.0));
    assert_subtotal_adds_up(&pricing);
}

#[test]
fn test_injected_fee_table_and_tiers() {
    let config = QuoteConfig::new()
        .with_post_processing_fee("priming", 7.5)
        .with_discount_tiers(vec![DiscountTier::new(2, 0.25)])
        .with_unknown_tag_policy(UnknownTagPolicy::Reject)
        .with_default_currency("USD");
    let engine = PricingEngine::new(&config);

    let request = PrintConfiguration::new("grey")
        .with_quantity(2)
        .with_post_processing("priming");
    let pricing = engine.price(10.0, &material(0.5, 10.0, 0.0), &request).unwrap();

    assert_eq!(pricing.post_processing_fee, 15.0);
    // 3.6 + 3.6 + 10 + 15
    assert_eq!(pricing.subtotal, 32.2);
    assert_eq!(pricing.discount, 8.05);
    assert_eq!(pricing.total, 24.15);
    assert_eq!(pricing.currency, "USD");

    let unknown = request.with_post_processing("anodizing");
    assert!(matches!(
        engine.price(10.0, &material(0.5, 10.0, 0.0), &unknown),
        Err(Error::UnknownPostProcessing(_))
    ));
}

#[test]
fn test_config_loaded_from_json() {
    let config = QuoteConfig::from_json_str(
        r#"{
            "rates": { "basePrintSpeed": 60, "laborRate": 20, "shippingDays": 3 },
            "discountTiers": []
        }"#,
    )
    .unwrap();
    let request = PrintConfiguration::new("grey").with_quantity(20);
    let pricing = PricingEngine::new(&config)
        .price(10.0, &material(0.5, 10.0, 0.0), &request)
        .unwrap();

    // 3.6 / 60 * 20 * 20
    assert_eq!(pricing.labor_cost, 24.0);
    assert_eq!(pricing.discount, 0.0);

    let rates = config.rates();
    assert_eq!(estimate_time(60.0, &request, rates), 20.0);
    assert_eq!(estimate_delivery(20.0, 0, &request, rates), 3 + 3);
}

#[test]
fn test_time_estimate_reference_values() {
    let rates = RateTable::default();
    let request = PrintConfiguration::new("grey")
        .with_infill_percentage(50.0)
        .with_layer_height(0.1)
        .with_support_structures(true)
        .with_quantity(4);

    // 15/30 * 2 * 2.5 * 1.3 * 4
    assert_eq!(estimate_time(15.0, &request, &rates), 13.0);
}

#[test]
fn test_delivery_components() {
    let rates = RateTable::default();
    let plain = PrintConfiguration::new("grey");
    let painted = plain.clone().with_post_processing("painting");

    assert_eq!(estimate_delivery(0.0, 0, &plain, &rates), 2);
    assert_eq!(estimate_delivery(8.0, 0, &plain, &rates), 3);
    assert_eq!(estimate_delivery(8.1, 0, &plain, &rates), 4);
    assert_eq!(estimate_delivery(8.1, 4, &plain, &rates), 8);
    assert_eq!(estimate_delivery(8.1, 4, &painted, &rates), 9);
}
