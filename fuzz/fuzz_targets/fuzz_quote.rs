#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;
use printquote::{MaterialPricing, MaterialProfile, PrintConfiguration, QuoteAssembler};

#[derive(Debug)]
struct FuzzRequest {
    volume: f64,
    base_price: f64,
    setup_fee: f64,
    min_price: f64,
    quantity: u32,
    infill: f64,
    layer_height: f64,
    supports: bool,
    tags: Vec<String>,
}

impl<'a> Arbitrary<'a> for FuzzRequest {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let tag_count = u.int_in_range(0..=5)?;
        let mut tags = Vec::new();
        for _ in 0..tag_count {
            tags.push(u.arbitrary()?);
        }
        Ok(FuzzRequest {
            volume: u.arbitrary()?,
            base_price: u.arbitrary()?,
            setup_fee: u.arbitrary()?,
            min_price: u.arbitrary()?,
            quantity: u.arbitrary()?,
            infill: u.arbitrary()?,
            layer_height: u.arbitrary()?,
            supports: u.arbitrary()?,
            tags,
        })
    }
}

fuzz_target!(|request: FuzzRequest| {
    // Arbitrary numbers must be rejected with an error, never a panic
    let material = MaterialProfile::new(
        "fuzz",
        MaterialPricing::new(request.base_price, request.setup_fee, request.min_price),
    )
    .with_color("any");
    let configuration = request.tags.into_iter().fold(
        PrintConfiguration::new("any")
            .with_quantity(request.quantity)
            .with_infill_percentage(request.infill)
            .with_layer_height(request.layer_height)
            .with_support_structures(request.supports),
        |config, tag| config.with_post_processing(tag),
    );

    let assembler = QuoteAssembler::default();
    if let Ok(quote) = assembler.assemble(request.volume, &material, &configuration) {
        assert!(quote.pricing.total >= material.pricing.min_price);
        assert!(quote.estimated_print_time_hours >= 0.0);
    }
});
