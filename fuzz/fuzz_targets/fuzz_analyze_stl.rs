#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Raw bytes through format detection, decoding and measurement
    let analysis = printquote::analyze_mesh(data);

    assert_eq!(analysis.has_errors, !analysis.errors.is_empty());
    if analysis.has_errors {
        assert_eq!(analysis.volume_cm3, 0.0);
        assert_eq!(analysis.triangle_count, 0);
        assert!(!analysis.is_watertight);
    } else {
        assert!(analysis.volume_cm3.is_finite() && analysis.volume_cm3 >= 0.0);
        assert!(analysis.surface_area_cm2.is_finite() && analysis.surface_area_cm2 >= 0.0);
    }
});
