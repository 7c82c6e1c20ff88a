use lpp_lattice::{
    estimate, search_bound, verify_bound, EstimateOpts, EstimatorParameters, SearchBound,
    CONSTANTS,
};

#[test]
fn rejects_non_positive_cutoffs() {
    for cutoff in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = search_bound(cutoff, &CONSTANTS).unwrap_err();
        assert_eq!(err.code(), "non-positive-cutoff");
    }
}

#[test]
fn bound_grows_as_cutoff_falls() {
    let expected = [
        (1.0e9, 0),
        (1.0e7, 1),
        (2.0e6, 2),
        (1.0e6, 3),
        (1.0e5, 6),
        (1.0e4, 13),
        (1.0, 280),
    ];
    for (cutoff_hz, max_index) in expected {
        let bound = search_bound(cutoff_hz, &CONSTANTS).unwrap();
        assert_eq!(bound.max_index(), max_index, "cutoff {cutoff_hz}");
    }
}

#[test]
fn runaway_bound_is_rejected() {
    let err = search_bound(1e-12, &CONSTANTS).unwrap_err();
    assert_eq!(err.code(), "bound-too-large");
}

#[test]
fn derived_bounds_pass_verification() {
    for cutoff_hz in [1.0e9, 1.0e7, 2.0e6, 1.0e6, 3.0e5, 1.0e5, 2.0e4] {
        let bound = search_bound(cutoff_hz, &CONSTANTS).unwrap();
        verify_bound(bound, cutoff_hz, &CONSTANTS).unwrap();
    }
}

#[test]
fn undersized_bound_is_detected() {
    let err = verify_bound(SearchBound::new(1), 1.0e5, &CONSTANTS).unwrap_err();
    assert_eq!(err.code(), "bound-truncated");
    assert!(err.info().context.contains_key("site"));
}

#[test]
fn invalid_parameters_fail_before_enumeration() {
    let err = EstimatorParameters::from_cli_units(1000.0, Some(150.0)).unwrap_err();
    assert_eq!(err.code(), "abundance-out-of-range");

    let err = EstimatorParameters::from_cli_units(-5.0, None).unwrap_err();
    assert_eq!(err.code(), "non-positive-cutoff");

    let unchecked = EstimatorParameters {
        hyperfine_cutoff_hz: 0.0,
        isotope_abundance: 0.01,
    };
    assert!(estimate(&unchecked, &EstimateOpts::default()).is_err());
}

#[test]
fn cli_units_are_converted() {
    let params = EstimatorParameters::from_cli_units(1000.0, Some(50.0)).unwrap();
    assert_eq!(params.hyperfine_cutoff_hz, 1.0e6);
    assert_eq!(params.isotope_abundance, 0.5);
}
