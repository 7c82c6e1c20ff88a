use lpp_lattice::{
    estimate, EstimateOpts, EstimatorParameters, PairEstimate, NATURAL_C13_ABUNDANCE,
};

fn run(cutoff_khz: f64, abundance_percent: Option<f64>, opts: &EstimateOpts) -> PairEstimate {
    let params = EstimatorParameters::from_cli_units(cutoff_khz, abundance_percent).unwrap();
    estimate(&params, opts).unwrap()
}

#[test]
fn one_megahertz_matches_reference() {
    let report = run(1000.0, None, &EstimateOpts::default());
    assert_eq!(report.params.isotope_abundance, NATURAL_C13_ABUNDANCE);
    assert_eq!(report.search_bound.max_index(), 3);
    assert_eq!(report.class_count, 23);
    assert_eq!(report.site_count, 120);
    let sizes: Vec<_> = report.class_sizes.iter().collect();
    assert_eq!(sizes, vec![(1, 1), (2, 1), (3, 7), (6, 12), (12, 2)]);
    assert!((report.probability - 0.036_004_288_135_361_05).abs() < 1e-12);
    assert!(report.probability > 0.0 && report.probability < 1.0);
}

#[test]
fn two_megahertz_matches_reference() {
    let report = run(2000.0, None, &EstimateOpts::default());
    assert_eq!(report.search_bound.max_index(), 2);
    let sizes: Vec<_> = report.class_sizes.iter().collect();
    assert_eq!(sizes, vec![(1, 1), (3, 6), (6, 6)]);
    assert!((report.probability - 0.011_995_910_885_773_009).abs() < 1e-12);
}

#[test]
fn cutoff_above_every_site_yields_zero() {
    let report = run(1.0e6, None, &EstimateOpts::default());
    assert_eq!(report.search_bound.max_index(), 0);
    assert!(report.shells.is_empty());
    assert_eq!(report.class_count, 0);
    assert_eq!(report.probability, 0.0);
}

#[test]
fn repeated_runs_are_identical() {
    let first = run(500.0, Some(1.07), &EstimateOpts::default());
    let second = run(500.0, Some(1.07), &EstimateOpts::default());
    assert_eq!(first, second);
    assert_eq!(first.probability.to_bits(), second.probability.to_bits());
    assert_eq!(first.estimate_hash.len(), 64);
}

#[test]
fn thread_count_does_not_change_result() {
    let serial = run(200.0, None, &EstimateOpts::default());
    let parallel = run(
        200.0,
        None,
        &EstimateOpts {
            threads: 4,
            verify_bound: true,
        },
    );
    assert_eq!(serial.probability.to_bits(), parallel.probability.to_bits());
    assert_eq!(serial.class_sizes, parallel.class_sizes);
    assert_eq!(serial.shells, parallel.shells);
    assert_eq!(serial.estimate_hash, parallel.estimate_hash);
}

#[test]
fn full_abundance_pairs_with_certainty() {
    let report = run(100.0, Some(100.0), &EstimateOpts::default());
    assert!(report.class_sizes.largest().unwrap() >= 2);
    assert_eq!(report.probability, 1.0);
}

#[test]
#[ignore = "enumerates roughly 3e8 sites"]
fn one_hertz_cutoff_at_full_abundance_is_certain() {
    let opts = EstimateOpts {
        threads: 8,
        verify_bound: true,
    };
    let report = run(0.001, Some(100.0), &opts);
    assert_eq!(report.search_bound.max_index(), 280);
    assert_eq!(report.probability, 1.0);
}

#[test]
fn shell_summaries_account_for_every_class() {
    let report = run(700.0, None, &EstimateOpts::default());
    let classes: usize = report.shells.iter().map(|shell| shell.class_sizes.len()).sum();
    let sites: usize = report.shells.iter().map(|shell| shell.sites).sum();
    assert_eq!(classes, report.class_count);
    assert_eq!(sites, report.site_count);
    for pair in report.shells.windows(2) {
        assert!(pair[0].quarters < pair[1].quarters);
    }
    for shell in &report.shells {
        assert_eq!(shell.shell * 4.0, shell.quarters as f64);
        assert!(shell.quarters <= report.search_bound.max_shell_quarters());
    }
}

#[test]
fn report_serializes_to_json() {
    let report = run(1000.0, None, &EstimateOpts::default());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["search_bound"], 3);
    assert_eq!(value["class_sizes"]["6"], 12);
    let decoded: PairEstimate = serde_json::from_value(value).unwrap();
    assert_eq!(decoded.class_sizes, report.class_sizes);
    assert_eq!(decoded.estimate_hash, report.estimate_hash);
}
