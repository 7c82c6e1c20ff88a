use std::fs;
use std::process::{Command, Output};

fn pair_compute(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pair-compute"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run pair-compute")
}

fn stdout_probability(output: &Output) -> f64 {
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .expect("probability on stdout")
}

#[test]
fn prints_only_the_probability() {
    let output = pair_compute(&["1000"]);
    assert!(output.status.success());
    let value = stdout_probability(&output);
    assert!((value - 0.036_004_288_135_361_05).abs() < 1e-12);
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn explicit_abundance_is_a_percentage() {
    let default = stdout_probability(&pair_compute(&["1000"]));
    let explicit = stdout_probability(&pair_compute(&["1000", "1.07"]));
    assert!((default - explicit).abs() < 1e-12);
    let doubled = stdout_probability(&pair_compute(&["1000", "2.14"]));
    assert!(doubled > default);
}

#[test]
fn unreachable_cutoff_prints_zero() {
    let output = pair_compute(&["1000000"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    for args in [&[][..], &["1000", "1.07", "3"][..]] {
        let output = pair_compute(args);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn non_numeric_input_fails() {
    assert!(!pair_compute(&["fast"]).status.success());
    assert!(!pair_compute(&["1000", "lots"]).status.success());
}

#[test]
fn invalid_values_fail_with_codes() {
    let output = pair_compute(&["-5"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("non-positive-cutoff"));

    let output = pair_compute(&["1000", "150"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("abundance-out-of-range"));
}

#[test]
fn json_report_carries_the_breakdown() {
    let output = pair_compute(&["--json", "1000"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["search_bound"], 3);
    assert_eq!(report["class_count"], 23);
    assert_eq!(report["site_count"], 120);
    assert!(report["estimate_hash"].as_str().unwrap().len() == 64);
}

#[test]
fn config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pair.yaml");
    fs::write(&path, "format: json\nestimate:\n  threads: 2\n").unwrap();
    let output = pair_compute(&["--config", path.to_str().unwrap(), "2000"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["search_bound"], 2);

    fs::write(&path, "format: [").unwrap();
    let output = pair_compute(&["--config", path.to_str().unwrap(), "2000"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("yaml_deserialize"));
}
