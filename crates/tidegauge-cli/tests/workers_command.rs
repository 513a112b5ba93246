use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tidegauge_core::extract::DEFAULT_WORKER_SOURCE;
use tidegauge_core::report::ScenarioInput;

/// Helper to get path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn scenario(label: &str, filename: &str) -> ScenarioInput {
    ScenarioInput::new(label, fixture_path(filename))
}

#[allow(deprecated)]
fn tidegauge() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin("tidegauge"))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Scenarios are summarized in the order the files were given
#[test]
fn test_compare_workers_summarizes_each_scenario() {
    let inputs = vec![
        scenario("baseline", "k6-workers-baseline.log"),
        scenario("cmsmode", "k6-workers-cmsmode.log"),
    ];

    let comparison =
        tidegauge_cli::commands::workers::compare_workers(&inputs, DEFAULT_WORKER_SOURCE)
            .expect("Should compare worker logs");

    assert_eq!(comparison.labels(), vec!["baseline", "cmsmode"]);

    let baseline = &comparison.scenarios[0].summary;
    assert_eq!(baseline.worker_count, 2, "worker 3 never reported throughput");
    assert_eq!(baseline.total_requests, 3000);
    assert_eq!(baseline.total_throughput, 50.5);
    assert_eq!(baseline.mean_avg_latency_ms, 825.0);
    assert_eq!(baseline.mean_p95_latency_ms, 1450.0);
    assert_eq!(baseline.mean_fail_rate_percent, Some(0.75));

    let cmsmode = &comparison.scenarios[1].summary;
    assert_eq!(cmsmode.worker_count, 3);
    assert_eq!(cmsmode.total_throughput, 166.0);
    assert_close(cmsmode.mean_avg_latency_ms, 30.8 / 3.0);
    assert_close(cmsmode.mean_p95_latency_ms, 82.0 / 3.0);
}

/// Workers come back in numeric id order with their own figures
#[test]
fn test_compare_workers_keeps_worker_detail() {
    let inputs = vec![scenario("cmsmode", "k6-workers-cmsmode.log")];

    let comparison =
        tidegauge_cli::commands::workers::compare_workers(&inputs, DEFAULT_WORKER_SOURCE).unwrap();

    let workers = &comparison.scenarios[0].workers;
    let ids: Vec<&str> = workers.iter().map(|w| w.worker_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "10"]);

    let tenth = &workers[2];
    assert_eq!(tenth.request_count, 1000);
    assert_close(tenth.avg_latency_ms, 0.8);
    assert_close(tenth.median_latency_ms, 0.5);
    assert_eq!(tenth.p95_latency_ms, 2.0);
}

/// A file without worker summaries or a missing file is skipped, not fatal
#[test]
fn test_compare_workers_skips_files_without_data() {
    let inputs = vec![
        scenario("unrelated", "unrelated.log"),
        scenario("missing", "does-not-exist.log"),
        scenario("baseline", "k6-workers-baseline.log"),
    ];

    let comparison =
        tidegauge_cli::commands::workers::compare_workers(&inputs, DEFAULT_WORKER_SOURCE).unwrap();

    assert_eq!(comparison.labels(), vec!["baseline"]);
    assert_eq!(comparison.skipped, vec!["unrelated", "missing"]);
}

#[test]
fn test_workers_table_output() {
    let mut cmd = tidegauge();
    cmd.arg("--format")
        .arg("table")
        .arg("workers")
        .arg(fixture_path("k6-workers-baseline.log"))
        .arg(fixture_path("k6-workers-cmsmode.log"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "baseline,2,3000,50.50,825.00,660.00,1450.00",
        ))
        .stdout(predicate::str::contains(
            "cmsmode,3,10000,166.00,10.27,8.50,27.33",
        ));
}

#[test]
fn test_workers_table_with_worker_rows() {
    let mut cmd = tidegauge();
    cmd.args(["--format", "table", "workers", "--workers"])
        .arg(format!("cms={}", fixture_path("k6-workers-cmsmode.log").display()));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cms,10,1000,16.00,0.80,0.50,2.00,0.00"))
        .stdout(predicate::str::contains("cms,2,4000,66.75,17.50,15.00,50.00,2.50"));
}

#[test]
fn test_workers_json_output() {
    let mut cmd = tidegauge();
    cmd.args(["--format", "json", "workers"])
        .arg(fixture_path("k6-workers-baseline.log"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");

    let scenarios = json["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0]["label"], "baseline");
    assert_eq!(scenarios[0]["color"], "#4285f4");
    assert_eq!(scenarios[0]["summary"]["total_throughput"], 50.5);
    assert_eq!(scenarios[0]["workers"].as_array().unwrap().len(), 2);
}

#[test]
fn test_workers_pretty_output() {
    let mut cmd = tidegauge();
    cmd.arg("workers")
        .arg(fixture_path("k6-workers-baseline.log"))
        .arg(fixture_path("k6-workers-cmsmode.log"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total System Throughput (RPS)"))
        .stdout(predicate::str::contains("Response Latency (ms)"))
        .stdout(predicate::str::contains("166"))
        .stderr(predicate::str::contains("Found 2 completed workers in baseline"))
        .stderr(predicate::str::contains("Found 3 completed workers in cmsmode"));
}

#[test]
fn test_workers_without_data_is_not_an_error() {
    let mut cmd = tidegauge();
    cmd.arg("workers")
        .arg(fixture_path("unrelated.log"))
        .arg(fixture_path("nowhere-missing.log"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No data to plot."))
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn test_workers_custom_source_from_env() {
    let mut cmd = tidegauge();
    cmd.env("TIDEGAUGE_WORKER_SOURCE", "locust")
        .arg("workers")
        .arg(fixture_path("k6-workers-baseline.log"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No data to plot."));
}

#[test]
fn test_workers_requires_a_file() {
    let mut cmd = tidegauge();
    cmd.arg("workers");

    cmd.assert().failure();
}
