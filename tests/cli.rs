//! Integration tests for the prospector binary.
//!
//! Spawns the planner, feeds it a snapshot on stdin (or asks for a random
//! map), and checks the JSON report on stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

/// Runs the binary with `args`, writing `input` to stdin, and parses stdout.
fn run_planner(args: &[&str], input: Option<&str>) -> Value {
    let exe = env!("CARGO_BIN_EXE_prospector");
    let mut child = Command::new(exe)
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start prospector");

    let mut stdin = child.stdin.take().unwrap();
    if let Some(input) = input {
        stdin.write_all(input.as_bytes()).unwrap();
    }
    drop(stdin);

    let output = child.wait_with_output().expect("failed to wait on child");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

const SNAPSHOT: &str = r#"{
  "width": 5,
  "height": 5,
  "resources": [
    {"x": 1, "y": 1, "kind": "wood", "amount": 10},
    {"x": 1, "y": 2, "kind": "wood", "amount": 10},
    {"x": 2, "y": 1, "kind": "wood", "amount": 10}
  ],
  "units": [
    {"id": "u1", "pos": [0, 0], "travel_range": 10},
    {"id": "u2", "pos": [0, 0], "travel_range": 10}
  ]
}"#;

#[test]
fn plans_snapshot_from_stdin() {
    let report = run_planner(&[], Some(SNAPSHOT));
    assert_eq!(report["committed"], true);

    let assignments = report["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0]["unit_id"], "u1");
    assert_eq!(assignments[1]["unit_id"], "u2");
    assert_eq!(assignments[0]["from"], serde_json::json!([0, 0]));
    // The second unit may not claim the first unit's cell.
    assert_ne!(assignments[0]["target"], assignments[1]["target"]);
    assert_eq!(assignments[0]["staying"], false);
}

#[test]
fn parallel_mode_commits_nothing() {
    let report = run_planner(&["--parallel"], Some(SNAPSHOT));
    assert_eq!(report["committed"], false);

    let assignments = report["assignments"].as_array().unwrap();
    assert_eq!(assignments[0]["target"], assignments[1]["target"]);
}

#[test]
fn random_map_is_reproducible() {
    let args = ["--random", "17", "--width", "16", "--height", "16"];
    let first = run_planner(&args, None);
    let second = run_planner(&args, None);
    assert_eq!(first, second);
    assert!(!first["assignments"].as_array().unwrap().is_empty());
}

#[test]
fn dumped_snapshot_round_trips_through_planner() {
    let snapshot = run_planner(
        &["--random", "5", "--width", "12", "--height", "12", "--dump-snapshot"],
        None,
    );
    assert_eq!(snapshot["width"], 12);

    let from_random = run_planner(&["--random", "5", "--width", "12", "--height", "12"], None);
    let from_stdin = run_planner(&[], Some(&snapshot.to_string()));
    assert_eq!(from_random, from_stdin);
}

/// Runs the binary expecting failure and returns its stderr.
fn run_failing(args: &[&str], input: &str) -> String {
    let exe = env!("CARGO_BIN_EXE_prospector");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start prospector");
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).unwrap();
    drop(stdin);

    let output = child.wait_with_output().expect("failed to wait on child");
    assert!(!output.status.success());
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn rejects_out_of_bounds_unit() {
    let stderr = run_failing(
        &[],
        r#"{"width": 3, "height": 3, "units": [{"id": "u", "pos": [5, 5], "travel_range": 4}]}"#,
    );
    assert!(stderr.contains("outside the 3x3 map"), "{}", stderr);
}

#[test]
fn rejects_empty_random_map() {
    for args in [
        ["--random", "1", "--width", "0"],
        ["--random", "1", "--height", "0"],
    ] {
        let stderr = run_failing(&args, "");
        assert!(!stderr.contains("panicked"), "{}", stderr);
        assert!(stderr.contains("invalid value"), "{}", stderr);
    }
}

#[test]
fn rejects_map_too_large_for_distance_table() {
    let stderr = run_failing(&[], r#"{"width": 100, "height": 100}"#);
    assert!(!stderr.contains("panicked"), "{}", stderr);
    assert!(stderr.contains("distance tables hold at most 4096"), "{}", stderr);

    let stderr = run_failing(&["--random", "1", "--width", "65"], "");
    assert!(stderr.contains("invalid value"), "{}", stderr);
}
