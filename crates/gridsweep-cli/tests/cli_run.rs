use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

const PLAN: &str = r#"
axes:
  - name: flux
    values: [0.0, 0.5, 1.0]
  - name: ng
    start: 1.0
    stop: 4.0
    count: 4
fixed:
  flux: 1
label: demo
"#;

fn gridsweep(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gridsweep"))
        .args(args)
        .env("GRIDSWEEP_PROGRESS_DISABLED", "1")
        .output()
        .expect("spawn gridsweep")
}

fn write_plan(dir: &Path, body: &str) -> String {
    let path = dir.join("plan.yaml");
    fs::write(&path, body).expect("write plan");
    path.to_string_lossy().to_string()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).expect("read json")).expect("json")
}

#[test]
fn run_persists_result_and_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(dir.path(), PLAN);
    let out = dir.path().join("out");
    let output = gridsweep(&[
        "run",
        "--plan",
        &plan,
        "--eval",
        "sum",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report = read_json(&out.join("report.json"));
    assert_eq!(report["label"], "demo");
    assert_eq!(report["evaluator"], "sum");
    assert_eq!(report["shape"], serde_json::json!([1, 4]));
    assert_eq!(report["total"], 4);

    let result = read_json(&out.join("result.json"));
    assert_eq!(result["data"]["data"], serde_json::json!([1.5, 2.5, 3.5, 4.5]));
    assert_eq!(result["axes"][0]["offset"], 1);
}

#[test]
fn repeated_runs_hash_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(dir.path(), PLAN);
    let mut hashes = Vec::new();
    for name in ["a", "b"] {
        let out = dir.path().join(name);
        let output = gridsweep(&[
            "run",
            "--plan",
            &plan,
            "--eval",
            "norm",
            "--scale",
            "2.5",
            "--out",
            out.to_str().unwrap(),
        ]);
        assert!(output.status.success());
        hashes.push(read_json(&out.join("report.json"))["result_hash"].clone());
    }
    assert_eq!(hashes[0], hashes[1]);
}

#[test]
fn failing_callback_leaves_no_result() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(
        dir.path(),
        "axes:\n  - name: a\n    values: [1.0, 2.0]\n  - name: b\n    values: [1.0, 0.0]\n",
    );
    let out = dir.path().join("out");
    let output = gridsweep(&[
        "run",
        "--plan",
        &plan,
        "--eval",
        "ratio",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("grid point (0, 1)"), "{stderr}");
    assert!(!out.join("result.json").exists());
}

#[test]
fn first_evaluator_reads_leading_axis() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(dir.path(), PLAN);
    let out = dir.path().join("out");
    let output = gridsweep(&[
        "run",
        "--plan",
        &plan,
        "--eval",
        "first",
        "--scale",
        "4",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report = read_json(&out.join("report.json"));
    assert_eq!(report["evaluator"], "first");
    let result = read_json(&out.join("result.json"));
    assert_eq!(result["data"]["data"], serde_json::json!([2.0, 2.0, 2.0, 2.0]));
}

#[test]
fn first_evaluator_rejects_rank_zero_plan() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(dir.path(), "axes: []\n");
    let out = dir.path().join("out");
    let output = gridsweep(&[
        "run",
        "--plan",
        &plan,
        "--eval",
        "first",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("grid point ()"), "{stderr}");
    assert!(stderr.contains("first needs 1 or more axes, found 0"), "{stderr}");
    assert!(!out.join("result.json").exists());
}

#[test]
fn inspect_prints_reduced_grid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(dir.path(), PLAN);
    let output = gridsweep(&["inspect", "--plan", &plan]);
    assert!(output.status.success());
    let summary: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(summary["counts"], serde_json::json!([1, 4]));
    assert_eq!(summary["total"], 4);

    let output = gridsweep(&["inspect", "--plan", &plan, "--remove-fixed"]);
    let summary: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(summary["counts"], serde_json::json!([4]));
    assert_eq!(summary["grid"]["dropped"][0]["name"], "flux");
}

#[test]
fn out_of_range_plan_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = write_plan(dir.path(), &PLAN.replace("flux: 1", "flux: 3"));
    let output = gridsweep(&["inspect", "--plan", &plan]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fixed-index-out-of-range"), "{stderr}");
}
