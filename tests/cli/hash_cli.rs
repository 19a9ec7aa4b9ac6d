use std::fs;

use predicates::prelude::predicate;
use serde_json::{Value, json};
use tempfile::tempdir;

fn hash_stdout(args: &[&str], stdin: &str) -> Value {
    let output = assert_cmd::cargo::cargo_bin_cmd!("filefp")
        .arg("hash")
        .args(args)
        .write_stdin(stdin)
        .output()
        .expect("run hash");
    assert_eq!(output.status.code(), Some(0));
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

#[test]
fn hashes_stdin_in_full() {
    assert_eq!(
        hash_stdout(&[], "hello"),
        json!({
            "size": 5,
            "effective_length": 5,
            "fnv1a32": 0x4f9f2cab_u32,
            "fnv1a64": 0xa430d84680aabd0b_u64
        })
    );
}

#[test]
fn empty_input_returns_initial_constants() {
    let payload = hash_stdout(&[], "");
    assert_eq!(payload["fnv1a32"], json!(0x811c9dc5_u32));
    assert_eq!(payload["fnv1a64"], json!(0xcbf29ce484222325_u64));
}

#[test]
fn prefix_and_clamped_lengths() {
    let prefix = hash_stdout(&["--length", "3"], "hello");
    assert_eq!(prefix["effective_length"], json!(3));
    assert_eq!(prefix["fnv1a32"], json!(0x0ab4b02e_u32));

    let clamped = hash_stdout(&["--length", "100"], "abc");
    assert_eq!(clamped["effective_length"], json!(3));
    assert_eq!(clamped["fnv1a32"], json!(0x1a47e90b_u32));
}

#[test]
fn negative_length_is_accepted() {
    let payload = hash_stdout(&["--length", "-1"], "hello");
    assert_eq!(payload["effective_length"], json!(0));
    assert_eq!(payload["fnv1a32"], json!(0x811c9dc5_u32));
    assert_eq!(payload["fnv1a64"], json!(0xcbf29ce484222325_u64));
}

#[test]
fn hashes_input_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("lines.txt");
    fs::write(&path, "line 1\nline 2\nline 3").expect("write input");

    let payload = hash_stdout(&["--input", path.to_str().expect("utf8 path")], "");
    assert_eq!(payload["fnv1a64"], json!(8658598129674203459_u64));
    assert_eq!(payload["size"], json!(20));
}

#[test]
fn missing_input_file_is_a_usage_error() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("filefp")
        .args(["hash", "--input", "does/not/exist.log"])
        .output()
        .expect("run hash");

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let stderr: Value = serde_json::from_slice(&output.stderr).expect("stderr json");
    assert_eq!(stderr["error"], json!("input_usage_error"));
    assert_eq!(stderr["details"]["command"], json!("hash"));
}

#[test]
fn emit_pipeline_reports_steps_on_stderr() {
    assert_cmd::cargo::cargo_bin_cmd!("filefp")
        .args(["hash", "--emit-pipeline"])
        .write_stdin("hello")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("\"command\":\"hash\""))
        .stderr(predicate::str::contains("hash_fnv1a64"));
}

#[test]
fn without_emit_pipeline_stderr_is_empty() {
    assert_cmd::cargo::cargo_bin_cmd!("filefp")
        .arg("hash")
        .write_stdin("hello")
        .assert()
        .code(0)
        .stderr(predicate::str::is_empty());
}
