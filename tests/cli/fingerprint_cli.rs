use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::tempdir;

fn run_fingerprint(args: &[&str]) -> (Option<i32>, Value, Vec<u8>) {
    let output = assert_cmd::cargo::cargo_bin_cmd!("filefp")
        .args(args)
        .output()
        .expect("run fingerprint");
    let stdout = if output.stdout.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&output.stdout).expect("stdout json")
    };
    (output.status.code(), stdout, output.stderr)
}

fn write_fixture(dir: &Path) -> String {
    let path = dir.join("ten_alpha_lines.txt");
    fs::write(&path, "aaa\nbbb\nccc\nddd\neee\nfff\nggg\nhhh\niii\njjj\n").expect("write fixture");
    path.to_str().expect("utf8 path").to_string()
}

#[test]
fn fingerprints_file_prefix() {
    let dir = tempdir().expect("temp dir");
    let path = write_fixture(dir.path());

    let (code, payload, _) = run_fingerprint(&["fingerprint", "--path", &path]);
    assert_eq!(code, Some(0));
    assert_eq!(payload["fingerprint"], json!(15539910233256741944_u64));
    assert_eq!(payload["offset"], json!(0));
    assert_eq!(payload["size"], json!(40));
    assert_eq!(payload["data_size"], json!(40));
    assert_eq!(payload["end_position"], json!(40));
    assert_eq!(payload["short"], json!(true));
    assert_eq!(payload["key"], json!("15539910233256741944,0,40"));
}

#[test]
fn narrower_size_refingerprints() {
    let dir = tempdir().expect("temp dir");
    let path = write_fixture(dir.path());

    let (code, payload, _) = run_fingerprint(&["fingerprint", "--path", &path, "--size", "20"]);
    assert_eq!(code, Some(0));
    assert_eq!(payload["fingerprint"], json!(18188087011190232688_u64));
    assert_eq!(payload["size"], json!(20));

    let (_, payload, _) = run_fingerprint(&["fingerprint", "--path", &path, "--size", "60"]);
    assert_eq!(payload["size"], json!(40));
}

#[test]
fn config_supplies_window_and_offset() {
    let dir = tempdir().expect("temp dir");
    let path = write_fixture(dir.path());
    let config = dir.path().join("filefp.toml");
    fs::write(&config, "[fingerprint]\nbyte_size = 8\noffset = 4\n").expect("write config");

    let (code, payload, _) = run_fingerprint(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "fingerprint",
        "--path",
        &path,
    ]);
    assert_eq!(code, Some(0));
    assert_eq!(payload["offset"], json!(4));
    assert_eq!(payload["data_size"], json!(8));
    assert_eq!(payload["end_position"], json!(12));
    assert_eq!(payload["short"], json!(false));

    let (_, overridden, _) = run_fingerprint(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "fingerprint",
        "--path",
        &path,
        "--offset",
        "0",
    ]);
    assert_eq!(overridden["offset"], json!(0));
}

#[test]
fn oversized_config_window_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let path = write_fixture(dir.path());
    let config = dir.path().join("filefp.toml");
    fs::write(&config, "[fingerprint]\nbyte_size = 9223372036854775807\n").expect("write config");

    let (code, payload, stderr) = run_fingerprint(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "fingerprint",
        "--path",
        &path,
    ]);
    assert_eq!(code, Some(3));
    assert_eq!(payload, Value::Null);
    let stderr = String::from_utf8(stderr).expect("utf8 stderr");
    assert!(stderr.contains("fingerprint.byte_size"));
}

#[test]
fn missing_file_is_a_usage_error() {
    let (code, payload, stderr) =
        run_fingerprint(&["fingerprint", "--path", "does/not/exist.log"]);
    assert_eq!(code, Some(3));
    assert_eq!(payload, Value::Null);
    let stderr: Value = serde_json::from_slice(&stderr).expect("stderr json");
    assert_eq!(stderr["error"], json!("input_usage_error"));
    assert_eq!(stderr["details"]["path"], json!("does/not/exist.log"));
}
