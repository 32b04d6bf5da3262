use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn nestflat() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nestflat"));
    cmd.env_remove("NESTFLAT_MAPPING_POLICY")
        .env_remove("NESTFLAT_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

const NESTED: &str = r#"[0, 1, 2, {"3": [4, 5], "6": {"7": 8}}, 9]"#;

#[test]
fn flattens_stdin_with_default_policy() {
    let assert = nestflat().write_stdin(NESTED).assert().success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items, vec![json!(0), json!(1), json!(2), json!(9)]);
}

#[test]
fn flatten_items_emits_keys_and_values() {
    let assert = nestflat()
        .arg("--mapping-policy")
        .arg("flatten_items")
        .write_stdin(NESTED)
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(
        items,
        vec![
            json!(0),
            json!(1),
            json!(2),
            json!("3"),
            json!(4),
            json!(5),
            json!("6"),
            json!("7"),
            json!(8),
            json!(9)
        ]
    );
}

#[test]
fn keep_emits_mappings_whole() {
    let assert = nestflat()
        .arg("--mapping-policy")
        .arg("keep")
        .write_stdin(NESTED)
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 5);
    assert_eq!(items[3], json!({"3": [4, 5], "6": {"7": 8}}));
}

#[test]
fn reads_input_file_and_splits_text() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("data.json");
    fs::write(&path, r#"["qwe", ["r", "ty"]]"#).unwrap();

    let assert = nestflat()
        .arg(&path)
        .arg("--flatten-text")
        .arg("--format")
        .arg("raw")
        .assert()
        .success();

    assert_eq!(
        String::from_utf8_lossy(&assert.get_output().stdout),
        "q\nw\ne\nr\nt\ny\n"
    );
}

#[test]
fn json_format_emits_single_array() {
    nestflat()
        .arg("--format")
        .arg("json")
        .write_stdin("[[1, [2]], [], 3]")
        .assert()
        .success()
        .stdout("[1,2,3]\n");
}

#[test]
fn jsonl_input_concatenates_documents() {
    nestflat()
        .arg("--jsonl-input")
        .arg("--format")
        .arg("json")
        .write_stdin("[1, [2]]\n\n\"x\"\n{\"a\": 3}\n")
        .assert()
        .success()
        .stdout("[1,2,\"x\"]\n");
}

#[test]
fn unknown_policy_warns_and_drops() {
    nestflat()
        .arg("--mapping-policy")
        .arg("flatten_keys")
        .write_stdin(NESTED)
        .assert()
        .success()
        .stdout("0\n1\n2\n9\n")
        .stderr(predicate::str::contains(
            "unrecognized mapping policy 'flatten_keys'",
        ));
}

#[test]
fn unknown_policy_fails_in_strict_mode() {
    nestflat()
        .arg("--mapping-policy")
        .arg("flatten_keys")
        .arg("--strict")
        .write_stdin(NESTED)
        .assert()
        .failure()
        .stderr(predicate::str::contains("flatten_keys"));
}

#[test]
fn policy_from_environment() {
    nestflat()
        .env("NESTFLAT_MAPPING_POLICY", "flatten_values")
        .write_stdin(r#"[{"a": 1, "b": [2]}]"#)
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn invalid_json_is_an_error() {
    nestflat()
        .write_stdin("[1, 2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON input"));
}

#[test]
fn missing_file_is_an_error() {
    let temp = tempdir().unwrap();
    nestflat()
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn scalar_document_yields_itself() {
    nestflat()
        .write_stdin("\"hello\"")
        .assert()
        .success()
        .stdout("\"hello\"\n");
}

#[test]
fn empty_strings_disappear_with_flatten_text() {
    nestflat()
        .arg("--flatten-text")
        .write_stdin(r#"["", 1, "", ["a"]]"#)
        .assert()
        .success()
        .stdout("1\n\"a\"\n");
}

#[test]
fn pretty_jsonl_separates_leaves_with_blank_line() {
    nestflat()
        .args(["--pretty", "--mapping-policy", "keep"])
        .write_stdin(r#"[{"k": 1}, 2]"#)
        .assert()
        .success()
        .stdout("{\n  \"k\": 1\n}\n\n2\n");
}

#[test]
fn verbose_mode_logs_debug_diagnostics() {
    nestflat()
        .arg("-v")
        .write_stdin("[1]")
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("DEBUG"));
}
