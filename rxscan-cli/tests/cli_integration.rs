//! Integration tests for the rxscan CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{name}")
}

fn rxscan() -> Command {
    Command::cargo_bin("rxscan").unwrap()
}

#[test]
fn test_extract_text_output() {
    rxscan()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("sig-sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# tests/fixtures/sig-sample.txt"))
        .stdout(predicate::str::contains("dosage\t5\t19\t-\t1 to 2 tablets"))
        .stdout(predicate::str::contains("route\t20\t28\tORAL\tby mouth"))
        .stdout(predicate::str::contains("frequency_unit\t29\t42\t24/4\tevery 4 hours"))
        .stdout(predicate::str::contains("route\t78\t80\tORAL\tpo"))
        .stdout(predicate::str::contains("frequency_unit\t81\t86\tONE\tdaily"));
}

#[test]
fn test_attribute_filter() {
    rxscan()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("sig-sample.txt"))
        .arg("-a")
        .arg("route")
        .assert()
        .success()
        .stdout(predicate::str::contains("route\t20\t28"))
        .stdout(predicate::str::contains("dosage").not())
        .stdout(predicate::str::contains("frequency_unit").not());
}

#[test]
fn test_json_output() {
    let output = rxscan()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("topical-sample.txt"))
        .arg("-f")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["lexicon"], "clinical");
    let matches = report["documents"][0]["matches"].as_array().unwrap();
    let texts: Vec<&str> = matches
        .iter()
        .filter(|m| m["attribute"] == "route")
        .filter_map(|m| m["text"].as_str())
        .collect();
    assert_eq!(texts, vec!["cream", "topically"]);
    assert!(matches
        .iter()
        .any(|m| m["attribute"] == "duration" && m["text"] == "for 2 weeks"));
}

#[test]
fn test_markdown_output() {
    rxscan()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("topical-sample.txt"))
        .arg("-f")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Attribute | Start | End | Category | Text |"))
        .stdout(predicate::str::contains("| frequency | 22 | 33 |  | twice a day |"))
        .stdout(predicate::str::contains("---"))
        .stdout(predicate::str::contains("*Total matches:"));
}

#[test]
fn test_token_input() {
    rxscan()
        .arg("extract")
        .arg("--tokens")
        .arg("-i")
        .arg(fixture_path("sig-tokens.json"))
        .arg("-a")
        .arg("route,frequency-unit")
        .assert()
        .success()
        .stdout(predicate::str::contains("route\t12\t14\tORAL\tpo"))
        .stdout(predicate::str::contains("frequency_unit\t15\t18\tTWO\tbid"));
}

#[test]
fn test_plain_text_as_tokens_fails() {
    rxscan()
        .arg("extract")
        .arg("--tokens")
        .arg("-i")
        .arg(fixture_path("sig-sample.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid token input"));
}

#[test]
fn test_output_to_file_and_glob() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("matches.txt");

    rxscan()
        .arg("extract")
        .arg("-i")
        .arg("tests/fixtures/*-sample.txt")
        .arg("-o")
        .arg(&output_file)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("# tests/fixtures/sig-sample.txt"));
    assert!(content.contains("# tests/fixtures/topical-sample.txt"));
    assert!(content.find("sig-sample").unwrap() < content.find("topical-sample").unwrap());
}

#[test]
fn test_nonexistent_file() {
    rxscan()
        .arg("extract")
        .arg("-i")
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_unknown_attribute_is_rejected() {
    rxscan()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("sig-sample.txt"))
        .arg("-a")
        .arg("dose")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown attribute 'dose'"));
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("rxscan.toml");
    fs::write(
        &config,
        "[extraction]\nattributes = [\"route\"]\n\n[output]\nformat = \"markdown\"\n",
    )
    .unwrap();

    rxscan()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("sig-sample.txt"))
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("| route | 20 | 28 | ORAL | by mouth |"))
        .stdout(predicate::str::contains("*Total matches: 2*"));
}

#[test]
fn test_list_attributes() {
    rxscan()
        .arg("list")
        .arg("attributes")
        .assert()
        .success()
        .stdout(predicate::str::contains("fraction"))
        .stdout(predicate::str::contains("dosage (uses fraction, form, strength)"))
        .stdout(predicate::str::contains("duration (uses range)"));
}

#[test]
fn test_list_formats() {
    rxscan()
        .arg("list")
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_generate_then_validate_lexicon() {
    let temp_dir = TempDir::new().unwrap();
    let lexicon = temp_dir.path().join("custom.toml");

    rxscan()
        .arg("generate-lexicon")
        .arg("-o")
        .arg(&lexicon)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lexicon written"));

    rxscan()
        .arg("validate")
        .arg("-l")
        .arg(&lexicon)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Lexicon is valid!"))
        .stdout(predicate::str::contains("Lexicon code: custom"));

    rxscan()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("sig-sample.txt"))
        .arg("--lexicon")
        .arg(&lexicon)
        .arg("-f")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lexicon\": \"custom\""));
}

#[test]
fn test_validate_invalid_lexicon() {
    let temp_dir = TempDir::new().unwrap();
    let lexicon = temp_dir.path().join("broken.toml");
    fs::write(&lexicon, "[metadata]\ncode = \"broken\"\nname = \"Broken\"\n").unwrap();

    rxscan()
        .arg("validate")
        .arg("-l")
        .arg(&lexicon)
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Lexicon is invalid!"))
        .stderr(predicate::str::contains("Validation failed"));
}
