//! Integration tests for the parcom binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn parcom() -> Command {
    Command::cargo_bin("parcom").unwrap()
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("parcom-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_value_format() {
    parcom()
        .args(["parse", "succ succ 0", "--format", "value"])
        .assert()
        .success()
        .stdout("(succ (succ 0))\n");
}

#[test]
fn test_parse_treeviz_is_default() {
    parcom()
        .args(["parse", "λx.x y"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("λ (λx.(x y))\n"))
        .stdout(predicate::str::contains("@ (x y)"));
}

#[test]
fn test_parse_json_format() {
    let output = parcom()
        .args(["parse", "-g", "number", "-f", "json", "--", "-42"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["node_type"], "Integer");
    assert_eq!(json["label"], "-42");
}

#[test]
fn test_parse_with_inner_rule() {
    parcom()
        .args(["parse", "-g", "number", "--rule", "digits", "-f", "treeviz", "12"])
        .assert()
        .success()
        .stdout("☰ \"12\"\n├─ • '1'\n└─ • '2'\n");
}

#[test]
fn test_no_parse_exits_with_failure() {
    parcom()
        .args(["parse", "-g", "number", "12a"])
        .assert()
        .failure()
        .code(1)
        .stderr("no parse\n");
}

#[test]
fn test_unknown_rule() {
    parcom()
        .args(["parse", "--rule", "missing", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rule named 'missing'"));
}

#[test]
fn test_unknown_grammar() {
    parcom()
        .args(["parse", "-g", "cobol", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown grammar 'cobol'"));
}

#[test]
fn test_unknown_format() {
    parcom()
        .args(["parse", "-f", "xml", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'xml' not found"));
}

#[test]
fn test_parse_file_trims_trailing_newline() {
    let path = temp_file("term.txt", "x y z\n");
    parcom()
        .args(["parse", "-f", "value", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("((x y) z)\n");
    fs::remove_file(path).ok();
}

#[test]
fn test_config_file_layers_over_defaults() {
    let config = temp_file(
        "config.toml",
        "[output]\nformat = \"value\"\n\n[parse]\ngrammar = \"number\"\n",
    );
    parcom()
        .args(["parse", "+7", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("7\n");

    // Flags win over the file
    parcom()
        .args(["parse", "+7", "-f", "yaml", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("node_type: Integer"));
    fs::remove_file(config).ok();
}

#[test]
fn test_local_config_is_picked_up() {
    let dir = std::env::temp_dir().join(format!("parcom-local-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("parcom.toml"), "[parse]\ngrammar = \"number\"\n").unwrap();

    parcom()
        .current_dir(&dir)
        .args(["parse", "-f", "value", "12"])
        .assert()
        .success()
        .stdout("12\n");

    // An explicit --config file sits above it
    let explicit = dir.join("explicit.toml");
    fs::write(&explicit, "[parse]\ngrammar = \"lambda\"\n").unwrap();
    parcom()
        .current_dir(&dir)
        .args(["parse", "-f", "value", "x y", "--config"])
        .arg(&explicit)
        .assert()
        .success()
        .stdout("(x y)\n");

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_grammar_listing() {
    parcom()
        .args(["grammar", "-g", "number"])
        .assert()
        .success()
        .stdout("signed <- (sign? digits)\nsign   <- (\"+\" / \"-\")\ndigits <- [0-9]+\n");
}

#[test]
fn test_formats_listing() {
    parcom()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("treeviz"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("lambda"));
}
