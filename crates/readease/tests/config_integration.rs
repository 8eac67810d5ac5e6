//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, and `score` to check that
//! configured values change what gets scored.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// Rule table with every list empty: syllables come from vowels alone.
fn write_empty_rules(dir: &Path, name: &str) {
    fs::write(
        dir.join(name),
        "prefix_and_suffix_patterns: []\nproblem_words: []\n",
    )
    .unwrap();
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["rule_table"], "built-in");
    assert_eq!(json["config"]["strip_markdown"], false);
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readease.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "debug");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".readease.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("nested").join("deep");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join("readease.yaml"), "strip_markdown: true\n").unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["strip_markdown"], true);
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readease.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join("readease.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(
        json["config"]["log_level"], "error",
        "regular file should override dotfile"
    );
}

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path().join("parent");
    let repo = parent.join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();

    fs::write(parent.join(".readease.toml"), r#"log_level = "error""#).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();

    let json = info_json(&src);

    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn config_in_same_dir_as_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();

    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".readease.json"), r#"{"log_level": "warn"}"#).unwrap();

    let json = info_json(&src);

    assert_eq!(json["config"]["log_level"], "warn");
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readease.toml"), r#"log_level = "debug""#).unwrap();
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, r#"log_level = "error""#).unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["log_level"], "error");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("override.toml"),
        "--config path should be reported: {reported}"
    );
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readease.toml"), "max_input_bytes = 1024\n").unwrap();

    let output = cmd()
        .env("READEASE_MAX_INPUT_BYTES", "4096")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["max_input_bytes"], 4096);
}

// =============================================================================
// Scoring Settings
// =============================================================================

#[test]
fn configured_rule_table_changes_score() {
    let tmp = TempDir::new().unwrap();
    write_empty_rules(tmp.path(), "rules.yaml");
    fs::write(
        tmp.path().join(".readease.toml"),
        "rule_table = \"rules.yaml\"\n",
    )
    .unwrap();

    // 1 sentence, 4 words, 8 vowel syllables.
    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "score",
            "--text",
            "Heavy metals are old.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("34\n"));
}

#[test]
fn rule_table_from_env() {
    let tmp = TempDir::new().unwrap();
    write_empty_rules(tmp.path(), "plain.yml");

    cmd()
        .env("READEASE_RULE_TABLE", "plain.yml")
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "score",
            "--text",
            "Heavy metals are old.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("34\n"));
}

#[test]
fn missing_configured_rule_table_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".readease.toml"),
        "rule_table = \"nowhere.toml\"\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "score", "--text", "Cat."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rule table"));
}

#[test]
fn strip_markdown_setting_applies_to_text() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readease.toml"), "strip_markdown = true\n").unwrap();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "score",
            "--text",
            "# Title\n\nCat.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("121\n"));
}

#[test]
fn input_limit_from_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readease.toml"), "max_input_bytes = 3\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "score", "--text", "Cat."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));

    fs::write(
        tmp.path().join(".readease.toml"),
        "max_input_bytes = 3\ndisable_input_limit = true\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "score", "--text", "Cat."])
        .assert()
        .success()
        .stdout(predicate::str::diff("121\n"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".readease.toml"),
        "this is not valid toml [[[",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn invalid_json_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readease.json"), "{not valid json}").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".readease.toml"),
        "log_level = \"warn\"\nunknown_field = \"should be ignored\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
}
