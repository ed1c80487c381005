//! End-to-end CLI tests against local HTML fixtures. Network is never used:
//! fixtures are audited with `--html-file`, either without a source URL or
//! with `--no-network`.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A command with an empty, private config directory.
fn pageaudit(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pageaudit"));
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.env_remove("PAGEAUDIT_LOG");
    cmd
}

fn write_user_config(config_home: &TempDir, toml: &str) {
    let dir = config_home.path().join("pageaudit");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), toml).unwrap();
}

// ============================================================================
// Scenario: help and version
// ============================================================================

#[test]
fn given_help_flag_when_run_then_subcommands_listed() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn given_version_flag_when_run_then_version_printed() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Scenario: auditing an HTML file
// ============================================================================

#[test]
fn given_bare_html_when_audited_as_json_then_issues_are_reported() {
    let home = TempDir::new().unwrap();
    let output = pageaudit(&home)
        .args(["audit", "--html-file"])
        .arg(fixture("bare.html"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["fetchMethod"], "html");
    assert!(v["url"].is_null());
    let ids: Vec<&str> = v["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["id"].as_str())
        .collect();
    assert!(ids.contains(&"no-title"));
    assert!(ids.contains(&"multiple-h1"));
    assert!(ids.contains(&"images-missing-alt"));
    assert!(ids.contains(&"generic-anchor-text"));
    let score = v["score"].as_u64().unwrap();
    assert!(score <= 100);
}

#[test]
fn given_good_html_when_audited_then_it_outscores_bare_html() {
    let home = TempDir::new().unwrap();
    let score_of = |name: &str| {
        let out = pageaudit(&home)
            .args(["audit", "--no-network", "--url", "https://oakline.example/", "--html-file"])
            .arg(fixture(name))
            .output()
            .unwrap();
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        v["score"].as_u64().unwrap()
    };
    assert!(score_of("good.html") > score_of("bare.html"));
}

#[test]
fn given_markdown_format_when_audited_then_markdown_report() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .args(["audit", "--format", "md", "--html-file"])
        .arg(fixture("bare.html"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Page audit: (inline HTML)"))
        .stdout(predicate::str::contains("## Summary"))
        .stdout(predicate::str::contains("### Critical"));
}

#[test]
fn given_stdin_when_html_file_is_dash_then_stdin_is_audited() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .args(["audit", "--format", "text", "--html-file", "-"])
        .write_stdin("<html><head><title>From stdin</title></head><body></body></html>")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: "))
        .stdout(predicate::str::contains("no-title").not());
}

#[test]
fn given_output_path_when_audited_then_report_written_to_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("report.json");
    pageaudit(&home)
        .args(["audit", "--html-file"])
        .arg(fixture("bare.html"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert!(v["issues"].as_array().is_some_and(|a| !a.is_empty()));
}

// ============================================================================
// Scenario: score gate
// ============================================================================

#[test]
fn given_score_below_fail_under_when_audited_then_exit_code_two() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .args(["audit", "--fail-under", "100", "--html-file"])
        .arg(fixture("bare.html"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("below --fail-under 100"));
}

#[test]
fn given_zero_fail_under_when_audited_then_success() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .args(["audit", "--fail-under", "0", "--html-file"])
        .arg(fixture("bare.html"))
        .assert()
        .success();
}

// ============================================================================
// Scenario: configuration and profiles
// ============================================================================

#[test]
fn given_profile_format_when_selected_then_profile_applies() {
    let home = TempDir::new().unwrap();
    write_user_config(
        &home,
        r#"
        [profiles.default]
        format = "md"

        [profiles.ci]
        format = "text"
        fail_under = 100
        "#,
    );

    pageaudit(&home)
        .args(["audit", "--html-file"])
        .arg(fixture("bare.html"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Page audit"));

    pageaudit(&home)
        .args(["audit", "--profile", "ci", "--html-file"])
        .arg(fixture("bare.html"))
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Page audit:"));
}

#[test]
fn given_scoring_weights_in_config_when_audited_then_score_changes() {
    let home = TempDir::new().unwrap();
    let cfg = home.path().join("settings.toml");
    std::fs::write(
        &cfg,
        "[scoring]\ncritical = 0\nhigh = 0\nmedium = 0\nlow = 0\npass_bonus = 0.0\n",
    )
    .unwrap();
    let out = pageaudit(&home)
        .args(["audit", "--config"])
        .arg(&cfg)
        .arg("--html-file")
        .arg(fixture("bare.html"))
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["score"], 100);
}

#[test]
fn given_broken_user_config_when_audited_then_error_with_hint() {
    let home = TempDir::new().unwrap();
    write_user_config(&home, "[profiles.default\nformat = ");
    pageaudit(&home)
        .args(["audit", "--html-file"])
        .arg(fixture("bare.html"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"))
        .stderr(predicate::str::contains("Hints:"));
}

// ============================================================================
// Scenario: invalid input
// ============================================================================

#[test]
fn given_missing_target_when_audit_then_usage_error() {
    let home = TempDir::new().unwrap();
    pageaudit(&home).arg("audit").assert().failure();
}

#[test]
fn given_missing_file_when_audited_then_exit_one() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .args(["audit", "--html-file", "does/not/exist.html"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn given_empty_html_when_audited_then_invalid_input() {
    let home = TempDir::new().unwrap();
    let empty = home.path().join("empty.html");
    std::fs::write(&empty, "  \n").unwrap();
    pageaudit(&home)
        .args(["audit", "--html-file"])
        .arg(&empty)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[invalid_input]"));
}

#[test]
fn given_non_http_url_when_audited_then_invalid_url_hint() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .args(["audit", "ftp://example.com/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[invalid_url]"))
        .stderr(predicate::str::contains("including the scheme"));
}

// ============================================================================
// Scenario: completions
// ============================================================================

#[test]
fn given_bash_when_completions_then_script_printed() {
    let home = TempDir::new().unwrap();
    pageaudit(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pageaudit"));
}
