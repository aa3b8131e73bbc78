//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("fossa-pr-report"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Format FOSSA license scan results"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_report_requires_repo_pr_and_token() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.arg("report");
    // These are populated in CI runners; clear them so the args are truly absent.
    cmd.env_remove("GITHUB_REPOSITORY");
    cmd.env_remove("PR_NUMBER");
    cmd.env_remove("GITHUB_TOKEN");
    cmd.env_remove("GITHUB_API_URL");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("the following required arguments were not provided"))
        .stderr(predicate::str::contains("--repo <SLUG>"))
        .stderr(predicate::str::contains("--pr <N>"))
        .stderr(predicate::str::contains("--token <TOKEN>"));
}

#[test]
fn test_render_rejects_unsupported_config_format() {
    let tmp = TempDir::new().expect("temp dir");
    fs::write(tmp.path().join("config.ini"), "project=x\n").expect("write config");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.args(["render", "--config", "config.ini"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported config extension '.ini'"));
}

#[test]
fn test_render_clean_scan_prints_all_clear() {
    let tmp = TempDir::new().expect("temp dir");
    let results = tmp.path().join("results.json");
    fs::write(&results, "[]").expect("write results");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.args([
        "render",
        "--results-file",
        results.to_str().expect("utf8 results path"),
        "--exit-code",
        "0",
        "--project",
        "acme-app",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("## 🔍 FOSSA License Scan Results"))
        .stdout(predicate::str::contains("### ✅ All Clear!"))
        .stdout(predicate::str::contains("License Compliance Issues Found").not())
        .stdout(predicate::str::contains("Policy Violations Found").not());
}

#[test]
fn test_render_reads_inputs_from_env() {
    let tmp = TempDir::new().expect("temp dir");
    let results = tmp.path().join("fossa.json");
    fs::write(
        &results,
        r#"{"issues": [{"license": "GPL-3.0", "revisionId": "npm+left-pad@1.3.0", "type": "policy_conflict", "rule": {"title": "Deny copyleft licenses"}}]}"#,
    )
    .expect("write results");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.arg("render");
    cmd.env("FOSSA_RESULTS_FILE", results.to_str().expect("utf8 results path"));
    cmd.env("FOSSA_PROJECT", "acme-app");
    cmd.env("FOSSA_EXIT_CODE", "1");
    cmd.env("VIOLATIONS_FOUND", "true");
    cmd.env("VIOLATIONS_COUNT", "1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 1 license policy violation:"))
        .stdout(predicate::str::contains("- **License**: GPL-3.0"))
        .stdout(predicate::str::contains("- **Package**: `left-pad@1.3.0`"))
        .stdout(predicate::str::contains("- **Rule**: Deny copyleft licenses"))
        .stdout(predicate::str::contains("- **Violations Found**: Yes"))
        .stdout(predicate::str::contains("- **Total Violations**: 1"))
        .stdout(predicate::str::contains("custom%2B41069%2Facme-app"));
}

#[test]
fn test_render_writes_output_file() {
    let tmp = TempDir::new().expect("temp dir");
    let results = tmp.path().join("results.json");
    fs::write(&results, "[]").expect("write results");
    let out = tmp.path().join("comment.md");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.args([
        "render",
        "--results-file",
        results.to_str().expect("utf8 results path"),
        "--exit-code",
        "0",
        "--output",
        out.to_str().expect("utf8 output path"),
    ]);
    cmd.assert().success().stdout(predicate::str::contains("Report written to"));

    let body = fs::read_to_string(&out).expect("read rendered report");
    assert!(body.starts_with("## 🔍 FOSSA License Scan Results"));
    assert!(body.contains("### ✅ All Clear!"));
}

#[test]
fn test_render_missing_results_with_violation_exit_code() {
    let tmp = TempDir::new().expect("temp dir");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.args([
        "render",
        "--results-file",
        tmp.path().join("missing.json").to_str().expect("utf8 results path"),
        "--exit-code",
        "1",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("### ❌ Policy Violations Found"))
        .stdout(predicate::str::contains("could not parse the detailed results"));
}

#[test]
fn test_render_missing_results_with_failure_exit_code() {
    let tmp = TempDir::new().expect("temp dir");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.args([
        "render",
        "--results-file",
        tmp.path().join("missing.json").to_str().expect("utf8 results path"),
        "--exit-code",
        "137",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("### ❌ Scan Failed"))
        .stdout(predicate::str::contains("(exit code: 137)"));
}

#[test]
fn test_report_publish_failure_warns_but_succeeds() {
    let tmp = TempDir::new().expect("temp dir");
    let results = tmp.path().join("results.json");
    fs::write(&results, "[]").expect("write results");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.args([
        "report",
        "--results-file",
        results.to_str().expect("utf8 results path"),
        "--exit-code",
        "0",
        "--repo",
        "acme/app",
        "--pr",
        "7",
        "--token",
        "dummy",
        "--api-url",
        // Nothing listens here, so publishing fails without real network I/O.
        "http://127.0.0.1:9",
    ]);
    // Keep proxies from intercepting the loopback request.
    cmd.env_remove("HTTP_PROXY");
    cmd.env_remove("http_proxy");
    cmd.env_remove("HTTPS_PROXY");
    cmd.env_remove("https_proxy");
    cmd.env_remove("ALL_PROXY");
    cmd.env_remove("all_proxy");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Posting PR comment with FOSSA results..."))
        .stdout(predicate::str::contains("::warning::Failed to post PR comment"));
}

#[test]
fn test_render_picks_up_discovered_config() {
    let tmp = TempDir::new().expect("temp dir");
    fs::write(tmp.path().join("fossa-report.toml"), "project = 'configured-app'\n")
        .expect("write config");
    fs::write(tmp.path().join("results.json"), "[]").expect("write results");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.current_dir(tmp.path());
    cmd.env_remove("FOSSA_PROJECT");
    cmd.args(["render", "--results-file", "results.json", "--exit-code", "0"]);
    cmd.assert().success().stdout(predicate::str::contains("- **Project**: configured-app"));
}

#[test]
fn test_completions_emits_bash_script() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fossa-pr-report"));
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("_fossa-pr-report"));
}
