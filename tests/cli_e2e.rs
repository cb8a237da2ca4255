//! End-to-end CLI tests for the doicite binary.
#![allow(deprecated)]

use std::fs;
use std::path::Path;
use std::process::Output;

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

const FULL_RECORD: &str = include_str!("fixtures/unixref_full.xml");

const METADATA_JSON: &str = r#"{
  "authors": { "first": { "first_name": "John Paul", "last_name": "Smith" } },
  "title": "A Study",
  "journal": { "full_title": "Journal of Things", "abbrev_title": "J Things" },
  "volume": "5",
  "issue": "2",
  "pages": "10-20",
  "pub_date": { "online": { "year": "2019" }, "print": { "year": "2020", "month": "04" } },
  "doi": "10.1/xyz"
}"#;

/// Binary with an isolated config home and no inherited log filter.
fn doicite(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("doicite").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

async fn run_blocking(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn registry() -> Option<MockServer> {
    let mock_server = start_mock_server_or_skip().await?;
    Mock::given(method("GET"))
        .and(path("/10.1001/jama.2020.2648"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FULL_RECORD))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Resource not found."))
        .with_priority(10)
        .mount(&mock_server)
        .await;
    Some(mock_server)
}

// ==================== Basic Invocation Tests ====================

#[test]
fn test_binary_help_displays_usage() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Turn DOIs into formatted bibliographic citations"))
        .stdout(predicate::str::contains("expand"));
}

#[test]
fn test_binary_version_displays_version() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("doicite"));
}

#[test]
fn test_binary_without_subcommand_fails() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .args(["--invalid-flag", "styles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_styles_lists_default() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .arg("styles")
        .assert()
        .success()
        .stdout("AMA (default)\n");
}

// ==================== Offline Format Tests ====================

#[test]
fn test_format_metadata_from_stdin() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .args(["format", "-s", "ama"])
        .write_stdin(METADATA_JSON)
        .assert()
        .success()
        .stdout(
            "Smith JP. A Study. ''J Things''. 2020;5(2):10-20. \
             [http://dx.doi.org/10.1/xyz doi:10.1/xyz].\n",
        );
}

#[test]
fn test_format_metadata_from_file_with_unknown_style() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("meta.json");
    fs::write(&input, r#"{ "title": "Only A Title" }"#).unwrap();

    doicite(home.path())
        .args(["format", "--style", "NoSuchStyle"])
        .arg(&input)
        .assert()
        .success()
        .stdout("Only A Title.\n")
        .stderr(predicate::str::contains("Style is not defined"));
}

#[test]
fn test_format_empty_metadata_fails() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .arg("format")
        .write_stdin("{}")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn test_format_invalid_json_fails() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .arg("format")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid metadata JSON"));
}

// ==================== Config Tests ====================

#[test]
fn test_invalid_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("doicite");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "concurrency = 0\n").unwrap();

    doicite(home.path())
        .arg("styles")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

// ==================== Registry Tests ====================

#[test]
fn test_cite_empty_doi_fails_without_network() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .args(["--registry-url", "http://127.0.0.1:9", "cite", "  "])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Malformed DOI"));
}

#[tokio::test]
async fn test_cite_against_registry() {
    let Some(mock_server) = registry().await else {
        return;
    };
    let home = TempDir::new().unwrap();
    let mut cmd = doicite(home.path());
    cmd.args(["--registry-url", mock_server.uri().as_str(), "cite", "10.1001/jama.2020.2648"]);

    run_blocking(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Smith JP, Wang W, Doe J. Characteristics of Patients"))
        .stdout(predicate::str::contains(
            "[http://dx.doi.org/10.1001/jama.2020.2648 doi:10.1001/jama.2020.2648].",
        ));
}

#[tokio::test]
async fn test_cite_partial_failure_exits_nonzero() {
    let Some(mock_server) = registry().await else {
        return;
    };
    let home = TempDir::new().unwrap();
    let mut cmd = doicite(home.path());
    cmd.args([
        "--registry-url",
        mock_server.uri().as_str(),
        "cite",
        "10.1/missing",
        "10.1001/jama.2020.2648",
    ]);

    let output = run_blocking(cmd).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "only the resolvable DOI prints: {stdout}");
    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("DOI not found"));
}

#[tokio::test]
async fn test_cite_uses_registry_from_config_file() {
    let Some(mock_server) = registry().await else {
        return;
    };
    let home = TempDir::new().unwrap();
    let dir = home.path().join("doicite");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        format!("registry_url = \"{}\"\nstyle = \"ama\"\n", mock_server.uri()),
    )
    .unwrap();

    let mut cmd = doicite(home.path());
    cmd.args(["cite", "doi:10.1001/jama.2020.2648"]);
    run_blocking(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("''JAMA''. 2020;323(13):1239-1242."));
}

#[tokio::test]
async fn test_resolve_prints_metadata_json() {
    let Some(mock_server) = registry().await else {
        return;
    };
    let home = TempDir::new().unwrap();
    let mut cmd = doicite(home.path());
    cmd.args(["--registry-url", mock_server.uri().as_str(), "resolve", "10.1001/jama.2020.2648"]);

    let output = run_blocking(cmd).await;
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["volume"], "323");
    assert_eq!(json["pub_date"]["print"]["month"], "04");
    assert_eq!(json["authors"]["first"]["last_name"], "Smith");
    output.assert().success();
}

#[tokio::test]
async fn test_expand_replaces_tags_and_reports_failures() {
    let Some(mock_server) = registry().await else {
        return;
    };
    let home = TempDir::new().unwrap();
    let mut cmd = doicite(home.path());
    cmd.args(["--registry-url", mock_server.uri().as_str(), "expand"])
        .write_stdin("A <doi>10.1001/jama.2020.2648</doi>\nB <doi>10.1/missing</doi>\n");

    run_blocking(cmd)
        .await
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("A Smith JP, Wang W, Doe J."))
        .stdout(predicate::str::ends_with("\nB <doi>10.1/missing</doi>\n"))
        .stderr(predicate::str::contains("could not be resolved"))
        .stderr(predicate::str::contains("Please check").not());
}

#[tokio::test]
async fn test_expand_success_notice_can_be_disabled() {
    let Some(mock_server) = registry().await else {
        return;
    };
    let home = TempDir::new().unwrap();
    let text = "See <doi>10.1001/jama.2020.2648</doi>.";

    let mut cmd = doicite(home.path());
    cmd.args(["--registry-url", mock_server.uri().as_str(), "expand"])
        .write_stdin(text);
    run_blocking(cmd)
        .await
        .assert()
        .success()
        .stderr(predicate::str::contains("Please check"));

    let mut cmd = doicite(home.path());
    cmd.args(["--registry-url", mock_server.uri().as_str(), "expand", "--no-check-notice"])
        .write_stdin(text);
    run_blocking(cmd)
        .await
        .assert()
        .success()
        .stderr(predicate::str::contains("Please check").not());
}

#[test]
fn test_expand_without_tags_is_passthrough() {
    let home = TempDir::new().unwrap();
    doicite(home.path())
        .args(["--registry-url", "http://127.0.0.1:9", "expand"])
        .write_stdin("nothing to see here\n")
        .assert()
        .success()
        .stdout("nothing to see here\n")
        .stderr("");
}
