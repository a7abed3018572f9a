//! CLI integration tests
//!
//! End-to-end tests for CLI commands using assert_cmd.

mod common;

use assert_cmd::Command;
use common::{sample_feed, FEED_PATH};
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get the trainboard binary for testing
fn trainboard_cmd() -> Command {
    let mut cmd = Command::cargo_bin("trainboard").unwrap();
    cmd.env_remove("TRAINBOARD_STATION")
        .env_remove("TRAINBOARD_FEED_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_output() {
    trainboard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trainboard"));
}

#[test]
fn test_help_shows_all_commands() {
    trainboard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("once"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_watch_help() {
    trainboard_cmd()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--station"))
        .stdout(predicate::str::contains("--metrics-listen"));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("trainboard.toml");

    trainboard_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[staleness]"));
}

#[test]
fn test_config_init_no_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("trainboard.toml");
    std::fs::write(&config_path, "existing content").unwrap();

    trainboard_cmd()
        .args(["config", "init", "-o", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert_eq!(content, "existing content");
}

#[test]
fn test_completions_bash() {
    trainboard_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trainboard"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("trainboard.toml");
    std::fs::write(&config_path, "[polling]\njitter_ratio = 1.5\n").unwrap();

    trainboard_cmd()
        .args(["once", "-c", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("polling.jitter_ratio"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_once_prints_board_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_feed()))
        .mount(&server)
        .await;
    let url = format!("{}{}", server.uri(), FEED_PATH);

    let output = tokio::task::spawn_blocking(move || {
        trainboard_cmd()
            .args(["once", "--json", "--station", "HOB", "--feed-url", &url])
            .args(["-c", "/nonexistent/trainboard.toml"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let board: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(board["freshness"]["verdict"], "live");
    assert_eq!(board["snapshot"]["arrivals"][0]["headsign"], "World Trade Center");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_once_fails_when_feed_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let url = format!("{}{}", server.uri(), FEED_PATH);

    let output = tokio::task::spawn_blocking(move || {
        trainboard_cmd()
            .args(["once", "--feed-url", &url, "-c", "/nonexistent/trainboard.toml"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("STALE"));
    assert!(stderr.contains("http_status:502"));
}
