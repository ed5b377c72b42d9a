use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("smartcareer").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: smartcareer"))
        .stdout(predicate::str::contains("--model <MODEL>"))
        .stdout(predicate::str::contains("--base-url <BASE_URL>"))
        .stdout(predicate::str::contains("--config <CONFIG>"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_missing_api_key_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("smartcareer").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key not set"));
}

#[test]
fn test_malformed_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "chat_temperature: [0.8\n").unwrap();

    let mut cmd = Command::cargo_bin("smartcareer").unwrap();
    cmd.current_dir(dir.path())
        .env("GEMINI_API_KEY", "test-key")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
