// ABOUTME: Integration tests for the stride CLI commands.
// ABOUTME: Validates --help output, init behavior and input rejection before any request.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn stride_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stride"))
}

/// Port 9 (discard) is closed on test machines, so any request would fail loudly.
const UNREACHABLE_CONFIG: &str = "marathon:\n  uri: http://127.0.0.1:9\napp:\n  id: /web\n";

#[test]
fn help_shows_commands() {
    stride_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("versions"))
        .stdout(predicate::str::contains("rollback"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("stride.yml");

    stride_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--id", "/shop/cart"])
        .assert()
        .success();

    assert!(config_path.exists(), "stride.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("id: /shop/cart"));
    assert!(content.contains("marathon:"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("stride.yml");

    fs::write(&config_path, "existing: config").unwrap();

    stride_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "existing: config");
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("stride.yml");
    fs::write(&config_path, "existing: config").unwrap();

    stride_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    assert!(fs::read_to_string(&config_path).unwrap().contains("marathon:"));
}

#[test]
fn apply_without_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    stride_cmd()
        .current_dir(temp_dir.path())
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn apply_rejects_unknown_state() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("stride.yml"), UNREACHABLE_CONFIG).unwrap();

    stride_cmd()
        .current_dir(temp_dir.path())
        .args(["apply", "--state", "pause"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown state 'pause'"));
}

#[test]
fn apply_requires_app_id() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("custom.yml");
    fs::write(&config, "marathon:\n  uri: http://127.0.0.1:9\n").unwrap();

    stride_cmd()
        .arg("--config")
        .arg(&config)
        .args(["apply", "--state", "kill"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "operation kill requires the following missing parameters: id",
        ));
}

#[test]
fn json_mode_reports_errors_as_events() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("stride.yml"), UNREACHABLE_CONFIG).unwrap();

    stride_cmd()
        .current_dir(temp_dir.path())
        .args(["--json", "apply", "--state", "pause"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#""event":"error""#));
}

#[test]
fn unknown_destination_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("stride.yml"), UNREACHABLE_CONFIG).unwrap();

    stride_cmd()
        .current_dir(temp_dir.path())
        .args(["status", "--destination", "qa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown destination: qa"));
}
