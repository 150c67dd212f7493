//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("srcloc").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("srcloc").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Source root to search"))
        .stdout(predicate::str::contains("--max-files"));
}

#[test]
fn test_serve_rejects_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("srcloc").unwrap();
    cmd.arg("serve")
        .arg("--root")
        .arg(dir.path().join("does-not-exist"))
        .arg("--bind")
        .arg("127.0.0.1:0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_serve_rejects_bad_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("srcloc.toml");
    std::fs::write(&config, "extensions = 3\n").unwrap();

    let mut cmd = Command::cargo_bin("srcloc").unwrap();
    cmd.arg("serve").arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("srcloc").unwrap();
    cmd.arg("index");

    cmd.assert().failure();
}

#[test]
fn test_root_env_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("srcloc.toml");
    std::fs::write(&config, format!("root = {:?}\n", dir.path().to_str().unwrap())).unwrap();

    let mut cmd = Command::cargo_bin("srcloc").unwrap();
    cmd.env("SRCLOC_ROOT", dir.path().join("root-from-env"))
        .arg("serve")
        .arg("--config")
        .arg(&config)
        .arg("--bind")
        .arg("127.0.0.1:0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("root-from-env"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_root_flag_overrides_env() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("srcloc").unwrap();
    cmd.env("SRCLOC_ROOT", dir.path())
        .arg("serve")
        .arg("--root")
        .arg(dir.path().join("root-from-flag"))
        .arg("--bind")
        .arg("127.0.0.1:0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("root-from-flag"))
        .stderr(predicate::str::contains("does not exist"));
}
