//! Integration tests for the `charm` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const METADATA: &str = "name: my-service
summary: A service
maintainer: Jane Doe <jane@example.com>
description: Does things.
categories: [misc]
provides:
  website:
    interface: http
";

fn write_charm(parent: &Path, name: &str) -> PathBuf {
    let dir = parent.join(name);
    fs::create_dir_all(dir.join("hooks")).unwrap();
    fs::write(dir.join("metadata.yaml"), METADATA).unwrap();
    fs::write(dir.join("copyright"), "Copyright 2024 Jane Doe\n").unwrap();
    fs::write(dir.join("README.md"), "# my-service\n").unwrap();
    fs::write(dir.join("icon.svg"), "<svg/>").unwrap();
    fs::write(
        dir.join("config.yaml"),
        "options:\n  port:\n    type: int\n    default: 80\n    description: Port\n",
    )
    .unwrap();
    for hook in ["install", "start", "stop", "website-relation-joined"] {
        let path = dir.join("hooks").join(hook);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        make_executable(&path);
    }
    dir
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

fn charm() -> Command {
    let mut cmd = Command::cargo_bin("charm").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_proof_clean_charm() {
    let temp = TempDir::new().unwrap();
    let dir = write_charm(temp.path(), "my-service");

    charm()
        .arg("proof")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_proof_defaults_to_current_dir() {
    let temp = TempDir::new().unwrap();
    let dir = write_charm(temp.path(), "my-service");

    charm().current_dir(&dir).arg("proof").assert().success();
}

#[test]
fn test_proof_reports_errors() {
    let temp = TempDir::new().unwrap();
    let dir = write_charm(temp.path(), "my-service");
    fs::remove_file(dir.join("copyright")).unwrap();

    charm()
        .arg("proof")
        .arg(&dir)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("E: no copyright file"));
}

#[test]
fn test_proof_missing_directory() {
    let temp = TempDir::new().unwrap();

    charm()
        .arg("proof")
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("is not a directory, Aborting"));
}

#[test]
fn test_proof_by_name_under_charm_home() {
    let temp = TempDir::new().unwrap();
    write_charm(temp.path(), "my-service");

    charm()
        .env("CHARM_HOME", temp.path())
        .current_dir(temp.path().parent().unwrap())
        .args(["proof", "my-service"])
        .assert()
        .success();
}

#[test]
fn test_proof_json() {
    let temp = TempDir::new().unwrap();
    let dir = write_charm(temp.path(), "my-service");
    fs::remove_file(dir.join("icon.svg")).unwrap();

    let output = charm()
        .arg("proof")
        .arg(&dir)
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["strict_valid"], false);
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["diagnostics"][0]["severity"], "warn");
    assert_eq!(json["diagnostics"][0]["message"], "No icon.svg file.");
}

#[test]
fn test_proof_strict_fails_on_warnings() {
    let temp = TempDir::new().unwrap();
    let dir = write_charm(temp.path(), "my-service");
    fs::remove_file(dir.join("icon.svg")).unwrap();

    charm().arg("proof").arg(&dir).assert().success();
    charm()
        .arg("proof")
        .arg(&dir)
        .arg("--strict")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("strict mode"));
}

#[test]
fn test_proof_quiet_hides_warnings() {
    let temp = TempDir::new().unwrap();
    let dir = write_charm(temp.path(), "my-service");
    fs::remove_file(dir.join("icon.svg")).unwrap();
    fs::remove_file(dir.join("copyright")).unwrap();

    charm()
        .arg("proof")
        .arg(&dir)
        .arg("-q")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("E: no copyright file"))
        .stdout(predicate::str::contains("icon.svg").not());
}

#[test]
fn test_list_local_charms() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("wordpress/.bzr")).unwrap();
    fs::create_dir_all(temp.path().join("mysql/.bzr")).unwrap();
    fs::create_dir_all(temp.path().join("notes")).unwrap();

    let output = charm()
        .arg("list")
        .arg(temp.path())
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let charms: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(charms, vec!["mysql", "wordpress"]);
}

#[test]
fn test_list_missing_directory() {
    let temp = TempDir::new().unwrap();

    charm()
        .arg("list")
        .arg(temp.path().join("missing"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Directory not found"));
}
