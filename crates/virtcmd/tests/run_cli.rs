//! End-to-end tests for the `run` subcommand.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::tempdir;

fn stub_virsh(dir: &Path, log: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("virsh");
    let script = format!(
        r#"#!/bin/sh
echo "$@" >> "{log}"
while [ $# -gt 0 ]; do
  if [ "$1" = "--cmd" ]; then
    shift
    exec "$@"
  fi
  shift
done
exit 2
"#,
        log = log.display()
    );

    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn virtcmd(stub: &Path) -> Command {
    let mut cmd = Command::cargo_bin("virtcmd").unwrap();
    cmd.env("VIRTCMD_VIRSH", stub);
    cmd
}

#[test]
fn test_run_flags_produce_a_report() {
    let temp = tempdir().unwrap();
    let log = temp.path().join("virsh.log");
    let stub = stub_virsh(temp.path(), &log);

    let assert = virtcmd(&stub)
        .args(["run", "--container", "cont1", "echo hi"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["changed"], true);
    assert_eq!(report["rc"], 0);
    assert_eq!(report["stdout"], "hi");
}

#[test]
fn test_unless_skips_from_the_command_line() {
    let temp = tempdir().unwrap();
    let log = temp.path().join("virsh.log");
    let stub = stub_virsh(temp.path(), &log);

    let assert = virtcmd(&stub)
        .args(["run", "--container", "cont1", "--unless", "true", "echo hi"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["changed"], false);
    assert_eq!(report["msg"], "Skipped since true returned 0");
    assert!(!log.exists());
}

#[test]
fn test_missing_container_is_a_usage_error() {
    let temp = tempdir().unwrap();
    let log = temp.path().join("virsh.log");
    let stub = stub_virsh(temp.path(), &log);

    virtcmd(&stub)
        .args(["run", "true"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("--container"));
}

#[test]
fn test_conflicting_guards_are_a_usage_error() {
    let temp = tempdir().unwrap();
    let log = temp.path().join("virsh.log");
    let stub = stub_virsh(temp.path(), &log);

    virtcmd(&stub)
        .args([
            "run",
            "--container",
            "cont1",
            "--creates",
            "/tmp/stamp",
            "--unless",
            "true",
            "true",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("cannot be used with"));
}

#[test]
fn test_debug_logging_stays_off_stdout() {
    let temp = tempdir().unwrap();
    let log = temp.path().join("virsh.log");
    let stub = stub_virsh(temp.path(), &log);

    let assert = virtcmd(&stub)
        .args(["--debug", "run", "--container", "cont1", "echo hi"])
        .assert()
        .success();

    // stdout must stay parseable even with logging enabled
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["changed"], true);
}
