//! Process exit codes of the `arena-dl` binary
//!
//! Only cases that fail before any network activity are exercised here.

use assert_cmd::Command;
use tempfile::TempDir;

fn arena_dl() -> Command {
    Command::cargo_bin("arena-dl").unwrap()
}

#[test]
fn test_chunk_size_zero_exits_1() {
    let temp = TempDir::new().unwrap();

    arena_dl()
        .args(["get", "some-channel", "--chunk-size", "0", "-o"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(1);

    assert!(!temp.path().join("some-channel").exists());
}

#[test]
fn test_chunk_size_too_large_exits_1() {
    arena_dl()
        .args(["get", "some-channel", "-c", "51"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_negative_chunk_size_exits_1() {
    let output = arena_dl()
        .args(["get", "some-channel", "-c", "-5"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("chunk size"), "stderr: {stderr}");
}

#[test]
fn test_blank_slug_exits_1() {
    arena_dl().args(["get", "   "]).assert().failure().code(1);
}

#[test]
fn test_missing_slug_exits_1() {
    arena_dl().args(["get"]).assert().failure().code(1);
}

#[test]
fn test_help_exits_0() {
    let output = arena_dl().arg("--help").assert().success().get_output().clone();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("get"), "stdout: {stdout}");

    arena_dl().args(["get", "-h"]).assert().success();
}

#[test]
fn test_version_exits_0() {
    for flag in ["--version", "-v"] {
        let output = arena_dl().arg(flag).assert().success().get_output().clone();
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "stdout: {stdout}");
    }
}
