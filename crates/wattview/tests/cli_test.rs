//! Integration tests for the `wattview` CLI binary.
//!
//! These tests validate argument parsing, help output, and error
//! handling — all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wattview` binary with env isolation.
///
/// Clears all `WATTVIEW_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn wattview_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wattview");
    cmd.env("HOME", "/tmp/wattview-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/wattview-cli-test-nonexistent")
        .env_remove("WATTVIEW_ENDPOINT")
        .env_remove("WATTVIEW_OUTPUT")
        .env_remove("WATTVIEW_TIMEOUT_SECS");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = wattview_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    wattview_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("energy consumption")
            .and(predicate::str::contains("servers"))
            .and(predicate::str::contains("vms"))
            .and(predicate::str::contains("energy")),
    );
}

#[test]
fn test_version_flag() {
    wattview_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wattview"));
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_vms_requires_server() {
    wattview_cmd()
        .arg("vms")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--server"));
}

#[test]
fn test_energy_requires_range() {
    let output = wattview_cmd()
        .args(["energy", "--server", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("--start"), "missing --start in:\n{text}");
}

#[test]
fn test_invalid_output_format_rejected() {
    wattview_cmd()
        .args(["servers", "--output", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

// ── Connection errors ───────────────────────────────────────────────

#[test]
fn test_unreachable_backend_fails_cleanly() {
    // Port 1 is essentially guaranteed to refuse connections.
    let output = wattview_cmd()
        .args(["--endpoint", "http://127.0.0.1:1", "servers"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("Cannot reach backend"),
        "expected connection error in:\n{text}"
    );
}
