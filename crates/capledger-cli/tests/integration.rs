//! Integration tests for CLI commands.

use std::process::Command;
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_capledger"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

/// Sets up a ledger with one class, two holders, and two transactions.
fn seeded_ledger() -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_string_lossy().to_string();

    let (success, _, stderr) = run_cli(&["init", &dir]);
    assert!(success, "init failed: {stderr}");

    let (success, _, stderr) = run_cli(&[
        "create-class",
        &dir,
        "--name",
        "Common",
        "--authorized",
        "1000000",
    ]);
    assert!(success, "create-class failed: {stderr}");

    let (success, _, stderr) = run_cli(&["create-holder", &dir, "--name", "Alice", "--founder"]);
    assert!(success, "create-holder failed: {stderr}");
    let (success, _, stderr) = run_cli(&[
        "create-holder",
        &dir,
        "--name",
        "Venture Fund",
        "--holder-type",
        "entity",
    ]);
    assert!(success, "create-holder failed: {stderr}");

    let (success, _, stderr) = run_cli(&[
        "record",
        &dir,
        "--holder",
        "holder:alice",
        "--class",
        "class:common",
        "--tx-type",
        "issuance",
        "--shares",
        "500000",
        "--date",
        "2025-01-10",
    ]);
    assert!(success, "record failed: {stderr}");

    let (success, _, stderr) = run_cli(&[
        "record",
        &dir,
        "--holder",
        "holder:venture-fund",
        "--class",
        "class:common",
        "--tx-type",
        "issuance",
        "--shares",
        "300000",
        "--date",
        "2025-01-12",
    ]);
    assert!(success, "record failed: {stderr}");

    (temp_dir, dir)
}

#[test]
fn test_record_and_table() {
    let (_temp_dir, dir) = seeded_ledger();

    let (success, stdout, _) = run_cli(&["table", &dir]);
    assert!(success);
    assert!(stdout.contains("SHAREHOLDER"));
    assert!(stdout.contains("holder:alice"));
    assert!(stdout.contains("62.50%"));
    assert!(stdout.contains("37.50%"));
}

#[test]
fn test_table_json_output() {
    let (_temp_dir, dir) = seeded_ledger();

    let (success, stdout, _) = run_cli(&["table", &dir, "--json"]);
    assert!(success);
    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["shareholder_id"], "holder:alice");
    assert_eq!(rows[0]["shares"], 500000);
}

#[test]
fn test_summary_command() {
    let (_temp_dir, dir) = seeded_ledger();

    let (success, stdout, _) = run_cli(&["summary", &dir, "--class", "class:common", "--json"]);
    assert!(success);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["authorized"], 1000000);
    assert_eq!(summary["issued"], 800000);
    assert_eq!(summary["available"], 200000);
}

#[test]
fn test_holdings_command() {
    let (_temp_dir, dir) = seeded_ledger();

    let (success, stdout, _) = run_cli(&["holdings", &dir, "--holder", "holder:alice"]);
    assert!(success);
    assert!(stdout.contains("class:common"));
    assert!(stdout.contains("500000"));
}

#[test]
fn test_list_with_filters() {
    let (_temp_dir, dir) = seeded_ledger();

    let (success, stdout, _) = run_cli(&["list", &dir, "--holder", "holder:alice"]);
    assert!(success);
    assert!(stdout.contains("holder:alice"));
    assert!(!stdout.contains("holder:venture-fund"));

    let (success, stdout, _) = run_cli(&["list", &dir, "--from", "2025-01-11", "--json"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 1);
    let tx: serde_json::Value = serde_json::from_str(lines[0]).expect("Invalid JSON");
    assert_eq!(tx["shareholder_id"], "holder:venture-fund");
}

#[test]
fn test_over_issuance_is_rejected() {
    let (_temp_dir, dir) = seeded_ledger();

    let (success, _, stderr) = run_cli(&[
        "record",
        &dir,
        "--holder",
        "holder:alice",
        "--class",
        "class:common",
        "--tx-type",
        "issuance",
        "--shares",
        "500000",
        "--date",
        "2025-01-15",
    ]);
    assert!(!success);
    assert!(stderr.contains("exceeds authorized"));

    // State unchanged: summary still shows 800k issued.
    let (_, stdout, _) = run_cli(&["summary", &dir, "--class", "class:common", "--json"]);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["issued"], 800000);
}

#[test]
fn test_verify_command() {
    let (_temp_dir, dir) = seeded_ledger();
    let journal = format!("{dir}/transactions.eqj");

    let (success, stdout, _) = run_cli(&["verify", &journal, "--strict"]);
    assert!(success);
    assert!(stdout.contains("all ok"));
    assert!(stdout.contains("Sequence order: ok"));
}

#[test]
fn test_reconcile_command() {
    let (_temp_dir, dir) = seeded_ledger();

    let (success, stdout, _) = run_cli(&["reconcile", &dir]);
    assert!(success);
    assert!(stdout.contains("Reconciliation clean"));
}

#[test]
fn test_authorize_amendment() {
    let (_temp_dir, dir) = seeded_ledger();

    // Shrinking below issued (800k) fails.
    let (success, _, stderr) = run_cli(&[
        "authorize",
        &dir,
        "--class",
        "class:common",
        "--shares",
        "700000",
    ]);
    assert!(!success);
    assert!(stderr.contains("already issued"));

    // Raising the ceiling succeeds.
    let (success, stdout, _) = run_cli(&[
        "authorize",
        &dir,
        "--class",
        "class:common",
        "--shares",
        "2000000",
    ]);
    assert!(success);
    assert!(stdout.contains("2000000"));
}

#[test]
fn test_invalid_inputs_report_errors() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_string_lossy().to_string();
    run_cli(&["init", &dir]);

    let (success, _, stderr) = run_cli(&[
        "create-class",
        &dir,
        "--name",
        "Common",
        "--class-type",
        "mezzanine",
        "--authorized",
        "100",
    ]);
    assert!(!success);
    assert!(stderr.contains("invalid class type"));

    let (success, _, stderr) = run_cli(&[
        "record",
        &dir,
        "--holder",
        "holder:ghost",
        "--class",
        "class:common",
        "--tx-type",
        "issuance",
        "--shares",
        "1",
        "--date",
        "not-a-date",
    ]);
    assert!(!success);
    assert!(stderr.contains("invalid date"));
}
