use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WAYBILL: &str = "\
LOGISTICS INVOICE
Invoice No: INV-2024-00892
Date: February 20, 2024
Tracking No: TRK-PH-44821

From: ABC Warehousing Corp., Mandaue City, Cebu
To: XYZ Retail Store, Makati City, Metro Manila

Items:
Industrial Fan Motor     2    1500.00    3000.00
Conveyor Belt Segment    5     800.00    4000.00
Safety Gloves (box)     10     250.00    2500.00

Total Weight: 45.5 kg
Total Amount: PHP 9,000.00
";

/// A command whose per-user config directory is an empty temp dir.
fn logiparse(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("logiparse").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path());
    cmd.env("HOME", home.path());
    cmd
}

fn write_input(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn process_prints_json() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "waybill.txt", WAYBILL.as_bytes());

    let output = logiparse(&dir)
        .arg("process")
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["extracted_data"]["invoice_number"], "INV-2024-00892");
    assert_eq!(value["validation_report"]["status"], "FAIL");
    assert!(value.get("metadata").is_none());
}

#[test]
fn process_reads_stdin() {
    let dir = TempDir::new().unwrap();

    logiparse(&dir)
        .args(["process", "-", "--format", "text"])
        .write_stdin("Invoice No: INV-55\nTotal: 10.00\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"invoice_number:\s+INV-55").unwrap())
        .stdout(predicate::str::contains("Missing: date"));
}

#[test]
fn process_with_metadata() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "waybill.txt", WAYBILL.as_bytes());

    logiparse(&dir)
        .arg("process")
        .arg(&input)
        .args(["--metadata", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processed_at\""))
        .stdout(predicate::str::contains("\"source_type\": \"Text\""));
}

#[test]
fn metadata_carries_raw_text_preview() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "waybill.txt", WAYBILL.as_bytes());

    let output = logiparse(&dir)
        .arg("process")
        .arg(&input)
        .arg("--metadata")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let preview = value["metadata"]["raw_text_preview"].as_str().unwrap();
    assert!(WAYBILL.chars().count() > 300);
    assert_eq!(preview.chars().count(), 303);
    assert!(preview.starts_with("LOGISTICS INVOICE\nInvoice No: INV-2024-00892"));
    assert!(preview.ends_with("..."));

    let data = value["extracted_data"].as_object().unwrap();
    assert!(data.get("raw_text_preview").is_none());
    assert_eq!(data.len(), 9);
}

#[test]
fn strict_mode_fails_on_validation_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "waybill.txt", WAYBILL.as_bytes());

    logiparse(&dir)
        .arg("process")
        .arg(&input)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn config_file_changes_mismatch_severity() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "waybill.txt", WAYBILL.as_bytes());
    let config = write_input(
        &dir,
        "config.json",
        br#"{"validation": {"sum_mismatch_severity": "warning"}}"#,
    );

    logiparse(&dir)
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"WARN\""));
}

#[test]
fn process_writes_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "waybill.txt", WAYBILL.as_bytes());
    let out = dir.path().join("out.csv");

    logiparse(&dir)
        .arg("process")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("invoice_number,date,sender,receiver"));
    assert!(csv.contains("INV-2024-00892"));
    assert!(csv.contains("FAIL"));
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();

    logiparse(&dir)
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn binary_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "scan.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe, 0x00]);

    logiparse(&dir)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not UTF-8 text"));
}

#[test]
fn config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logiparse.json");

    logiparse(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    logiparse(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    logiparse(&dir)
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "extraction.default_currency"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PHP\""));
}

#[test]
fn config_get_unknown_key() {
    let dir = TempDir::new().unwrap();

    logiparse(&dir)
        .args(["config", "get", "validation.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_path_reports_missing_file() {
    let dir = TempDir::new().unwrap();

    logiparse(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}
