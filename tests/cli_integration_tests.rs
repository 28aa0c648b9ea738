//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_assembly_sheet(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 1, "Assembly").unwrap();
    worksheet.write_string(1, 1, "FICHA-1").unwrap();
    worksheet.write_string(2, 1, "P1").unwrap();
    worksheet.write_string(3, 1, "WS1").unwrap();
    worksheet.write_string(6, 0, "Cut").unwrap();
    worksheet.write_number(6, 1, 10).unwrap();
    worksheet.write_string(7, 0, "Weld").unwrap();
    worksheet.write_number(7, 1, 20).unwrap();
    workbook.save(path).unwrap();
}

fn write_bom(path: &Path, codes: &[&str]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (offset, code) in codes.iter().enumerate() {
        let col = 5 + offset as u16;
        worksheet.write_string(1, col, *code).unwrap();
        worksheet.write_string(2, col, "Widget").unwrap();
    }
    workbook.save(path).unwrap();
}

/// Default directory layout: fichas/, data/bom.xlsx
fn default_layout(codes: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("fichas")).unwrap();
    fs::create_dir(temp_dir.path().join("data")).unwrap();
    write_assembly_sheet(&temp_dir.path().join("fichas").join("assembly.xlsx"));
    write_bom(&temp_dir.path().join("data").join("bom.xlsx"), codes);
    temp_dir
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bulk-import"))
        .stdout(predicate::str::contains("EXIT STATUS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bulk-import"));
}

#[test]
fn test_templates_help() {
    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.args(["templates", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("without BOM expansion"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RUN TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_default_run_uses_fixed_layout() {
    let temp_dir = default_layout(&["P1"]);

    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Bulk import files written"));

    let processes =
        fs::read_to_string(temp_dir.path().join("bulk_import/production_prodProcess.csv")).unwrap();
    assert!(processes.contains(";PP P1-1 Widget;PP-P1-1;WS1;BASE;3;P1-1"));

    let lines =
        fs::read_to_string(temp_dir.path().join("bulk_import/production_prodProcessLine.csv"))
            .unwrap();
    assert!(lines.contains(";PP-P1-1;Cut;10;;;0;0;0"));
    assert!(lines.contains(";PP-P1-1;Weld;20;;;0;0;0"));
}

#[test]
fn test_expand_with_explicit_paths() {
    let temp_dir = default_layout(&["P1", "P1"]);
    let out = temp_dir.path().join("out");

    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.arg("expand")
        .arg("--input")
        .arg(temp_dir.path().join("fichas"))
        .arg("--bom")
        .arg(temp_dir.path().join("data/bom.xlsx"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let processes = fs::read_to_string(out.join("production_prodProcess.csv")).unwrap();
    assert!(processes.contains("PP-P1-1"));
    assert!(processes.contains("PP-P1-2"));
}

#[test]
fn test_missing_input_directory_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.current_dir(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input directory does not exist"));
}

#[test]
fn test_unmatched_code_exits_degraded() {
    let temp_dir = default_layout(&["P1", "P9"]);

    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.current_dir(temp_dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Expansion stopped"));

    assert!(temp_dir
        .path()
        .join("bulk_import/production_prodProcess.csv")
        .exists());
    assert!(temp_dir
        .path()
        .join("bulk_import/production_prodProcessLine.csv")
        .exists());
}

#[test]
fn test_report_file_is_written() {
    let temp_dir = default_layout(&["P1"]);
    let report = temp_dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("expand")
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["mode"], "expand");
    assert_eq!(json["processes_written"], 1);
    assert_eq!(json["steps_written"], 2);
    assert_eq!(json["files"][0]["status"], "extracted");
}

#[test]
fn test_templates_command() {
    let temp_dir = default_layout(&[]);

    let mut cmd = Command::cargo_bin("bulk-import").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("templates")
        .assert()
        .success();

    let processes =
        fs::read_to_string(temp_dir.path().join("bulk_import/production_prodProcess.csv")).unwrap();
    assert!(processes.contains(";Assembly;FICHA-1;WS1;BASE;3;P1"));
}
