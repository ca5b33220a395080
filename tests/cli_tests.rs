//! Binary integration tests for i18n-forge
//!
//! These run the actual binary as a subprocess inside a temp directory, using the
//! default `locale.xlsx` / `locales/` paths unless a test overrides them.

// Binary tests are skipped during coverage builds
#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn forge() -> Command {
    let mut cmd = Command::cargo_bin("i18n-forge").unwrap();
    cmd.env_remove("I18N_FORGE_XLSX")
        .env_remove("I18N_FORGE_LOCALES")
        .env_remove("RUST_LOG");
    cmd
}

fn write_sheet(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                worksheet.write_string(r as u32, c as u16, *cell).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// USAGE ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_no_mode_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    forge()
        .current_dir(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--to-js"));
}

#[test]
fn test_both_modes_conflict() {
    let temp_dir = TempDir::new().unwrap();
    forge()
        .current_dir(temp_dir.path())
        .args(["--to-js", "--to-excel"])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_flag_is_usage_error() {
    forge().arg("--to-yaml").assert().code(1);
}

#[test]
fn test_help_succeeds() {
    forge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--to-excel"));
}

// ═══════════════════════════════════════════════════════════════════════════
// --to-js
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_to_js_default_paths() {
    let temp_dir = TempDir::new().unwrap();
    write_sheet(
        &temp_dir.path().join("locale.xlsx"),
        &[
            &["key", "en", "zh-CN"],
            &["greeting.hello", "Hello", "你好"],
        ],
    );

    forge()
        .current_dir(temp_dir.path())
        .arg("--to-js")
        .assert()
        .success()
        .stdout(predicate::str::contains("en.json"))
        .stdout(predicate::str::contains("zh-CN.js"));

    let js = fs::read_to_string(temp_dir.path().join("locales/zh-CN.js")).unwrap();
    assert!(js.contains("const zhCN = "));
    assert!(temp_dir.path().join("locales/en.json").exists());
}

#[test]
fn test_to_js_missing_spreadsheet_fails() {
    let temp_dir = TempDir::new().unwrap();
    forge()
        .current_dir(temp_dir.path())
        .arg("--to-js")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    assert!(!temp_dir.path().join("locales").exists());
}

#[test]
fn test_to_js_custom_paths_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let xlsx = temp_dir.path().join("strings.xlsx");
    write_sheet(&xlsx, &[&["key", "fr"], &["a", "A"]]);

    forge()
        .current_dir(temp_dir.path())
        .env("I18N_FORGE_XLSX", &xlsx)
        .args(["--to-js", "--locales", "out"])
        .assert()
        .success();

    assert!(temp_dir.path().join("out/fr.json").exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// --to-excel
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_to_excel_default_paths() {
    let temp_dir = TempDir::new().unwrap();
    let locales = temp_dir.path().join("locales");
    fs::create_dir_all(&locales).unwrap();
    fs::write(locales.join("en.json"), r#"{"a": "A"}"#).unwrap();

    forge()
        .current_dir(temp_dir.path())
        .args(["--to-excel", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Export complete"));

    assert!(temp_dir.path().join("locale.xlsx").exists());
}

#[test]
fn test_to_excel_reports_broken_file_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    let locales = temp_dir.path().join("locales");
    fs::create_dir_all(&locales).unwrap();
    fs::write(locales.join("en.json"), r#"{"a": "A"}"#).unwrap();
    fs::write(locales.join("zh.json"), "not json").unwrap();

    forge()
        .current_dir(temp_dir.path())
        .arg("--to-excel")
        .assert()
        .success()
        .stderr(predicate::str::contains("zh.json"));

    assert!(temp_dir.path().join("locale.xlsx").exists());
}

#[test]
fn test_to_excel_reports_broken_file_once() {
    let temp_dir = TempDir::new().unwrap();
    let locales = temp_dir.path().join("locales");
    fs::create_dir_all(&locales).unwrap();
    fs::write(locales.join("en.json"), r#"{"a": "A"}"#).unwrap();
    fs::write(locales.join("zh.json"), "not json").unwrap();

    let output = forge()
        .current_dir(temp_dir.path())
        .arg("--to-excel")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("zh.json").count(), 1, "stderr was: {}", stderr);
}

#[test]
fn test_to_excel_verbose_lists_source_files() {
    let temp_dir = TempDir::new().unwrap();
    let locales = temp_dir.path().join("locales");
    fs::create_dir_all(&locales).unwrap();
    fs::write(locales.join("en.json"), r#"{"a": "A"}"#).unwrap();
    fs::write(
        locales.join("de.js"),
        "const de = {\"a\": \"B\"};\nmodule.exports = de;\n",
    )
    .unwrap();

    forge()
        .current_dir(temp_dir.path())
        .args(["--to-excel", "--js-modules", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en.json"))
        .stdout(predicate::str::contains("de.js"));
}

#[test]
fn test_to_excel_missing_locales_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    forge()
        .current_dir(temp_dir.path())
        .arg("--to-excel")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_round_trip_through_binary() {
    let temp_dir = TempDir::new().unwrap();
    write_sheet(
        &temp_dir.path().join("locale.xlsx"),
        &[
            &["key", "en", "zh"],
            &["greeting.hello", "Hello", "你好"],
            &["greeting.bye", "", "再见"],
        ],
    );

    forge()
        .current_dir(temp_dir.path())
        .arg("--to-js")
        .assert()
        .success();
    forge()
        .current_dir(temp_dir.path())
        .args(["--to-excel", "--js-modules"])
        .assert()
        .success();
    forge()
        .current_dir(temp_dir.path())
        .arg("--to-js")
        .assert()
        .success();

    let en = fs::read_to_string(temp_dir.path().join("locales/en.json")).unwrap();
    let en: serde_json::Value = serde_json::from_str(&en).unwrap();
    assert_eq!(
        en,
        serde_json::json!({"greeting": {"bye": "", "hello": "Hello"}})
    );
}
