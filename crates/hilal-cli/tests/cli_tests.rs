//! Integration tests for the `hilal` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the date, month
//! and moon subcommands through the actual binary, including JSON output,
//! calibration, config files and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn hilal() -> Command {
    let mut cmd = Command::cargo_bin("hilal").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_stdout(args: &[&str]) -> serde_json::Value {
    let output = hilal().args(args).output().unwrap();
    assert!(output.status.success(), "hilal {args:?} failed");
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// date
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn date_on_anchor_day() {
    hilal()
        .args(["date", "2023-07-19"])
        .assert()
        .success()
        .stdout("1 Muharram 1445\n");
}

#[test]
fn date_as_json() {
    let json = json_stdout(&["date", "2023-07-19", "--json"]);
    assert_eq!(json["gregorian"], "2023-07-19");
    assert_eq!(json["year"], 1445);
    assert_eq!(json["month"], 1);
    assert_eq!(json["day"], 1);
    assert_eq!(json["month_name"], "Muharram");
    assert_eq!(json["calibration"], 0);
}

#[test]
fn date_before_anchor_fails() {
    hilal()
        .args(["date", "2023-07-18"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("precedes the calendar anchor"));
}

#[test]
fn malformed_date_is_rejected() {
    hilal()
        .args(["date", "19/07/2023"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn offset_is_clamped_to_three_days() {
    let json = json_stdout(&["date", "2023-07-19", "--offset", "5", "--json"]);
    assert_eq!(json["calibration"], 3);
    assert_eq!(json["day"], 4);
}

#[test]
fn negative_offset_shifts_backwards() {
    hilal()
        .args(["date", "2023-07-20", "--offset", "-1"])
        .assert()
        .success()
        .stdout("1 Muharram 1445\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// month
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn month_lists_every_day() {
    let output = hilal().args(["month", "1445", "1"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.len() == 29 || lines.len() == 30, "{} days", lines.len());
    assert_eq!(lines[0], "2023-07-19");
}

#[test]
fn month_as_json() {
    let json = json_stdout(&["month", "1445", "9", "--json"]);
    assert_eq!(json["month_name"], "Ramadan");
    let days = json["days"].as_array().unwrap();
    assert_eq!(days.len() as u64, json["length"].as_u64().unwrap());
    assert_eq!(days[0], json["start"]);
    assert_eq!(days[days.len() - 1], json["end"]);
}

#[test]
fn month_out_of_range_fails() {
    hilal()
        .args(["month", "1445", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid Hijri month"));
}

// ─────────────────────────────────────────────────────────────────────────────
// moon
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn moon_report_for_anchor_day() {
    hilal()
        .args(["moon", "2023-07-19"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunset:       2023-07-19"))
        .stdout(predicate::str::contains("Conjunction:  2023-07-17"))
        .stdout(predicate::str::contains("Visible:      yes"));
}

#[test]
fn moon_as_json() {
    let json = json_stdout(&["moon", "2023-07-19", "--json"]);
    assert_eq!(json["date"], "2023-07-19");
    assert_eq!(json["is_visible"], true);
    assert!(json["moon_age_hours"].as_f64().unwrap() > 40.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// observer, config and logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn config_file_reanchors_the_calendar() {
    hilal()
        .args(["--config", &fixture("kano.toml"), "date", "2024-07-07"])
        .assert()
        .success()
        .stdout("1 Muharram 1446\n");
}

#[test]
fn config_with_unknown_key_fails() {
    hilal()
        .args(["--config", &fixture("unknown_key.toml"), "date", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse TOML config"));
}

#[test]
fn missing_config_file_fails() {
    hilal()
        .args(["--config", &fixture("does_not_exist.toml"), "date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn unknown_timezone_fails() {
    hilal()
        .args(["--tz", "Mars/Olympus_Mons", "date", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown timezone"));
}

#[test]
fn latitude_out_of_range_fails() {
    hilal()
        .args(["--lat", "95", "date", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("latitude 95"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    hilal()
        .args(["-vv", "date", "2023-07-19"])
        .assert()
        .success()
        .stdout("1 Muharram 1445\n")
        .stderr(predicate::str::contains("resolved month length"));
}

#[test]
fn no_subcommand_shows_usage() {
    hilal()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
