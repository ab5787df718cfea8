use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const SHEET: &str = "\
Activity,Start date,End date,Cost,Ledger code
Swim Lessons,01/05/2024,01/25/2024,75,ab12
Chess Club,01/12/2024,01/18/2024,60,xy99
Pottery,01/11/2024,01/19/2024,30,AB100
";

fn checker(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("activity-checker").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn fixture(dir: &Path) -> PathBuf {
    let path = dir.join("activities.csv");
    std::fs::write(&path, SHEET).unwrap();
    path
}

#[test]
fn check_reports_violations_and_summaries() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(dir.path());
    checker(dir.path())
        .args(["check", path.to_str().unwrap()])
        .args(["--start", "01/10/2024", "--end", "01/20/2024"])
        .args(["--min-cost", "10", "--max-cost", "50", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Swim Lessons,Both Dates Out of Bounds,\"Start: 2024-01-05, End: 2024-01-25\"",
        ))
        .stdout(predicate::str::contains("Chess Club,Invalid Cost,"))
        .stdout(predicate::str::contains("Summary,Invalid Costs,2 / 3"))
        .stdout(predicate::str::contains("Pottery").not());
}

#[test]
fn check_with_ledger_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(dir.path());
    checker(dir.path())
        .args(["check", path.to_str().unwrap(), "--ledger", "AB1", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pottery,Ledger Code Match,Ledger code: AB100"))
        .stdout(predicate::str::contains("Summary,Ledger Code Matches,2 activities match Ledger Code: AB1"))
        .stdout(predicate::str::contains("Chess Club").not());
}

#[test]
fn check_with_unmatched_ledger_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(dir.path());
    checker(dir.path())
        .args(["check", path.to_str().unwrap(), "--ledger", "zz", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Match,Ledger code,No entries found for zz."))
        .stdout(predicate::str::contains("Summary").not());
}

#[test]
fn check_rejects_half_a_date_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(dir.path());
    let output = checker(dir.path())
        .args(["check", path.to_str().unwrap(), "--start", "01/10/2024", "--format", "csv"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(output).unwrap();
    assert_eq!(out.trim().lines().count(), 2);
    assert!(out.contains("Error,Incomplete Date Range,Both Start Date and End Date must be filled."));
}

#[test]
fn check_without_file() {
    let dir = tempfile::tempdir().unwrap();
    checker(dir.path())
        .args(["check", "--format", "json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"label\": \"No File Selected\""));
}

#[test]
fn check_missing_cost_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acts.csv");
    std::fs::write(&path, "Activity,Start date,End date\nSwim,01/05/2024,01/25/2024\n").unwrap();
    checker(dir.path())
        .args(["check", path.to_str().unwrap(), "--format", "csv"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Error,Missing Columns,Required columns: Cost"));
}

#[test]
fn codes_lists_unique_codes() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(dir.path());
    checker(dir.path())
        .args(["codes", path.to_str().unwrap(), "--filter", "ab"])
        .assert()
        .success()
        .stdout("AB100\nab12\n");
}

#[test]
fn codes_for_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    checker(dir.path())
        .args(["codes", "nope.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: File not found"));
}

#[test]
fn config_date_format_applies_to_check() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acts.csv");
    std::fs::write(
        &path,
        "Activity,Start date,End date,Cost\nSwim,01/05/24,01/25/24,10\n",
    )
    .unwrap();

    checker(dir.path())
        .args(["config", "set", "date-format", "two-digit"])
        .assert()
        .success();
    assert!(dir
        .path()
        .join(".config/activity-checker/settings.json")
        .exists());

    checker(dir.path())
        .args(["check", path.to_str().unwrap(), "--start", "01/10/24", "--end", "01/20/24"])
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Swim,Both Dates Out of Bounds"));

    checker(dir.path())
        .args(["check", path.to_str().unwrap(), "--date-format", "four-digit", "--format", "csv"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Invalid Date Format"));
}

#[test]
fn corrupt_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(dir.path());
    let config_dir = dir.path().join(".config/activity-checker");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("settings.json"), "{ not json").unwrap();

    checker(dir.path())
        .args(["-v", "check", path.to_str().unwrap()])
        .args(["--start", "01/10/2024", "--end", "01/20/2024", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Swim Lessons,Both Dates Out of Bounds,\"Start: 2024-01-05, End: 2024-01-25\"",
        ))
        .stderr(predicate::str::contains("ignoring unreadable settings"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    checker(dir.path())
        .args(["config", "set", "colour", "blue"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown setting: colour"));
}

#[test]
fn completions_are_generated() {
    let dir = tempfile::tempdir().unwrap();
    checker(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("activity-checker"));
}
