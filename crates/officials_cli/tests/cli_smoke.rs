//! End-to-end checks of the `officials` binary against a temp database.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn officials(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("officials").unwrap();
    cmd.env_remove("OFFICIALS_LOG_DIR")
        .env_remove("OFFICIALS_LOG_LEVEL")
        .arg("--db")
        .arg(db);
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn ping_reports_core_version() {
    let dir = tempfile::tempdir().unwrap();
    officials(&dir.path().join("unused.db"))
        .arg("ping")
        .assert()
        .success()
        .stdout(predicate::str::contains("officials_core ping=pong"))
        .stdout(predicate::str::contains("officials_core version="));
}

#[test]
fn create_then_report_metrics_and_events() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("officials.db");

    let output = officials(&db)
        .args([
            "create",
            "--name",
            "Ana Torres",
            "--document",
            "CC-77",
            "--position",
            "Analyst",
            "--procedure",
            "Contest",
            "--status",
            "provisional",
            "--entry-date",
            "2024-01-15",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let created = stdout_json(&output);
    assert_eq!(created["ok"], true);
    let official_id = created["official_id"].as_str().unwrap().to_string();

    let output = officials(&db)
        .args(["status", &official_id, "POSITIONED"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let changed = stdout_json(&output);
    assert!(changed["message"]
        .as_str()
        .unwrap()
        .contains("3 event(s) scheduled"));

    let output = officials(&db)
        .args(["events", "--official", &official_id])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 4);

    let output = officials(&db).arg("metrics").output().unwrap();
    assert!(output.status.success());
    let metrics = stdout_json(&output);
    assert_eq!(metrics["ok"], true);
    assert_eq!(metrics["metrics"]["officials_count"], 1);
    assert_eq!(metrics["metrics"]["status_counts"]["POSITIONED"], 1);

    let output = officials(&db)
        .args(["delete", &official_id])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = officials(&db).arg("officials").output().unwrap();
    assert!(output.status.success());
    assert!(stdout_json(&output).as_array().unwrap().is_empty());
}

#[test]
fn create_with_missing_fields_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    officials(&dir.path().join("officials.db"))
        .args(["create", "--name", "Solo"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"ok\": false"))
        .stdout(predicate::str::contains("missing required fields"))
        .stdout(predicate::str::contains("document_id"));
}

#[test]
fn unknown_status_is_rejected_by_argument_parsing() {
    let dir = tempfile::tempdir().unwrap();
    officials(&dir.path().join("officials.db"))
        .args(["status", "8f14e45f-ceea-467f-a0e6-1b3b1b2b2b2b", "RETIRED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown status"));
}

#[test]
fn deleting_unknown_official_fails() {
    let dir = tempfile::tempdir().unwrap();
    officials(&dir.path().join("officials.db"))
        .args(["delete", "8f14e45f-ceea-467f-a0e6-1b3b1b2b2b2b"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("official not found"));
}
