//! End-to-end tests for the `attend` binary.
//!
//! Drives the interactive menu through a piped stdin script against a
//! store in a temp directory (via `ATTEND_STORE_PATH`) and checks both
//! the printed notices and the on-disk results.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn attend_binary() -> String {
    env!("CARGO_BIN_EXE_attend").to_string()
}

/// Runs a full session with the given stdin script, store and cwd in
/// `temp`. Returns captured stdout.
fn run_session(temp: &Path, script: &str) -> String {
    let mut child = Command::new(attend_binary())
        .current_dir(temp)
        .env("ATTEND_STORE_PATH", temp.join("attend.db"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn attend");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(script.as_bytes())
        .expect("failed to write script");

    let output = child.wait_with_output().expect("failed to wait for attend");
    assert!(
        output.status.success(),
        "attend should exit cleanly: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is UTF-8")
}

#[test]
fn add_mark_export_flow() {
    let temp = TempDir::new().unwrap();

    // Add Asha, mark enter then exit, export, exit.
    let stdout = run_session(temp.path(), "1\nAsha\n2\n1\n1\n2\n1\n2\n4\n5\n");

    assert!(stdout.contains("Asha added successfully."));
    assert!(stdout.contains("Enter marked at "));
    assert!(stdout.contains("Exit marked at "));
    assert!(stdout.contains("Data exported to attendance_export.csv"));
    assert!(stdout.contains("Goodbye!"));

    let csv = std::fs::read_to_string(temp.path().join("attendance_export.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2, "1 header + 1 record");
    assert_eq!(lines[0], "Name,Date,Enter Time,Exit Time,Status,Reason");
    assert!(lines[1].starts_with("Asha,"));
    assert!(lines[1].contains(",Present,"));
}

#[test]
fn export_with_no_records_writes_no_file() {
    let temp = TempDir::new().unwrap();

    let stdout = run_session(temp.path(), "4\n5\n");

    assert!(stdout.contains("No data to export."));
    assert!(!temp.path().join("attendance_export.csv").exists());
}

#[test]
fn records_survive_across_sessions() {
    let temp = TempDir::new().unwrap();

    let stdout = run_session(temp.path(), "1\nAsha\n2\n1\n3\nSick\n5\n");
    assert!(stdout.contains("Leave marked with reason: Sick"));

    // A second session against the same store sees the record and
    // rejects a second leave for the day.
    let stdout = run_session(temp.path(), "2\n1\n3\nTravel\n3\n5\n");
    assert!(stdout.contains("Cannot mark: an attendance record already exists for today"));
    assert!(stdout.contains("Sick"));
}

#[test]
fn duplicate_employee_rejected_across_sessions() {
    let temp = TempDir::new().unwrap();

    run_session(temp.path(), "1\nAsha\n5\n");
    let stdout = run_session(temp.path(), "1\nAsha\n5\n");
    assert!(stdout.contains("Employee already exists."));
}
